use crate::commands::Command;
use crate::error::ClientError;
use crate::handlers::Controller;
use crate::models::{Advance, PollStatus};
use crate::render;
use crate::voting::smashpass::activation_plan;
use log::{info, warn};

impl Controller {
    pub(super) async fn reload_admin(&mut self) -> Result<(), ClientError> {
        let current = self.api.current_poll().await?;
        self.admin.apply_current(current);

        if let Some(poll_id) = self.admin.poll_id() {
            if self.admin.needs_live_results() {
                match self.api.current_group_results(poll_id).await? {
                    Some(results) => {
                        self.admin.apply_live(results);
                    }
                    None => self.admin.apply_no_votes_yet(),
                }
            }
            if self.admin.needs_cumulative() {
                self.admin.cumulative = self.api.cumulative_results(poll_id).await?;
            }
        }
        Ok(())
    }

    pub(super) async fn reload_smashpass(&mut self) -> Result<(), ClientError> {
        let current = self.api.current_session().await?;
        self.smashpass.apply_current(current);

        if let Some(session_id) = self.smashpass.session_id() {
            if self.smashpass.needs_results() {
                self.smashpass.results = Some(self.api.session_results(session_id).await?);
            }
        }
        Ok(())
    }

    pub(super) async fn execute_poll_admin(
        &mut self,
        command: Command,
    ) -> Result<Vec<String>, ClientError> {
        let controls = self.admin.controls();

        let notice = match command {
            Command::CreatePoll => {
                if !controls.create {
                    return Err(ClientError::NotAvailable("A poll is already running".to_string()));
                }
                let created = self.api.create_poll().await?;
                info!("Created poll {} with {} groups", created.poll.id, created.groups_created);
                format!("Poll created with {} groups!", created.groups_created)
            }
            Command::StartPoll => {
                let poll_id = self.admin_poll_id()?;
                if !controls.start {
                    return Err(ClientError::NotAvailable("Poll is not ready to start".to_string()));
                }
                self.api.start_poll(poll_id).await?;
                info!("Started poll {}", poll_id);
                "Poll started!".to_string()
            }
            Command::NextGroup => {
                let poll_id = self.admin_poll_id()?;
                if !controls.next {
                    return Err(ClientError::NotAvailable(
                        "No more groups in this poll".to_string(),
                    ));
                }
                let poll = self.api.next_group(poll_id).await?;
                let group = poll.current_group.map(|n| n + 1).unwrap_or(0);
                format!("Moved to group {}", group)
            }
            Command::EndPoll => {
                let poll_id = self.admin_poll_id()?;
                if !controls.end {
                    return Err(ClientError::NotAvailable("Poll is not active".to_string()));
                }
                self.api.end_poll(poll_id).await?;
                info!("Ended poll {}", poll_id);
                "Poll ended".to_string()
            }
            Command::Polls => {
                self.admin.polls = self.api.list_polls().await?;
                if self.admin.polls.is_empty() {
                    return Ok(vec!["No polls yet".to_string()]);
                }
                let lines: Vec<String> = self
                    .admin
                    .polls
                    .iter()
                    .map(|poll| {
                        let status = match poll.status {
                            PollStatus::Setup => "setup",
                            PollStatus::Active => "active",
                            PollStatus::Ended => "ended",
                        };
                        format!("#{:<4} {:<7} {} groups", poll.id, status, poll.total_groups)
                    })
                    .collect();
                return Ok(vec![lines.join("\n")]);
            }
            Command::Results(poll_id) => {
                let poll_id = match poll_id {
                    Some(id) => id,
                    None => self.admin_poll_id()?,
                };
                return match self.api.cumulative_results(poll_id).await? {
                    Some(results) => Ok(vec![render::cumulative_grid(&results)]),
                    None => Ok(vec![format!("No results for poll {}", poll_id)]),
                };
            }
            other => {
                return Err(ClientError::NotAvailable(format!(
                    "{:?} is not a poll command",
                    other
                )));
            }
        };

        self.reload().await?;
        Ok(vec![notice, self.render()])
    }

    fn admin_poll_id(&self) -> Result<i64, ClientError> {
        self.admin
            .poll_id()
            .ok_or_else(|| ClientError::NotAvailable("No active poll".to_string()))
    }

    pub(super) async fn execute_smashpass_admin(
        &mut self,
        command: Command,
    ) -> Result<Vec<String>, ClientError> {
        let controls = self.smashpass.controls();

        let notice = match command {
            Command::CreateSession => {
                if !controls.create {
                    return Err(ClientError::NotAvailable(
                        "A session is already running".to_string(),
                    ));
                }
                let created = self.api.create_session().await?;
                info!(
                    "Created session {} with {} images",
                    created.session.id, created.total_images
                );
                format!("Session created with {} images!", created.total_images)
            }
            Command::StartSession => {
                let session_id = self.session_id()?;
                if !controls.start {
                    return Err(ClientError::NotAvailable(
                        "Session is not ready to start".to_string(),
                    ));
                }
                self.api.start_session(session_id).await?;
                "Session started!".to_string()
            }
            Command::NextImage => {
                let session_id = self.session_id()?;
                if !controls.next {
                    return Err(ClientError::NotAvailable("Session is not active".to_string()));
                }
                let advance = self.api.advance_session(session_id).await?;
                let session = advance.session();
                info!(
                    "Session {} is {:?} at index {}",
                    session.id, session.status, session.current_image_index
                );
                match advance {
                    Advance::Completed { .. } => "Session completed!".to_string(),
                    Advance::Moved(session) => {
                        format!("Moved to image {}", session.current_image_index + 1)
                    }
                }
            }
            Command::Sessions => {
                self.smashpass.sessions = self.api.list_sessions().await?;
                if self.smashpass.sessions.is_empty() {
                    return Ok(vec!["No sessions yet".to_string()]);
                }
                let lines: Vec<String> = self
                    .smashpass
                    .sessions
                    .iter()
                    .map(|session| {
                        format!(
                            "#{:<4} {:<9} {} images",
                            session.id,
                            format!("{:?}", session.status).to_lowercase(),
                            session.image_order.len()
                        )
                    })
                    .collect();
                return Ok(vec![lines.join("\n")]);
            }
            Command::SessionResults(session_id) => {
                let session_id = match session_id {
                    Some(id) => id,
                    None => self.session_id()?,
                };
                let results = self.api.session_results(session_id).await?;
                let text = render::smashpass_results(&results);
                if self.smashpass.session_id() == Some(session_id) {
                    self.smashpass.results = Some(results);
                }
                return Ok(vec![text]);
            }
            Command::Apply(session_id) => {
                let results = self.api.session_results(session_id).await?;
                let images = self.api.list_images().await?;
                let plan = activation_plan(&results, &images);
                if plan.is_empty() {
                    return Ok(vec!["Image library already matches these results".to_string()]);
                }
                for image_id in plan.toggles() {
                    if let Err(e) = self.api.toggle_image(image_id).await {
                        warn!("Failed to toggle image {}: {}", image_id, e);
                        return Err(e);
                    }
                }
                info!(
                    "Applied session {}: enabled {}, disabled {}",
                    session_id,
                    plan.enable.len(),
                    plan.disable.len()
                );
                return Ok(vec![format!(
                    "Enabled {} smashed and disabled {} passed images",
                    plan.enable.len(),
                    plan.disable.len()
                )]);
            }
            other => {
                return Err(ClientError::NotAvailable(format!(
                    "{:?} is not a session command",
                    other
                )));
            }
        };

        self.reload().await?;
        Ok(vec![notice, self.render()])
    }

    fn session_id(&self) -> Result<i64, ClientError> {
        self.smashpass
            .session_id()
            .ok_or_else(|| ClientError::NotAvailable("No active session".to_string()))
    }
}
