mod admin;
#[cfg(test)]
mod testing;
mod vote;

use crate::api::{QrTarget, VotingApi};
use crate::commands::{self, Command};
use crate::config::Role;
use crate::error::ClientError;
use crate::events::{PushEvent, Room, Topic};
use crate::render;
use crate::state::{AdminPollView, Followup, SmashPassAdminView, Slideshow, Step, VoterView};
use crate::voting::smashpass::bulk_activation;
use log::{debug, info};
use std::sync::Arc;

/// Owns the view state for one console and drives it from push events,
/// backend reloads and typed commands. Every method returns the lines to print.
pub struct Controller {
    api: Arc<dyn VotingApi>,
    role: Role,
    admin: AdminPollView,
    smashpass: SmashPassAdminView,
    voter: VoterView,
    slideshow: Slideshow,
}

impl Controller {
    pub fn new(api: Arc<dyn VotingApi>, role: Role) -> Self {
        Self {
            api,
            role,
            admin: AdminPollView::default(),
            smashpass: SmashPassAdminView::default(),
            voter: VoterView::default(),
            slideshow: Slideshow::new(Vec::new()),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    // Rooms this console joins
    pub fn topics(&self) -> Vec<Topic> {
        let rooms: &[Room] = match self.role {
            Role::Admin => &[Room::Poll],
            Role::SmashPassAdmin => &[Room::SmashPass],
            Role::Voter => &[Room::Connection, Room::Poll, Room::SmashPass],
            Role::Slideshow => &[],
        };
        Topic::in_rooms(rooms)
    }

    pub async fn handle_event(&mut self, event: &PushEvent) -> Result<Vec<String>, ClientError> {
        debug!("Applying {} to {:?} console", event.topic().as_str(), self.role);

        let step = match self.role {
            Role::Admin => self.admin.on_event(event),
            Role::SmashPassAdmin => self.smashpass.on_event(event),
            Role::Voter => self.voter.on_event(event),
            Role::Slideshow => Step::nothing(),
        };

        let mut out = Vec::new();
        if let Some(notice) = step.notice {
            info!("{}", notice);
            out.push(notice);
        }
        match step.followup {
            Followup::Nothing => {}
            Followup::Rerender => out.push(self.render()),
            Followup::Reload => {
                self.reload().await?;
                out.push(self.render());
            }
        }
        Ok(out)
    }

    /// Pulls fresh state for this console from the backend.
    pub async fn reload(&mut self) -> Result<(), ClientError> {
        match self.role {
            Role::Admin => self.reload_admin().await,
            Role::SmashPassAdmin => self.reload_smashpass().await,
            Role::Voter => self.reload_voter().await,
            Role::Slideshow => {
                let images = self.api.slideshow_images().await?;
                // Keep the position unless the library changed
                if images != self.slideshow.images() {
                    info!("Slideshow loaded {} image(s)", images.len());
                    self.slideshow = Slideshow::new(images);
                }
                Ok(())
            }
        }
    }

    pub fn render(&self) -> String {
        match self.role {
            Role::Admin => {
                let mut out = render::admin_status(&self.admin);
                if let Some(live) = self.admin.live.as_ref() {
                    out.push('\n');
                    out.push_str(&render::live_results(live));
                }
                if let Some(cumulative) = self.admin.cumulative.as_ref() {
                    out.push('\n');
                    out.push_str(&render::cumulative_grid(cumulative));
                }
                out
            }
            Role::SmashPassAdmin => {
                let mut out = render::smashpass_admin(&self.smashpass);
                if let Some(results) = self.smashpass.results.as_ref() {
                    out.push('\n');
                    out.push_str(&render::smashpass_results(results));
                }
                out
            }
            Role::Voter => render::voter(&self.voter),
            Role::Slideshow => render::slide(self.slideshow.current()),
        }
    }

    pub async fn execute(&mut self, command: Command) -> Result<Vec<String>, ClientError> {
        debug!("Executing {:?}", command);

        match command {
            Command::Help => Ok(vec![commands::help(self.role).to_string()]),
            Command::Refresh => {
                self.reload().await?;
                Ok(vec![self.render()])
            }

            Command::Images
            | Command::Toggle(_)
            | Command::Activate(_)
            | Command::Rename(..)
            | Command::Delete(_)
            | Command::Qr => self.execute_library(command).await,

            Command::CreatePoll
            | Command::StartPoll
            | Command::NextGroup
            | Command::EndPoll
            | Command::Polls
            | Command::Results(_) => self.execute_poll_admin(command).await,

            Command::CreateSession
            | Command::StartSession
            | Command::NextImage
            | Command::Sessions
            | Command::SessionResults(_)
            | Command::Apply(_) => self.execute_smashpass_admin(command).await,

            Command::Select(_)
            | Command::Assign { .. }
            | Command::Unassign(_)
            | Command::Submit
            | Command::Vote(_) => self.execute_vote(command).await,

            Command::SlideNext
            | Command::SlidePrevious
            | Command::Grid
            | Command::CloseGrid
            | Command::Jump(_) => self.execute_slideshow(command),
        }
    }

    async fn execute_library(&mut self, command: Command) -> Result<Vec<String>, ClientError> {
        match command {
            Command::Images => {
                let images = self.api.list_images().await?;
                Ok(vec![render::image_list(&images)])
            }
            Command::Toggle(image_id) => {
                let image = self.api.toggle_image(image_id).await?;
                let state = if image.is_active { "active" } else { "inactive" };
                info!("Image {} is now {}", image.id, state);
                Ok(vec![format!("{} is now {}", image.display_name(), state)])
            }
            Command::Activate(active) => {
                let images = self.api.list_images().await?;
                let pending = bulk_activation(&images, active);
                for image_id in &pending {
                    self.api.toggle_image(*image_id).await?;
                }
                let verb = if active { "Activated" } else { "Deactivated" };
                info!("{} {} image(s)", verb, pending.len());
                Ok(vec![format!("{} {} images", verb, pending.len())])
            }
            Command::Rename(image_id, new_name) => {
                self.api.rename_image(image_id, &new_name).await?;
                info!("Renamed image {} to {:?}", image_id, new_name);
                Ok(vec![format!("Renamed image {} to {}", image_id, new_name)])
            }
            Command::Delete(image_id) => {
                self.api.delete_image(image_id).await?;
                info!("Deleted image {}", image_id);
                Ok(vec![format!("Deleted image {}", image_id)])
            }
            Command::Qr => {
                let target = match self.role {
                    Role::SmashPassAdmin => QrTarget::SmashPass,
                    _ => QrTarget::Poll,
                };
                let qr = self.api.qr_code(target).await?;
                Ok(vec![format!("Scan to join: {}", qr.url)])
            }
            other => Err(ClientError::NotAvailable(format!(
                "{:?} is not a library command",
                other
            ))),
        }
    }
}
