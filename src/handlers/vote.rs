use crate::commands::Command;
use crate::error::ClientError;
use crate::handlers::Controller;
use crate::state::VoterView;
use log::info;

impl Controller {
    pub(super) async fn reload_voter(&mut self) -> Result<(), ClientError> {
        // Only one mode runs at a time; the poll is looked up when no session is live
        let session = self.api.voter_current_session().await?;
        let poll = match session {
            Some(_) => None,
            None => self.api.voter_current_poll().await?,
        };
        self.voter.apply_current(session, poll);
        self.fetch_pending_results().await
    }

    async fn fetch_pending_results(&mut self) -> Result<(), ClientError> {
        if let Some(group_id) = self.voter.pending_results() {
            if let Some(results) = self.api.group_results(group_id).await? {
                self.voter.apply_results(results);
            }
        }
        Ok(())
    }

    pub(super) async fn execute_vote(
        &mut self,
        command: Command,
    ) -> Result<Vec<String>, ClientError> {
        match command {
            Command::Select(image_id) => self.voter.ballot_mut()?.select(image_id)?,
            Command::Assign { image, category } => {
                let ballot = self.voter.ballot_mut()?;
                match image {
                    Some(image_id) => ballot.assign(image_id, category)?,
                    None => ballot.assign_selected(category)?,
                }
            }
            Command::Unassign(category) => {
                self.voter.ballot_mut()?.unassign(category);
            }
            Command::Vote(vote) => self.voter.choose(vote)?,
            Command::Submit => return self.submit().await,
            other => {
                return Err(ClientError::NotAvailable(format!(
                    "{:?} is not a voting command",
                    other
                )));
            }
        }
        Ok(vec![self.render()])
    }

    async fn submit(&mut self) -> Result<Vec<String>, ClientError> {
        match self.voter {
            VoterView::Mfk { .. } => {
                let submission = self.voter.mfk_submission()?;
                let receipt = self.api.submit_ballot(&submission).await?;
                info!("Submitted ballot for group {}", submission.group_id);
                self.voter.apply_receipt(receipt);
                self.fetch_pending_results().await?;
                Ok(vec!["Vote submitted!".to_string(), self.render()])
            }
            VoterView::SmashPass { .. } => {
                let ballot = self.voter.smashpass_ballot()?;
                let receipt = self.api.submit_vote(&ballot).await?;
                info!("Voted {} on image {}", ballot.vote.as_str(), ballot.image_id);
                self.voter.mark_smashpass_submitted();
                Ok(vec![
                    format!(
                        "Vote recorded! {} smash / {} pass so far",
                        receipt.smash_count, receipt.pass_count
                    ),
                    self.render(),
                ])
            }
            _ => Err(ClientError::NotAvailable("Nothing to vote on right now".to_string())),
        }
    }

    pub(super) fn execute_slideshow(
        &mut self,
        command: Command,
    ) -> Result<Vec<String>, ClientError> {
        match command {
            Command::SlideNext => self.slideshow.next(),
            Command::SlidePrevious => self.slideshow.previous(),
            Command::Grid => self.slideshow.show_grid(),
            Command::CloseGrid => self.slideshow.close_grid(),
            Command::Jump(index) => {
                if !self.slideshow.jump(index) {
                    return Err(ClientError::NotAvailable(format!("No image number {}", index + 1)));
                }
            }
            other => {
                return Err(ClientError::NotAvailable(format!(
                    "{:?} is not a slideshow command",
                    other
                )));
            }
        }
        Ok(vec![self.render()])
    }
}

#[cfg(test)]
mod tests {
    use crate::commands::Command;
    use crate::config::Role;
    use crate::error::ClientError;
    use crate::events::PushEvent;
    use crate::handlers::Controller;
    use crate::handlers::testing::{FakeApi, group_results, voter_poll, voter_session};
    use crate::models::{SmashOrPass, SubmitReceipt, VoteReceipt};
    use crate::state::VoterView;
    use crate::state::ballot::BallotError;
    use crate::voting::Category;
    use std::sync::Arc;

    #[tokio::test]
    async fn mfk_ballot_round_trip() {
        let api = Arc::new(FakeApi::default());
        *api.voter_poll.lock().unwrap() = Some(voter_poll(5, false));
        *api.submit_receipt.lock().unwrap() = Some(SubmitReceipt {
            success: true,
            results: None,
        });
        *api.group_results.lock().unwrap() = Some(group_results(5, 1));

        let mut controller = Controller::new(api.clone(), Role::Voter);
        controller.reload().await.unwrap();

        controller.execute(Command::Select(1)).await.unwrap();
        controller
            .execute(Command::Assign {
                image: None,
                category: Category::Marry,
            })
            .await
            .unwrap();

        let err = controller.execute(Command::Submit).await.unwrap_err();
        assert!(matches!(err, ClientError::Ballot(BallotError::Incomplete)));

        for (image, category) in [(2, Category::Fuck), (3, Category::Kill)] {
            controller
                .execute(Command::Assign {
                    image: Some(image),
                    category,
                })
                .await
                .unwrap();
        }
        let out = controller.execute(Command::Submit).await.unwrap();

        assert_eq!(out[0], "Vote submitted!");
        assert!(out[1].starts_with("Results (1 submissions)"));
        assert!(api.calls().contains(&"submit_ballot 5".to_string()));
        assert!(api.calls().contains(&"group_results 5".to_string()));
    }

    #[tokio::test]
    async fn poll_end_returns_voter_to_waiting() {
        let api = Arc::new(FakeApi::default());
        *api.voter_poll.lock().unwrap() = Some(voter_poll(5, false));

        let mut controller = Controller::new(api, Role::Voter);
        controller.reload().await.unwrap();
        let out = controller
            .handle_event(&PushEvent::PollEnded { poll_id: 1 })
            .await
            .unwrap();

        assert_eq!(
            out,
            vec![
                "Poll ended!".to_string(),
                "Voting session ended. Waiting for next...".to_string()
            ]
        );
    }

    #[tokio::test]
    async fn group_change_reloads_a_fresh_ballot() {
        let api = Arc::new(FakeApi::default());
        *api.voter_poll.lock().unwrap() = Some(voter_poll(5, true));

        let mut controller = Controller::new(api.clone(), Role::Voter);
        controller.reload().await.unwrap();
        assert!(matches!(controller.voter, VoterView::MfkSubmitted { .. }));

        *api.voter_poll.lock().unwrap() = Some(voter_poll(6, false));
        let out = controller
            .handle_event(&PushEvent::GroupChanged {
                poll_id: 1,
                group_number: 1,
            })
            .await
            .unwrap();

        assert_eq!(out[0], "Next group!");
        assert!(matches!(controller.voter, VoterView::Mfk { ref group, .. } if group.id == 6));
    }

    #[tokio::test]
    async fn smashpass_vote_is_chosen_then_submitted_once() {
        let api = Arc::new(FakeApi::default());
        *api.voter_session.lock().unwrap() = Some(voter_session(false));
        *api.vote_receipt.lock().unwrap() = Some(VoteReceipt {
            success: true,
            smash_count: 4,
            pass_count: 1,
        });

        let mut controller = Controller::new(api.clone(), Role::Voter);
        controller.reload().await.unwrap();
        assert_eq!(api.calls(), vec!["voter_current_session"]);

        controller.execute(Command::Vote(SmashOrPass::Smash)).await.unwrap();
        let out = controller.execute(Command::Submit).await.unwrap();
        assert_eq!(out[0], "Vote recorded! 4 smash / 1 pass so far");
        assert!(controller.execute(Command::Submit).await.is_err());
    }

    #[tokio::test]
    async fn voting_commands_need_something_to_vote_on() {
        let api = Arc::new(FakeApi::default());
        let mut controller = Controller::new(api, Role::Voter);
        controller.reload().await.unwrap();
        assert!(matches!(
            controller.execute(Command::Select(1)).await,
            Err(ClientError::NotAvailable(_))
        ));
        assert!(controller.execute(Command::Submit).await.is_err());
    }

    #[tokio::test]
    async fn slideshow_jump_is_bounds_checked() {
        let api = Arc::new(FakeApi::default());
        let mut controller = Controller::new(api, Role::Slideshow);
        controller.reload().await.unwrap();
        assert!(controller.execute(Command::Jump(0)).await.is_err());
    }
}
