use crate::error::ClientError;
use crate::events::PushEvent;
use crate::models::{
    GroupId, GroupResults, MfkSubmission, NamedImage, PollGroup, PollId, SessionId, SmashOrPass,
    SmashPassBallot, SubmitReceipt, VoterCurrentPoll, VoterCurrentSession,
};
use crate::state::Step;
use crate::state::ballot::Ballot;
use log::debug;

const WAITING: &str = "Waiting for voting to start...";
const ENDED: &str = "Voting session ended. Waiting for next...";

/// What a voter's page is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum VoterView {
    Waiting(String),
    Mfk {
        poll_id: PollId,
        group: PollGroup,
        ballot: Ballot,
    },
    MfkSubmitted {
        poll_id: PollId,
        group_id: GroupId,
        results: Option<GroupResults>,
    },
    SmashPass {
        session_id: SessionId,
        image: NamedImage,
        selected: Option<SmashOrPass>,
        submitted: bool,
    },
    SmashPassCompleted,
}

impl Default for VoterView {
    fn default() -> Self {
        VoterView::Waiting(WAITING.to_string())
    }
}

impl VoterView {
    pub fn name(&self) -> &'static str {
        match self {
            VoterView::Waiting(_) => "waiting",
            VoterView::Mfk { .. } => "mfk",
            VoterView::MfkSubmitted { .. } => "mfk-submitted",
            VoterView::SmashPass { .. } => "smashpass",
            VoterView::SmashPassCompleted => "smashpass-completed",
        }
    }

    pub fn on_event(&mut self, event: &PushEvent) -> Step {
        match event {
            PushEvent::PollStarted { .. } => Step::reload().with_notice("MFK Poll started!"),
            PushEvent::GroupChanged { .. } => Step::reload().with_notice("Next group!"),
            PushEvent::PollEnded { .. } => {
                *self = VoterView::Waiting(ENDED.to_string());
                Step::rerender().with_notice("Poll ended!")
            }
            PushEvent::ResultsUpdated(results) => match self {
                VoterView::MfkSubmitted {
                    group_id,
                    results: shown,
                    ..
                } if *group_id == results.group_id => {
                    *shown = Some(results.clone());
                    Step::rerender()
                }
                _ => Step::nothing(),
            },
            PushEvent::SmashpassStarted { .. } => {
                Step::reload().with_notice("Smash or Pass started!")
            }
            PushEvent::SmashpassNextImage { .. } => Step::reload().with_notice("Next image!"),
            PushEvent::SmashpassCompleted { .. } => {
                *self = VoterView::SmashPassCompleted;
                Step::rerender().with_notice("Smash or Pass completed!")
            }
            PushEvent::VoteChanged(_) => Step::reload().with_notice("Voting mode changed!"),
            _ => Step::nothing(),
        }
    }

    /// Rebuilds the page from the backend's view of what is running.
    /// An active Smash or Pass session takes precedence over a poll.
    pub fn apply_current(
        &mut self,
        session: Option<VoterCurrentSession>,
        poll: Option<VoterCurrentPoll>,
    ) {
        let previous = self.name();
        let next = if let Some(session) = session {
            VoterView::SmashPass {
                session_id: session.session_id,
                image: session.image,
                selected: session.vote,
                submitted: session.has_voted,
            }
        } else if let Some(current) = poll {
            self.from_poll(current)
        } else {
            VoterView::default()
        };

        if next.name() != previous {
            debug!("Voter view {} -> {}", previous, next.name());
        }
        *self = next;
    }

    fn from_poll(&mut self, current: VoterCurrentPoll) -> VoterView {
        if current.has_submitted {
            // Keep results already on screen for the same group
            let results = match std::mem::take(self) {
                VoterView::MfkSubmitted {
                    group_id, results, ..
                } if group_id == current.group.id => results,
                _ => None,
            };
            return VoterView::MfkSubmitted {
                poll_id: current.poll_id,
                group_id: current.group.id,
                results,
            };
        }

        // A refresh must not wipe a ballot in progress
        match std::mem::take(self) {
            VoterView::Mfk { ballot, .. } if ballot.group_id() == current.group.id => {
                VoterView::Mfk {
                    poll_id: current.poll_id,
                    group: current.group,
                    ballot,
                }
            }
            _ => VoterView::Mfk {
                poll_id: current.poll_id,
                ballot: Ballot::new(&current.group),
                group: current.group,
            },
        }
    }

    pub fn ballot_mut(&mut self) -> Result<&mut Ballot, ClientError> {
        match self {
            VoterView::Mfk { ballot, .. } => Ok(ballot),
            _ => Err(ClientError::NotAvailable("No group to vote on right now".to_string())),
        }
    }

    pub fn mfk_submission(&self) -> Result<MfkSubmission, ClientError> {
        match self {
            VoterView::Mfk { poll_id, ballot, .. } => Ok(ballot.to_submission(*poll_id)?),
            _ => Err(ClientError::NotAvailable("No group to vote on right now".to_string())),
        }
    }

    pub fn apply_receipt(&mut self, receipt: SubmitReceipt) {
        if let VoterView::Mfk { poll_id, group, .. } = self {
            let (poll_id, group_id) = (*poll_id, group.id);
            *self = VoterView::MfkSubmitted {
                poll_id,
                group_id,
                results: receipt.results,
            };
        }
    }

    // Group still waiting on its results fetch
    pub fn pending_results(&self) -> Option<GroupId> {
        match self {
            VoterView::MfkSubmitted {
                group_id,
                results: None,
                ..
            } => Some(*group_id),
            _ => None,
        }
    }

    pub fn apply_results(&mut self, fetched: GroupResults) {
        if let VoterView::MfkSubmitted { group_id, results, .. } = self {
            if *group_id == fetched.group_id {
                *results = Some(fetched);
            }
        }
    }

    pub fn choose(&mut self, vote: SmashOrPass) -> Result<(), ClientError> {
        match self {
            VoterView::SmashPass {
                submitted: false,
                selected,
                ..
            } => {
                *selected = Some(vote);
                Ok(())
            }
            VoterView::SmashPass { submitted: true, .. } => {
                Err(ClientError::NotAvailable("Already voted on this image".to_string()))
            }
            _ => Err(ClientError::NotAvailable("No image to vote on right now".to_string())),
        }
    }

    pub fn smashpass_ballot(&self) -> Result<SmashPassBallot, ClientError> {
        match self {
            VoterView::SmashPass {
                session_id,
                image,
                selected: Some(vote),
                submitted: false,
            } => Ok(SmashPassBallot {
                session_id: *session_id,
                image_id: image.id,
                vote: *vote,
            }),
            VoterView::SmashPass { submitted: true, .. } => {
                Err(ClientError::NotAvailable("Already voted on this image".to_string()))
            }
            VoterView::SmashPass { selected: None, .. } => {
                Err(ClientError::NotAvailable("Choose smash or pass first".to_string()))
            }
            _ => Err(ClientError::NotAvailable("No image to vote on right now".to_string())),
        }
    }

    pub fn mark_smashpass_submitted(&mut self) {
        if let VoterView::SmashPass { submitted, .. } = self {
            *submitted = true;
        }
    }
}
