use crate::events::PushEvent;
use crate::models::{
    AdminCurrentPoll, CumulativeResults, GroupResults, Poll, PollGroup, PollId, PollStatus,
};
use crate::state::Step;
use crate::voting::mfk::empty_results;
use log::debug;

// Which admin buttons are usable right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub create: bool,
    pub start: bool,
    pub next: bool,
    pub end: bool,
}

/// The Marry/Fuck/Kill admin console.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdminPollView {
    pub poll: Option<Poll>,
    pub current_group: Option<PollGroup>,
    pub live: Option<GroupResults>,
    pub polls: Vec<Poll>,
    pub cumulative: Option<CumulativeResults>,
}

impl AdminPollView {
    pub fn poll_id(&self) -> Option<PollId> {
        self.poll.as_ref().map(|poll| poll.id)
    }

    pub fn on_event(&mut self, event: &PushEvent) -> Step {
        match event {
            PushEvent::PollStarted { .. } => Step::reload().with_notice("Poll has started!"),
            PushEvent::GroupChanged { .. } => Step::reload().with_notice("Moved to next group"),
            PushEvent::PollEnded { .. } => Step::reload().with_notice("Poll has ended"),
            PushEvent::ResultsUpdated(results) => {
                if self.apply_live(results.clone()) {
                    Step::rerender()
                } else {
                    debug!("Ignoring results for group {}", results.group_id);
                    Step::nothing()
                }
            }
            _ => Step::nothing(),
        }
    }

    pub fn apply_current(&mut self, current: Option<AdminCurrentPoll>) {
        let Some(current) = current else {
            self.poll = None;
            self.current_group = None;
            self.live = None;
            return;
        };

        let old_group = self.current_group.as_ref().map(|group| group.id);
        let new_group = current.current_group.as_ref().map(|group| group.id);
        if old_group != new_group {
            self.live = None;
        }
        if self.poll_id() != Some(current.poll.id) {
            self.cumulative = None;
        }

        self.poll = Some(current.poll);
        self.current_group = current.current_group;
    }

    // Only results for the group on screen are kept; returns whether they were
    pub fn apply_live(&mut self, results: GroupResults) -> bool {
        let Some(group) = self.current_group.as_mut() else {
            return false;
        };
        if group.id != results.group_id {
            return false;
        }
        group.submission_count = Some(results.total_submissions);
        self.live = Some(results);
        true
    }

    // The backend has no results for a group until its first submission
    pub fn apply_no_votes_yet(&mut self) {
        if let Some(results) = self.current_group.as_ref().map(empty_results) {
            self.apply_live(results);
        }
    }

    pub fn status(&self) -> Option<PollStatus> {
        self.poll.as_ref().map(|poll| poll.status)
    }

    pub fn controls(&self) -> Controls {
        match self.poll.as_ref() {
            None => Controls {
                create: true,
                start: false,
                next: false,
                end: false,
            },
            Some(poll) => match poll.status {
                PollStatus::Setup => Controls {
                    create: false,
                    start: true,
                    next: false,
                    end: false,
                },
                PollStatus::Active => Controls {
                    create: false,
                    start: false,
                    next: poll.has_next_group(),
                    end: true,
                },
                PollStatus::Ended => Controls {
                    create: true,
                    start: false,
                    next: false,
                    end: false,
                },
            },
        }
    }

    pub fn needs_live_results(&self) -> bool {
        self.status() == Some(PollStatus::Active)
            && self.current_group.is_some()
            && self.live.is_none()
    }

    pub fn needs_cumulative(&self) -> bool {
        self.status() == Some(PollStatus::Ended) && self.cumulative.is_none()
    }
}
