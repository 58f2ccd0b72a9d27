use crate::events::PushEvent;
use crate::models::{
    AdminCurrentSession, LiveImage, SessionId, SessionStatus, SmashPassResults, SmashPassSession,
};
use crate::state::Step;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub create: bool,
    pub start: bool,
    pub next: bool,
}

/// The Smash or Pass admin console.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SmashPassAdminView {
    pub session: Option<SmashPassSession>,
    pub current_image: Option<LiveImage>,
    pub total_images: usize,
    pub images_remaining: usize,
    pub results: Option<SmashPassResults>,
    pub sessions: Vec<SmashPassSession>,
}

impl SmashPassAdminView {
    pub fn session_id(&self) -> Option<SessionId> {
        self.session.as_ref().map(|session| session.id)
    }

    pub fn status(&self) -> Option<SessionStatus> {
        self.session.as_ref().map(|session| session.status)
    }

    pub fn on_event(&mut self, event: &PushEvent) -> Step {
        match event {
            PushEvent::SmashpassStarted { .. } => {
                Step::reload().with_notice("Session has started!")
            }
            PushEvent::SmashpassNextImage { .. } => {
                Step::reload().with_notice("Moved to next image")
            }
            PushEvent::SmashpassCompleted { .. } => {
                Step::reload().with_notice("Session completed!")
            }
            PushEvent::SmashpassVoteUpdate {
                image_id,
                smash_count,
                pass_count,
                ..
            } => match self.current_image.as_mut() {
                Some(image) if image.id == *image_id => {
                    image.smash_count = *smash_count;
                    image.pass_count = *pass_count;
                    image.total_votes = smash_count.saturating_add(*pass_count);
                    Step::rerender()
                }
                _ => Step::nothing(),
            },
            _ => Step::nothing(),
        }
    }

    pub fn apply_current(&mut self, current: Option<AdminCurrentSession>) {
        let Some(current) = current else {
            self.session = None;
            self.current_image = None;
            self.total_images = 0;
            self.images_remaining = 0;
            return;
        };

        if self.session_id() != Some(current.session.id) {
            self.results = None;
        }
        self.session = Some(current.session);
        self.current_image = current.current_image;
        self.total_images = current.total_images;
        self.images_remaining = current.images_remaining;
    }

    // 1-based position of the image on screen
    pub fn position(&self) -> Option<usize> {
        let session = self.session.as_ref()?;
        (session.status == SessionStatus::Active).then_some(session.current_image_index + 1)
    }

    pub fn controls(&self) -> Controls {
        match self.status() {
            None | Some(SessionStatus::Completed) => Controls {
                create: true,
                start: false,
                next: false,
            },
            Some(SessionStatus::Setup) => Controls {
                create: false,
                start: true,
                next: false,
            },
            Some(SessionStatus::Active) => Controls {
                create: false,
                start: false,
                next: true,
            },
        }
    }

    pub fn needs_results(&self) -> bool {
        self.status() == Some(SessionStatus::Completed) && self.results.is_none()
    }
}
