pub mod admin;
pub mod ballot;
pub mod slideshow;
pub mod smashpass;
pub mod voter;

pub use admin::AdminPollView;
pub use slideshow::Slideshow;
pub use smashpass::SmashPassAdminView;
pub use voter::VoterView;

// What the controller must do after a view has absorbed an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Followup {
    Nothing,
    Rerender,
    // Fetch fresh state from the backend, then render
    Reload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub notice: Option<String>,
    pub followup: Followup,
}

impl Step {
    pub fn nothing() -> Self {
        Self {
            notice: None,
            followup: Followup::Nothing,
        }
    }

    pub fn rerender() -> Self {
        Self {
            notice: None,
            followup: Followup::Rerender,
        }
    }

    pub fn reload() -> Self {
        Self {
            notice: None,
            followup: Followup::Reload,
        }
    }

    pub fn with_notice(mut self, notice: &str) -> Self {
        self.notice = Some(notice.to_string());
        self
    }
}
