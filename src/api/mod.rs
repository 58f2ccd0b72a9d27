pub mod http;

use crate::error::ClientError;
use crate::models::{
    AdminCurrentPoll, AdminCurrentSession, Advance, CreatedPoll, CreatedSession,
    CumulativeResults, GroupId, GroupResults, Image, ImageId, MfkSubmission, NamedImage, Poll,
    PollId, QrCode, SessionId, SmashPassBallot, SmashPassResults, SmashPassSession,
    SubmitReceipt, VoteReceipt, VoterCurrentPoll, VoterCurrentSession,
};
use async_trait::async_trait;

pub use http::HttpApi;

// Which join page a QR code should point at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrTarget {
    Poll,
    SmashPass,
}

/// Every backend call the admin consoles and voting pages make.
///
/// "Current" lookups return `Ok(None)` when the backend reports nothing active.
#[async_trait]
pub trait VotingApi: Send + Sync {
    // Image library
    async fn list_images(&self) -> Result<Vec<Image>, ClientError>;
    async fn toggle_image(&self, image_id: ImageId) -> Result<Image, ClientError>;
    async fn rename_image(&self, image_id: ImageId, new_name: &str) -> Result<(), ClientError>;
    async fn delete_image(&self, image_id: ImageId) -> Result<(), ClientError>;
    async fn slideshow_images(&self) -> Result<Vec<NamedImage>, ClientError>;
    async fn qr_code(&self, target: QrTarget) -> Result<QrCode, ClientError>;

    // Marry/Fuck/Kill administration
    async fn create_poll(&self) -> Result<CreatedPoll, ClientError>;
    async fn current_poll(&self) -> Result<Option<AdminCurrentPoll>, ClientError>;
    async fn list_polls(&self) -> Result<Vec<Poll>, ClientError>;
    async fn start_poll(&self, poll_id: PollId) -> Result<Poll, ClientError>;
    async fn next_group(&self, poll_id: PollId) -> Result<Poll, ClientError>;
    async fn end_poll(&self, poll_id: PollId) -> Result<Poll, ClientError>;
    // `None` while the current group has no submissions yet
    async fn current_group_results(
        &self,
        poll_id: PollId,
    ) -> Result<Option<GroupResults>, ClientError>;
    async fn cumulative_results(
        &self,
        poll_id: PollId,
    ) -> Result<Option<CumulativeResults>, ClientError>;

    // Marry/Fuck/Kill voting
    async fn voter_current_poll(&self) -> Result<Option<VoterCurrentPoll>, ClientError>;
    async fn submit_ballot(&self, submission: &MfkSubmission) -> Result<SubmitReceipt, ClientError>;
    async fn group_results(&self, group_id: GroupId) -> Result<Option<GroupResults>, ClientError>;

    // Smash or Pass administration
    async fn create_session(&self) -> Result<CreatedSession, ClientError>;
    async fn current_session(&self) -> Result<Option<AdminCurrentSession>, ClientError>;
    async fn list_sessions(&self) -> Result<Vec<SmashPassSession>, ClientError>;
    async fn start_session(&self, session_id: SessionId) -> Result<SmashPassSession, ClientError>;
    async fn advance_session(&self, session_id: SessionId) -> Result<Advance, ClientError>;
    async fn session_results(&self, session_id: SessionId) -> Result<SmashPassResults, ClientError>;

    // Smash or Pass voting
    async fn voter_current_session(&self) -> Result<Option<VoterCurrentSession>, ClientError>;
    async fn submit_vote(&self, ballot: &SmashPassBallot) -> Result<VoteReceipt, ClientError>;
}
