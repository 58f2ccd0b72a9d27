use crate::api::{QrTarget, VotingApi};
use crate::error::ClientError;
use crate::models::{
    AdminCurrentPoll, AdminCurrentSession, Advance, CreatedPoll, CreatedSession, CumulativeResults,
    GroupId, GroupResults, Image, ImageId, ImageResult, LiveImage, MfkSubmission, NamedImage, Poll,
    PollGroup, PollId, PollStatus, QrCode, SessionId, SessionStatus, SmashPassBallot,
    SmashPassResults, SmashPassSession, SubmitReceipt, VoteReceipt, VoterCurrentPoll,
    VoterCurrentSession,
};
use async_trait::async_trait;
use std::sync::Mutex;

// In-memory backend with canned answers; records every call it receives
#[derive(Default)]
pub struct FakeApi {
    pub log: Mutex<Vec<String>>,
    pub images: Mutex<Vec<Image>>,
    pub slides: Mutex<Vec<NamedImage>>,
    pub current_poll: Mutex<Option<AdminCurrentPoll>>,
    pub group_results: Mutex<Option<GroupResults>>,
    pub cumulative: Mutex<Option<CumulativeResults>>,
    pub voter_poll: Mutex<Option<VoterCurrentPoll>>,
    pub submit_receipt: Mutex<Option<SubmitReceipt>>,
    pub current_session: Mutex<Option<AdminCurrentSession>>,
    pub advance: Mutex<Option<Advance>>,
    pub session_results: Mutex<Option<SmashPassResults>>,
    pub voter_session: Mutex<Option<VoterCurrentSession>>,
    pub vote_receipt: Mutex<Option<VoteReceipt>>,
}

impl FakeApi {
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.log.lock().unwrap().push(call.into());
    }
}

fn unstubbed<T>(what: &str) -> Result<T, ClientError> {
    Err(ClientError::Api {
        status: 500,
        message: format!("{} is not stubbed", what),
    })
}

fn stubbed<T: Clone>(slot: &Mutex<Option<T>>, what: &str) -> Result<T, ClientError> {
    match slot.lock().unwrap().clone() {
        Some(value) => Ok(value),
        None => unstubbed(what),
    }
}

#[async_trait]
impl VotingApi for FakeApi {
    async fn list_images(&self) -> Result<Vec<Image>, ClientError> {
        self.record("list_images");
        Ok(self.images.lock().unwrap().clone())
    }

    async fn toggle_image(&self, image_id: ImageId) -> Result<Image, ClientError> {
        self.record(format!("toggle_image {}", image_id));
        let mut images = self.images.lock().unwrap();
        match images.iter_mut().find(|image| image.id == image_id) {
            Some(image) => {
                image.is_active = !image.is_active;
                Ok(image.clone())
            }
            None => Err(ClientError::Api {
                status: 404,
                message: "Image not found".to_string(),
            }),
        }
    }

    async fn rename_image(&self, image_id: ImageId, _new_name: &str) -> Result<(), ClientError> {
        self.record(format!("rename_image {}", image_id));
        Ok(())
    }

    async fn delete_image(&self, image_id: ImageId) -> Result<(), ClientError> {
        self.record(format!("delete_image {}", image_id));
        Ok(())
    }

    async fn slideshow_images(&self) -> Result<Vec<NamedImage>, ClientError> {
        self.record("slideshow_images");
        Ok(self.slides.lock().unwrap().clone())
    }

    async fn qr_code(&self, _target: QrTarget) -> Result<QrCode, ClientError> {
        self.record("qr_code");
        Ok(QrCode {
            qr_code: "data:image/png;base64,".to_string(),
            url: "http://party.local/".to_string(),
        })
    }

    async fn create_poll(&self) -> Result<CreatedPoll, ClientError> {
        self.record("create_poll");
        unstubbed("create_poll")
    }

    async fn current_poll(&self) -> Result<Option<AdminCurrentPoll>, ClientError> {
        self.record("current_poll");
        Ok(self.current_poll.lock().unwrap().clone())
    }

    async fn list_polls(&self) -> Result<Vec<Poll>, ClientError> {
        self.record("list_polls");
        Ok(Vec::new())
    }

    async fn start_poll(&self, poll_id: PollId) -> Result<Poll, ClientError> {
        self.record(format!("start_poll {}", poll_id));
        unstubbed("start_poll")
    }

    async fn next_group(&self, poll_id: PollId) -> Result<Poll, ClientError> {
        self.record(format!("next_group {}", poll_id));
        unstubbed("next_group")
    }

    async fn end_poll(&self, poll_id: PollId) -> Result<Poll, ClientError> {
        self.record(format!("end_poll {}", poll_id));
        unstubbed("end_poll")
    }

    async fn current_group_results(
        &self,
        poll_id: PollId,
    ) -> Result<Option<GroupResults>, ClientError> {
        self.record(format!("current_group_results {}", poll_id));
        Ok(self.group_results.lock().unwrap().clone())
    }

    async fn cumulative_results(
        &self,
        poll_id: PollId,
    ) -> Result<Option<CumulativeResults>, ClientError> {
        self.record(format!("cumulative_results {}", poll_id));
        Ok(self.cumulative.lock().unwrap().clone())
    }

    async fn voter_current_poll(&self) -> Result<Option<VoterCurrentPoll>, ClientError> {
        self.record("voter_current_poll");
        Ok(self.voter_poll.lock().unwrap().clone())
    }

    async fn submit_ballot(
        &self,
        submission: &MfkSubmission,
    ) -> Result<SubmitReceipt, ClientError> {
        self.record(format!("submit_ballot {}", submission.group_id));
        stubbed(&self.submit_receipt, "submit_ballot")
    }

    async fn group_results(&self, group_id: GroupId) -> Result<Option<GroupResults>, ClientError> {
        self.record(format!("group_results {}", group_id));
        Ok(self.group_results.lock().unwrap().clone())
    }

    async fn create_session(&self) -> Result<CreatedSession, ClientError> {
        self.record("create_session");
        unstubbed("create_session")
    }

    async fn current_session(&self) -> Result<Option<AdminCurrentSession>, ClientError> {
        self.record("current_session");
        Ok(self.current_session.lock().unwrap().clone())
    }

    async fn list_sessions(&self) -> Result<Vec<SmashPassSession>, ClientError> {
        self.record("list_sessions");
        Ok(Vec::new())
    }

    async fn start_session(&self, session_id: SessionId) -> Result<SmashPassSession, ClientError> {
        self.record(format!("start_session {}", session_id));
        unstubbed("start_session")
    }

    async fn advance_session(&self, session_id: SessionId) -> Result<Advance, ClientError> {
        self.record(format!("advance_session {}", session_id));
        stubbed(&self.advance, "advance_session")
    }

    async fn session_results(
        &self,
        session_id: SessionId,
    ) -> Result<SmashPassResults, ClientError> {
        self.record(format!("session_results {}", session_id));
        stubbed(&self.session_results, "session_results")
    }

    async fn voter_current_session(&self) -> Result<Option<VoterCurrentSession>, ClientError> {
        self.record("voter_current_session");
        Ok(self.voter_session.lock().unwrap().clone())
    }

    async fn submit_vote(&self, ballot: &SmashPassBallot) -> Result<VoteReceipt, ClientError> {
        self.record(format!("submit_vote {}", ballot.image_id));
        stubbed(&self.vote_receipt, "submit_vote")
    }
}

pub fn library_image(id: ImageId, filename: &str, is_active: bool) -> Image {
    Image {
        id,
        filename: filename.to_string(),
        is_active,
        created_at: None,
    }
}

pub fn named_image(id: ImageId, name: &str) -> NamedImage {
    NamedImage {
        id,
        filename: format!("{}.png", name),
        name: name.to_string(),
    }
}

pub fn live_image(id: ImageId, filename: &str, smash_count: u32, pass_count: u32) -> LiveImage {
    LiveImage {
        id,
        filename: filename.to_string(),
        name: filename.to_string(),
        smash_count,
        pass_count,
        total_votes: smash_count + pass_count,
    }
}

pub fn smashpass_session(id: SessionId, status: SessionStatus, index: usize) -> SmashPassSession {
    SmashPassSession {
        id,
        status,
        current_image_index: index,
        image_order: vec![4, 5, 6],
        started_at: None,
        ended_at: None,
        created_at: None,
    }
}

pub fn poll(
    id: PollId,
    status: PollStatus,
    current_group: Option<i64>,
    total_groups: usize,
) -> Poll {
    Poll {
        id,
        status,
        started_at: None,
        ended_at: None,
        current_group,
        created_at: None,
        total_groups,
    }
}

// Three images with a clear winner per category
pub fn group_results(group_id: GroupId, total_submissions: u32) -> GroupResults {
    let result = |image_id: ImageId, filename: &str, marry, fuck, kill| ImageResult {
        image_id,
        filename: filename.to_string(),
        marry,
        fuck,
        kill,
        marry_pct: 0.0,
        fuck_pct: 0.0,
        kill_pct: 0.0,
    };
    GroupResults {
        group_id,
        total_submissions,
        results: vec![
            result(1, "alice.png", 3, 1, 0),
            result(2, "bob.png", 1, 2, 1),
            result(3, "carol.png", 0, 1, 3),
        ],
    }
}

pub fn voter_poll(group_id: GroupId, has_submitted: bool) -> VoterCurrentPoll {
    VoterCurrentPoll {
        poll_id: 1,
        group: PollGroup {
            id: group_id,
            poll_id: 1,
            group_number: 0,
            images: vec![
                library_image(1, "alice.png", true),
                library_image(2, "bob.png", true),
                library_image(3, "carol.png", true),
            ],
            created_at: None,
            submission_count: None,
        },
        has_submitted,
    }
}

pub fn voter_session(has_voted: bool) -> VoterCurrentSession {
    VoterCurrentSession {
        session_id: 2,
        image: named_image(9, "dave"),
        has_voted,
        vote: None,
    }
}
