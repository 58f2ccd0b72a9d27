use crate::voting::{CandidateTally, Category};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub type ImageId = i64;
pub type PollId = i64;
pub type GroupId = i64;
pub type SessionId = i64;

// Filename without its last extension, the way images are captioned
pub fn display_name(filename: &str) -> &str {
    match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() && !ext.contains('/') => stem,
        _ => filename,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub filename: String,
    pub is_active: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Image {
    pub fn display_name(&self) -> &str {
        display_name(&self.filename)
    }
}

// Image entry with the caption precomputed by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedImage {
    pub id: ImageId,
    pub filename: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenameRequest {
    pub new_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QrCode {
    // Base64 PNG data URL
    pub qr_code: String,
    pub url: String,
}

// ---------------------------------------------------------------------------
// Marry/Fuck/Kill polls
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PollStatus {
    Setup,
    Active,
    Ended,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: PollId,
    pub status: PollStatus,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
    pub current_group: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub total_groups: usize,
}

impl Poll {
    pub fn has_next_group(&self) -> bool {
        match self.current_group {
            Some(current) => current + 1 < self.total_groups as i64,
            None => self.total_groups > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollGroup {
    pub id: GroupId,
    pub poll_id: PollId,
    pub group_number: i64,
    pub images: Vec<Image>,
    pub created_at: Option<NaiveDateTime>,
    // Only present on the admin view of the current group
    #[serde(default)]
    pub submission_count: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedPoll {
    pub poll: Poll,
    pub groups_created: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminCurrentPoll {
    pub poll: Poll,
    pub current_group: Option<PollGroup>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterCurrentPoll {
    pub poll_id: PollId,
    pub group: PollGroup,
    pub has_submitted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResult {
    pub image_id: ImageId,
    pub filename: String,
    pub marry: u32,
    #[serde(rename = "f")]
    pub fuck: u32,
    pub kill: u32,
    pub marry_pct: f64,
    #[serde(rename = "f_pct")]
    pub fuck_pct: f64,
    pub kill_pct: f64,
}

impl ImageResult {
    pub fn tally(&self) -> CandidateTally {
        CandidateTally::new(self.filename.clone(), self.marry, self.fuck, self.kill)
    }

    // Share of all group submissions, as reported by the backend
    pub fn share(&self, category: Category) -> f64 {
        match category {
            Category::Marry => self.marry_pct,
            Category::Fuck => self.fuck_pct,
            Category::Kill => self.kill_pct,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupResults {
    pub group_id: GroupId,
    pub total_submissions: u32,
    pub results: Vec<ImageResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeImageResult {
    pub image_id: ImageId,
    pub filename: String,
    pub marry: u32,
    #[serde(rename = "f")]
    pub fuck: u32,
    pub kill: u32,
    pub total_votes: u32,
    pub marry_pct: f64,
    #[serde(rename = "f_pct")]
    pub fuck_pct: f64,
    pub kill_pct: f64,
}

impl CumulativeImageResult {
    pub fn tally(&self) -> CandidateTally {
        CandidateTally::new(self.filename.clone(), self.marry, self.fuck, self.kill)
    }

    pub fn votes(&self, category: Category) -> u32 {
        match category {
            Category::Marry => self.marry,
            Category::Fuck => self.fuck,
            Category::Kill => self.kill,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CumulativeResults {
    pub poll_id: PollId,
    pub total_submissions: u32,
    pub results: Vec<CumulativeImageResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MfkSubmission {
    pub poll_id: PollId,
    pub group_id: GroupId,
    pub marry_image_id: ImageId,
    pub f_image_id: ImageId,
    pub kill_image_id: ImageId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitReceipt {
    pub success: bool,
    pub results: Option<GroupResults>,
}

// ---------------------------------------------------------------------------
// Smash or Pass sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Setup,
    Active,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SmashOrPass {
    Smash,
    Pass,
}

impl SmashOrPass {
    pub fn as_str(self) -> &'static str {
        match self {
            SmashOrPass::Smash => "smash",
            SmashOrPass::Pass => "pass",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmashPassSession {
    pub id: SessionId,
    pub status: SessionStatus,
    pub current_image_index: usize,
    #[serde(default)]
    pub image_order: Vec<ImageId>,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
    pub created_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedSession {
    pub session: SmashPassSession,
    pub total_images: usize,
}

// Image with its running Smash/Pass counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveImage {
    pub id: ImageId,
    pub filename: String,
    pub name: String,
    pub smash_count: u32,
    pub pass_count: u32,
    pub total_votes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminCurrentSession {
    pub session: SmashPassSession,
    pub current_image: Option<LiveImage>,
    pub total_images: usize,
    pub images_remaining: usize,
}

// Response of advancing a session: either the moved session or a completion marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Advance {
    Completed {
        session: SmashPassSession,
        completed: bool,
    },
    Moved(SmashPassSession),
}

impl Advance {
    pub fn session(&self) -> &SmashPassSession {
        match self {
            Advance::Completed { session, .. } => session,
            Advance::Moved(session) => session,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmashPassResults {
    pub session_id: SessionId,
    pub smashes: Vec<LiveImage>,
    pub passes: Vec<LiveImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoterCurrentSession {
    pub session_id: SessionId,
    pub image: NamedImage,
    pub has_voted: bool,
    pub vote: Option<SmashOrPass>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmashPassBallot {
    pub session_id: SessionId,
    pub image_id: ImageId,
    pub vote: SmashOrPass,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub success: bool,
    pub smash_count: u32,
    pub pass_count: u32,
}
