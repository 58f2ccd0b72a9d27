pub mod feed;

use crate::models::{GroupResults, ImageId, PollId, SessionId};
use log::warn;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

// Greeting payload the backend sends on connect and room joins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub data: String,
}

/// The backend's push-event catalogue. On the wire each event is
/// `{"event": "<name>", "data": <payload>}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum PushEvent {
    Connected(Notice),
    Joined(Notice),
    JoinedSmashpass(Notice),
    PollStarted {
        poll_id: PollId,
    },
    GroupChanged {
        poll_id: PollId,
        group_number: i64,
    },
    PollEnded {
        poll_id: PollId,
    },
    ResultsUpdated(GroupResults),
    SmashpassStarted {
        session_id: SessionId,
    },
    SmashpassNextImage {
        session_id: SessionId,
        image_index: usize,
    },
    SmashpassCompleted {
        session_id: SessionId,
    },
    SmashpassVoteUpdate {
        session_id: SessionId,
        image_id: ImageId,
        smash_count: u32,
        pass_count: u32,
    },
    VoteChanged(serde_json::Value),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    Connected,
    Joined,
    JoinedSmashpass,
    PollStarted,
    GroupChanged,
    PollEnded,
    ResultsUpdated,
    SmashpassStarted,
    SmashpassNextImage,
    SmashpassCompleted,
    SmashpassVoteUpdate,
    VoteChanged,
}

// Backend broadcast rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Connection,
    Poll,
    SmashPass,
}

impl Topic {
    pub const ALL: [Topic; 12] = [
        Topic::Connected,
        Topic::Joined,
        Topic::JoinedSmashpass,
        Topic::PollStarted,
        Topic::GroupChanged,
        Topic::PollEnded,
        Topic::ResultsUpdated,
        Topic::SmashpassStarted,
        Topic::SmashpassNextImage,
        Topic::SmashpassCompleted,
        Topic::SmashpassVoteUpdate,
        Topic::VoteChanged,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Topic::Connected => "connected",
            Topic::Joined => "joined",
            Topic::JoinedSmashpass => "joined_smashpass",
            Topic::PollStarted => "poll_started",
            Topic::GroupChanged => "group_changed",
            Topic::PollEnded => "poll_ended",
            Topic::ResultsUpdated => "results_updated",
            Topic::SmashpassStarted => "smashpass_started",
            Topic::SmashpassNextImage => "smashpass_next_image",
            Topic::SmashpassCompleted => "smashpass_completed",
            Topic::SmashpassVoteUpdate => "smashpass_vote_update",
            Topic::VoteChanged => "vote_changed",
        }
    }

    pub fn room(self) -> Room {
        match self {
            Topic::Connected | Topic::Joined | Topic::JoinedSmashpass | Topic::VoteChanged => {
                Room::Connection
            }
            Topic::PollStarted | Topic::GroupChanged | Topic::PollEnded | Topic::ResultsUpdated => {
                Room::Poll
            }
            Topic::SmashpassStarted
            | Topic::SmashpassNextImage
            | Topic::SmashpassCompleted
            | Topic::SmashpassVoteUpdate => Room::SmashPass,
        }
    }

    pub fn in_rooms(rooms: &[Room]) -> Vec<Topic> {
        Topic::ALL
            .into_iter()
            .filter(|topic| rooms.contains(&topic.room()))
            .collect()
    }
}

impl PushEvent {
    pub fn topic(&self) -> Topic {
        match self {
            PushEvent::Connected(_) => Topic::Connected,
            PushEvent::Joined(_) => Topic::Joined,
            PushEvent::JoinedSmashpass(_) => Topic::JoinedSmashpass,
            PushEvent::PollStarted { .. } => Topic::PollStarted,
            PushEvent::GroupChanged { .. } => Topic::GroupChanged,
            PushEvent::PollEnded { .. } => Topic::PollEnded,
            PushEvent::ResultsUpdated(_) => Topic::ResultsUpdated,
            PushEvent::SmashpassStarted { .. } => Topic::SmashpassStarted,
            PushEvent::SmashpassNextImage { .. } => Topic::SmashpassNextImage,
            PushEvent::SmashpassCompleted { .. } => Topic::SmashpassCompleted,
            PushEvent::SmashpassVoteUpdate { .. } => Topic::SmashpassVoteUpdate,
            PushEvent::VoteChanged(_) => Topic::VoteChanged,
        }
    }
}

/// In-process fan-out of push events to every subscribed view.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PushEvent>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    // Returns how many subscriptions will see the event
    pub fn publish(&self, event: PushEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    pub fn subscribe(&self, topics: &[Topic]) -> Subscription {
        Subscription {
            receiver: self.sender.subscribe(),
            topics: topics.to_vec(),
        }
    }
}

pub struct Subscription {
    receiver: broadcast::Receiver<PushEvent>,
    topics: Vec<Topic>,
}

impl Subscription {
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    /// Next event on one of this subscription's topics; `None` once every
    /// bus handle is gone.
    pub async fn recv(&mut self) -> Option<PushEvent> {
        loop {
            match self.receiver.recv().await {
                Ok(event) if self.topics.contains(&event.topic()) => return Some(event),
                Ok(_) => continue,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Event subscription lagged, skipped {} event(s)", skipped);
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }
}
