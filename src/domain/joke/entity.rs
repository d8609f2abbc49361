use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// A moderator-approved joke served to the new-tab clients.
///
/// Jokes are born only from approved submissions; their `content` has passed
/// the content formatter. After creation only the vote counters and the
/// `is_active` soft-delete flag change. Hard deletion happens solely in the
/// dedup maintenance sweep.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Joke {
    /// Unique identifier for this joke
    pub id: Uuid,

    /// Formatted display text
    pub content: String,

    /// Count of up votes, never negative
    pub up_votes: i32,

    /// Count of down votes, never negative
    pub down_votes: i32,

    /// Soft-delete flag; only active jokes are served
    pub is_active: bool,

    /// Timestamp when the joke went live, immutable
    pub created_at: DateTime<Utc>,
}

impl Joke {
    /// Creates a new active joke from formatted content.
    pub fn new(content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            content,
            up_votes: 0,
            down_votes: 0,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    /// Net score used to pick the survivor in the dedup sweep.
    pub fn net_votes(&self) -> i32 {
        self.up_votes - self.down_votes
    }
}

/// A reader's verdict on a joke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Vote {
    Up,
    Down,
}
