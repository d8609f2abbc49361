use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity::Submission;

/// Lifecycle events fanned out to the notification channels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SubmissionEvent {
    Received {
        submission: Submission,
    },
    Approved {
        submission: Submission,
        joke_id: Uuid,
    },
    Rejected {
        submission: Submission,
        reason: String,
    },
}

impl SubmissionEvent {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            SubmissionEvent::Received { .. } => "received",
            SubmissionEvent::Approved { .. } => "approved",
            SubmissionEvent::Rejected { .. } => "rejected",
        }
    }
}
