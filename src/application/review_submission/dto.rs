use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::domain::{joke::entity::Joke, submission::entity::Submission};

/// Moderator identity recorded when the review request carries none.
pub const DEFAULT_REVIEWER: &str = "moderator";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum ReviewAction {
    Approve,
    Reject,
}

#[derive(Debug, Clone)]
pub struct ReviewSubmissionRequest {
    pub submission_id: Uuid,
    pub action: ReviewAction,
    pub reviewed_by: Option<String>,
    pub rejection_reason: Option<String>,
}

impl ReviewSubmissionRequest {
    pub fn reviewer(&self) -> &str {
        self.reviewed_by
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_REVIEWER)
    }
}

/// The reviewed submission, plus the joke it produced on approval.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct ReviewSubmissionResponse {
    pub submission: Submission,
    pub joke: Option<Joke>,
}
