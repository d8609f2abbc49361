use serde::Serialize;
use ts_rs::TS;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct SubmitJokeRequest {
    pub content: String,
    pub submitted_by: Option<String>,
}

/// Outcome of a submission attempt.
///
/// Duplicates are a recognized, expected outcome and deliberately
/// success-shaped: the submitter learns the joke is already in the
/// collection without seeing how detection works.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "status", rename_all = "snake_case")]
#[ts(export)]
pub enum SubmitJokeResponse {
    Accepted { submission_id: Uuid },
    Duplicate { message: String },
}
