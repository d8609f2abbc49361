use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum DomainError {
    #[error("Not found")]
    NotFound(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Infrastructure error: {0}")]
    InfrastructureError(String),
}

/// Returned when a review is attempted on a submission that already left
/// the pending state. Terminal states are immutable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("submission already reviewed")]
pub struct AlreadyReviewed;
