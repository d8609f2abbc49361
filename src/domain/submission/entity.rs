use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::errors::AlreadyReviewed;

/// Attribution recorded when a submission arrives without a name.
pub const ANONYMOUS_SUBMITTER: &str = "anonymous";

/// Reason recorded when a moderator rejects without giving one.
pub const DEFAULT_REJECTION_REASON: &str = "Rejected by moderator";

/// Core domain entity representing a user-proposed joke awaiting moderation.
///
/// A submission carries the raw text exactly as the user typed it; formatting
/// happens only at approval time so the submitter's voice is preserved until
/// a moderator decides.
///
/// # Lifecycle
/// 1. **Pending** - Initial state after submission, awaiting review
/// 2. **Approved** - Promoted into the public joke collection
/// 3. **Rejected** - Declined with a reason, never published
///
/// # Invariants
/// - `id` must be unique across all submissions
/// - `created_at` is immutable
/// - `reviewed_at`, `reviewed_by` and `rejection_reason` are written exactly
///   once, at the transition out of `Pending`
/// - Once `status` is terminal, no field changes again
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Submission {
    /// Unique identifier, assigned at creation
    pub id: Uuid,

    /// Raw submitted text, pre-formatting
    pub content: String,

    /// Free-text attribution chosen by the submitter
    pub submitted_by: String,

    /// Current position in the moderation lifecycle
    pub status: SubmissionStatus,

    /// Timestamp when the submission was received
    pub created_at: DateTime<Utc>,

    /// Timestamp of the review decision, set once
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Moderator who made the decision, set once
    pub reviewed_by: Option<String>,

    /// Reason given on rejection, set once
    pub rejection_reason: Option<String>,
}

impl Submission {
    /// Creates a new pending submission with a fresh id.
    pub fn new(content: String, submitted_by: Option<String>) -> Self {
        let submitted_by = submitted_by
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| ANONYMOUS_SUBMITTER.to_string());

        Self {
            id: Uuid::now_v7(),
            content,
            submitted_by,
            status: SubmissionStatus::Pending,
            created_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
            rejection_reason: None,
        }
    }

    /// Computes the terminal fields for an approval.
    ///
    /// The caller persists the result through the repository's conditional
    /// update; nothing here mutates state.
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyReviewed`] when the submission is not pending.
    pub fn approve(&self, reviewer: &str) -> Result<SubmissionReview, AlreadyReviewed> {
        if self.status != SubmissionStatus::Pending {
            return Err(AlreadyReviewed);
        }
        Ok(SubmissionReview {
            status: SubmissionStatus::Approved,
            reviewed_at: Utc::now(),
            reviewed_by: reviewer.to_string(),
            rejection_reason: None,
        })
    }

    /// Computes the terminal fields for a rejection.
    ///
    /// A missing or blank reason falls back to [`DEFAULT_REJECTION_REASON`].
    ///
    /// # Errors
    ///
    /// Returns [`AlreadyReviewed`] when the submission is not pending.
    pub fn reject(
        &self,
        reviewer: &str,
        reason: Option<String>,
    ) -> Result<SubmissionReview, AlreadyReviewed> {
        if self.status != SubmissionStatus::Pending {
            return Err(AlreadyReviewed);
        }
        let reason = reason
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| DEFAULT_REJECTION_REASON.to_string());

        Ok(SubmissionReview {
            status: SubmissionStatus::Rejected,
            reviewed_at: Utc::now(),
            reviewed_by: reviewer.to_string(),
            rejection_reason: Some(reason),
        })
    }
}

/// Moderation status for submission entities.
///
/// The lifecycle is one-way: `Pending` may move to either terminal state,
/// terminal states never move again.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, sqlx::Type, Default, PartialEq, Eq)]
#[sqlx(type_name = "text", rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum SubmissionStatus {
    /// Initial state, awaiting moderator review
    #[default]
    Pending,

    /// Promoted into the public joke collection
    Approved,

    /// Declined by a moderator
    Rejected,
}

impl SubmissionStatus {
    /// Returns true if the submission still awaits a decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }

    /// Returns true if the status can never change again.
    pub fn is_terminal(&self) -> bool {
        !self.is_pending()
    }
}

impl std::fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SubmissionStatus::Pending => "PENDING",
            SubmissionStatus::Approved => "APPROVED",
            SubmissionStatus::Rejected => "REJECTED",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for SubmissionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PENDING" => Ok(SubmissionStatus::Pending),
            "APPROVED" => Ok(SubmissionStatus::Approved),
            "REJECTED" => Ok(SubmissionStatus::Rejected),
            other => Err(format!("unknown submission status: {}", other)),
        }
    }
}

/// The terminal fields written when a submission leaves `Pending`.
///
/// Applied by the repository as a single conditional update so two
/// concurrent reviewers cannot both succeed on the same submission.
#[derive(Debug, Clone)]
pub struct SubmissionReview {
    pub status: SubmissionStatus,
    pub reviewed_at: DateTime<Utc>,
    pub reviewed_by: String,
    pub rejection_reason: Option<String>,
}
