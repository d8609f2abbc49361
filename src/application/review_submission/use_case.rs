use std::sync::Arc;

use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    application::review_submission::dto::{
        ReviewAction, ReviewSubmissionRequest, ReviewSubmissionResponse,
    },
    domain::{
        joke::{entity::Joke, repository::JokeRepository},
        moderation::{
            duplicate::is_duplicate,
            format::{FormatError, format_content},
        },
        submission::{
            entity::{Submission, SubmissionStatus},
            errors::{AlreadyReviewed, DomainError},
            events::SubmissionEvent,
            repository::SubmissionRepository,
        },
    },
    infrastructure::notifications::queue::NotificationQueue,
};

#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("submission not found")]
    NotFound,
    #[error("submission was already reviewed")]
    AlreadyReviewed,
    #[error("content failed validation")]
    InvalidContent(Vec<FormatError>),
    #[error("an equivalent joke is already live")]
    DuplicateAtApproval,
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<AlreadyReviewed> for ReviewError {
    fn from(_: AlreadyReviewed) -> Self {
        ReviewError::AlreadyReviewed
    }
}

/// Applies a moderator decision to a pending submission.
///
/// Approval formats the raw content, re-checks for duplicates among the
/// live jokes (the formatted text can drift from what was screened at
/// submission time), flips the submission to `Approved` through the
/// repository's conditional update, and only then creates the joke. The
/// conditional update is what makes review at-most-once: when two
/// moderators race, exactly one update lands and the loser sees
/// [`ReviewError::AlreadyReviewed`]. Validation failures happen before any
/// write, so a failed review leaves the submission untouched.
pub struct ReviewSubmissionUseCase {
    submissions: Arc<dyn SubmissionRepository>,
    jokes: Arc<dyn JokeRepository>,
    notifications: NotificationQueue,
    similarity_threshold: f64,
    min_joke_length: usize,
    max_joke_length: usize,
}

impl ReviewSubmissionUseCase {
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        jokes: Arc<dyn JokeRepository>,
        notifications: NotificationQueue,
        similarity_threshold: f64,
        min_joke_length: usize,
        max_joke_length: usize,
    ) -> Self {
        Self {
            submissions,
            jokes,
            notifications,
            similarity_threshold,
            min_joke_length,
            max_joke_length,
        }
    }

    #[instrument(skip(self, request), fields(submission_id = %request.submission_id))]
    pub async fn execute(
        &self,
        request: ReviewSubmissionRequest,
    ) -> Result<ReviewSubmissionResponse, ReviewError> {
        let submission = self
            .submissions
            .find_by_id(request.submission_id)
            .await?
            .ok_or(ReviewError::NotFound)?;

        if submission.status.is_terminal() {
            return Err(ReviewError::AlreadyReviewed);
        }

        match request.action {
            ReviewAction::Approve => self.approve(submission, &request).await,
            ReviewAction::Reject => self.reject(submission, &request).await,
        }
    }

    async fn approve(
        &self,
        submission: Submission,
        request: &ReviewSubmissionRequest,
    ) -> Result<ReviewSubmissionResponse, ReviewError> {
        let outcome = format_content(
            &submission.content,
            self.min_joke_length,
            self.max_joke_length,
        );
        if !outcome.is_valid() {
            return Err(ReviewError::InvalidContent(outcome.errors));
        }

        // The formatted text may differ from what duplicate detection saw at
        // submission time, so the live collection gets one more look.
        let active = self.jokes.list_active().await.map_err(ReviewError::Domain)?;
        if is_duplicate(
            &outcome.formatted,
            active.iter().map(|j| j.content.as_str()),
            std::iter::empty(),
            self.similarity_threshold,
        ) {
            return Err(ReviewError::DuplicateAtApproval);
        }

        let review = submission.approve(request.reviewer())?;
        let updated = self
            .submissions
            .update_status(submission.id, SubmissionStatus::Pending, &review)
            .await?
            .ok_or(ReviewError::AlreadyReviewed)?;

        let joke = self
            .jokes
            .create(&Joke::new(outcome.formatted))
            .await
            .map_err(ReviewError::Domain)?;

        info!(
            submission_id = %updated.id,
            joke_id = %joke.id,
            reviewed_by = %review.reviewed_by,
            "submission approved"
        );

        self.notifications.enqueue(SubmissionEvent::Approved {
            submission: updated.clone(),
            joke_id: joke.id,
        });

        Ok(ReviewSubmissionResponse {
            submission: updated,
            joke: Some(joke),
        })
    }

    async fn reject(
        &self,
        submission: Submission,
        request: &ReviewSubmissionRequest,
    ) -> Result<ReviewSubmissionResponse, ReviewError> {
        let review = submission.reject(request.reviewer(), request.rejection_reason.clone())?;
        let updated = self
            .submissions
            .update_status(submission.id, SubmissionStatus::Pending, &review)
            .await?
            .ok_or(ReviewError::AlreadyReviewed)?;

        let reason = updated
            .rejection_reason
            .clone()
            .unwrap_or_default();

        info!(
            submission_id = %updated.id,
            reviewed_by = %review.reviewed_by,
            reason = %reason,
            "submission rejected"
        );

        self.notifications.enqueue(SubmissionEvent::Rejected {
            submission: updated.clone(),
            reason,
        });

        Ok(ReviewSubmissionResponse {
            submission: updated,
            joke: None,
        })
    }
}
