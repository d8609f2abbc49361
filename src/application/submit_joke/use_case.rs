use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::{
    application::submit_joke::dto::{SubmitJokeRequest, SubmitJokeResponse},
    domain::{
        joke::repository::JokeRepository,
        moderation::duplicate::is_duplicate,
        submission::{
            entity::Submission, errors::DomainError, events::SubmissionEvent,
            repository::SubmissionRepository,
        },
    },
    infrastructure::notifications::queue::NotificationQueue,
};

/// Handles the public submission path.
///
/// Validates the raw content, runs duplicate detection across the live
/// jokes and the moderation queue, persists a pending submission, and
/// enqueues the moderator notification. The duplicate check fails open: a
/// read error is logged and treated as "not a duplicate" so a flaky
/// datastore read can never block the submission path.
pub struct SubmitJokeUseCase {
    submissions: Arc<dyn SubmissionRepository>,
    jokes: Arc<dyn JokeRepository>,
    notifications: NotificationQueue,
    similarity_threshold: f64,
    max_content_length: usize,
}

impl SubmitJokeUseCase {
    pub fn new(
        submissions: Arc<dyn SubmissionRepository>,
        jokes: Arc<dyn JokeRepository>,
        notifications: NotificationQueue,
        similarity_threshold: f64,
        max_content_length: usize,
    ) -> Self {
        Self {
            submissions,
            jokes,
            notifications,
            similarity_threshold,
            max_content_length,
        }
    }

    #[instrument(skip(self, request), fields(content_length = request.content.chars().count()))]
    pub async fn execute(
        &self,
        request: SubmitJokeRequest,
    ) -> Result<SubmitJokeResponse, DomainError> {
        let raw_length = request.content.chars().count();
        if request.content.trim().is_empty() {
            return Err(DomainError::ValidationError(
                "content must not be empty".to_string(),
            ));
        }
        if raw_length > self.max_content_length {
            return Err(DomainError::ValidationError(format!(
                "content must be at most {} characters, got {}",
                self.max_content_length, raw_length
            )));
        }
        if let Some(by) = &request.submitted_by {
            if by.chars().count() > 100 {
                return Err(DomainError::ValidationError(
                    "submitted_by must be at most 100 characters".to_string(),
                ));
            }
        }

        if self.already_known(&request.content).await {
            info!("duplicate submission suppressed");
            return Ok(SubmitJokeResponse::Duplicate {
                message: "That one is already in the collection. Thanks anyway!".to_string(),
            });
        }

        let submission = Submission::new(request.content, request.submitted_by);
        let saved = self.submissions.create(&submission).await?;
        info!(submission_id = %saved.id, submitted_by = %saved.submitted_by, "submission accepted");

        self.notifications.enqueue(SubmissionEvent::Received {
            submission: saved.clone(),
        });

        Ok(SubmitJokeResponse::Accepted {
            submission_id: saved.id,
        })
    }

    /// Duplicate check over both collections, failing open on read errors.
    async fn already_known(&self, content: &str) -> bool {
        let active = match self.jokes.list_active().await {
            Ok(jokes) => jokes,
            Err(e) => {
                warn!(error = %e, "duplicate check degraded: could not read active jokes");
                return false;
            }
        };
        let pending = match self.submissions.list_pending().await {
            Ok(submissions) => submissions,
            Err(e) => {
                warn!(error = %e, "duplicate check degraded: could not read pending submissions");
                return false;
            }
        };

        is_duplicate(
            content,
            active.iter().map(|j| j.content.as_str()),
            pending.iter().map(|s| s.content.as_str()),
            self.similarity_threshold,
        )
    }
}
