use super::entity::{Submission, SubmissionReview, SubmissionStatus};
use super::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn create(&self, submission: &Submission) -> Result<Submission, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, DomainError>;
    async fn list_by_status(
        &self,
        status: Option<SubmissionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, DomainError>;
    /// All pending submissions, read by the duplicate detector.
    async fn list_pending(&self) -> Result<Vec<Submission>, DomainError>;
    /// Conditionally writes the terminal review fields.
    ///
    /// The status precondition and the write are a single atomic unit; when
    /// the submission no longer carries `expected` the update is lost and
    /// `Ok(None)` is returned. This is the compare-and-swap that keeps
    /// review at-most-once under concurrent moderators.
    async fn update_status(
        &self,
        id: Uuid,
        expected: SubmissionStatus,
        review: &SubmissionReview,
    ) -> Result<Option<Submission>, DomainError>;
    async fn count_by_status(&self, status: SubmissionStatus) -> Result<i64, DomainError>;
}
