use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::submission::entity::Submission;

/// A single notification channel.
///
/// Channels are independent and individually optional: a channel that is not
/// configured is simply never registered with the dispatcher. Implementations
/// only need to deliver a short text message; channel-specific markup is not
/// this service's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name used in logs.
    fn channel(&self) -> &'static str;

    async fn notify_submission_created(&self, submission: &Submission) -> anyhow::Result<()>;

    async fn notify_approved(&self, submission: &Submission, joke_id: Uuid)
    -> anyhow::Result<()>;

    async fn notify_rejected(&self, submission: &Submission, reason: &str) -> anyhow::Result<()>;
}
