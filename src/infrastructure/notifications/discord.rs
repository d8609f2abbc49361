use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::submission::entity::Submission;

use super::traits::Notifier;

/// Posts moderation events to a Discord channel through an incoming webhook.
pub struct DiscordNotifier {
    client: reqwest::Client,
    webhook_url: String,
}

impl DiscordNotifier {
    pub fn new(webhook_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            webhook_url,
        }
    }

    async fn send_text(&self, text: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(&self.webhook_url)
            .json(&serde_json::json!({ "content": text }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Discord webhook returned {}", response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    fn channel(&self) -> &'static str {
        "discord"
    }

    async fn notify_submission_created(&self, submission: &Submission) -> anyhow::Result<()> {
        self.send_text(&format!(
            "**New joke submission** from {}\n> {}\nid: `{}`",
            submission.submitted_by, submission.content, submission.id
        ))
        .await
    }

    async fn notify_approved(
        &self,
        submission: &Submission,
        joke_id: Uuid,
    ) -> anyhow::Result<()> {
        self.send_text(&format!(
            "**Approved** submission `{}` from {}. Live as joke `{}`",
            submission.id, submission.submitted_by, joke_id
        ))
        .await
    }

    async fn notify_rejected(&self, submission: &Submission, reason: &str) -> anyhow::Result<()> {
        self.send_text(&format!(
            "**Rejected** submission `{}` from {}: {}",
            submission.id, submission.submitted_by, reason
        ))
        .await
    }
}
