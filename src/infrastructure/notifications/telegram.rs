use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::submission::entity::Submission;

use super::traits::Notifier;

/// Posts moderation events into a Telegram chat through the Bot API.
pub struct TelegramNotifier {
    client: reqwest::Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            bot_token,
            chat_id,
        }
    }

    async fn send_text(&self, text: &str) -> anyhow::Result<()> {
        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let response = self
            .client
            .post(&url)
            .json(&serde_json::json!({
                "chat_id": self.chat_id,
                "text": text,
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Telegram API returned {}", response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn channel(&self) -> &'static str {
        "telegram"
    }

    async fn notify_submission_created(&self, submission: &Submission) -> anyhow::Result<()> {
        self.send_text(&format!(
            "New joke submission from {}:\n\n{}\n\nid: {}",
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
            "Approved submission {} from {}. Live as joke {}.",
            submission.id, submission.submitted_by, joke_id
        ))
        .await
    }

    async fn notify_rejected(&self, submission: &Submission, reason: &str) -> anyhow::Result<()> {
        self.send_text(&format!(
            "Rejected submission {} from {}: {}",
            submission.id, submission.submitted_by, reason
        ))
        .await
    }
}
