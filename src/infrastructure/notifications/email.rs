use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::submission::entity::Submission;

use super::traits::Notifier;

/// Mails moderation events to the moderator mailbox via the Mailgun HTTP API.
pub struct EmailNotifier {
    client: reqwest::Client,
    api_key: String,
    domain: String,
    from: String,
    to: String,
}

impl EmailNotifier {
    pub fn new(api_key: String, domain: String, from: String, to: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            domain,
            from,
            to,
        }
    }

    async fn send_mail(&self, subject: &str, body: &str) -> anyhow::Result<()> {
        let response = self
            .client
            .post(format!(
                "https://api.mailgun.net/v3/{}/messages",
                self.domain
            ))
            .basic_auth("api", Some(&self.api_key))
            .form(&[
                ("from", self.from.as_str()),
                ("to", self.to.as_str()),
                ("subject", subject),
                ("text", body),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            anyhow::bail!("Mailgun returned {}", response.status());
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn channel(&self) -> &'static str {
        "email"
    }

    async fn notify_submission_created(&self, submission: &Submission) -> anyhow::Result<()> {
        self.send_mail(
            "New joke submission awaiting review",
            &format!(
                "From: {}\n\n{}\n\nSubmission id: {}",
                submission.submitted_by, submission.content, submission.id
            ),
        )
        .await
    }

    async fn notify_approved(
        &self,
        submission: &Submission,
        joke_id: Uuid,
    ) -> anyhow::Result<()> {
        self.send_mail(
            "Submission approved",
            &format!(
                "Submission {} from {} was approved and is live as joke {}.",
                submission.id, submission.submitted_by, joke_id
            ),
        )
        .await
    }

    async fn notify_rejected(&self, submission: &Submission, reason: &str) -> anyhow::Result<()> {
        self.send_mail(
            "Submission rejected",
            &format!(
                "Submission {} from {} was rejected: {}",
                submission.id, submission.submitted_by, reason
            ),
        )
        .await
    }
}
