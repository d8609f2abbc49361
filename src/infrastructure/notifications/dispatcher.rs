//! Fan-out of submission lifecycle events to the configured channels.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Config;
use crate::domain::submission::events::SubmissionEvent;

use super::discord::DiscordNotifier;
use super::email::EmailNotifier;
use super::telegram::TelegramNotifier;
use super::traits::Notifier;

/// Delivers each event to every registered channel.
///
/// Channels are isolated from each other and from the caller: a failing or
/// slow channel is logged and skipped, never propagated. Every delivery runs
/// under its own timeout so one stuck third-party API cannot hold up the
/// rest of the fan-out.
pub struct NotificationDispatcher {
    notifiers: Vec<Arc<dyn Notifier>>,
    per_channel_timeout: Duration,
}

impl NotificationDispatcher {
    pub fn new(per_channel_timeout: Duration) -> Self {
        Self {
            notifiers: Vec::new(),
            per_channel_timeout,
        }
    }

    /// Builds a dispatcher with every channel whose configuration group is
    /// fully present. Missing configuration is a silent no-op, not an error.
    pub fn from_config(config: &Config) -> Self {
        let mut dispatcher = Self::new(Duration::from_secs(config.notify_timeout_seconds));

        if let (Some(token), Some(chat_id)) = (
            config.telegram_bot_token.clone(),
            config.telegram_chat_id.clone(),
        ) {
            dispatcher.register(Arc::new(TelegramNotifier::new(token, chat_id)));
        }

        if let Some(url) = config.discord_webhook_url.clone() {
            dispatcher.register(Arc::new(DiscordNotifier::new(url)));
        }

        if let (Some(key), Some(domain), Some(from), Some(to)) = (
            config.mailgun_api_key.clone(),
            config.mailgun_domain.clone(),
            config.email_from.clone(),
            config.moderator_email.clone(),
        ) {
            dispatcher.register(Arc::new(EmailNotifier::new(key, domain, from, to)));
        }

        dispatcher
    }

    pub fn register(&mut self, notifier: Arc<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    pub fn channel_count(&self) -> usize {
        self.notifiers.len()
    }

    /// Sends `event` to every channel, swallowing individual failures.
    pub async fn dispatch(&self, event: &SubmissionEvent) {
        for notifier in &self.notifiers {
            let channel = notifier.channel();
            let delivery = async {
                match event {
                    SubmissionEvent::Received { submission } => {
                        notifier.notify_submission_created(submission).await
                    }
                    SubmissionEvent::Approved {
                        submission,
                        joke_id,
                    } => notifier.notify_approved(submission, *joke_id).await,
                    SubmissionEvent::Rejected { submission, reason } => {
                        notifier.notify_rejected(submission, reason).await
                    }
                }
            };

            match tokio::time::timeout(self.per_channel_timeout, delivery).await {
                Ok(Ok(())) => {
                    debug!(channel, event = event.kind(), "notification delivered");
                }
                Ok(Err(e)) => {
                    warn!(channel, event = event.kind(), error = %e, "notification failed");
                }
                Err(_) => {
                    warn!(
                        channel,
                        event = event.kind(),
                        timeout_secs = self.per_channel_timeout.as_secs(),
                        "notification timed out"
                    );
                }
            }
        }
    }
}
