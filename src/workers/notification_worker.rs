use tokio::sync::mpsc;
use tracing::info;

use crate::{
    domain::submission::events::SubmissionEvent,
    infrastructure::notifications::dispatcher::NotificationDispatcher,
};

/// Drains the notification queue and fans each event out to the channels.
///
/// Runs as its own task so slow or failing third-party APIs only delay
/// other notifications, never a moderation response.
pub struct NotificationWorker {
    dispatcher: NotificationDispatcher,
    rx: mpsc::UnboundedReceiver<SubmissionEvent>,
}

impl NotificationWorker {
    pub fn new(
        dispatcher: NotificationDispatcher,
        rx: mpsc::UnboundedReceiver<SubmissionEvent>,
    ) -> Self {
        Self { dispatcher, rx }
    }

    pub async fn start(mut self) {
        info!(
            channels = self.dispatcher.channel_count(),
            "notification worker started"
        );
        while let Some(event) = self.rx.recv().await {
            self.dispatcher.dispatch(&event).await;
        }
        info!("notification queue closed, worker exiting");
    }
}
