use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::submission::events::SubmissionEvent;

/// In-process queue decoupling moderation from notification delivery.
///
/// Use cases enqueue after the authoritative state change is committed and
/// return immediately; the notification worker drains the receiver. A full
/// or closed queue can only ever cost a notification, never a moderation
/// result.
#[derive(Clone)]
pub struct NotificationQueue {
    tx: mpsc::UnboundedSender<SubmissionEvent>,
}

impl NotificationQueue {
    /// Creates the queue plus the receiving end for the worker.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SubmissionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Fire-and-forget enqueue. Failure is logged and swallowed.
    pub fn enqueue(&self, event: SubmissionEvent) {
        if let Err(e) = self.tx.send(event) {
            warn!(event = e.0.kind(), "notification queue closed, event dropped");
        }
    }
}
