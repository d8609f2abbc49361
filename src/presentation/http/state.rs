use std::sync::Arc;

use crate::{
    config::Config,
    domain::{joke::repository::JokeRepository, submission::repository::SubmissionRepository},
    infrastructure::notifications::queue::NotificationQueue,
};

/// Shared handler state.
///
/// Collaborators are held behind their domain traits so tests can inject
/// in-memory doubles; nothing in the request path knows which datastore is
/// underneath.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub jokes: Arc<dyn JokeRepository>,
    pub submissions: Arc<dyn SubmissionRepository>,
    pub notifications: NotificationQueue,
}
