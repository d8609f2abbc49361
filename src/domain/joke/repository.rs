use super::entity::{Joke, Vote};
use crate::domain::submission::errors::DomainError;
use async_trait::async_trait;
use uuid::Uuid;

#[async_trait]
pub trait JokeRepository: Send + Sync {
    async fn create(&self, joke: &Joke) -> Result<Joke, DomainError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Joke>, DomainError>;
    /// One page of active jokes, newest first.
    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Joke>, DomainError>;
    /// Every active joke, read by the duplicate detector and the dedup sweep.
    async fn list_active(&self) -> Result<Vec<Joke>, DomainError>;
    /// Atomically bumps a vote counter on an active joke.
    ///
    /// Returns the updated joke, or `None` when no active joke has this id.
    async fn record_vote(&self, id: Uuid, vote: Vote) -> Result<Option<Joke>, DomainError>;
    async fn count_active(&self) -> Result<i64, DomainError>;
    /// Hard delete. Reserved for the dedup maintenance sweep.
    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}
