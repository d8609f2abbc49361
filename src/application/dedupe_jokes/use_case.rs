use std::sync::Arc;

use tracing::{info, instrument};

use crate::{
    application::dedupe_jokes::dto::DedupeReport,
    domain::{
        joke::{entity::Joke, repository::JokeRepository},
        moderation::{normalize::normalize, similarity::similarity},
        submission::errors::DomainError,
    },
};

/// Maintenance sweep that collapses equivalent live jokes.
///
/// Jokes that slipped past submission-time detection (imports, races,
/// threshold edges) are grouped by normalized equality or near-match
/// similarity; the joke with the best net score survives each group, ties
/// going to the oldest, and the rest are hard-deleted. This is the only
/// path in the system that hard-deletes a joke.
pub struct DedupeJokesUseCase {
    jokes: Arc<dyn JokeRepository>,
    similarity_threshold: f64,
}

impl DedupeJokesUseCase {
    pub fn new(jokes: Arc<dyn JokeRepository>, similarity_threshold: f64) -> Self {
        Self {
            jokes,
            similarity_threshold,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<DedupeReport, DomainError> {
        let mut jokes = self.jokes.list_active().await?;
        jokes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        let scanned = jokes.len();

        let mut groups: Vec<Vec<Joke>> = Vec::new();
        for joke in jokes {
            let normalized = normalize(&joke.content);
            let matched = groups.iter_mut().find(|group| {
                let representative = normalize(&group[0].content);
                representative == normalized
                    || similarity(&representative, &normalized) > self.similarity_threshold
            });
            match matched {
                Some(group) => group.push(joke),
                None => groups.push(vec![joke]),
            }
        }

        let mut removed = Vec::new();
        let mut duplicate_groups = 0;
        for group in groups.iter().filter(|g| g.len() > 1) {
            duplicate_groups += 1;
            let survivor = group.iter().max_by(|a, b| {
                a.net_votes()
                    .cmp(&b.net_votes())
                    .then_with(|| b.created_at.cmp(&a.created_at))
            });
            let Some(survivor_id) = survivor.map(|j| j.id) else {
                continue;
            };

            for joke in group.iter().filter(|j| j.id != survivor_id) {
                self.jokes.delete(joke.id).await?;
                info!(joke_id = %joke.id, kept = %survivor_id, "duplicate joke removed");
                removed.push(joke.id);
            }
        }

        info!(scanned, duplicate_groups, removed = removed.len(), "dedupe sweep finished");

        Ok(DedupeReport {
            scanned,
            duplicate_groups,
            removed,
        })
    }
}
