use crate::domain::{
    joke::{
        entity::{Joke, Vote},
        repository::JokeRepository,
    },
    submission::errors::DomainError,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use tracing::error;
use uuid::Uuid;

const JOKE_COLUMNS: &str = "id, content, up_votes, down_votes, is_active, created_at";

#[derive(FromRow)]
struct JokeRow {
    id: Uuid,
    content: String,
    up_votes: i32,
    down_votes: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl From<JokeRow> for Joke {
    fn from(r: JokeRow) -> Self {
        Joke {
            id: r.id,
            content: r.content,
            up_votes: r.up_votes,
            down_votes: r.down_votes,
            is_active: r.is_active,
            created_at: r.created_at,
        }
    }
}

pub struct SqlxJokeRepository {
    pool: PgPool,
}

impl SqlxJokeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn infra(e: sqlx::Error) -> DomainError {
        error!(database_error = %e, "joke repository query failed");
        DomainError::InfrastructureError(e.to_string())
    }
}

#[async_trait]
impl JokeRepository for SqlxJokeRepository {
    async fn create(&self, joke: &Joke) -> Result<Joke, DomainError> {
        let row = sqlx::query_as::<_, JokeRow>(&format!(
            "INSERT INTO jokes ({})
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {}",
            JOKE_COLUMNS, JOKE_COLUMNS
        ))
        .bind(joke.id)
        .bind(&joke.content)
        .bind(joke.up_votes)
        .bind(joke.down_votes)
        .bind(joke.is_active)
        .bind(joke.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Joke>, DomainError> {
        let row = sqlx::query_as::<_, JokeRow>(&format!(
            "SELECT {} FROM jokes WHERE id = $1",
            JOKE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(row.map(Into::into))
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Joke>, DomainError> {
        let rows = sqlx::query_as::<_, JokeRow>(&format!(
            "SELECT {} FROM jokes WHERE is_active
             ORDER BY created_at DESC LIMIT $1 OFFSET $2",
            JOKE_COLUMNS
        ))
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_active(&self) -> Result<Vec<Joke>, DomainError> {
        let rows = sqlx::query_as::<_, JokeRow>(&format!(
            "SELECT {} FROM jokes WHERE is_active ORDER BY created_at ASC",
            JOKE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn record_vote(&self, id: Uuid, vote: Vote) -> Result<Option<Joke>, DomainError> {
        let sql = match vote {
            Vote::Up => format!(
                "UPDATE jokes SET up_votes = up_votes + 1
                 WHERE id = $1 AND is_active RETURNING {}",
                JOKE_COLUMNS
            ),
            Vote::Down => format!(
                "UPDATE jokes SET down_votes = down_votes + 1
                 WHERE id = $1 AND is_active RETURNING {}",
                JOKE_COLUMNS
            ),
        };

        let row = sqlx::query_as::<_, JokeRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(Self::infra)?;

        Ok(row.map(Into::into))
    }

    async fn count_active(&self) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM jokes WHERE is_active")
            .fetch_one(&self.pool)
            .await
            .map_err(Self::infra)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        sqlx::query("DELETE FROM jokes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(Self::infra)?;
        Ok(())
    }
}
