use crate::domain::submission::{
    entity::{Submission, SubmissionReview, SubmissionStatus},
    errors::DomainError,
    repository::SubmissionRepository,
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use tracing::error;
use uuid::Uuid;

const SUBMISSION_COLUMNS: &str =
    "id, content, submitted_by, status, created_at, reviewed_at, reviewed_by, rejection_reason";

#[derive(FromRow)]
struct SubmissionRow {
    id: Uuid,
    content: String,
    submitted_by: String,
    status: SubmissionStatus,
    created_at: DateTime<Utc>,
    reviewed_at: Option<DateTime<Utc>>,
    reviewed_by: Option<String>,
    rejection_reason: Option<String>,
}

impl From<SubmissionRow> for Submission {
    fn from(r: SubmissionRow) -> Self {
        Submission {
            id: r.id,
            content: r.content,
            submitted_by: r.submitted_by,
            status: r.status,
            created_at: r.created_at,
            reviewed_at: r.reviewed_at,
            reviewed_by: r.reviewed_by,
            rejection_reason: r.rejection_reason,
        }
    }
}

pub struct SqlxSubmissionRepository {
    pool: PgPool,
}

impl SqlxSubmissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn infra(e: sqlx::Error) -> DomainError {
        error!(database_error = %e, "submission repository query failed");
        DomainError::InfrastructureError(e.to_string())
    }
}

#[async_trait]
impl SubmissionRepository for SqlxSubmissionRepository {
    async fn create(&self, submission: &Submission) -> Result<Submission, DomainError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "INSERT INTO submissions ({})
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            SUBMISSION_COLUMNS, SUBMISSION_COLUMNS
        ))
        .bind(submission.id)
        .bind(&submission.content)
        .bind(&submission.submitted_by)
        .bind(submission.status)
        .bind(submission.created_at)
        .bind(submission.reviewed_at)
        .bind(&submission.reviewed_by)
        .bind(&submission.rejection_reason)
        .fetch_one(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(row.into())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, DomainError> {
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {} FROM submissions WHERE id = $1",
            SUBMISSION_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(row.map(Into::into))
    }

    async fn list_by_status(
        &self,
        status: Option<SubmissionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {} FROM submissions WHERE 1=1",
            SUBMISSION_COLUMNS
        ));
        if let Some(status) = status {
            qb.push(" AND status = ").push_bind(status);
        }
        qb.push(" ORDER BY created_at ASC LIMIT ")
            .push_bind(limit)
            .push(" OFFSET ")
            .push_bind(offset);

        let rows: Vec<SubmissionRow> = qb
            .build_query_as()
            .fetch_all(&self.pool)
            .await
            .map_err(Self::infra)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_pending(&self) -> Result<Vec<Submission>, DomainError> {
        let rows = sqlx::query_as::<_, SubmissionRow>(&format!(
            "SELECT {} FROM submissions WHERE status = $1 ORDER BY created_at ASC",
            SUBMISSION_COLUMNS
        ))
        .bind(SubmissionStatus::Pending)
        .fetch_all(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: SubmissionStatus,
        review: &SubmissionReview,
    ) -> Result<Option<Submission>, DomainError> {
        // The WHERE clause carries the precondition, so the status check and
        // the terminal write are a single atomic statement. A concurrent
        // reviewer who lost the race simply matches zero rows.
        let row = sqlx::query_as::<_, SubmissionRow>(&format!(
            "UPDATE submissions
             SET status = $2, reviewed_at = $3, reviewed_by = $4, rejection_reason = $5
             WHERE id = $1 AND status = $6
             RETURNING {}",
            SUBMISSION_COLUMNS
        ))
        .bind(id)
        .bind(review.status)
        .bind(review.reviewed_at)
        .bind(&review.reviewed_by)
        .bind(&review.rejection_reason)
        .bind(expected)
        .fetch_optional(&self.pool)
        .await
        .map_err(Self::infra)?;

        Ok(row.map(Into::into))
    }

    async fn count_by_status(&self, status: SubmissionStatus) -> Result<i64, DomainError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM submissions WHERE status = $1")
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(Self::infra)
    }
}
