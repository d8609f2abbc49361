use axum::{
    Json,
    extract::{Query, State},
};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    application::review_submission::{
        dto::{ReviewAction, ReviewSubmissionRequest, ReviewSubmissionResponse},
        use_case::ReviewSubmissionUseCase,
    },
    domain::{
        submission::entity::{Submission, SubmissionStatus},
        shared::pagination::{MAX_PAGE_SIZE, PaginatedResponse},
    },
    presentation::http::{errors::AppError, state::AppState},
};

#[derive(Debug, Deserialize)]
pub struct SubmissionsQuery {
    pub status: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[serde(default)]
    pub offset: i64,
}

fn default_limit() -> i64 {
    50
}

/// Admin-gated listing of the moderation queue.
pub async fn list_submissions(
    State(state): State<AppState>,
    Query(params): Query<SubmissionsQuery>,
) -> Result<Json<PaginatedResponse<Submission>>, AppError> {
    let status = match params.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => Some(
            raw.parse::<SubmissionStatus>()
                .map_err(AppError::BadRequest)?,
        ),
        None => None,
    };

    let limit = params.limit.clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.max(0);

    let items = state
        .submissions
        .list_by_status(status, limit, offset)
        .await?;
    let total = match status {
        Some(status) => state.submissions.count_by_status(status).await?,
        None => {
            let mut total = 0;
            for status in [
                SubmissionStatus::Pending,
                SubmissionStatus::Approved,
                SubmissionStatus::Rejected,
            ] {
                total += state.submissions.count_by_status(status).await?;
            }
            total
        }
    };

    Ok(Json(PaginatedResponse {
        items,
        total,
        limit,
        offset,
    }))
}

#[derive(Debug, Deserialize)]
pub struct ReviewBody {
    pub submission_id: Uuid,
    pub action: ReviewAction,
    pub reviewed_by: Option<String>,
    pub rejection_reason: Option<String>,
}

/// Admin-gated review decision: approve or reject a pending submission.
pub async fn review_submission(
    State(state): State<AppState>,
    Json(body): Json<ReviewBody>,
) -> Result<Json<ReviewSubmissionResponse>, AppError> {
    let use_case = ReviewSubmissionUseCase::new(
        state.submissions.clone(),
        state.jokes.clone(),
        state.notifications.clone(),
        state.config.similarity_threshold,
        state.config.min_joke_length,
        state.config.max_joke_length,
    );

    let response = use_case
        .execute(ReviewSubmissionRequest {
            submission_id: body.submission_id,
            action: body.action,
            reviewed_by: body.reviewed_by,
            rejection_reason: body.rejection_reason,
        })
        .await?;

    Ok(Json(response))
}
