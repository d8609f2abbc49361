use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    application::submit_joke::{
        dto::{SubmitJokeRequest, SubmitJokeResponse},
        use_case::SubmitJokeUseCase,
    },
    domain::{
        joke::entity::{Joke, Vote},
        shared::pagination::{PaginatedResponse, PaginationRequest},
    },
    presentation::http::{errors::AppError, state::AppState},
};

/// Public listing of active jokes, newest first.
pub async fn get_jokes(
    State(state): State<AppState>,
    Query(page): Query<PaginationRequest>,
) -> Result<Json<PaginatedResponse<Joke>>, AppError> {
    let limit = page.safe_limit();
    let offset = page.safe_offset();

    let items = state.jokes.find_all(limit, offset).await?;
    let total = state.jokes.count_active().await?;

    Ok(Json(PaginatedResponse {
        items,
        total,
        limit,
        offset,
    }))
}

#[derive(Debug, Deserialize, Validate)]
pub struct SubmitJokeBody {
    #[validate(length(min = 1, max = 500, message = "content must be 1-500 characters"))]
    pub content: String,
    pub submitted_by: Option<String>,
}

pub async fn submit_joke(
    State(state): State<AppState>,
    Json(body): Json<SubmitJokeBody>,
) -> Result<Json<SubmitJokeResponse>, AppError> {
    body.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let use_case = SubmitJokeUseCase::new(
        state.submissions.clone(),
        state.jokes.clone(),
        state.notifications.clone(),
        state.config.similarity_threshold,
        state.config.max_joke_length,
    );

    let response = use_case
        .execute(SubmitJokeRequest {
            content: body.content,
            submitted_by: body.submitted_by,
        })
        .await?;

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
pub struct RateJokeBody {
    pub vote: Vote,
}

/// Bumps one of the vote counters on an active joke.
pub async fn rate_joke(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RateJokeBody>,
) -> Result<Json<Joke>, AppError> {
    let joke = state
        .jokes
        .record_vote(id, body.vote)
        .await?
        .ok_or_else(|| AppError::NotFound("Joke not found".to_string()))?;

    tracing::debug!(joke_id = %id, vote = ?body.vote, "vote recorded");
    Ok(Json(joke))
}
