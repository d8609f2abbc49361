use axum::{Json, extract::State};
use serde::Serialize;

use crate::{
    application::dedupe_jokes::{dto::DedupeReport, use_case::DedupeJokesUseCase},
    domain::submission::entity::SubmissionStatus,
    presentation::http::{errors::AppError, state::AppState},
};

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub active_jokes: i64,
    pub pending_submissions: i64,
    pub approved_submissions: i64,
    pub rejected_submissions: i64,
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let active_jokes = state.jokes.count_active().await?;
    let pending = state
        .submissions
        .count_by_status(SubmissionStatus::Pending)
        .await?;
    let approved = state
        .submissions
        .count_by_status(SubmissionStatus::Approved)
        .await?;
    let rejected = state
        .submissions
        .count_by_status(SubmissionStatus::Rejected)
        .await?;

    Ok(Json(StatsResponse {
        active_jokes,
        pending_submissions: pending,
        approved_submissions: approved,
        rejected_submissions: rejected,
    }))
}

/// Runs the dedup maintenance sweep over the active jokes.
pub async fn dedupe_jokes(
    State(state): State<AppState>,
) -> Result<Json<DedupeReport>, AppError> {
    let use_case =
        DedupeJokesUseCase::new(state.jokes.clone(), state.config.similarity_threshold);
    let report = use_case.execute().await?;

    tracing::info!(
        scanned = report.scanned,
        removed = report.removed.len(),
        "dedupe sweep requested by admin"
    );
    Ok(Json(report))
}
