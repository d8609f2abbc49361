use crate::presentation::http::state::AppState;
use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    datastore: &'static str,
    version: &'static str,
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    // A cheap read through the repository collaborator doubles as the
    // datastore reachability probe.
    let datastore = match state.jokes.count_active().await {
        Ok(_) => "up",
        Err(e) => {
            tracing::error!("Health check failed: datastore unreachable: {}", e);
            "down"
        }
    };

    let status = if datastore == "up" { "healthy" } else { "unhealthy" };

    let response = HealthResponse {
        status,
        datastore,
        version: env!("CARGO_PKG_VERSION"),
    };

    let code = if status == "healthy" {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (code, Json(response))
}
