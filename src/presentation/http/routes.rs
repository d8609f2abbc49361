use super::{
    handlers::{admin, health, jokes, submissions},
    middleware::admin::require_admin,
    middleware::request_id::request_id_middleware,
    state::AppState,
};
use axum::{
    Router, middleware,
    routing::{get, post},
};

pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route(
            "/submissions",
            get(submissions::list_submissions).post(submissions::review_submission),
        )
        .route("/admin/stats", get(admin::get_stats))
        .route("/admin/jokes/dedupe", post(admin::dedupe_jokes))
        .route_layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Public joke surface
        .route("/jokes", get(jokes::get_jokes).post(jokes::submit_joke))
        .route("/jokes/{id}/rate", post(jokes::rate_joke))
        // Moderation (shared-secret gated)
        .merge(admin_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}
