pub mod sqlx_joke_repository;
pub mod sqlx_submission_repository;
