pub mod dedupe_jokes;
pub mod review_submission;
pub mod submit_joke;
