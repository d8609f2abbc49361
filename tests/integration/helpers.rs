use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde::de::DeserializeOwned;
use tokio::sync::mpsc;
use tower::ServiceExt;
use uuid::Uuid;

use poor_jokes_api::{
    config::Config,
    domain::{
        joke::{
            entity::{Joke, Vote},
            repository::JokeRepository,
        },
        submission::{
            entity::{Submission, SubmissionReview, SubmissionStatus},
            errors::DomainError,
            events::SubmissionEvent,
            repository::SubmissionRepository,
        },
    },
    infrastructure::notifications::queue::NotificationQueue,
    presentation::http::{routes::create_router, state::AppState},
};

pub const ADMIN_TOKEN: &str = "test-admin-token";

#[derive(Clone, Default)]
pub struct InMemoryJokeRepository {
    jokes: Arc<Mutex<Vec<Joke>>>,
    fail_reads: Arc<std::sync::atomic::AtomicBool>,
}

impl InMemoryJokeRepository {
    pub fn seed(&self, joke: Joke) {
        self.jokes.lock().unwrap().push(joke);
    }

    pub fn all(&self) -> Vec<Joke> {
        self.jokes.lock().unwrap().clone()
    }

    /// Makes `list_active` fail, simulating a flaky datastore read during
    /// duplicate detection.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads
            .store(fail, std::sync::atomic::Ordering::SeqCst);
    }
}

#[async_trait]
impl JokeRepository for InMemoryJokeRepository {
    async fn create(&self, joke: &Joke) -> Result<Joke, DomainError> {
        self.jokes.lock().unwrap().push(joke.clone());
        Ok(joke.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Joke>, DomainError> {
        Ok(self.jokes.lock().unwrap().iter().find(|j| j.id == id).cloned())
    }

    async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Joke>, DomainError> {
        let mut jokes: Vec<Joke> = self
            .jokes
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.is_active)
            .cloned()
            .collect();
        jokes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jokes
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_active(&self) -> Result<Vec<Joke>, DomainError> {
        if self.fail_reads.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(DomainError::InfrastructureError(
                "injected read failure".to_string(),
            ));
        }
        let mut jokes: Vec<Joke> = self
            .jokes
            .lock()
            .unwrap()
            .iter()
            .filter(|j| j.is_active)
            .cloned()
            .collect();
        jokes.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(jokes)
    }

    async fn record_vote(&self, id: Uuid, vote: Vote) -> Result<Option<Joke>, DomainError> {
        let mut jokes = self.jokes.lock().unwrap();
        let Some(joke) = jokes.iter_mut().find(|j| j.id == id && j.is_active) else {
            return Ok(None);
        };
        match vote {
            Vote::Up => joke.up_votes += 1,
            Vote::Down => joke.down_votes += 1,
        }
        Ok(Some(joke.clone()))
    }

    async fn count_active(&self) -> Result<i64, DomainError> {
        Ok(self.jokes.lock().unwrap().iter().filter(|j| j.is_active).count() as i64)
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        self.jokes.lock().unwrap().retain(|j| j.id != id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemorySubmissionRepository {
    submissions: Arc<Mutex<Vec<Submission>>>,
}

impl InMemorySubmissionRepository {
    pub fn seed(&self, submission: Submission) {
        self.submissions.lock().unwrap().push(submission);
    }

    pub fn all(&self) -> Vec<Submission> {
        self.submissions.lock().unwrap().clone()
    }
}

#[async_trait]
impl SubmissionRepository for InMemorySubmissionRepository {
    async fn create(&self, submission: &Submission) -> Result<Submission, DomainError> {
        self.submissions.lock().unwrap().push(submission.clone());
        Ok(submission.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Submission>, DomainError> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .find(|s| s.id == id)
            .cloned())
    }

    async fn list_by_status(
        &self,
        status: Option<SubmissionStatus>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Submission>, DomainError> {
        let mut submissions: Vec<Submission> = self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| status.is_none_or(|wanted| s.status == wanted))
            .cloned()
            .collect();
        submissions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(submissions
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn list_pending(&self) -> Result<Vec<Submission>, DomainError> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == SubmissionStatus::Pending)
            .cloned()
            .collect())
    }

    async fn update_status(
        &self,
        id: Uuid,
        expected: SubmissionStatus,
        review: &SubmissionReview,
    ) -> Result<Option<Submission>, DomainError> {
        // The whole read-check-write happens under one lock, mirroring the
        // conditional UPDATE the real repository issues.
        let mut submissions = self.submissions.lock().unwrap();
        let Some(submission) = submissions.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        if submission.status != expected {
            return Ok(None);
        }
        submission.status = review.status;
        submission.reviewed_at = Some(review.reviewed_at);
        submission.reviewed_by = Some(review.reviewed_by.clone());
        submission.rejection_reason = review.rejection_reason.clone();
        Ok(Some(submission.clone()))
    }

    async fn count_by_status(&self, status: SubmissionStatus) -> Result<i64, DomainError> {
        Ok(self
            .submissions
            .lock()
            .unwrap()
            .iter()
            .filter(|s| s.status == status)
            .count() as i64)
    }
}

pub struct TestApp {
    pub app: Router,
    pub jokes: InMemoryJokeRepository,
    pub submissions: InMemorySubmissionRepository,
    pub events: mpsc::UnboundedReceiver<SubmissionEvent>,
}

fn build_config() -> Config {
    Config {
        database_url: "postgres://unused-in-tests".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".to_string(),
        port: 0,
        admin_token: ADMIN_TOKEN.to_string(),
        similarity_threshold: 0.90,
        min_joke_length: 10,
        max_joke_length: 500,
        notify_timeout_seconds: 1,
        ignore_missing_migrations: true,
        telegram_bot_token: None,
        telegram_chat_id: None,
        discord_webhook_url: None,
        mailgun_api_key: None,
        mailgun_domain: None,
        email_from: None,
        moderator_email: None,
    }
}

pub fn spawn_app() -> TestApp {
    let jokes = InMemoryJokeRepository::default();
    let submissions = InMemorySubmissionRepository::default();
    let (notifications, events) = NotificationQueue::new();

    let state = AppState {
        config: build_config(),
        jokes: Arc::new(jokes.clone()),
        submissions: Arc::new(submissions.clone()),
        notifications,
    };

    TestApp {
        app: create_router(state),
        jokes,
        submissions,
        events,
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> axum::response::Response {
    app.clone().oneshot(req).await.expect("request failed")
}

pub fn get(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn get_admin(path: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(path)
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn post_json(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub fn post_json_admin(path: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .header("x-admin-token", ADMIN_TOKEN)
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn read_json<T: DeserializeOwned>(res: axum::response::Response) -> T {
    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    serde_json::from_slice(&bytes).expect("failed to parse json")
}

pub async fn expect_status(
    res: axum::response::Response,
    expected: StatusCode,
) -> axum::response::Response {
    let actual = res.status();
    if actual == expected {
        return res;
    }

    let bytes = to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    panic!(
        "HTTP status mismatch. Expected {}, got {}. Response body: {}",
        expected,
        actual,
        String::from_utf8_lossy(&bytes)
    );
}
