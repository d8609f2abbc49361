use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use poor_jokes_api::domain::{
    joke::entity::Joke,
    submission::{
        entity::{Submission, SubmissionStatus},
        events::SubmissionEvent,
    },
};

use crate::helpers::{
    expect_status, get, get_admin, post_json, post_json_admin, read_json, send, spawn_app,
};

async fn submit(test_app: &crate::helpers::TestApp, content: &str) -> Uuid {
    let res = send(
        &test_app.app,
        post_json("/jokes", &json!({ "content": content })),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["status"], "accepted", "submission was not accepted");
    body["submission_id"]
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .expect("submission_id missing")
}

#[tokio::test]
async fn approving_a_submission_promotes_it_to_a_joke() {
    let mut test_app = spawn_app();
    let submission_id = submit(&test_app, "cat puns are purr-fect").await;

    let res = send(
        &test_app.app,
        post_json_admin(
            "/submissions",
            &json!({
                "submission_id": submission_id,
                "action": "approve",
                "reviewed_by": "admin"
            }),
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;

    assert_eq!(body["submission"]["status"], "Approved");
    assert_eq!(body["submission"]["reviewed_by"], "admin");
    assert_eq!(body["joke"]["content"], "Cat puns are purr-fect.");

    // The joke is now publicly served.
    let res = send(&test_app.app, get("/jokes")).await;
    let gallery: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(gallery["total"], 1);
    assert_eq!(gallery["items"][0]["content"], "Cat puns are purr-fect.");

    // Received at submit time, Approved at review time.
    let first = test_app.events.try_recv().expect("missing received event");
    assert!(matches!(first, SubmissionEvent::Received { .. }));
    let second = test_app.events.try_recv().expect("missing approved event");
    assert!(matches!(second, SubmissionEvent::Approved { .. }));
}

#[tokio::test]
async fn a_second_review_is_a_conflict_and_changes_nothing() {
    let test_app = spawn_app();
    let submission_id = submit(&test_app, "cat puns are purr-fect").await;

    let approve = json!({
        "submission_id": submission_id,
        "action": "approve",
        "reviewed_by": "admin"
    });
    let res = send(&test_app.app, post_json_admin("/submissions", &approve)).await;
    expect_status(res, StatusCode::OK).await;

    let first_state = test_app.submissions.all()[0].clone();

    // Retrying with either action conflicts.
    let res = send(&test_app.app, post_json_admin("/submissions", &approve)).await;
    let body: Value = read_json(expect_status(res, StatusCode::CONFLICT).await).await;
    assert_eq!(body["code"], "ALREADY_REVIEWED");

    let reject = json!({
        "submission_id": submission_id,
        "action": "reject",
        "reviewed_by": "someone-else"
    });
    let res = send(&test_app.app, post_json_admin("/submissions", &reject)).await;
    expect_status(res, StatusCode::CONFLICT).await;

    let second_state = test_app.submissions.all()[0].clone();
    assert_eq!(second_state.status, SubmissionStatus::Approved);
    assert_eq!(second_state.reviewed_at, first_state.reviewed_at);
    assert_eq!(second_state.reviewed_by, first_state.reviewed_by);

    // Still exactly one joke.
    assert_eq!(test_app.jokes.all().len(), 1);
}

#[tokio::test]
async fn rejecting_without_a_reason_records_the_default() {
    let test_app = spawn_app();
    let submission_id = submit(&test_app, "my dog has no nose. how does he smell? awful").await;

    let res = send(
        &test_app.app,
        post_json_admin(
            "/submissions",
            &json!({ "submission_id": submission_id, "action": "reject" }),
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;

    assert_eq!(body["submission"]["status"], "Rejected");
    assert_eq!(body["submission"]["rejection_reason"], "Rejected by moderator");
    assert_eq!(body["submission"]["reviewed_by"], "moderator");
    assert!(body["joke"].is_null());
    assert!(test_app.jokes.all().is_empty());
}

#[tokio::test]
async fn invalid_content_blocks_approval_and_keeps_the_submission_pending() {
    let test_app = spawn_app();
    let submission_id = submit(&test_app, "this is a joke with no punctuation").await;

    let res = send(
        &test_app.app,
        post_json_admin(
            "/submissions",
            &json!({ "submission_id": submission_id, "action": "approve" }),
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::UNPROCESSABLE_ENTITY).await).await;
    assert_eq!(body["code"], "INVALID_CONTENT");
    assert!(!body["violations"].as_array().unwrap().is_empty());

    // No state change: the reviewer can still reject it.
    assert_eq!(test_app.submissions.all()[0].status, SubmissionStatus::Pending);
    assert!(test_app.jokes.all().is_empty());
}

#[tokio::test]
async fn approval_rechecks_duplicates_against_live_jokes() {
    let test_app = spawn_app();
    test_app.jokes.seed(Joke::new("Cat puns are purr-fect.".to_string()));

    // Seed the pending submission directly, as if the joke went live after
    // this submission passed its submit-time check.
    let submission = Submission::new("cat puns are purr-fect".to_string(), None);
    let submission_id = submission.id;
    test_app.submissions.seed(submission);

    let res = send(
        &test_app.app,
        post_json_admin(
            "/submissions",
            &json!({ "submission_id": submission_id, "action": "approve" }),
        ),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::CONFLICT).await).await;
    assert_eq!(body["code"], "DUPLICATE_AT_APPROVAL");

    assert_eq!(test_app.submissions.all()[0].status, SubmissionStatus::Pending);
    assert_eq!(test_app.jokes.all().len(), 1);
}

#[tokio::test]
async fn concurrent_reviews_produce_exactly_one_joke() {
    let test_app = spawn_app();
    let submission = Submission::new("cat puns are purr-fect".to_string(), None);
    let submission_id = submission.id;
    test_app.submissions.seed(submission);

    let approve = json!({
        "submission_id": submission_id,
        "action": "approve",
        "reviewed_by": "racer"
    });

    let (res_a, res_b) = tokio::join!(
        send(&test_app.app, post_json_admin("/submissions", &approve)),
        send(&test_app.app, post_json_admin("/submissions", &approve)),
    );

    let mut statuses = [res_a.status(), res_b.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::OK, StatusCode::CONFLICT]);

    assert_eq!(test_app.jokes.all().len(), 1);
    assert_eq!(test_app.submissions.all()[0].status, SubmissionStatus::Approved);
}

#[tokio::test]
async fn reviewing_an_unknown_submission_is_not_found() {
    let test_app = spawn_app();
    let res = send(
        &test_app.app,
        post_json_admin(
            "/submissions",
            &json!({ "submission_id": Uuid::now_v7(), "action": "approve" }),
        ),
    )
    .await;
    expect_status(res, StatusCode::NOT_FOUND).await;
}

#[tokio::test]
async fn stats_track_the_moderation_queue() {
    let test_app = spawn_app();
    let first = submit(&test_app, "cat puns are purr-fect").await;
    submit(&test_app, "my dog has no nose. how does he smell? awful").await;

    let res = send(
        &test_app.app,
        post_json_admin(
            "/submissions",
            &json!({ "submission_id": first, "action": "approve" }),
        ),
    )
    .await;
    expect_status(res, StatusCode::OK).await;

    let res = send(&test_app.app, get_admin("/admin/stats")).await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["active_jokes"], 1);
    assert_eq!(body["pending_submissions"], 1);
    assert_eq!(body["approved_submissions"], 1);
    assert_eq!(body["rejected_submissions"], 0);
}

#[tokio::test]
async fn dedupe_sweep_keeps_the_best_joke_per_group() {
    let test_app = spawn_app();

    let mut keeper = Joke::new("Why did the chicken cross the road? To get to the other side.".to_string());
    keeper.up_votes = 7;
    let keeper_id = keeper.id;

    let copy = Joke::new("Why did the chicken cross the road?  To get to the other side.".to_string());
    let copy_id = copy.id;

    let distinct = Joke::new("I told my wife she was drawing her eyebrows too high. She looked surprised.".to_string());

    test_app.jokes.seed(keeper);
    test_app.jokes.seed(copy);
    test_app.jokes.seed(distinct);

    let res = send(
        &test_app.app,
        post_json_admin("/admin/jokes/dedupe", &json!({})),
    )
    .await;
    let body: Value = read_json(expect_status(res, StatusCode::OK).await).await;
    assert_eq!(body["scanned"], 3);
    assert_eq!(body["duplicate_groups"], 1);
    assert_eq!(body["removed"][0], copy_id.to_string());

    let remaining = test_app.jokes.all();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().any(|j| j.id == keeper_id));
    assert!(!remaining.iter().any(|j| j.id == copy_id));
}
