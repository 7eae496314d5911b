//! HTTP surface tests driven through `tower::ServiceExt::oneshot`.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use secrecy::Secret;
use serde_json::{json, Value};
use tower::ServiceExt;

use honeypot::adapters::http::{
    build_router, ApiKeyState, DecisionHandlers, HoneypotHandlers, ReviewHandlers, RouterSettings,
    SessionHandlers,
};
use honeypot::adapters::{
    InMemoryDecisionLog, InMemorySessionStore, MockIntelligenceExtractor, MockReplyGenerator, MockScamClassifier,
    RecordingReportSink,
};
use honeypot::application::{
    CallbackDispatcher, ConversationCoordinator, DeleteSessionHandler, GetSessionHandler,
    ListPendingSessionsHandler, ListReviewQueueHandler, MarkReviewedHandler, ReviewStatsHandler,
};
use honeypot::domain::engagement::Verdict;
use honeypot::ports::SessionStore;

const KEY: &str = "test-api-key";

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app_with(store: &InMemorySessionStore, classifier: MockScamClassifier) -> Router {
    app_logging(store, classifier, &InMemoryDecisionLog::new())
}

fn app_logging(
    store: &InMemorySessionStore,
    classifier: MockScamClassifier,
    decisions: &InMemoryDecisionLog,
) -> Router {
    let shared: Arc<dyn SessionStore> = Arc::new(store.clone());
    let dispatcher = CallbackDispatcher::new(Arc::clone(&shared), Arc::new(RecordingReportSink::new()));
    let coordinator = ConversationCoordinator::new(
        Arc::clone(&shared),
        Arc::new(classifier),
        Arc::new(MockIntelligenceExtractor::new()),
        Arc::new(MockReplyGenerator::new().with_reply("Which bank is this?")),
        dispatcher,
    )
    .with_collaborator_timeout(Duration::from_millis(500))
    .with_decision_log(Arc::new(decisions.clone()));

    build_router(
        HoneypotHandlers::new(Arc::new(coordinator)),
        SessionHandlers::new(
            Arc::new(GetSessionHandler::new(Arc::clone(&shared))),
            Arc::new(DeleteSessionHandler::new(Arc::clone(&shared))),
            Arc::new(ListPendingSessionsHandler::new(Arc::clone(&shared))),
        ),
        ReviewHandlers::new(
            Arc::new(ListReviewQueueHandler::new(Arc::clone(&shared))),
            Arc::new(MarkReviewedHandler::new(Arc::clone(&shared))),
            Arc::new(ReviewStatsHandler::new(Arc::clone(&shared))),
        ),
        DecisionHandlers::new(Arc::new(decisions.clone())),
        ApiKeyState::new(Some(Secret::new(KEY.to_string()))),
        &RouterSettings::default(),
    )
}

fn app(store: &InMemorySessionStore) -> Router {
    app_with(store, MockScamClassifier::new().with_classification(0.5, Verdict::Suspicious))
}

fn turn_body(session_id: &str) -> Value {
    json!({
        "sessionId": session_id,
        "message": {
            "sender": "scammer",
            "text": "Your bank account will be blocked today. Verify immediately.",
            "timestamp": "2026-01-21T10:15:30Z"
        },
        "conversationHistory": [],
        "metadata": {"channel": "SMS", "language": "English", "locale": "IN"}
    })
}

fn post_json(uri: &str, body: &Value, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get(uri: &str, key: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(key) = key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Public routes
// =============================================================================

#[tokio::test]
async fn health_routes_need_no_key() {
    let store = InMemorySessionStore::new();

    let root = app(&store).oneshot(get("/", None)).await.unwrap();
    assert_eq!(root.status(), StatusCode::OK);
    assert_eq!(json_body(root).await["status"], "running");

    let health = app(&store).oneshot(get("/health", None)).await.unwrap();
    assert_eq!(health.status(), StatusCode::OK);
    assert_eq!(json_body(health).await["status"], "healthy");
}

// =============================================================================
// Turn endpoint
// =============================================================================

#[tokio::test]
async fn turn_requires_api_key() {
    let store = InMemorySessionStore::new();

    let missing = app(&store)
        .oneshot(post_json("/honeypot", &turn_body("k1"), None))
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let wrong = app(&store)
        .oneshot(post_json("/honeypot", &turn_body("k1"), Some("nope")))
        .await
        .unwrap();
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(json_body(wrong).await["code"], "UNAUTHORIZED");
    assert_eq!(store.session_count().await, 0);
}

#[tokio::test]
async fn turn_returns_reply_on_both_paths() {
    let store = InMemorySessionStore::new();

    for (uri, id) in [("/honeypot", "root-path"), ("/api/v1/honeypot", "versioned-path")] {
        let response = app(&store)
            .oneshot(post_json(uri, &turn_body(id), Some(KEY)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body, json!({"status": "success", "reply": "Which bank is this?"}));
    }
    assert_eq!(store.session_count().await, 2);
}

#[tokio::test]
async fn empty_session_id_is_bad_request() {
    let store = InMemorySessionStore::new();
    let response = app(&store)
        .oneshot(post_json("/honeypot", &turn_body("   "), Some(KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn epoch_millis_timestamps_are_kept_verbatim() {
    let store = InMemorySessionStore::new();
    let body = json!({
        "sessionId": "epoch",
        "message": {"sender": "scammer", "text": "hello", "timestamp": 1770005528731i64}
    });

    let response = app(&store)
        .oneshot(post_json("/honeypot", &body, Some(KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let view = app(&store)
        .oneshot(get("/api/v1/sessions/epoch", Some(KEY)))
        .await
        .unwrap();
    let view = json_body(view).await;
    assert_eq!(view["messages"][0]["timestamp"], json!(1770005528731i64));
}

#[tokio::test]
async fn redelivered_untimed_message_is_stored_once() {
    let store = InMemorySessionStore::new();
    let body = json!({
        "sessionId": "untimed-replay",
        "message": {"sender": "scammer", "text": "Send OTP now"}
    });

    for _ in 0..2 {
        let response = app(&store)
            .oneshot(post_json("/honeypot", &body, Some(KEY)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let session = store
        .get(&"untimed-replay".parse().unwrap())
        .await
        .unwrap();
    assert_eq!(session.total_messages(), 1);
    assert!(session.messages()[0].timestamp.is_none());
}

// =============================================================================
// Operator endpoints
// =============================================================================

#[tokio::test]
async fn session_can_be_inspected_and_deleted() {
    let store = InMemorySessionStore::new();
    app(&store)
        .oneshot(post_json("/honeypot", &turn_body("ops-1"), Some(KEY)))
        .await
        .unwrap();

    let view = app(&store)
        .oneshot(get("/api/v1/sessions/ops-1", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(view.status(), StatusCode::OK);
    let view = json_body(view).await;
    assert_eq!(view["sessionId"], "ops-1");
    assert_eq!(view["totalMessages"], 1);
    assert_eq!(view["callbackSent"], false);
    assert_eq!(view["metadata"]["channel"], "SMS");

    let delete = Request::builder()
        .method("DELETE")
        .uri("/api/v1/sessions/ops-1")
        .header("x-api-key", KEY)
        .body(Body::empty())
        .unwrap();
    let deleted = app(&store).oneshot(delete).await.unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = app(&store)
        .oneshot(get("/api/v1/sessions/ops-1", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(gone).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn operator_routes_require_api_key() {
    let store = InMemorySessionStore::new();
    let response = app(&store)
        .oneshot(get("/api/v1/sessions/pending", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn pending_listing_starts_empty() {
    let store = InMemorySessionStore::new();
    let response = app(&store)
        .oneshot(get("/api/v1/sessions/pending", Some(KEY)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({"total": 0, "sessions": []}));
}

// =============================================================================
// Review queue and decision log
// =============================================================================

#[tokio::test]
async fn suspicious_session_waits_for_review_until_decided() {
    let store = InMemorySessionStore::new();
    app(&store)
        .oneshot(post_json("/honeypot", &turn_body("rev-1"), Some(KEY)))
        .await
        .unwrap();

    let queue = app(&store)
        .oneshot(get("/api/v1/sessions/review", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(queue.status(), StatusCode::OK);
    let queue = json_body(queue).await;
    assert_eq!(queue["total"], 1);
    assert_eq!(queue["sessions"][0]["sessionId"], "rev-1");
    assert_eq!(queue["sessions"][0]["peakScore"], json!(0.5));

    let decide = json!({"decision": "scam", "notes": "asked for OTP twice"});
    let reviewed = app(&store)
        .oneshot(post_json("/api/v1/sessions/rev-1/review", &decide, Some(KEY)))
        .await
        .unwrap();
    assert_eq!(reviewed.status(), StatusCode::OK);
    let reviewed = json_body(reviewed).await;
    assert_eq!(reviewed["review"]["decision"], "scam");
    assert_eq!(reviewed["review"]["notes"], "asked for OTP twice");

    let again = app(&store)
        .oneshot(post_json("/api/v1/sessions/rev-1/review", &decide, Some(KEY)))
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let queue = app(&store)
        .oneshot(get("/api/v1/sessions/review", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(json_body(queue).await["total"], 0);

    let stats = app(&store)
        .oneshot(get("/api/v1/sessions/review/stats", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(
        json_body(stats).await,
        json!({"awaitingReview": 0, "reviewed": 1, "byDecision": {"scam": 1}})
    );
}

#[tokio::test]
async fn reviewing_unknown_session_is_not_found() {
    let store = InMemorySessionStore::new();
    let response = app(&store)
        .oneshot(post_json(
            "/api/v1/sessions/ghost/review",
            &json!({"decision": "safe"}),
            Some(KEY),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn turns_are_listed_as_decisions() {
    let store = InMemorySessionStore::new();
    let decisions = InMemoryDecisionLog::new();
    let classifier = || MockScamClassifier::new().with_classification(0.5, Verdict::Suspicious);

    app_logging(&store, classifier(), &decisions)
        .oneshot(post_json("/honeypot", &turn_body("dec-1"), Some(KEY)))
        .await
        .unwrap();

    let unauthorized = app_logging(&store, classifier(), &decisions)
        .oneshot(get("/api/v1/decisions", None))
        .await
        .unwrap();
    assert_eq!(unauthorized.status(), StatusCode::UNAUTHORIZED);

    let response = app_logging(&store, classifier(), &decisions)
        .oneshot(get("/api/v1/decisions?limit=10", Some(KEY)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["stats"]["total"], 1);
    assert_eq!(body["stats"]["byVerdict"]["suspicious"], 1);
    assert_eq!(body["recent"][0]["sessionId"], "dec-1");
    assert_eq!(body["recent"][0]["phaseAfter"], json!("engaging"));
}
