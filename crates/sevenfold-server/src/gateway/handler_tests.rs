//! Router-level tests for the gateway handlers.

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use sevenfold::{
    Leaderboard, MemoryStore, MockEmbeddingProvider, PAIR_COUNT, ScalePolicy, Scorer,
    StaticValidator, canonicalize,
};

use crate::gateway::handler::MIGRATE_SECRET_HEADER;
use crate::gateway::{HandlerState, SEVENFOLD_STATUS_HEADER, create_router_with_state};

const KEY: &str = "handler_test_leaderboard";
const SECRET: &str = "correct-horse";

const SEVEN: [&str; 7] = ["apple", "galaxy", "justice", "spoon", "volcano", "whisper", "tax"];

struct Fixture {
    provider: Arc<MockEmbeddingProvider>,
    validator: Arc<StaticValidator>,
    store: MemoryStore,
    router: Router,
}

impl Fixture {
    fn new(migrate_secret: Option<&str>) -> Self {
        Self::with_validator(StaticValidator::new(), migrate_secret)
    }

    fn with_validator(validator: StaticValidator, migrate_secret: Option<&str>) -> Self {
        let provider = Arc::new(MockEmbeddingProvider::new());
        let validator = Arc::new(validator);
        let store = MemoryStore::new();

        let scorer = Arc::new(Scorer::new(provider.clone(), ScalePolicy::default()));
        let state = HandlerState::new(
            scorer,
            validator.clone(),
            Leaderboard::new(store.clone(), KEY),
            migrate_secret.map(str::to_string),
        );

        Self {
            provider,
            validator,
            store,
            router: create_router_with_state(state),
        }
    }

    fn leaderboard(&self) -> Leaderboard<MemoryStore> {
        Leaderboard::new(self.store.clone(), KEY)
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    async fn submit(&self, words: &[&str]) -> (StatusCode, HeaderMap, Value) {
        self.send(post_json("/api/score", json!({ "words": words })))
            .await
    }
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn status_header(headers: &HeaderMap) -> &str {
    headers
        .get(SEVENFOLD_STATUS_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

#[tokio::test]
async fn test_health_endpoint() {
    let fixture = Fixture::new(None);
    let (status, headers, body) = fixture.send(get("/healthz")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_header(&headers), "healthy");
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_ready_reflects_store_availability() {
    let fixture = Fixture::new(Some(SECRET));

    let (status, _, body) = fixture.send(get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["components"]["leaderboard"], "ready");
    assert_eq!(body["components"]["migration"], "enabled");
    assert_eq!(body["components"]["embedding_model"], "mock-embedding");

    fixture.store.set_unavailable(true);
    let (status, headers, body) = fixture.send(get("/ready")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(status_header(&headers), "not_ready");
    assert_eq!(body["components"]["leaderboard"], "not_ready");
}

#[tokio::test]
async fn test_score_seven_valid_words() {
    let fixture = Fixture::new(None);
    let (status, headers, body) = fixture.submit(&SEVEN).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_header(&headers), "scored");

    let score = body["score"].as_u64().unwrap();
    assert!(score <= 100);

    let pairs = body["pairDistances"].as_array().unwrap();
    assert_eq!(pairs.len(), PAIR_COUNT);
    assert_eq!(pairs[0]["word1"], "apple");
    assert_eq!(pairs[0]["word2"], "galaxy");
    assert!(pairs[0]["scaledScore"].is_number());

    let leaderboard = body["leaderboard"].as_array().unwrap();
    assert_eq!(leaderboard.len(), 1);
    assert_eq!(leaderboard[0]["score"].as_u64(), Some(score));
    let expected: Vec<String> = canonicalize(&SEVEN).words().to_vec();
    assert_eq!(leaderboard[0]["words"], json!(expected));

    let requests = fixture.provider.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0], SEVEN.map(String::from).to_vec());
}

#[tokio::test]
async fn test_score_normalizes_case_and_whitespace() {
    let fixture = Fixture::new(None);
    let shouted = [" APPLE", "Galaxy ", "justice", "Spoon", "VOLCANO", "whisper", "Tax"];

    let (status, _, _) = fixture.submit(&shouted).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        fixture.provider.requests()[0],
        SEVEN.map(String::from).to_vec()
    );
}

#[tokio::test]
async fn test_five_words_rejected_before_any_lookup() {
    let fixture = Fixture::new(None);
    let (status, headers, body) = fixture
        .submit(&["apple", "galaxy", "justice", "spoon", "volcano"])
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(status_header(&headers), "invalid_request");
    assert!(body["error"].as_str().unwrap().contains("exactly 7 words"));
    assert!(body.get("invalidWords").is_none());
    assert_eq!(fixture.provider.request_count(), 0);
    assert_eq!(fixture.validator.lookups(), 0);
    assert!(fixture.store.is_empty(KEY));
}

#[tokio::test]
async fn test_misspelled_word_is_named() {
    let fixture = Fixture::with_validator(StaticValidator::denying(["definately"]), None);
    let words = ["apple", "galaxy", "definately", "spoon", "volcano", "whisper", "tax"];

    let (status, _, body) = fixture.submit(&words).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["invalidWords"], json!(["definately"]));
    assert!(body["error"].as_str().unwrap().contains("definately"));
    assert_eq!(fixture.validator.lookups(), 7);
    assert_eq!(fixture.provider.request_count(), 0);
    assert!(fixture.store.is_empty(KEY));
}

#[tokio::test]
async fn test_non_alphabetic_word_is_named() {
    let fixture = Fixture::new(None);
    let words = ["apple", "r2d2", "justice", "spoon", "volcano", "whisper", "tax"];

    let (status, _, body) = fixture.submit(&words).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["invalidWords"], json!(["r2d2"]));
    assert_eq!(fixture.validator.lookups(), 0);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let fixture = Fixture::new(None);

    let (status, _, body) = fixture
        .send(post_json("/api/score", json!({ "words": "apple" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);

    let request = Request::builder()
        .method("POST")
        .uri("/api/score")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, _, _) = fixture.send(request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(fixture.provider.request_count(), 0);
}

#[tokio::test]
async fn test_duplicate_in_any_order_is_conflict() {
    let fixture = Fixture::new(None);
    let (status, _, _) = fixture.submit(&SEVEN).await;
    assert_eq!(status, StatusCode::OK);

    let mut reversed = SEVEN;
    reversed.reverse();
    let (status, headers, body) = fixture.submit(&reversed).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(status_header(&headers), "duplicate");
    assert!(body["error"].as_str().unwrap().contains("already on the leaderboard"));
    assert_eq!(fixture.store.len(KEY), 1);
}

#[tokio::test]
async fn test_embedding_failure_is_generic_bad_gateway() {
    let fixture = Fixture::new(None);
    fixture.provider.fail_on_call(0);

    let (status, _, body) = fixture.submit(&SEVEN).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Scoring service unavailable.");
    assert!(!body["error"].as_str().unwrap().contains("mock failure"));
    assert!(fixture.store.is_empty(KEY));
}

#[tokio::test]
async fn test_store_failure_is_service_unavailable() {
    let fixture = Fixture::new(None);
    fixture.store.set_unavailable(true);

    let (status, _, body) = fixture.submit(&SEVEN).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Leaderboard unavailable.");

    let (status, _, _) = fixture.send(get("/api/leaderboard")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_leaderboard_snapshot_is_top_ten() {
    let fixture = Fixture::new(None);
    let board = fixture.leaderboard();
    for i in 0..12 {
        let word = format!("word{}", i);
        board
            .insert_if_absent(&canonicalize(&[word.as_str()]), f64::from(i))
            .await
            .unwrap();
    }

    for uri in ["/api/leaderboard", "/api/score"] {
        let (status, headers, body) = fixture.send(get(uri)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(status_header(&headers), "snapshot");

        let entries = body["leaderboard"].as_array().unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0]["score"], 11);
        assert_eq!(entries[9]["score"], 2);
    }
}

#[tokio::test]
async fn test_empty_leaderboard_snapshot() {
    let fixture = Fixture::new(None);
    let (status, _, body) = fixture.send(get("/api/leaderboard")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leaderboard"], json!([]));
}

#[tokio::test]
async fn test_migrate_refused_without_configured_secret() {
    let fixture = Fixture::new(None);
    let (status, headers, body) = fixture
        .send(get(&format!("/api/migrate?secret={}", SECRET)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(status_header(&headers), "unauthorized");
    assert_eq!(body["code"], 401);
}

#[tokio::test]
async fn test_migrate_refused_with_missing_or_wrong_secret() {
    let fixture = Fixture::new(Some(SECRET));

    let (status, _, _) = fixture.send(get("/api/migrate")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = fixture.send(get("/api/migrate?secret=wrong")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/migrate")
        .header(MIGRATE_SECRET_HEADER, "also-wrong")
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = fixture.send(request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(fixture.provider.request_count(), 0);
}

#[tokio::test]
async fn test_migrate_malformed_query_is_unauthorized() {
    let fixture = Fixture::new(Some(SECRET));

    let (status, _, body) = fixture
        .send(get(&format!("/api/migrate?secret={}&secret=again", SECRET)))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let request = Request::builder()
        .uri("/api/migrate?secret=a&secret=b")
        .header(MIGRATE_SECRET_HEADER, SECRET)
        .body(Body::empty())
        .unwrap();
    let (status, _, _) = fixture.send(request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_migrate_empty_leaderboard() {
    let fixture = Fixture::new(Some(SECRET));
    let (status, _, body) = fixture
        .send(get(&format!("/api/migrate?secret={}", SECRET)))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Leaderboard is already empty.");
    assert_eq!(body["migrated"], json!([]));
}

#[tokio::test]
async fn test_migrate_rescores_with_header_secret() {
    let fixture = Fixture::new(Some(SECRET));
    let board = fixture.leaderboard();
    board
        .insert_if_absent(&canonicalize(&SEVEN), 1.0)
        .await
        .unwrap();

    let request = Request::builder()
        .uri("/api/migrate")
        .header(MIGRATE_SECRET_HEADER, SECRET)
        .body(Body::empty())
        .unwrap();
    let (status, headers, body) = fixture.send(request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(status_header(&headers), "migrated");
    assert_eq!(body["succeeded"], 1);
    assert_eq!(body["failed"], 0);
    assert_eq!(body["migrated"][0]["oldScore"], 1);

    let new_score = body["migrated"][0]["newScore"].as_u64().unwrap();
    let entries = board.all().await.unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].score, new_score as f64);
}
