//! Minimal stand-ins for the external HTTP services, served on loopback.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::net::TcpListener;

pub const STORE_TOKEN: &str = "store-token";
pub const OPENAI_KEY: &str = "sk-test";

/// Serves `router` on an ephemeral port and returns its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

// ---- Upstash REST ----

#[derive(Default)]
pub struct FakeRedis {
    sets: Mutex<HashMap<String, Vec<(f64, String)>>>,
    pub commands: Mutex<Vec<Vec<Value>>>,
}

impl FakeRedis {
    pub fn members(&self, key: &str) -> Vec<(f64, String)> {
        self.sets.lock().get(key).cloned().unwrap_or_default()
    }
}

pub async fn spawn_upstash() -> (String, Arc<FakeRedis>) {
    let redis = Arc::new(FakeRedis::default());
    let router = Router::new()
        .route("/", post(upstash_command))
        .with_state(redis.clone());
    (spawn(router).await, redis)
}

async fn upstash_command(
    State(redis): State<Arc<FakeRedis>>,
    headers: HeaderMap,
    Json(command): Json<Vec<Value>>,
) -> Response {
    if bearer(&headers) != Some(STORE_TOKEN) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "Unauthorized" })),
        )
            .into_response();
    }
    redis.commands.lock().push(command.clone());

    let text = |v: &Value| match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let name = command.first().map(text).unwrap_or_default().to_uppercase();
    let args: Vec<String> = command.iter().skip(1).map(text).collect();

    let result = match name.as_str() {
        "PING" => json!("PONG"),
        "DEL" => {
            let removed = redis.sets.lock().remove(&args[0]).is_some();
            json!(removed as i64)
        }
        "ZADD" => {
            let nx = args.get(1).is_some_and(|a| a == "NX");
            let pairs = if nx { &args[2..] } else { &args[1..] };
            let mut sets = redis.sets.lock();
            let set = sets.entry(args[0].clone()).or_default();
            let mut added = 0;
            for pair in pairs.chunks(2) {
                let score: f64 = pair[0].parse().unwrap();
                match set.iter_mut().find(|(_, m)| *m == pair[1]) {
                    Some(existing) if !nx => existing.0 = score,
                    Some(_) => {}
                    None => {
                        set.push((score, pair[1].clone()));
                        added += 1;
                    }
                }
            }
            json!(added)
        }
        "ZRANGE" => {
            let mut set = redis.members(&args[0]);
            set.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| b.1.cmp(&a.1)));
            let start: usize = args[1].parse().unwrap();
            let stop: i64 = args[2].parse().unwrap();
            let end = if stop < 0 {
                set.len()
            } else {
                (stop as usize + 1).min(set.len())
            };
            let members: Vec<String> = set
                .into_iter()
                .map(|(_, m)| m)
                .skip(start)
                .take(end.saturating_sub(start))
                .collect();
            json!(members)
        }
        other => {
            return Json(json!({ "error": format!("ERR unknown command '{}'", other) }))
                .into_response();
        }
    };

    Json(json!({ "result": result })).into_response()
}

// ---- OpenAI embeddings ----

#[derive(Default)]
pub struct FakeOpenAi {
    pub requests: Mutex<Vec<Value>>,
    /// When set, every request fails with this status.
    pub fail_with: Mutex<Option<StatusCode>>,
}

pub async fn spawn_openai() -> (String, Arc<FakeOpenAi>) {
    let openai = Arc::new(FakeOpenAi::default());
    let router = Router::new()
        .route("/v1/embeddings", post(openai_embeddings))
        .with_state(openai.clone());
    (format!("{}/v1", spawn(router).await), openai)
}

/// Letter-frequency vector, so words sharing letters land close together.
pub fn letter_vector(word: &str) -> Vec<f32> {
    let mut v = vec![0.1f32; 26];
    for b in word.bytes().filter(u8::is_ascii_lowercase) {
        v[(b - b'a') as usize] += 1.0;
    }
    v
}

async fn openai_embeddings(
    State(openai): State<Arc<FakeOpenAi>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers) != Some(OPENAI_KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "message": "Incorrect API key provided" } })),
        )
            .into_response();
    }
    openai.requests.lock().push(body.clone());

    if let Some(status) = *openai.fail_with.lock() {
        return (
            status,
            Json(json!({ "error": { "message": "Rate limit reached" } })),
        )
            .into_response();
    }

    let inputs: Vec<String> = serde_json::from_value(body["input"].clone()).unwrap_or_default();
    let data: Vec<Value> = inputs
        .iter()
        .enumerate()
        .rev()
        .map(|(index, word)| {
            json!({ "object": "embedding", "index": index, "embedding": letter_vector(word) })
        })
        .collect();

    Json(json!({ "object": "list", "data": data, "model": body["model"] })).into_response()
}

// ---- Dictionary ----

#[derive(Default)]
pub struct FakeDictionary {
    pub hits: AtomicUsize,
}

impl FakeDictionary {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// `definately` is unknown (404), `flaky` errors (503), everything else exists.
pub async fn spawn_dictionary() -> (String, Arc<FakeDictionary>) {
    let dictionary = Arc::new(FakeDictionary::default());
    let router = Router::new()
        .route("/entries/en/{word}", get(dictionary_lookup))
        .with_state(dictionary.clone());
    (format!("{}/entries/en", spawn(router).await), dictionary)
}

async fn dictionary_lookup(
    State(dictionary): State<Arc<FakeDictionary>>,
    Path(word): Path<String>,
) -> Response {
    dictionary.hits.fetch_add(1, Ordering::SeqCst);
    match word.as_str() {
        "definately" => (
            StatusCode::NOT_FOUND,
            Json(json!({ "title": "No Definitions Found" })),
        )
            .into_response(),
        "flaky" => StatusCode::SERVICE_UNAVAILABLE.into_response(),
        _ => Json(json!([{ "word": word }])).into_response(),
    }
}
