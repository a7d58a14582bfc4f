//! HTTP client helpers for tests.

use serde::Deserialize;
use serde_json::{Value, json};
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(DEFAULT_TIMEOUT_SECS);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

/// Status, `x-sevenfold-status` header, and JSON body of a response.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: u16,
    pub status_header: String,
    pub body: Value,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    async fn into_api_response(resp: reqwest::Response) -> Result<ApiResponse, TestClientError> {
        let status = resp.status().as_u16();
        let status_header = resp
            .headers()
            .get("x-sevenfold-status")
            .and_then(|h| h.to_str().ok())
            .unwrap_or("unknown")
            .to_string();
        let body = resp.json().await.unwrap_or(Value::Null);

        Ok(ApiResponse {
            status,
            status_header,
            body,
        })
    }

    pub async fn score(&self, words: &[&str]) -> Result<ApiResponse, TestClientError> {
        let resp = self
            .client
            .post(self.url("/api/score"))
            .json(&json!({ "words": words }))
            .send()
            .await?;
        Self::into_api_response(resp).await
    }

    pub async fn leaderboard(&self) -> Result<ApiResponse, TestClientError> {
        let resp = self.client.get(self.url("/api/leaderboard")).send().await?;
        Self::into_api_response(resp).await
    }

    pub async fn migrate(&self, secret: Option<&str>) -> Result<ApiResponse, TestClientError> {
        let mut builder = self.client.get(self.url("/api/migrate"));
        if let Some(secret) = secret {
            builder = builder.header("x-migrate-secret", secret);
        }
        Self::into_api_response(builder.send().await?).await
    }

    pub async fn health(&self) -> Result<HealthResponse, TestClientError> {
        let resp = self.client.get(self.url("/healthz")).send().await?;

        if resp.status().is_success() {
            Ok(resp.json().await?)
        } else {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            Err(TestClientError::UnexpectedStatus(status, body))
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TestClientError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0} - Body: {1}")]
    UnexpectedStatus(u16, String),
}
