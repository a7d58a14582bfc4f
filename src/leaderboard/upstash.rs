//! Redis sorted sets over the Upstash REST protocol.
//!
//! Each command is a POST of a JSON array (`["ZADD", "key", "NX", "57", "..."]`)
//! to the base URL with a bearer token. Replies are `{"result": ..}` or
//! `{"error": ".."}`.

use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use super::error::LeaderboardError;
use super::model::format_score;
use super::store::RankedStore;

/// Max `(score, member)` pairs per `ZADD` when bulk loading.
const ZADD_CHUNK: usize = 500;

#[derive(Deserialize)]
struct Reply {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
/// Sorted-set store reached through an Upstash-compatible REST endpoint.
pub struct UpstashStore {
    http: HttpClient,
    url: String,
    token: String,
}

impl std::fmt::Debug for UpstashStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstashStore")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

impl UpstashStore {
    /// Creates a store client for `url` authenticated with `token`.
    pub fn new(url: &str, token: &str, timeout: Duration) -> Result<Self, LeaderboardError> {
        let http = HttpClient::builder().timeout(timeout).build().map_err(|e| {
            LeaderboardError::ConnectionFailed {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Returns the configured URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    async fn command(&self, name: &'static str, args: Vec<Value>) -> Result<Value, LeaderboardError> {
        let mut body = Vec::with_capacity(args.len() + 1);
        body.push(Value::from(name));
        body.extend(args);

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await
            .map_err(|e| LeaderboardError::ConnectionFailed {
                url: self.url.clone(),
                message: e.to_string(),
            })?;

        let status = response.status();
        let reply: Reply = response
            .json()
            .await
            .map_err(|e| LeaderboardError::UnexpectedResponse {
                command: name,
                message: format!("status {}: {}", status.as_u16(), e),
            })?;

        if let Some(message) = reply.error {
            return Err(LeaderboardError::CommandFailed {
                command: name,
                message,
            });
        }
        if !status.is_success() {
            return Err(LeaderboardError::CommandFailed {
                command: name,
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        debug!(command = name, "Store command ok");
        Ok(reply.result.unwrap_or(Value::Null))
    }
}

fn expect_integer(command: &'static str, value: Value) -> Result<i64, LeaderboardError> {
    value
        .as_i64()
        .ok_or_else(|| LeaderboardError::UnexpectedResponse {
            command,
            message: format!("expected integer, got {}", value),
        })
}

impl RankedStore for UpstashStore {
    async fn add_if_absent(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> Result<bool, LeaderboardError> {
        let result = self
            .command(
                "ZADD",
                vec![
                    key.into(),
                    "NX".into(),
                    format_score(score).into(),
                    member.into(),
                ],
            )
            .await?;

        Ok(expect_integer("ZADD", result)? > 0)
    }

    async fn add_all(&self, key: &str, members: &[(f64, String)]) -> Result<(), LeaderboardError> {
        for chunk in members.chunks(ZADD_CHUNK) {
            let mut args = Vec::with_capacity(1 + chunk.len() * 2);
            args.push(Value::from(key));
            for (score, member) in chunk {
                args.push(format_score(*score).into());
                args.push(member.as_str().into());
            }

            let result = self.command("ZADD", args).await?;
            expect_integer("ZADD", result)?;
        }
        Ok(())
    }

    async fn range_desc(
        &self,
        key: &str,
        start: usize,
        stop: Option<usize>,
    ) -> Result<Vec<String>, LeaderboardError> {
        let stop = stop.map(|s| s as i64).unwrap_or(-1);
        let result = self
            .command(
                "ZRANGE",
                vec![key.into(), (start as i64).into(), stop.into(), "REV".into()],
            )
            .await?;

        match result {
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s),
                    other => Err(LeaderboardError::UnexpectedResponse {
                        command: "ZRANGE",
                        message: format!("expected string member, got {}", other),
                    }),
                })
                .collect(),
            Value::Null => Ok(Vec::new()),
            other => Err(LeaderboardError::UnexpectedResponse {
                command: "ZRANGE",
                message: format!("expected array, got {}", other),
            }),
        }
    }

    async fn delete(&self, key: &str) -> Result<(), LeaderboardError> {
        let result = self.command("DEL", vec![key.into()]).await?;
        expect_integer("DEL", result)?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), LeaderboardError> {
        self.command("PING", Vec::new()).await?;
        Ok(())
    }
}
