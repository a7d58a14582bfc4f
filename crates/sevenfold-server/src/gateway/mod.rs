//! HTTP gateway (Axum) for scoring, leaderboard snapshots, and migration.
//!
//! This module is primarily used by the `sevenfold` server binary.

#![allow(missing_docs)]

pub mod error;
pub mod handler;
pub mod payload;
pub mod state;

#[cfg(test)]
mod handler_tests;

use axum::{
    Json, Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, StatusCode, header::HeaderValue},
    response::{IntoResponse, Response},
    routing::get,
};
use tower_http::trace::TraceLayer;

pub use handler::{leaderboard_handler, migrate_handler, score_handler};
pub use state::HandlerState;

use sevenfold::RankedStore;

/// Response header describing how a request was handled.
pub const SEVENFOLD_STATUS_HEADER: &str = "x-sevenfold-status";
pub const SEVENFOLD_STATUS_HEALTHY: &str = "healthy";
pub const SEVENFOLD_STATUS_READY: &str = "ready";
pub const SEVENFOLD_STATUS_NOT_READY: &str = "not_ready";
pub const SEVENFOLD_STATUS_SCORED: &str = "scored";
pub const SEVENFOLD_STATUS_SNAPSHOT: &str = "snapshot";
pub const SEVENFOLD_STATUS_MIGRATED: &str = "migrated";

pub fn create_router_with_state<S>(state: HandlerState<S>) -> Router
where
    S: RankedStore + Clone + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/api/score", get(leaderboard_handler).post(score_handler))
        .route("/api/leaderboard", get(leaderboard_handler))
        .route("/api/migrate", get(migrate_handler))
        .layer(
            // Path only: the migrate query string may carry a secret.
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    path = %request.uri().path()
                )
            }),
        )
        .with_state(state)
}

pub(crate) fn status_headers(status: &'static str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(SEVENFOLD_STATUS_HEADER, HeaderValue::from_static(status));
    headers
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub leaderboard: &'static str,
    pub embedding_model: String,
    pub scale: String,
    pub migration: &'static str,
}

#[tracing::instrument]
pub async fn health_handler() -> Response {
    (
        StatusCode::OK,
        status_headers(SEVENFOLD_STATUS_HEALTHY),
        Json(HealthResponse { status: "ok" }),
    )
        .into_response()
}

#[tracing::instrument(skip(state))]
pub async fn ready_handler<S>(State(state): State<HandlerState<S>>) -> Response
where
    S: RankedStore + Clone + 'static,
{
    let store_ready = state.leaderboard.is_ready().await;

    let components = ComponentStatus {
        http: SEVENFOLD_STATUS_READY,
        leaderboard: if store_ready {
            SEVENFOLD_STATUS_READY
        } else {
            SEVENFOLD_STATUS_NOT_READY
        },
        embedding_model: state.scorer.model().to_string(),
        scale: state.scorer.policy().to_string(),
        migration: if state.migrate_secret.is_some() {
            "enabled"
        } else {
            "disabled"
        },
    };

    let (status_code, status_msg, header) = if store_ready {
        (StatusCode::OK, "ok", SEVENFOLD_STATUS_READY)
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            "pending",
            SEVENFOLD_STATUS_NOT_READY,
        )
    };

    (
        status_code,
        status_headers(header),
        Json(ReadyResponse {
            status: status_msg,
            components,
        }),
    )
        .into_response()
}
