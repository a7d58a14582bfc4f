use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use sevenfold::{LeaderboardError, MigrationError, ScoringError, WordSetError};

use super::status_headers;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Validation(#[from] WordSetError),

    #[error("this set of words is already on the leaderboard")]
    Duplicate,

    #[error("unauthorized")]
    Unauthorized,

    #[error("scoring failed: {0}")]
    Scoring(#[from] ScoringError),

    #[error("leaderboard error: {0}")]
    Leaderboard(#[from] LeaderboardError),

    #[error("migration failed: {0}")]
    Migration(#[from] MigrationError),

    #[error("internal error: {0}")]
    Internal(String),
}

#[derive(serde::Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(rename = "invalidWords", skip_serializing_if = "Vec::is_empty")]
    pub invalid_words: Vec<String>,
}

impl GatewayError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Duplicate => StatusCode::CONFLICT,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Scoring(ScoringError::NonFiniteScore { .. } | ScoringError::InvalidInput { .. }) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Scoring(_) => StatusCode::BAD_GATEWAY,
            Self::Leaderboard(_) | Self::Migration(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn status_label(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) | Self::Validation(_) => "invalid_request",
            Self::Duplicate => "duplicate",
            Self::Unauthorized => "unauthorized",
            Self::Scoring(_) => "scoring_error",
            Self::Leaderboard(_) | Self::Migration(_) => "leaderboard_error",
            Self::Internal(_) => "internal_error",
        }
    }

    /// Message safe to show a client. Server-side failures never leak detail.
    fn public_message(&self, status: StatusCode) -> String {
        match status {
            StatusCode::BAD_GATEWAY => "Scoring service unavailable.".to_string(),
            StatusCode::SERVICE_UNAVAILABLE => "Leaderboard unavailable.".to_string(),
            s if s.is_server_error() => "Internal server error.".to_string(),
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        }

        let invalid_words = match &self {
            Self::Validation(e) => e.invalid_words().to_vec(),
            _ => Vec::new(),
        };

        let body = Json(ErrorResponse {
            error: self.public_message(status),
            code: status.as_u16(),
            invalid_words,
        });

        (status, status_headers(self.status_label()), body).into_response()
    }
}
