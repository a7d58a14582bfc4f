use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use sevenfold::{
    LEADERBOARD_SNAPSHOT_SIZE, Migrator, RankedStore, WordSet, WordSetError, secrets_match,
};

use crate::gateway::error::GatewayError;
use crate::gateway::payload::{LeaderboardResponse, MigrateQuery, ScoreRequest, ScoreResponse};
use crate::gateway::state::HandlerState;
use crate::gateway::{
    SEVENFOLD_STATUS_MIGRATED, SEVENFOLD_STATUS_SCORED, SEVENFOLD_STATUS_SNAPSHOT, status_headers,
};

/// Header carrying the migration secret. The `?secret=` query parameter is also accepted.
pub const MIGRATE_SECRET_HEADER: &str = "x-migrate-secret";

/// Validates, scores, and records a seven-word submission.
///
/// Nothing is embedded until every word has passed both the shape check and
/// the dictionary check.
#[instrument(skip(state, payload))]
pub async fn score_handler<S>(
    State(state): State<HandlerState<S>>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Result<Response, GatewayError>
where
    S: RankedStore + Clone + 'static,
{
    let Json(request) = payload.map_err(|e| GatewayError::InvalidRequest(e.body_text()))?;
    let words = WordSet::parse(&request.words)?;

    let rejected = state.validator.invalid_words(words.words()).await;
    if !rejected.is_empty() {
        debug!(rejected = ?rejected, "Dictionary rejected submission");
        return Err(WordSetError::Unrecognized { words: rejected }.into());
    }

    let report = state.scorer.score(&words).await?;
    let canonical = words.canonical();

    let added = state
        .leaderboard
        .insert_if_absent(&canonical, f64::from(report.score))
        .await?;
    if !added {
        info!(words = %canonical, score = report.score, "Duplicate submission");
        return Err(GatewayError::Duplicate);
    }

    let leaderboard = state.leaderboard.top_n(LEADERBOARD_SNAPSHOT_SIZE).await?;

    Ok((
        StatusCode::OK,
        status_headers(SEVENFOLD_STATUS_SCORED),
        Json(ScoreResponse {
            score: report.score,
            pair_distances: report.pair_distances,
            leaderboard,
        }),
    )
        .into_response())
}

/// Top entries, best first.
#[instrument(skip(state))]
pub async fn leaderboard_handler<S>(
    State(state): State<HandlerState<S>>,
) -> Result<Response, GatewayError>
where
    S: RankedStore + Clone + 'static,
{
    let leaderboard = state.leaderboard.top_n(LEADERBOARD_SNAPSHOT_SIZE).await?;

    Ok((
        StatusCode::OK,
        status_headers(SEVENFOLD_STATUS_SNAPSHOT),
        Json(LeaderboardResponse { leaderboard }),
    )
        .into_response())
}

/// Re-scores the whole leaderboard under the active scale.
///
/// Refused unless a secret is configured and the caller presents it. A query
/// string that does not parse counts as no secret.
#[instrument(skip(state, headers, query))]
pub async fn migrate_handler<S>(
    State(state): State<HandlerState<S>>,
    headers: HeaderMap,
    query: Result<Query<MigrateQuery>, QueryRejection>,
) -> Result<Response, GatewayError>
where
    S: RankedStore + Clone + 'static,
{
    let Some(expected) = state.migrate_secret.as_deref() else {
        warn!("Migration requested but no secret is configured");
        return Err(GatewayError::Unauthorized);
    };

    let presented = headers
        .get(MIGRATE_SECRET_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| query.ok().and_then(|Query(q)| q.secret));

    match presented {
        Some(secret) if secrets_match(&secret, expected) => {}
        _ => {
            warn!("Migration requested with a missing or wrong secret");
            return Err(GatewayError::Unauthorized);
        }
    }

    let migrator = Migrator::new(Arc::clone(&state.scorer), state.leaderboard.clone());
    let report = migrator.run().await?;

    Ok((
        StatusCode::OK,
        status_headers(SEVENFOLD_STATUS_MIGRATED),
        Json(report),
    )
        .into_response())
}
