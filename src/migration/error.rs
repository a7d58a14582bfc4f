use thiserror::Error;

use crate::leaderboard::LeaderboardError;

#[derive(Debug, Error)]
/// A migration that could not read or rewrite the leaderboard.
///
/// Per-entry scoring failures are not errors here; they are recorded in the
/// report.
pub enum MigrationError {
    #[error("leaderboard unavailable during migration: {0}")]
    Leaderboard(#[from] LeaderboardError),
}
