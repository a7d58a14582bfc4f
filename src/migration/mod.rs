//! Re-scores every stored entry under the current scale and rebuilds the board.
//!
//! Entries are processed one at a time. A failing entry is reported and left
//! out of the rebuilt leaderboard; it never aborts the run. The rebuilt board
//! holds one entry per canonical word set, so stored duplicates that differ
//! only in their old score collapse into the first (highest) one.

mod error;
mod types;


pub use error::MigrationError;
pub use types::{MigrationOutcome, MigrationRecord, MigrationReport};

use chrono::Utc;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::leaderboard::{Leaderboard, LeaderboardEntry, RankedStore};
use crate::scoring::Scorer;

pub const EMPTY_LEADERBOARD_MESSAGE: &str = "Leaderboard is already empty.";

/// Drives one migration run.
pub struct Migrator<S: RankedStore> {
    scorer: Arc<Scorer>,
    leaderboard: Leaderboard<S>,
}

impl<S: RankedStore> Migrator<S> {
    pub fn new(scorer: Arc<Scorer>, leaderboard: Leaderboard<S>) -> Self {
        Self {
            scorer,
            leaderboard,
        }
    }

    /// Reads all entries, re-scores each, then replaces the board with the
    /// successes.
    ///
    /// Not safe to run concurrently with itself or with live submissions:
    /// entries added after the read are lost by the replace.
    pub async fn run(&self) -> Result<MigrationReport, MigrationError> {
        let run_id = Uuid::new_v4().to_string();
        let entries = self.leaderboard.all().await?;

        if entries.is_empty() {
            info!(run_id = %run_id, "Migration skipped, leaderboard empty");
            return Ok(MigrationReport {
                run_id,
                message: EMPTY_LEADERBOARD_MESSAGE.to_string(),
                succeeded: 0,
                failed: 0,
                merged: 0,
                completed_at: Utc::now().to_rfc3339(),
                migrated: Vec::new(),
            });
        }

        info!(run_id = %run_id, entries = entries.len(), policy = %self.scorer.policy(), "Migration started");

        let mut records = Vec::with_capacity(entries.len());
        let mut seen = HashSet::with_capacity(entries.len());
        let mut rebuilt = Vec::with_capacity(entries.len());
        for entry in entries {
            let mut record = self.migrate_entry(entry).await;
            if let Some(new_score) = record.outcome.new_score() {
                if seen.insert(record.words.clone()) {
                    rebuilt.push(LeaderboardEntry::new(
                        record.words.clone(),
                        f64::from(new_score),
                    ));
                } else {
                    debug!(words = %record.words, "Duplicate word set merged");
                    record.outcome = record.outcome.into_merged();
                }
            }
            records.push(record);
        }

        self.leaderboard.replace_all(&rebuilt).await?;

        let succeeded = rebuilt.len();
        let failed = records.iter().filter(|r| r.outcome.error().is_some()).count();
        let merged = records.len() - succeeded - failed;
        info!(run_id = %run_id, succeeded, failed, merged, "Migration finished");

        let message = if merged == 0 {
            format!("Migrated {} entries ({} failed).", succeeded, failed)
        } else {
            format!(
                "Migrated {} entries ({} failed, {} merged).",
                succeeded, failed, merged
            )
        };

        Ok(MigrationReport {
            run_id,
            message,
            succeeded,
            failed,
            merged,
            completed_at: Utc::now().to_rfc3339(),
            migrated: records,
        })
    }

    async fn migrate_entry(&self, entry: LeaderboardEntry) -> MigrationRecord {
        let outcome = match self.scorer.rescore(entry.words.words()).await {
            Ok(rescore) => MigrationOutcome::Rescored {
                new_score: rescore.score,
                diagnostics: rescore.diagnostics,
            },
            Err(e) => {
                warn!(words = %entry.words, error = %e, "Entry failed to re-score");
                MigrationOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        };

        MigrationRecord {
            words: entry.words,
            old_score: entry.score,
            outcome,
        }
    }
}
