use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::scoring::RescoreDiagnostics;
use crate::words::CanonicalWordSet;

#[derive(Debug, Clone, PartialEq)]
/// What happened to one entry.
pub enum MigrationOutcome {
    Rescored {
        new_score: u32,
        diagnostics: RescoreDiagnostics,
    },
    /// Re-scored, but an earlier entry with the same canonical words already
    /// holds the slot in the rebuilt board.
    Merged {
        new_score: u32,
        diagnostics: RescoreDiagnostics,
    },
    Failed {
        reason: String,
    },
}

impl MigrationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Rescored { .. })
    }

    pub fn new_score(&self) -> Option<u32> {
        match self {
            Self::Rescored { new_score, .. } | Self::Merged { new_score, .. } => Some(*new_score),
            Self::Failed { .. } => None,
        }
    }

    pub(crate) fn into_merged(self) -> Self {
        match self {
            Self::Rescored {
                new_score,
                diagnostics,
            } => Self::Merged {
                new_score,
                diagnostics,
            },
            other => other,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Rescored { .. } | Self::Merged { .. } => None,
            Self::Failed { reason } => Some(reason),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Per-entry detail in a migration report.
///
/// Serializes as `{words, oldScore, newScore}` with `newScore: null` plus an
/// `error` on failure, or `diagnostics` on success. Merged records also carry
/// `merged: true`.
pub struct MigrationRecord {
    pub words: CanonicalWordSet,
    pub old_score: f64,
    pub outcome: MigrationOutcome,
}

impl Serialize for MigrationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MigrationRecord", 5)?;
        state.serialize_field("words", &self.words)?;
        if self.old_score.is_finite() && self.old_score.fract() == 0.0 {
            state.serialize_field("oldScore", &(self.old_score as i64))?;
        } else {
            state.serialize_field("oldScore", &self.old_score)?;
        }
        state.serialize_field("newScore", &self.outcome.new_score())?;
        match &self.outcome {
            MigrationOutcome::Rescored { diagnostics, .. } => {
                state.serialize_field("diagnostics", diagnostics)?;
                state.skip_field("merged")?;
            }
            MigrationOutcome::Merged { diagnostics, .. } => {
                state.serialize_field("diagnostics", diagnostics)?;
                state.serialize_field("merged", &true)?;
            }
            MigrationOutcome::Failed { reason } => {
                state.serialize_field("error", reason)?;
                state.skip_field("merged")?;
            }
        }
        state.end()
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
/// Summary of a migration run.
pub struct MigrationReport {
    pub run_id: String,
    pub message: String,
    /// Entries written back to the rebuilt board.
    pub succeeded: usize,
    pub failed: usize,
    /// Re-scored entries folded into an earlier one with the same words.
    pub merged: usize,
    pub completed_at: String,
    pub migrated: Vec<MigrationRecord>,
}
