use tracing::{debug, info, warn};

use super::error::LeaderboardError;
use super::model::LeaderboardEntry;
use super::store::RankedStore;
use crate::words::CanonicalWordSet;

#[derive(Debug, Clone)]
/// The ranked collection of scored word sets, stored under one key.
pub struct Leaderboard<S: RankedStore> {
    store: S,
    key: String,
}

impl<S: RankedStore> Leaderboard<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adds the entry unless the identical member already exists.
    ///
    /// The member includes the score, so this rejects a re-submission only
    /// while scoring stays deterministic for that word set.
    pub async fn insert_if_absent(
        &self,
        words: &CanonicalWordSet,
        score: f64,
    ) -> Result<bool, LeaderboardError> {
        let entry = LeaderboardEntry::new(words.clone(), score);
        let member = entry.member()?;

        let added = self.store.add_if_absent(&self.key, score, &member).await?;
        debug!(key = %self.key, added, score, "Conditional insert");
        Ok(added)
    }

    /// Highest `n` entries, best first.
    pub async fn top_n(&self, n: usize) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        if n == 0 {
            return Ok(Vec::new());
        }
        let raw = self.store.range_desc(&self.key, 0, Some(n - 1)).await?;
        Ok(parse_members(raw))
    }

    /// Every entry, best first.
    pub async fn all(&self) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
        let raw = self.store.range_desc(&self.key, 0, None).await?;
        Ok(parse_members(raw))
    }

    /// Deletes the collection, then writes `entries` unconditionally.
    ///
    /// Not atomic: between the delete and the write, readers see an empty
    /// board, and a failure after the delete leaves it empty or partial.
    pub async fn replace_all(&self, entries: &[LeaderboardEntry]) -> Result<(), LeaderboardError> {
        let members = entries
            .iter()
            .map(|e| Ok((e.score, e.member()?)))
            .collect::<Result<Vec<_>, LeaderboardError>>()?;

        self.store.delete(&self.key).await?;
        self.store.add_all(&self.key, &members).await?;

        info!(key = %self.key, entries = members.len(), "Leaderboard replaced");
        Ok(())
    }

    /// Whether the backing store answers.
    pub async fn is_ready(&self) -> bool {
        self.store.ping().await.is_ok()
    }
}

fn parse_members(raw: Vec<String>) -> Vec<LeaderboardEntry> {
    raw.into_iter()
        .filter_map(|member| match LeaderboardEntry::from_member(&member) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(member = %member, error = %e, "Skipping malformed leaderboard member");
                None
            }
        })
        .collect()
}
