//! Process-local sorted sets.
//!
//! Used when no external store is configured and as the test double. Data lives
//! only as long as the process.

use parking_lot::RwLock;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;
#[cfg(any(test, feature = "mock"))]
use std::sync::atomic::AtomicBool;

use super::error::LeaderboardError;
use super::store::RankedStore;

#[derive(Debug, Default)]
struct Inner {
    sets: RwLock<HashMap<String, HashMap<String, f64>>>,
    #[cfg(any(test, feature = "mock"))]
    unavailable: AtomicBool,
}

#[derive(Debug, Default, Clone)]
/// In-memory [`RankedStore`]. Clones share state.
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of members under `key`.
    pub fn len(&self, key: &str) -> usize {
        self.inner.sets.read().get(key).map_or(0, HashMap::len)
    }

    pub fn is_empty(&self, key: &str) -> bool {
        self.len(key) == 0
    }

    /// Makes every command fail until reset.
    #[cfg(any(test, feature = "mock"))]
    pub fn set_unavailable(&self, unavailable: bool) {
        self.inner
            .unavailable
            .store(unavailable, std::sync::atomic::Ordering::SeqCst);
    }

    fn check(&self, command: &'static str) -> Result<(), LeaderboardError> {
        #[cfg(any(test, feature = "mock"))]
        if self.inner.unavailable.load(std::sync::atomic::Ordering::SeqCst) {
            return Err(LeaderboardError::CommandFailed {
                command,
                message: "store unavailable".to_string(),
            });
        }
        let _ = command;
        Ok(())
    }
}

/// Redis ordering reversed: score descending, then member descending.
fn descending(a: &(&String, &f64), b: &(&String, &f64)) -> Ordering {
    b.1.partial_cmp(a.1)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.0.cmp(a.0))
}

impl RankedStore for MemoryStore {
    async fn add_if_absent(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> Result<bool, LeaderboardError> {
        self.check("ZADD")?;
        let mut sets = self.inner.sets.write();
        let set = sets.entry(key.to_string()).or_default();
        if set.contains_key(member) {
            return Ok(false);
        }
        set.insert(member.to_string(), score);
        Ok(true)
    }

    async fn add_all(&self, key: &str, members: &[(f64, String)]) -> Result<(), LeaderboardError> {
        self.check("ZADD")?;
        if members.is_empty() {
            return Ok(());
        }
        let mut sets = self.inner.sets.write();
        let set = sets.entry(key.to_string()).or_default();
        for (score, member) in members {
            set.insert(member.clone(), *score);
        }
        Ok(())
    }

    async fn range_desc(
        &self,
        key: &str,
        start: usize,
        stop: Option<usize>,
    ) -> Result<Vec<String>, LeaderboardError> {
        self.check("ZRANGE")?;
        let sets = self.inner.sets.read();
        let Some(set) = sets.get(key) else {
            return Ok(Vec::new());
        };

        let mut ranked: Vec<(&String, &f64)> = set.iter().collect();
        ranked.sort_by(descending);

        let end = stop.map_or(ranked.len(), |s| (s + 1).min(ranked.len()));
        if start >= end {
            return Ok(Vec::new());
        }

        Ok(ranked[start..end].iter().map(|(m, _)| (*m).clone()).collect())
    }

    async fn delete(&self, key: &str) -> Result<(), LeaderboardError> {
        self.check("DEL")?;
        self.inner.sets.write().remove(key);
        Ok(())
    }

    async fn ping(&self) -> Result<(), LeaderboardError> {
        self.check("PING")
    }
}
