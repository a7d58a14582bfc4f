use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::WordValidator;

/// In-process validator: everything is valid except the deny list.
#[derive(Debug, Default)]
pub struct StaticValidator {
    denied: RwLock<HashSet<String>>,
    lookups: AtomicUsize,
}

impl StaticValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validator rejecting exactly `words`.
    pub fn denying<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let validator = Self::new();
        validator
            .denied
            .write()
            .extend(words.into_iter().map(Into::into));
        validator
    }

    pub fn deny(&self, word: &str) {
        self.denied.write().insert(word.to_string());
    }

    /// Number of single-word checks performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WordValidator for StaticValidator {
    async fn is_valid(&self, word: &str) -> bool {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        !self.denied.read().contains(word)
    }
}
