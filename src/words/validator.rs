//! Dictionary-backed word validity checks.

use async_trait::async_trait;
use futures_util::future::join_all;
use moka::sync::Cache;
use reqwest::{Client as HttpClient, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::constants::{DEFAULT_DICTIONARY_URL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_WORD_CACHE_CAPACITY};

#[async_trait]
/// Answers "is this a recognized word?".
///
/// Implementations must fail open: an unreachable checker reports `true`.
pub trait WordValidator: Send + Sync {
    /// Checks a single lowercase word.
    async fn is_valid(&self, word: &str) -> bool;

    /// Checks all words concurrently, returning the rejected ones in input order.
    async fn invalid_words(&self, words: &[String]) -> Vec<String> {
        let checks = join_all(words.iter().map(|w| self.is_valid(w))).await;
        words
            .iter()
            .zip(checks)
            .filter(|(_, ok)| !ok)
            .map(|(w, _)| w.clone())
            .collect()
    }
}

/// Looks words up against a dictionaryapi.dev-style endpoint (`GET {base}/{word}`).
///
/// 2xx means valid, 404 means invalid. Anything else (transport errors,
/// timeouts, 429, 5xx) is treated as valid so a third-party outage never blocks
/// play. Only definite answers are cached.
pub struct DictionaryValidator {
    http: HttpClient,
    base_url: String,
    cache: Cache<String, bool>,
}

impl std::fmt::Debug for DictionaryValidator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DictionaryValidator")
            .field("base_url", &self.base_url)
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl Default for DictionaryValidator {
    fn default() -> Self {
        Self::new(
            DEFAULT_DICTIONARY_URL,
            Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            DEFAULT_WORD_CACHE_CAPACITY,
        )
    }
}

impl DictionaryValidator {
    /// Creates a validator for `base_url` with a request timeout and cache size.
    pub fn new(base_url: &str, timeout: Duration, cache_capacity: u64) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| HttpClient::new());

        Self::with_client(http, base_url, cache_capacity)
    }

    /// Creates a validator sharing an existing HTTP client.
    pub fn with_client(http: HttpClient, base_url: &str, cache_capacity: u64) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            cache: Cache::new(cache_capacity),
        }
    }

    /// Returns the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn lookup(&self, word: &str) -> Option<bool> {
        let url = format!("{}/{}", self.base_url, word);

        let response = match self.http.get(&url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(word, error = %e, "Dictionary unreachable, accepting word");
                return None;
            }
        };

        let status = response.status();
        if status.is_success() {
            Some(true)
        } else if status == StatusCode::NOT_FOUND {
            Some(false)
        } else {
            warn!(word, status = status.as_u16(), "Unexpected dictionary status, accepting word");
            None
        }
    }
}

#[async_trait]
impl WordValidator for DictionaryValidator {
    async fn is_valid(&self, word: &str) -> bool {
        if let Some(known) = self.cache.get(word) {
            return known;
        }

        match self.lookup(word).await {
            Some(valid) => {
                debug!(word, valid, "Dictionary lookup");
                self.cache.insert(word.to_string(), valid);
                valid
            }
            None => true,
        }
    }
}
