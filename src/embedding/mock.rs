use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, HashSet};

use super::error::EmbeddingError;
use super::provider::{EmbeddingProvider, IndexedEmbedding};

pub const MOCK_EMBEDDING_DIM: usize = 64;

/// Deterministic in-process embedding provider.
///
/// Vectors are derived from a BLAKE3 hash of the word, so the same word always
/// embeds identically. Results are returned in reverse order to exercise index
/// re-sorting. Specific words or whole calls can be made to fail.
#[derive(Debug, Default)]
pub struct MockEmbeddingProvider {
    overrides: Mutex<HashMap<String, Vec<f32>>>,
    failing_words: Mutex<HashSet<String>>,
    failing_calls: Mutex<HashSet<usize>>,
    requests: Mutex<Vec<Vec<String>>>,
    drop_last: Mutex<bool>,
}

impl MockEmbeddingProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `vector` for `word` instead of the hashed default.
    pub fn with_vector(self, word: &str, vector: Vec<f32>) -> Self {
        self.overrides.lock().insert(word.to_string(), vector);
        self
    }

    /// Any batch containing `word` fails.
    pub fn fail_on_word(&self, word: &str) {
        self.failing_words.lock().insert(word.to_string());
    }

    /// The `n`th call (zero-based) fails.
    pub fn fail_on_call(&self, n: usize) {
        self.failing_calls.lock().insert(n);
    }

    /// Responses omit their last item.
    pub fn truncate_responses(&self) {
        *self.drop_last.lock() = true;
    }

    /// Batches received so far.
    pub fn requests(&self) -> Vec<Vec<String>> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Vector the mock returns for `word`.
    pub fn vector_for(&self, word: &str) -> Vec<f32> {
        if let Some(v) = self.overrides.lock().get(word) {
            return v.clone();
        }
        hashed_vector(word)
    }
}

#[async_trait]
impl EmbeddingProvider for MockEmbeddingProvider {
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<IndexedEmbedding>, EmbeddingError> {
        let call = {
            let mut requests = self.requests.lock();
            requests.push(inputs.to_vec());
            requests.len() - 1
        };

        if self.failing_calls.lock().contains(&call) {
            return Err(EmbeddingError::Provider {
                status: 500,
                message: format!("mock failure on call {}", call),
            });
        }

        if let Some(word) = inputs.iter().find(|w| self.failing_words.lock().contains(*w)) {
            return Err(EmbeddingError::Provider {
                status: 500,
                message: format!("mock failure on '{}'", word),
            });
        }

        let mut items: Vec<IndexedEmbedding> = inputs
            .iter()
            .enumerate()
            .map(|(index, word)| IndexedEmbedding::new(index, self.vector_for(word)))
            .rev()
            .collect();

        if *self.drop_last.lock() {
            items.pop();
        }

        Ok(items)
    }

    fn model(&self) -> &str {
        "mock-embedding"
    }
}

fn hashed_vector(word: &str) -> Vec<f32> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(word.as_bytes());
    let mut reader = hasher.finalize_xof();

    let mut bytes = [0u8; MOCK_EMBEDDING_DIM];
    reader.fill(&mut bytes);

    // Non-negative components keep pairwise distances in [0, 1], like real text embeddings.
    bytes.iter().map(|&b| b as f32 / 255.0 + 0.01).collect()
}
