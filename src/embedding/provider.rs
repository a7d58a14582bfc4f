use async_trait::async_trait;
use serde::Deserialize;

use super::error::EmbeddingError;

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// One vector as returned by a provider, tagged with its request position.
pub struct IndexedEmbedding {
    pub index: usize,
    pub embedding: Vec<f32>,
}

impl IndexedEmbedding {
    pub fn new(index: usize, embedding: Vec<f32>) -> Self {
        Self { index, embedding }
    }
}

#[async_trait]
/// Source of embedding vectors.
///
/// Results may come back in any order; callers re-sort with [`order_by_index`].
pub trait EmbeddingProvider: Send + Sync {
    /// Embeds every input in one request.
    async fn embed_batch(&self, inputs: &[String]) -> Result<Vec<IndexedEmbedding>, EmbeddingError>;

    /// Model identifier sent with each request.
    fn model(&self) -> &str;
}

/// Puts provider results back into request order.
///
/// Fails on a count mismatch, an out-of-range index, or a repeated index.
pub fn order_by_index(
    mut items: Vec<IndexedEmbedding>,
    expected: usize,
) -> Result<Vec<Vec<f32>>, EmbeddingError> {
    if items.len() != expected {
        return Err(EmbeddingError::CountMismatch {
            expected,
            actual: items.len(),
        });
    }

    items.sort_by_key(|item| item.index);

    items
        .into_iter()
        .enumerate()
        .map(|(position, item)| {
            if item.index != position {
                return Err(EmbeddingError::MalformedResponse {
                    reason: format!(
                        "embedding indices are not a permutation of 0..{}: found {} at position {}",
                        expected, item.index, position
                    ),
                });
            }
            Ok(item.embedding)
        })
        .collect()
}
