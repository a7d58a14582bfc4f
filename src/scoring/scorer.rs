use std::sync::Arc;
use tracing::{debug, info};

use crate::embedding::{EmbeddingProvider, order_by_index};
use crate::hashing::hash_word_set;
use crate::math::{ScalePolicy, average_distance, cosine_distance, pair_count, round_score};
use crate::words::WordSet;

use super::error::ScoringError;
use super::types::{PairDistance, Rescore, RescoreDiagnostics, ScoreReport};

/// Turns words into a score: one batched embedding call, then pure math.
pub struct Scorer {
    provider: Arc<dyn EmbeddingProvider>,
    policy: ScalePolicy,
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("model", &self.provider.model())
            .field("policy", &self.policy)
            .finish()
    }
}

impl Scorer {
    pub fn new(provider: Arc<dyn EmbeddingProvider>, policy: ScalePolicy) -> Self {
        Self { provider, policy }
    }

    pub fn policy(&self) -> ScalePolicy {
        self.policy
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Scores a validated live submission. Any failure fails the whole request.
    pub async fn score(&self, words: &WordSet) -> Result<ScoreReport, ScoringError> {
        let words = words.words();
        let fingerprint = hash_word_set(words);

        let embeddings = self.embed(words).await?;
        check_dimensions(words, &embeddings)?;

        let pair_distances = self.pair_distances(words, &embeddings);
        let average = average_distance(&embeddings);
        let score = self.finalize(average)?;

        info!(
            fingerprint = %format!("{:016x}", fingerprint),
            score,
            average_distance = average,
            "Scored word set"
        );

        Ok(ScoreReport {
            score,
            average_distance: average,
            pair_distances,
        })
    }

    /// Re-embeds and re-scores a stored word list under the current scale.
    ///
    /// Stored lists are not re-validated; only emptiness is rejected.
    pub async fn rescore(&self, words: &[String]) -> Result<Rescore, ScoringError> {
        if words.is_empty() {
            return Err(ScoringError::InvalidInput {
                reason: "stored entry has no words".to_string(),
            });
        }

        let embeddings = self.embed(words).await?;
        let dimension = check_dimensions(words, &embeddings)?;
        let average = average_distance(&embeddings);
        let score = self.finalize(average)?;

        Ok(Rescore {
            score,
            diagnostics: RescoreDiagnostics {
                input_count: words.len(),
                embedding_count: embeddings.len(),
                dimension,
                average_distance: average,
            },
        })
    }

    /// Every unordered pair `(i, j)` with `i < j`, raw and scaled.
    pub fn pair_distances(&self, words: &[String], embeddings: &[Vec<f32>]) -> Vec<PairDistance> {
        let mut pairs = Vec::with_capacity(pair_count(words.len()));
        for i in 0..words.len() {
            for j in (i + 1)..words.len() {
                let distance = cosine_distance(&embeddings[i], &embeddings[j]);
                pairs.push(PairDistance {
                    word1: words[i].clone(),
                    word2: words[j].clone(),
                    i,
                    j,
                    distance,
                    scaled_score: self.policy.scale(distance),
                });
            }
        }
        pairs
    }

    async fn embed(&self, words: &[String]) -> Result<Vec<Vec<f32>>, ScoringError> {
        let items = self.provider.embed_batch(words).await?;
        debug!(requested = words.len(), received = items.len(), "Embeddings received");
        Ok(order_by_index(items, words.len())?)
    }

    fn finalize(&self, average: f64) -> Result<u32, ScoringError> {
        round_score(self.policy.scale(average)).ok_or(ScoringError::NonFiniteScore {
            average_distance: average,
        })
    }
}

/// All vectors must be non-empty and share one length. Returns that length.
fn check_dimensions(words: &[String], embeddings: &[Vec<f32>]) -> Result<usize, ScoringError> {
    let expected = embeddings.first().map(Vec::len).unwrap_or(0);

    for (word, embedding) in words.iter().zip(embeddings) {
        if embedding.is_empty() {
            return Err(ScoringError::EmptyEmbedding { word: word.clone() });
        }
        if embedding.len() != expected {
            return Err(ScoringError::DimensionMismatch {
                word: word.clone(),
                expected,
                actual: embedding.len(),
            });
        }
    }

    Ok(expected)
}
