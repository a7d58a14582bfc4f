use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("embedding dimension mismatch: expected {expected}, got {actual} for '{word}'")]
    DimensionMismatch {
        word: String,
        expected: usize,
        actual: usize,
    },

    #[error("empty embedding for '{word}'")]
    EmptyEmbedding { word: String },

    #[error("score is not a finite number (average distance {average_distance})")]
    NonFiniteScore { average_distance: f64 },

    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },
}
