//! Sevenfold library crate (used by the server and integration tests).
//!
//! Scores a set of seven words by how far apart their meanings are, and keeps a
//! leaderboard of scored sets.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`WordSet`], [`CanonicalWordSet`] - Submissions and their leaderboard identity
//! - [`Scorer`], [`ScoreReport`] - Embedding-based scoring
//! - [`Leaderboard`], [`LeaderboardEntry`] - Ranked storage
//! - [`Migrator`], [`MigrationReport`] - Re-scoring after a scale change
//!
//! ## Seams
//! - [`EmbeddingProvider`] - Batched text embeddings ([`OpenAiEmbedder`])
//! - [`WordValidator`] - Word existence checks ([`DictionaryValidator`])
//! - [`RankedStore`] - Sorted-set storage ([`UpstashStore`], [`MemoryStore`])
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod hashing;
pub mod leaderboard;
pub mod math;
pub mod migration;
pub mod scoring;
pub mod words;

pub use config::{Config, ConfigError};
pub use constants::{LEADERBOARD_SNAPSHOT_SIZE, PAIR_COUNT, WORD_COUNT};
#[cfg(any(test, feature = "mock"))]
pub use embedding::MockEmbeddingProvider;
pub use embedding::{EmbeddingError, EmbeddingProvider, OpenAiConfig, OpenAiEmbedder};
pub use hashing::{hash_word_set, secrets_match};
pub use leaderboard::{
    Leaderboard, LeaderboardEntry, LeaderboardError, MemoryStore, RankedStore, UpstashStore,
};
pub use math::{ScalePolicy, ScalePolicyError, average_distance, cosine_distance};
pub use migration::{MigrationError, MigrationOutcome, MigrationRecord, MigrationReport, Migrator};
pub use scoring::{PairDistance, Rescore, RescoreDiagnostics, ScoreReport, Scorer, ScoringError};
#[cfg(any(test, feature = "mock"))]
pub use words::StaticValidator;
pub use words::{
    CanonicalWordSet, DictionaryValidator, WordSet, WordSetError, WordValidator, canonicalize,
};
