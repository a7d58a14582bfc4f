//! Cross-cutting, shared constants.
//!
//! Prefer deriving secondary constants from primary ones to avoid drift.

/// Number of words in a submission.
pub const WORD_COUNT: usize = 7;

/// Number of unordered pairs in a submission: C(7, 2).
pub const PAIR_COUNT: usize = WORD_COUNT * (WORD_COUNT - 1) / 2;

/// Upper bound of a scaled score.
pub const MAX_SCORE: f64 = 100.0;

/// Number of entries returned by leaderboard snapshots.
pub const LEADERBOARD_SNAPSHOT_SIZE: usize = 10;

/// Default sorted-set key holding the leaderboard.
pub const DEFAULT_LEADERBOARD_KEY: &str = "leaderboard";

/// Default embedding model identifier.
pub const DEFAULT_EMBEDDING_MODEL: &str = "text-embedding-3-small";

/// Default OpenAI-compatible API base URL.
pub const DEFAULT_EMBEDDING_URL: &str = "https://api.openai.com/v1";

/// Default dictionary lookup base URL (the word is appended as a path segment).
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Default sigmoid center: the average distance that maps to a score of 50.
pub const DEFAULT_SIGMOID_CENTER: f64 = 0.63;

/// Default sigmoid steepness.
pub const DEFAULT_SIGMOID_STEEPNESS: f64 = 10.5;

/// Default linear floor: average distances at or below this score 0.
pub const DEFAULT_LINEAR_FLOOR: f64 = 0.4;

/// Default linear span: `floor + span` scores 100.
pub const DEFAULT_LINEAR_SPAN: f64 = 0.7;

/// Default timeout applied to every outbound HTTP request.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Default capacity of the word-validity cache.
pub const DEFAULT_WORD_CACHE_CAPACITY: u64 = 50_000;
