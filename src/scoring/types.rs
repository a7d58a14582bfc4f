use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Distance between two submitted words.
pub struct PairDistance {
    pub word1: String,
    pub word2: String,
    /// Index of `word1` in the submission.
    pub i: usize,
    /// Index of `word2` in the submission (`i < j`).
    pub j: usize,
    /// Raw cosine distance.
    pub distance: f64,
    /// `distance` passed through the active scale (not rounded).
    pub scaled_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Result of scoring a live submission.
pub struct ScoreReport {
    /// Rounded final score in `[0, 100]`.
    pub score: u32,
    /// Mean of the raw pair distances.
    pub average_distance: f64,
    /// One record per unordered pair, in `(i, j)` lexicographic order.
    pub pair_distances: Vec<PairDistance>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Intermediate values from re-scoring a stored entry.
pub struct RescoreDiagnostics {
    pub input_count: usize,
    pub embedding_count: usize,
    pub dimension: usize,
    pub average_distance: f64,
}

#[derive(Debug, Clone, PartialEq)]
/// Result of re-scoring a stored entry.
pub struct Rescore {
    pub score: u32,
    pub diagnostics: RescoreDiagnostics,
}
