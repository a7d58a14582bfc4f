//! Vector math used by scoring.
//!
//! All accumulation happens in `f64` even though embeddings arrive as `f32`;
//! 21 pairs over ~1.5k dimensions is enough for `f32` sums to drift in the
//! last displayed digit.
//!
//! NaN is the failure signal here. [`cosine_similarity`] returns NaN for
//! zero-norm, empty or length-mismatched inputs, and it flows through
//! [`cosine_distance`] and [`average_distance`] untouched. Callers check
//! finiteness once at the end (see [`round_score`]).

pub mod scale;


pub use scale::{ScalePolicy, ScalePolicyError};

/// Cosine similarity `dot(a, b) / (|a| * |b|)`.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return f64::NAN;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (&x, &y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(x), f64::from(y));
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    // 0/0 and x/0 both end up non-finite; normalize to NaN.
    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if similarity.is_finite() {
        similarity
    } else {
        f64::NAN
    }
}

/// Cosine distance `1 - clamp(similarity, -1, 1)`, in `[0, 2]` for valid input.
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    // f64::clamp keeps NaN as NaN.
    1.0 - cosine_similarity(a, b).clamp(-1.0, 1.0)
}

/// Mean cosine distance over every unordered pair. Returns `0.0` for fewer than two vectors.
pub fn average_distance<V: AsRef<[f32]>>(embeddings: &[V]) -> f64 {
    let mut total = 0.0f64;
    let mut count = 0usize;

    for i in 0..embeddings.len() {
        for j in (i + 1)..embeddings.len() {
            total += cosine_distance(embeddings[i].as_ref(), embeddings[j].as_ref());
            count += 1;
        }
    }

    if count == 0 { 0.0 } else { total / count as f64 }
}

/// Number of unordered pairs among `n` items.
pub const fn pair_count(n: usize) -> usize {
    if n < 2 { 0 } else { n * (n - 1) / 2 }
}

/// Rounds a scaled score to the nearest integer in `[0, 100]`.
///
/// Returns `None` for NaN or infinite input so a broken computation can never
/// reach the leaderboard.
pub fn round_score(scaled: f64) -> Option<u32> {
    if !scaled.is_finite() {
        return None;
    }
    Some(scaled.round().clamp(0.0, crate::constants::MAX_SCORE) as u32)
}
