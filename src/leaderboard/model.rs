use serde::{Deserialize, Serialize, Serializer};
use serde_json::Number;

use super::error::LeaderboardError;
use crate::words::CanonicalWordSet;

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// One ranked word set.
pub struct LeaderboardEntry {
    pub words: CanonicalWordSet,
    #[serde(serialize_with = "serialize_score")]
    pub score: f64,
}

#[derive(Serialize)]
struct MemberRef<'a> {
    words: &'a [String],
    score: Number,
}

#[derive(Deserialize)]
struct StoredMember {
    words: Vec<String>,
    score: f64,
}

impl LeaderboardEntry {
    pub fn new(words: CanonicalWordSet, score: f64) -> Self {
        Self { words, score }
    }

    /// Serialized member identity: `{"words":[..],"score":N}`.
    ///
    /// Field order is fixed and whole scores carry no fractional part, so the
    /// same entry always produces byte-identical members, including members
    /// written by earlier deployments.
    pub fn member(&self) -> Result<String, LeaderboardError> {
        let member = MemberRef {
            words: self.words.words(),
            score: score_number(self.score)?,
        };
        Ok(serde_json::to_string(&member)?)
    }

    /// Parses a stored member. Unknown fields are ignored.
    pub fn from_member(raw: &str) -> Result<Self, LeaderboardError> {
        let stored: StoredMember = serde_json::from_str(raw)?;
        Ok(Self {
            words: CanonicalWordSet::from_stored(stored.words),
            score: stored.score,
        })
    }
}

/// Text form of a score for the store (`57`, `57.25`).
pub fn format_score(score: f64) -> String {
    match score_number(score) {
        Ok(n) => n.to_string(),
        Err(_) => score.to_string(),
    }
}

fn score_number(score: f64) -> Result<Number, LeaderboardError> {
    if !score.is_finite() {
        return Err(LeaderboardError::NonFiniteScore { score });
    }
    if score.fract() == 0.0 && score.abs() < MAX_EXACT_INT {
        return Ok(Number::from(score as i64));
    }
    Number::from_f64(score).ok_or(LeaderboardError::NonFiniteScore { score })
}

fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match score_number(*score) {
        Ok(n) => n.serialize(serializer),
        Err(_) => serializer.serialize_none(),
    }
}
