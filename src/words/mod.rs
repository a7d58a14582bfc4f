//! Word sets, canonical identity, and word-validity checks.
//!
//! A [`WordSet`] is what the player typed, in order. A [`CanonicalWordSet`] is
//! the same multiset sorted; it is the leaderboard identity, so two
//! submissions that differ only in order are the same entry.

pub mod error;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod validator;


pub use error::WordSetError;
#[cfg(any(test, feature = "mock"))]
pub use mock::StaticValidator;
pub use validator::{DictionaryValidator, WordValidator};

use serde::Serialize;

use crate::constants::WORD_COUNT;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
/// Exactly [`WORD_COUNT`] lowercase ASCII-alphabetic words, in submission order.
pub struct WordSet(Vec<String>);

impl WordSet {
    /// Normalizes (trim + lowercase) and validates raw input.
    ///
    /// Count is checked first, so a wrong-length submission never reports
    /// individual words.
    pub fn parse<I, S>(raw: I) -> Result<Self, WordSetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<String> = raw
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .collect();

        if words.len() != WORD_COUNT {
            return Err(WordSetError::WrongCount {
                expected: WORD_COUNT,
                actual: words.len(),
            });
        }

        let malformed: Vec<String> = words
            .iter()
            .filter(|w| !is_alphabetic_token(w))
            .cloned()
            .collect();
        if !malformed.is_empty() {
            return Err(WordSetError::NotAlphabetic { words: malformed });
        }

        Ok(Self(words))
    }

    /// Words in submission order.
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Sorted identity of this set.
    pub fn canonical(&self) -> CanonicalWordSet {
        canonicalize(&self.0)
    }
}

impl AsRef<[String]> for WordSet {
    fn as_ref(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
/// Lexicographically sorted word list used as the leaderboard identity.
pub struct CanonicalWordSet(Vec<String>);

impl CanonicalWordSet {
    /// Sorted words.
    pub fn words(&self) -> &[String] {
        &self.0
    }

    /// Number of words (stored sets are not re-validated, so this may differ from 7).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Re-establishes the sort invariant on words read back from storage.
    pub fn from_stored(words: Vec<String>) -> Self {
        canonicalize(&words)
    }
}

impl std::fmt::Display for CanonicalWordSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

/// Returns the sorted copy of `words`. Pure and total.
pub fn canonicalize<S: AsRef<str>>(words: &[S]) -> CanonicalWordSet {
    let mut sorted: Vec<String> = words.iter().map(|w| w.as_ref().to_string()).collect();
    sorted.sort();
    CanonicalWordSet(sorted)
}

fn is_alphabetic_token(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_lowercase())
}
