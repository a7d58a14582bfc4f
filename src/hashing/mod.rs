//! BLAKE3 helpers: word-set fingerprints and secret comparison.

use blake3::Hasher;

/// Order-independent 64-bit fingerprint of a word list, truncated from BLAKE3.
///
/// Used for log correlation only. Leaderboard identity is the full canonical
/// word list, never this hash.
///
/// Words are hashed in sorted order with a separator, so any permutation of the
/// same multiset yields the same value and `["ab", "c"]` differs from `["a", "bc"]`.
pub fn hash_word_set<S: AsRef<str>>(words: &[S]) -> u64 {
    let mut sorted: Vec<&str> = words.iter().map(AsRef::as_ref).collect();
    sorted.sort_unstable();

    let mut hasher = Hasher::new();
    for word in sorted {
        hasher.update(word.as_bytes());
        hasher.update(b"|");
    }

    truncate(&hasher.finalize())
}

fn truncate(hash: &blake3::Hash) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash.as_bytes()[..8]);
    u64::from_le_bytes(bytes)
}

/// Compares a presented secret against the configured one.
///
/// Both sides are hashed first and compared as [`blake3::Hash`], whose equality
/// is constant-time, so timing does not leak the matching prefix length.
pub fn secrets_match(presented: &str, expected: &str) -> bool {
    blake3::hash(presented.as_bytes()) == blake3::hash(expected.as_bytes())
}
