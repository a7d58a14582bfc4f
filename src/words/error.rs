use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reasons a submission is not a well-formed word set.
pub enum WordSetError {
    /// Submission did not contain exactly the required number of words.
    #[error("exactly {expected} words required, got {actual}")]
    WrongCount { expected: usize, actual: usize },

    /// One or more words are empty or contain non-alphabetic characters.
    #[error("not a valid word: {}", .words.join(", "))]
    NotAlphabetic { words: Vec<String> },

    /// One or more words were rejected by the dictionary check.
    #[error("not a valid word: {}", .words.join(", "))]
    Unrecognized { words: Vec<String> },
}

impl WordSetError {
    /// Words the caller should be told about (empty for count errors).
    pub fn invalid_words(&self) -> &[String] {
        match self {
            Self::WrongCount { .. } => &[],
            Self::NotAlphabetic { words } | Self::Unrecognized { words } => words,
        }
    }
}
