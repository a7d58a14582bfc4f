use thiserror::Error;

#[derive(Debug, Error)]
/// Errors returned by leaderboard persistence.
pub enum LeaderboardError {
    /// The store could not be reached.
    #[error("failed to reach leaderboard store at '{url}': {message}")]
    ConnectionFailed {
        /// Endpoint URL.
        url: String,
        /// Error message.
        message: String,
    },

    /// The store rejected a command.
    #[error("leaderboard command {command} failed: {message}")]
    CommandFailed {
        /// Command name (e.g. `ZADD`).
        command: &'static str,
        /// Error message.
        message: String,
    },

    /// The store answered with something the command cannot return.
    #[error("unexpected response to {command}: {message}")]
    UnexpectedResponse {
        /// Command name.
        command: &'static str,
        /// What was wrong.
        message: String,
    },

    /// A member could not be serialized or parsed.
    #[error("invalid leaderboard member: {0}")]
    InvalidMember(#[from] serde_json::Error),

    /// Scores must be finite to be stored.
    #[error("refusing to store non-finite score {score}")]
    NonFiniteScore {
        /// Offending score.
        score: f64,
    },
}
