use super::error::LeaderboardError;

/// Ranked key-value service with sorted-set semantics.
///
/// Members are opaque strings ordered by a numeric score; equal scores are
/// ordered by member. This is the minimal surface of a Redis sorted set that
/// the leaderboard needs.
pub trait RankedStore: Send + Sync {
    /// Adds `member` only if it is not already present (`ZADD NX`). Returns whether it was added.
    fn add_if_absent(
        &self,
        key: &str,
        score: f64,
        member: &str,
    ) -> impl std::future::Future<Output = Result<bool, LeaderboardError>> + Send;

    /// Adds or updates every `(score, member)` pair (`ZADD`).
    fn add_all(
        &self,
        key: &str,
        members: &[(f64, String)],
    ) -> impl std::future::Future<Output = Result<(), LeaderboardError>> + Send;

    /// Members by descending rank, from `start` to `stop` inclusive (`None` = to the end).
    fn range_desc(
        &self,
        key: &str,
        start: usize,
        stop: Option<usize>,
    ) -> impl std::future::Future<Output = Result<Vec<String>, LeaderboardError>> + Send;

    /// Removes the whole collection (`DEL`).
    fn delete(&self, key: &str)
    -> impl std::future::Future<Output = Result<(), LeaderboardError>> + Send;

    /// Round-trips a no-op command.
    fn ping(&self) -> impl std::future::Future<Output = Result<(), LeaderboardError>> + Send;
}
