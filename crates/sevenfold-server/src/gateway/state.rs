use std::sync::Arc;

use sevenfold::{Leaderboard, RankedStore, Scorer, WordValidator};

/// Shared handles, built once at startup and cloned into every request.
#[derive(Clone)]
pub struct HandlerState<S: RankedStore + Clone + 'static> {
    pub scorer: Arc<Scorer>,

    pub validator: Arc<dyn WordValidator>,

    pub leaderboard: Leaderboard<S>,

    /// Migration is refused when unset.
    pub migrate_secret: Option<Arc<str>>,
}

impl<S> HandlerState<S>
where
    S: RankedStore + Clone + 'static,
{
    pub fn new(
        scorer: Arc<Scorer>,
        validator: Arc<dyn WordValidator>,
        leaderboard: Leaderboard<S>,
        migrate_secret: Option<String>,
    ) -> Self {
        Self {
            scorer,
            validator,
            leaderboard,
            migrate_secret: migrate_secret.map(Arc::from),
        }
    }
}
