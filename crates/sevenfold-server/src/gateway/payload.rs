use serde::{Deserialize, Serialize};

use sevenfold::{LeaderboardEntry, PairDistance};

#[derive(Deserialize, Debug, Clone)]
pub struct ScoreRequest {
    pub words: Vec<String>,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResponse {
    pub score: u32,
    pub pair_distances: Vec<PairDistance>,
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Serialize, Debug)]
pub struct LeaderboardResponse {
    pub leaderboard: Vec<LeaderboardEntry>,
}

#[derive(Deserialize, Debug, Default)]
pub struct MigrateQuery {
    pub secret: Option<String>,
}
