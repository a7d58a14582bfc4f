//! Persistent leaderboard on top of an external sorted-set store.
//!
//! - [`store`] defines the [`RankedStore`] seam (Redis sorted-set semantics).
//! - [`upstash`] implements it over the Upstash REST protocol.
//! - [`memory`] implements it in-process.
//! - [`board`] adds entry (de)serialization and the four leaderboard operations.
//!
//! # Identity
//!
//! A member is the JSON text `{"words":[..sorted..],"score":N}`. Conditional
//! insert keys off that exact text, so duplicates are rejected only when the
//! canonical words *and* the score match. See [`LeaderboardEntry::member`].

pub mod board;
pub mod error;
pub mod memory;
pub mod model;
pub mod store;
pub mod upstash;


pub use board::Leaderboard;
pub use error::LeaderboardError;
pub use memory::MemoryStore;
pub use model::{LeaderboardEntry, format_score};
pub use store::RankedStore;
pub use upstash::UpstashStore;
