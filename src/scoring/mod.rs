//! Word-set scoring.
//!
//! [`Scorer`] fetches one embedding per word in a single batched request,
//! re-sorts the results by provider index, and reduces them to:
//!
//! - 21 [`PairDistance`] records for display, each scaled independently, and
//! - one integer score: `round(scale(mean raw distance))`.
//!
//! The final score scales the *mean raw distance*, not the mean of the scaled
//! pair scores. With a nonlinear scale these differ.

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::Scorer;
pub use types::{PairDistance, Rescore, RescoreDiagnostics, ScoreReport};
