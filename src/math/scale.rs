//! Calibrated maps from average distance to a 0-100 score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DEFAULT_LINEAR_FLOOR, DEFAULT_LINEAR_SPAN, DEFAULT_SIGMOID_CENTER, DEFAULT_SIGMOID_STEEPNESS,
    MAX_SCORE,
};

#[derive(Debug, Error, Clone, PartialEq)]
/// Rejected scale parameters.
pub enum ScalePolicyError {
    #[error("scale parameter '{name}' must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("scale parameter '{name}' must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("unknown scale policy '{0}' (expected 'sigmoid' or 'linear')")]
    UnknownPolicy(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "lowercase")]
/// Monotonic scaling from raw average cosine distance to a user-facing score.
///
/// Changing the active policy or its parameters changes every score, which is
/// what the migration procedure exists for.
pub enum ScalePolicy {
    /// `100 / (1 + exp(-steepness * (d - center)))`. Output stays strictly inside `(0, 100)`.
    Sigmoid {
        /// Distance mapping to 50.
        center: f64,
        /// Spread around the center.
        steepness: f64,
    },
    /// `clamp((d - floor) / span, 0, 1) * 100`.
    Linear {
        /// Distance mapping to 0.
        floor: f64,
        /// Distance range covering 0..100.
        span: f64,
    },
}

impl Default for ScalePolicy {
    fn default() -> Self {
        Self::sigmoid()
    }
}

impl ScalePolicy {
    /// Sigmoid policy with the default calibration.
    pub const fn sigmoid() -> Self {
        Self::Sigmoid {
            center: DEFAULT_SIGMOID_CENTER,
            steepness: DEFAULT_SIGMOID_STEEPNESS,
        }
    }

    /// Linear policy with the default calibration.
    pub const fn linear() -> Self {
        Self::Linear {
            floor: DEFAULT_LINEAR_FLOOR,
            span: DEFAULT_LINEAR_SPAN,
        }
    }

    /// Builds a policy by name (`sigmoid` / `linear`), using the default calibration.
    pub fn from_name(name: &str) -> Result<Self, ScalePolicyError> {
        match name.trim().to_lowercase().as_str() {
            "sigmoid" | "logistic" => Ok(Self::sigmoid()),
            "linear" => Ok(Self::linear()),
            other => Err(ScalePolicyError::UnknownPolicy(other.to_string())),
        }
    }

    /// Short name of the policy.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Sigmoid { .. } => "sigmoid",
            Self::Linear { .. } => "linear",
        }
    }

    /// Checks that the parameters describe a monotonically increasing map.
    pub fn validate(&self) -> Result<(), ScalePolicyError> {
        let (first, second) = match *self {
            Self::Sigmoid { center, steepness } => (("center", center), ("steepness", steepness)),
            Self::Linear { floor, span } => (("floor", floor), ("span", span)),
        };

        for (name, value) in [first, second] {
            if !value.is_finite() {
                return Err(ScalePolicyError::NonFinite { name, value });
            }
        }

        let (name, value) = second;
        if value <= 0.0 {
            return Err(ScalePolicyError::NotPositive { name, value });
        }

        Ok(())
    }

    /// Maps an average distance to a score. NaN in, NaN out.
    pub fn scale(&self, avg_distance: f64) -> f64 {
        match *self {
            Self::Sigmoid { center, steepness } => {
                MAX_SCORE / (1.0 + (-steepness * (avg_distance - center)).exp())
            }
            Self::Linear { floor, span } => {
                ((avg_distance - floor) / span).clamp(0.0, 1.0) * MAX_SCORE
            }
        }
    }
}

impl std::fmt::Display for ScalePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sigmoid { center, steepness } => {
                write!(f, "sigmoid(center={}, steepness={})", center, steepness)
            }
            Self::Linear { floor, span } => write!(f, "linear(floor={}, span={})", floor, span),
        }
    }
}
