//! Configuration error types.

use thiserror::Error;

use crate::math::ScalePolicyError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Port value is outside valid range (1-65535).
    #[error("invalid port '{value}': must be between 1 and 65535")]
    InvalidPort { value: String },

    /// Port string could not be parsed as a number.
    #[error("failed to parse port '{value}': {source}")]
    PortParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Bind address string could not be parsed.
    #[error("failed to parse bind address '{value}': {source}")]
    InvalidBindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },

    /// A numeric setting could not be parsed.
    #[error("failed to parse {name}='{value}' as a number")]
    InvalidNumber { name: &'static str, value: String },

    /// Scale policy name or parameters were rejected.
    #[error("invalid scale policy: {0}")]
    InvalidScalePolicy(#[from] ScalePolicyError),

    /// Store URL was given without a token, or the other way round.
    #[error("{present} is set but {missing} is not")]
    IncompleteStore {
        present: &'static str,
        missing: &'static str,
    },

    /// A URL setting does not use http or https.
    #[error("{name} must start with http:// or https://, got '{value}'")]
    InvalidUrl { name: &'static str, value: String },

    /// A setting that must be non-zero was zero.
    #[error("{name} must be greater than zero")]
    ZeroValue { name: &'static str },
}
