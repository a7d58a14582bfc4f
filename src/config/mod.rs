//! Environment-backed configuration.
//!
//! Most settings have defaults. Override with `SEVENFOLD_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::IpAddr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_DICTIONARY_URL, DEFAULT_EMBEDDING_MODEL, DEFAULT_EMBEDDING_URL,
    DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_LEADERBOARD_KEY, DEFAULT_WORD_CACHE_CAPACITY,
};
use crate::math::ScalePolicy;

/// Server configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SEVENFOLD_*` overrides on top of defaults.
#[derive(Clone)]
pub struct Config {
    /// HTTP server port. Default: `8080`.
    pub port: u16,

    /// IP address to bind to. Default: `127.0.0.1`.
    pub bind_addr: IpAddr,

    /// Bearer key for the embedding API. The server refuses to start without it.
    pub openai_api_key: Option<String>,

    /// OpenAI-compatible API base URL.
    pub embedding_url: String,

    pub embedding_model: String,

    /// Dictionary base URL; the word is appended as a path segment.
    pub dictionary_url: String,

    /// Upstash REST endpoint. When unset, an in-process store is used.
    pub store_url: Option<String>,

    pub store_token: Option<String>,

    /// Sorted-set key holding the leaderboard. Default: `leaderboard`.
    pub leaderboard_key: String,

    /// Shared secret for the migration endpoint. Migration is refused when unset.
    pub migrate_secret: Option<String>,

    pub scale_policy: ScalePolicy,

    /// Timeout for every outbound HTTP request. Default: 15 s.
    pub http_timeout: Duration,

    /// Max cached word-validity answers. Default: `50_000`.
    pub word_cache_capacity: u64,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &Option<String>) -> &'static str {
            if value.is_some() { "<set>" } else { "<unset>" }
        }

        f.debug_struct("Config")
            .field("port", &self.port)
            .field("bind_addr", &self.bind_addr)
            .field("openai_api_key", &redact(&self.openai_api_key))
            .field("embedding_url", &self.embedding_url)
            .field("embedding_model", &self.embedding_model)
            .field("dictionary_url", &self.dictionary_url)
            .field("store_url", &self.store_url)
            .field("store_token", &redact(&self.store_token))
            .field("leaderboard_key", &self.leaderboard_key)
            .field("migrate_secret", &redact(&self.migrate_secret))
            .field("scale_policy", &self.scale_policy)
            .field("http_timeout", &self.http_timeout)
            .field("word_cache_capacity", &self.word_cache_capacity)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            bind_addr: IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)),
            openai_api_key: None,
            embedding_url: DEFAULT_EMBEDDING_URL.to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dictionary_url: DEFAULT_DICTIONARY_URL.to_string(),
            store_url: None,
            store_token: None,
            leaderboard_key: DEFAULT_LEADERBOARD_KEY.to_string(),
            migrate_secret: None,
            scale_policy: ScalePolicy::default(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            word_cache_capacity: DEFAULT_WORD_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_PORT: &'static str = "SEVENFOLD_PORT";
    const ENV_BIND_ADDR: &'static str = "SEVENFOLD_BIND_ADDR";
    const ENV_OPENAI_API_KEY: &'static str = "SEVENFOLD_OPENAI_API_KEY";
    const ENV_EMBEDDING_URL: &'static str = "SEVENFOLD_EMBEDDING_URL";
    const ENV_EMBEDDING_MODEL: &'static str = "SEVENFOLD_EMBEDDING_MODEL";
    const ENV_DICTIONARY_URL: &'static str = "SEVENFOLD_DICTIONARY_URL";
    const ENV_STORE_URL: &'static str = "SEVENFOLD_STORE_URL";
    const ENV_STORE_TOKEN: &'static str = "SEVENFOLD_STORE_TOKEN";
    const ENV_LEADERBOARD_KEY: &'static str = "SEVENFOLD_LEADERBOARD_KEY";
    const ENV_MIGRATE_SECRET: &'static str = "SEVENFOLD_MIGRATE_SECRET";
    const ENV_SCALE_POLICY: &'static str = "SEVENFOLD_SCALE_POLICY";
    const ENV_SCALE_CENTER: &'static str = "SEVENFOLD_SCALE_CENTER";
    const ENV_SCALE_STEEPNESS: &'static str = "SEVENFOLD_SCALE_STEEPNESS";
    const ENV_SCALE_FLOOR: &'static str = "SEVENFOLD_SCALE_FLOOR";
    const ENV_SCALE_SPAN: &'static str = "SEVENFOLD_SCALE_SPAN";
    const ENV_HTTP_TIMEOUT_SECS: &'static str = "SEVENFOLD_HTTP_TIMEOUT_SECS";
    const ENV_WORD_CACHE_CAPACITY: &'static str = "SEVENFOLD_WORD_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let port = Self::parse_port_from_env(defaults.port)?;
        let bind_addr = Self::parse_bind_addr_from_env(defaults.bind_addr)?;
        let scale_policy = Self::parse_scale_policy_from_env()?;
        let timeout_secs =
            Self::parse_number_from_env(Self::ENV_HTTP_TIMEOUT_SECS, DEFAULT_HTTP_TIMEOUT_SECS)?;
        let word_cache_capacity =
            Self::parse_number_from_env(Self::ENV_WORD_CACHE_CAPACITY, defaults.word_cache_capacity)?;

        Ok(Self {
            port,
            bind_addr,
            openai_api_key: Self::parse_optional_from_env(Self::ENV_OPENAI_API_KEY),
            embedding_url: Self::parse_string_from_env(Self::ENV_EMBEDDING_URL, defaults.embedding_url),
            embedding_model: Self::parse_string_from_env(
                Self::ENV_EMBEDDING_MODEL,
                defaults.embedding_model,
            ),
            dictionary_url: Self::parse_string_from_env(
                Self::ENV_DICTIONARY_URL,
                defaults.dictionary_url,
            ),
            store_url: Self::parse_optional_from_env(Self::ENV_STORE_URL),
            store_token: Self::parse_optional_from_env(Self::ENV_STORE_TOKEN),
            leaderboard_key: Self::parse_string_from_env(
                Self::ENV_LEADERBOARD_KEY,
                defaults.leaderboard_key,
            ),
            migrate_secret: Self::parse_optional_from_env(Self::ENV_MIGRATE_SECRET),
            scale_policy,
            http_timeout: Duration::from_secs(timeout_secs),
            word_cache_capacity,
        })
    }

    /// Checks cross-field invariants. Does not contact any service.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scale_policy.validate()?;

        match (&self.store_url, &self.store_token) {
            (Some(_), None) => {
                return Err(ConfigError::IncompleteStore {
                    present: Self::ENV_STORE_URL,
                    missing: Self::ENV_STORE_TOKEN,
                });
            }
            (None, Some(_)) => {
                return Err(ConfigError::IncompleteStore {
                    present: Self::ENV_STORE_TOKEN,
                    missing: Self::ENV_STORE_URL,
                });
            }
            _ => {}
        }

        let urls = [
            (Self::ENV_EMBEDDING_URL, Some(&self.embedding_url)),
            (Self::ENV_DICTIONARY_URL, Some(&self.dictionary_url)),
            (Self::ENV_STORE_URL, self.store_url.as_ref()),
        ];
        for (name, value) in urls {
            if let Some(value) = value
                && !(value.starts_with("http://") || value.starts_with("https://"))
            {
                return Err(ConfigError::InvalidUrl {
                    name,
                    value: value.clone(),
                });
            }
        }

        if self.http_timeout.is_zero() {
            return Err(ConfigError::ZeroValue {
                name: Self::ENV_HTTP_TIMEOUT_SECS,
            });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Upstash URL and token, when both are configured.
    pub fn store_credentials(&self) -> Option<(&str, &str)> {
        match (&self.store_url, &self.store_token) {
            (Some(url), Some(token)) => Some((url, token)),
            _ => None,
        }
    }

    fn parse_port_from_env(default: u16) -> Result<u16, ConfigError> {
        match env::var(Self::ENV_PORT) {
            Ok(value) => {
                let port: u16 = value.parse().map_err(|e| ConfigError::PortParseError {
                    value: value.clone(),
                    source: e,
                })?;

                if port == 0 {
                    return Err(ConfigError::InvalidPort { value });
                }

                Ok(port)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_bind_addr_from_env(default: IpAddr) -> Result<IpAddr, ConfigError> {
        match env::var(Self::ENV_BIND_ADDR) {
            Ok(value) => value
                .parse()
                .map_err(|e| ConfigError::InvalidBindAddr { value, source: e }),
            Err(_) => Ok(default),
        }
    }

    /// Policy name first, then any per-parameter overrides for that policy.
    fn parse_scale_policy_from_env() -> Result<ScalePolicy, ConfigError> {
        let policy = match Self::parse_optional_from_env(Self::ENV_SCALE_POLICY) {
            Some(name) => ScalePolicy::from_name(&name)?,
            None => ScalePolicy::default(),
        };

        let policy = match policy {
            ScalePolicy::Sigmoid { center, steepness } => ScalePolicy::Sigmoid {
                center: Self::parse_number_from_env(Self::ENV_SCALE_CENTER, center)?,
                steepness: Self::parse_number_from_env(Self::ENV_SCALE_STEEPNESS, steepness)?,
            },
            ScalePolicy::Linear { floor, span } => ScalePolicy::Linear {
                floor: Self::parse_number_from_env(Self::ENV_SCALE_FLOOR, floor)?,
                span: Self::parse_number_from_env(Self::ENV_SCALE_SPAN, span)?,
            },
        };

        policy.validate()?;
        Ok(policy)
    }

    fn parse_optional_from_env(var_name: &str) -> Option<String> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse_string_from_env(var_name: &str, default: String) -> String {
        Self::parse_optional_from_env(var_name).unwrap_or(default)
    }

    fn parse_number_from_env<T: std::str::FromStr>(
        var_name: &'static str,
        default: T,
    ) -> Result<T, ConfigError> {
        match Self::parse_optional_from_env(var_name) {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidNumber {
                name: var_name,
                value,
            }),
            None => Ok(default),
        }
    }
}
