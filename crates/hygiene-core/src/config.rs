//! Environment configuration.
//!
//! The only tunable the merge flow exposes is the artificial commit delay.
//! Log output format rides along so a host can configure both from one place.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

use crate::time::SleepDelay;

/// Environment variable holding the commit delay in milliseconds.
pub const COMMIT_DELAY_ENV: &str = "HYGIENE_COMMIT_DELAY_MS";

/// Environment variable selecting the log output format.
pub const LOG_FORMAT_ENV: &str = "HYGIENE_LOG_FORMAT";

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable was set to a value that could not be parsed.
    #[error("invalid value for {name}: {reason}")]
    Invalid {
        /// The offending variable.
        name: &'static str,
        /// Why parsing failed.
        reason: String,
    },
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable, multi-line output.
    Pretty,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "pretty" => Ok(Self::Pretty),
            other => Err(format!("expected `json` or `pretty`, got `{other}`")),
        }
    }
}

/// Runtime configuration for a merge session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeConfig {
    /// Latency between a resolve request and its commit.
    pub commit_delay: Duration,
    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            commit_delay: SleepDelay::DEFAULT,
            log_format: LogFormat::default(),
        }
    }
}

impl MergeConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads configuration through an arbitrary variable lookup. Unset
    /// variables fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if a variable is set but malformed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(COMMIT_DELAY_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|e| ConfigError::Invalid {
                name: COMMIT_DELAY_ENV,
                reason: format!("{e}"),
            })?;
            config.commit_delay = Duration::from_millis(millis);
        }

        if let Some(raw) = lookup(LOG_FORMAT_ENV) {
            config.log_format = raw.parse().map_err(|reason| ConfigError::Invalid {
                name: LOG_FORMAT_ENV,
                reason,
            })?;
        }

        Ok(config)
    }

    /// Builds the production commit delay for this configuration.
    #[must_use]
    pub fn sleep_delay(&self) -> SleepDelay {
        SleepDelay::new(self.commit_delay)
    }
}
