//! Load driver configuration and result types.

use std::time::Duration;

use thiserror::Error;

use crate::domain::Console;

/// Parameters for one driver run.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Base URL of the availability service.
    pub base_url: String,

    /// Consoles to query, in schedule order.
    pub consoles: Vec<Console>,

    /// Time between issues within one console's schedule.
    pub interval: Duration,

    /// Maximum outstanding requests per console.
    pub per_console_concurrency: usize,

    /// Requests to issue per console; `None` runs until shutdown.
    pub iterations: Option<u64>,

    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            consoles: Console::ALL.to_vec(),
            interval: Duration::from_millis(500),
            per_console_concurrency: 4,
            iterations: None,
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl DriverConfig {
    /// Check the configuration before a run starts.
    pub fn validate(&self) -> Result<(), DriverConfigError> {
        if self.consoles.is_empty() {
            return Err(DriverConfigError::NoConsoles);
        }
        if self.interval.is_zero() {
            return Err(DriverConfigError::ZeroInterval);
        }
        if self.per_console_concurrency == 0 {
            return Err(DriverConfigError::ZeroConcurrency);
        }
        if reqwest::Url::parse(&self.base_url).is_err() {
            return Err(DriverConfigError::InvalidBaseUrl(self.base_url.clone()));
        }
        Ok(())
    }
}

/// Semantic problems with a `DriverConfig`.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverConfigError {
    #[error("at least one console must be scheduled")]
    NoConsoles,

    #[error("interval must be greater than zero")]
    ZeroInterval,

    #[error("per-console concurrency must be greater than zero")]
    ZeroConcurrency,

    #[error("base URL {0:?} is not a valid URL")]
    InvalidBaseUrl(String),
}

/// Why one query did not produce a usable result. Absorbed internally by
/// the driver; only ever logged.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("invalid driver configuration: {0}")]
    Config(#[from] DriverConfigError),

    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("response names unexpected console {0:?}")]
    MismatchedConsole(String),
}

/// One observed result, real or substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverResult {
    pub console: Console,
    pub available: bool,
    /// True when this result was substituted after a failure.
    pub fallback: bool,
}

/// Totals reported at the end of a bounded run (or after shutdown).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DriverSummary {
    pub total: u64,
    pub fallbacks: u64,
}
