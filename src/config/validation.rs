//! Configuration validation.
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address {0:?} is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address {0:?} is not a valid socket address")]
    InvalidMetricsAddress(String),

    #[error("listener.request_timeout_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("observability.app_name must not be empty")]
    EmptyAppName,

    #[error("observability.instance_id must not be empty")]
    EmptyInstanceId,
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.observability.app_name.is_empty() {
        errors.push(ValidationError::EmptyAppName);
    }

    if config.observability.instance_id.is_empty() {
        errors.push(ValidationError::EmptyInstanceId);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
