//! Fault taxonomy for the availability endpoint.
//!
//! # Design Decisions
//! - Invalid input is the caller's mistake and surfaces as 400; the
//!   simulated outage is an internal failure and surfaces as 500. Keeping
//!   the two distinguishable is the point of the demo: the broken console
//!   shows up in error-rate dashboards under its own tag while client typos
//!   stay in the 4xx bucket under `UNKNOWN`.
//! - Fault bodies are structured JSON so the load driver (and any other
//!   client) can parse them uniformly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use crate::domain::Classification;

/// Server-side faults surfaced by the availability handler.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested value is not a known console.
    #[error("unknown console")]
    InvalidConsole,

    /// The designated problem console deterministically fails.
    #[error("availability lookup failed for {0}")]
    SimulatedOutage(Classification),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidConsole => StatusCode::BAD_REQUEST,
            ApiError::SimulatedOutage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            ApiError::InvalidConsole => "invalid_console",
            ApiError::SimulatedOutage(_) => "simulated_outage",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.kind(),
            "message": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::classify;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::InvalidConsole.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::SimulatedOutage(classify("ps5")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
