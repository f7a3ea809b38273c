//! Request handlers.
//!
//! # Responsibilities
//! - Drive one availability query through its states:
//!   received → classified → tagged → responded | faulted
//!
//! # Design Decisions
//! - Tagging happens before the outcome is even consulted, so every exit
//!   path (success, invalid input, simulated outage) leaves the request
//!   span and metric sample carrying the same classification
//! - The handler never retries and never absorbs a fault; surfacing them
//!   is the load driver's input signal

use axum::extract::Path;
use axum::{Extension, Json};

use crate::domain::{classify, decide, FaultKind, Outcome};
use crate::http::error::ApiError;
use crate::http::response::AvailabilityResponse;
use crate::observability::RequestTelemetry;

/// `GET /availability/{value}`
pub async fn availability(
    Path(raw): Path<String>,
    Extension(telemetry): Extension<RequestTelemetry>,
) -> Result<Json<AvailabilityResponse>, ApiError> {
    let classification = classify(&raw);

    // Tag first: the fault paths below must carry the classification too.
    telemetry.tag(classification);

    match decide(classification) {
        Outcome::Available(available) => {
            tracing::debug!(console = classification.as_str(), available, "Availability answered");
            Ok(Json(AvailabilityResponse {
                console: classification.as_str().to_string(),
                available,
            }))
        }
        Outcome::Fault(FaultKind::InvalidConsole) => {
            tracing::warn!(console = classification.as_str(), "Rejected unknown console");
            Err(ApiError::InvalidConsole)
        }
        Outcome::Fault(FaultKind::SimulatedOutage) => {
            tracing::error!(console = classification.as_str(), "Simulated outage");
            Err(ApiError::SimulatedOutage(classification))
        }
    }
}

/// `GET /health` liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
