//! Response body types.
//!
//! # Design Decisions
//! - The success body names the *classification*, not the raw input, so the
//!   response a client sees matches the tag telemetry recorded
//! - `Deserialize` is implemented here too because the load driver parses
//!   the same shape back out

use serde::{Deserialize, Serialize};

/// Success body for `GET /availability/{value}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    /// Canonical classification string of the queried console.
    pub console: String,
    /// Whether the console is in stock.
    pub available: bool,
}
