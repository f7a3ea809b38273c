//! Deterministic availability outcomes per classification.
//!
//! # Responsibilities
//! - Map each classification to available / unavailable / fault
//! - Keep the one deliberately broken console broken
//!
//! # Design Decisions
//! - The table is a pure match with no randomness and no runtime state, so
//!   a given console produces the same outcome on every request. Demos and
//!   tests stay reproducible.
//! - Unknown input faults as a usage error, distinct from the simulated
//!   internal outage (see `http::error` for the status mapping).

use crate::domain::classifier::{Classification, Console};

/// Why a request faults instead of answering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Input was not a known console.
    InvalidConsole,
    /// The designated problem console always fails.
    SimulatedOutage,
}

/// Terminal outcome of one availability query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Available(bool),
    Fault(FaultKind),
}

/// Static outcome table.
///
/// `ps5` is the problem child: it classifies fine but always faults, so the
/// fault shows up under its own tag rather than under `UNKNOWN`.
pub fn decide(classification: Classification) -> Outcome {
    match classification {
        Classification::Unknown => Outcome::Fault(FaultKind::InvalidConsole),
        Classification::Known(Console::Ps5) => Outcome::Fault(FaultKind::SimulatedOutage),
        Classification::Known(Console::Xbox) => Outcome::Available(true),
        Classification::Known(Console::Switch) | Classification::Known(Console::Wii) => {
            Outcome::Available(false)
        }
    }
}
