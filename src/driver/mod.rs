//! Client-side load driver.
//!
//! # Data Flow
//! ```text
//! DriverConfig (CLI)
//!     → runner.rs: one repeating task per console
//!         → GET /availability/{console} (reqwest, bounded concurrency)
//!         → DriverResult (real, or fallback on any failure)
//!     → results channel → observer (log line + driver metrics)
//! ```
//!
//! # Design Decisions
//! - A failed request of any kind (connect error, timeout, fault status,
//!   bad body) becomes the fallback result `available = false`; the
//!   driver's job is sustained demonstration traffic, so nothing it
//!   receives may halt it
//! - Outstanding requests per console are capped by a semaphore, not by
//!   waiting for the previous request to complete

pub mod runner;
pub mod types;

pub use runner::LoadDriver;
pub use types::{DriverConfig, DriverError, DriverResult, DriverSummary};
