//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Request handling produces:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (exporter setup, series names)
//!     → tagging.rs (per-request span + metric sample, shared console tag)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//!     → Trace spans (tracing subscriber)
//! ```
//!
//! # Design Decisions
//! - One tag key (`console`) is written to both channels with the same
//!   validated value, so a metric data point and a span for the same
//!   request classification can be joined downstream
//! - Metric recording is fire-and-forget from the handler's perspective;
//!   the request never blocks on a sink

pub mod logging;
pub mod metrics;
pub mod tagging;

pub use tagging::{RequestTelemetry, CONSOLE_TAG};
