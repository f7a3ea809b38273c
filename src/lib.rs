//! Console availability demo service.
//!
//! A small Tokio/Axum service that answers availability queries for a
//! closed set of game consoles, plus a load-driving client, built to show
//! how metrics and trace spans can be correlated through one shared,
//! low-cardinality classification tag.
//!
//! # Architecture Overview
//!
//! ```text
//!   load-driver (bin)                    console-availability (bin)
//!  ┌────────────────────┐              ┌──────────────────────────────────┐
//!  │ driver             │   GET        │ http/server → middleware/        │
//!  │  one schedule per  │──────────────▶  telemetry (span + sample open)  │
//!  │  console, bounded  │ /availability│        │                         │
//!  │  concurrency       │   /{value}   │        ▼                         │
//!  │        │           │              │ http/handlers                    │
//!  │        ▼           │              │   domain/classifier (validate)   │
//!  │ fallback on any    │◀─────────────│   observability/tagging (tag)    │
//!  │ failure, results   │  200/400/500 │   domain/policy (outcome)        │
//!  │ channel → observer │              │        │                         │
//!  └────────────────────┘              │        ▼                         │
//!                                      │ telemetry finalized: metric      │
//!                                      │ sample + span, same console tag  │
//!                                      └──────────────────────────────────┘
//!
//!  Cross-cutting: config (TOML), lifecycle (shutdown broadcast),
//!  observability (tracing subscriber, Prometheus exporter)
//! ```

pub mod config;
pub mod domain;
pub mod driver;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
