//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber for each binary
//! - Respect `RUST_LOG` when set, fall back to the configured level
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - Subscriber is installed once per process, at startup

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins when present; otherwise `default_level` applies
/// (e.g. `"info"` or `"console_availability=debug"`).
pub fn init(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
