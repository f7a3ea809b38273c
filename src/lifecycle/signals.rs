//! OS signal handling.
//!
//! # Design Decisions
//! - Uses Tokio's signal handling (async-safe)
//! - Ctrl+C translates to the internal shutdown broadcast; tasks never
//!   watch the OS signal directly

use std::sync::Arc;

use crate::lifecycle::shutdown::Shutdown;

/// Spawn a task that triggers `shutdown` when Ctrl+C arrives.
pub fn trigger_on_ctrl_c(shutdown: Arc<Shutdown>) {
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Ctrl+C received, shutting down");
                shutdown.trigger();
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            }
        }
    });
}
