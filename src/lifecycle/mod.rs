//! Process lifecycle.
//!
//! # Data Flow
//! ```text
//! SIGINT (signals.rs) → Shutdown::trigger (shutdown.rs)
//!     → HTTP server stops accepting and drains
//!     → load driver stops issuing; in-flight requests drain best-effort
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
pub use signals::trigger_on_ctrl_c;
