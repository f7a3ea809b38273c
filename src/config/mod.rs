//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file → loader.rs (read + parse)
//!           → validation.rs (semantic checks, all errors reported)
//!           → schema.rs types consumed by the rest of the crate
//! ```

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{ListenerConfig, ObservabilityConfig, ServiceConfig};
