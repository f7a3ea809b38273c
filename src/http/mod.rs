//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, routes, layers)
//!     → middleware/telemetry.rs (open span + metric sample, run hooks)
//!     → handlers.rs (classify → tag → decide → respond or fault)
//!     → error.rs (fault taxonomy → status code + JSON body)
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod server;

pub use error::ApiError;
pub use response::AvailabilityResponse;
pub use server::HttpServer;
