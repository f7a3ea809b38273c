//! Console domain model.
//!
//! # Data Flow
//! ```text
//! Raw path segment (untrusted text)
//!     → classifier.rs (closed-set validation → Classification)
//!     → policy.rs (static outcome table → Outcome)
//! ```
//!
//! # Design Decisions
//! - Validation happens exactly once, at the edge; everything downstream
//!   (tagging, policy, responses) only ever sees a `Classification`
//! - The console set is a fieldless enum, so its cardinality is a
//!   compile-time fact rather than a runtime promise
//! - Both functions are pure and total; unknown input is a valid
//!   classification, not an error

pub mod classifier;
pub mod policy;

pub use classifier::{classify, Classification, Console};
pub use policy::{decide, FaultKind, Outcome};
