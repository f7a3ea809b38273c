//! Closed-set validation of console names.
//!
//! # Responsibilities
//! - Match raw request input against the canonical console names
//! - Collapse everything else to the `Unknown` sentinel
//!
//! # Design Decisions
//! - Exact, case-sensitive match; no trimming or normalization. A fuzzy
//!   match would silently widen the accepted input space.
//! - `classify` never fails. The sentinel keeps the set of values that can
//!   reach a telemetry tag bounded at (console count + 1) no matter what
//!   clients send.

use std::fmt;

use serde::{Serialize, Serializer};

/// The closed set of consoles the service knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Console {
    Ps5,
    Xbox,
    Switch,
    Wii,
}

impl Console {
    /// All consoles, in the order the load driver schedules them.
    pub const ALL: [Console; 4] = [Console::Ps5, Console::Xbox, Console::Switch, Console::Wii];

    /// Canonical string form, used in URLs, responses, and telemetry tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Console::Ps5 => "ps5",
            Console::Xbox => "xbox",
            Console::Switch => "switch",
            Console::Wii => "wii",
        }
    }

    /// Look up a console by its exact canonical name.
    pub fn from_canonical(raw: &str) -> Option<Console> {
        Console::ALL.into_iter().find(|c| c.as_str() == raw)
    }
}

impl fmt::Display for Console {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of validating raw input: a known console, or the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    Known(Console),
    Unknown,
}

impl Classification {
    /// Tag value recorded on metrics and spans. Never raw input.
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Known(console) => console.as_str(),
            Classification::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Validate an arbitrary string against the closed console set.
///
/// Pure and total: anything that is not an exact canonical match (including
/// the empty string) classifies as `Unknown`.
pub fn classify(raw: &str) -> Classification {
    if raw.is_empty() {
        return Classification::Unknown;
    }
    Console::from_canonical(raw)
        .map(Classification::Known)
        .unwrap_or(Classification::Unknown)
}
