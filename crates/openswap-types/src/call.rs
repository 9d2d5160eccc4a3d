//! Per-call execution context.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Address;

/// Who is calling, and at what instant the call is evaluated.
///
/// Expiration is checked against `now`, never against a background clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub caller: Address,
    pub now: DateTime<Utc>,
}

impl Call {
    /// A call from `caller` evaluated at the current wall-clock time.
    #[must_use]
    pub fn new(caller: Address) -> Self {
        Self {
            caller,
            now: Utc::now(),
        }
    }

    /// A call from `caller` evaluated at a fixed instant.
    #[must_use]
    pub fn at(caller: Address, now: DateTime<Utc>) -> Self {
        Self { caller, now }
    }
}

/// Execution policy chosen by the taker for one `perform` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionMode {
    /// Any failure aborts the call and undoes every asset movement.
    Strict,
    /// Authorization and state-conflict failures emit a diagnostic event and
    /// return normally, leaving the digest untouched.
    Lenient,
}

impl ExecutionMode {
    #[must_use]
    pub fn is_strict(self) -> bool {
        self == Self::Strict
    }
}

impl std::fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Strict => write!(f, "STRICT"),
            Self::Lenient => write!(f, "LENIENT"),
        }
    }
}
