//! Observable settlement signals.

use serde::{Deserialize, Serialize};

use crate::{Address, ClaimDigest, ErrorClass, OrderKind, SettlementReceipt};

/// Signals queued by settlement engines.
///
/// `Performed` and `Cancelled` are only queued for committed state.
/// `Failed` is the lenient-mode diagnostic: the digest was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementEvent {
    Performed {
        kind: OrderKind,
        digest: ClaimDigest,
        maker: Address,
        taker: Address,
    },
    Cancelled {
        kind: OrderKind,
        digest: ClaimDigest,
        maker: Address,
    },
    Failed {
        kind: OrderKind,
        digest: ClaimDigest,
        class: ErrorClass,
        error: String,
    },
}

impl SettlementEvent {
    #[must_use]
    pub fn digest(&self) -> &ClaimDigest {
        match self {
            Self::Performed { digest, .. }
            | Self::Cancelled { digest, .. }
            | Self::Failed { digest, .. } => digest,
        }
    }

    #[must_use]
    pub fn kind(&self) -> OrderKind {
        match self {
            Self::Performed { kind, .. } | Self::Cancelled { kind, .. } | Self::Failed { kind, .. } => {
                *kind
            }
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Result of a `perform` call that did not hard-fail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformOutcome {
    /// All legs moved and the digest is now performed.
    Performed(SettlementReceipt),
    /// Lenient-mode soft failure. Nothing moved; the digest stays unknown.
    Failed {
        digest: ClaimDigest,
        class: ErrorClass,
        error: String,
    },
}

impl PerformOutcome {
    #[must_use]
    pub fn is_performed(&self) -> bool {
        matches!(self, Self::Performed(_))
    }

    #[must_use]
    pub fn receipt(&self) -> Option<&SettlementReceipt> {
        match self {
            Self::Performed(r) => Some(r),
            Self::Failed { .. } => None,
        }
    }
}
