//! Per-digest replay protection.
//!
//! Each claim digest moves at most once, from `Unknown` to either
//! `Cancelled` or `Performed`. Both are terminal. Entries are never evicted:
//! at-most-once has to hold for the ledger's whole lifetime, so unlike a
//! bounded idempotency cache this table only grows.

use std::collections::HashMap;

use openswap_types::{ClaimDigest, OpenswapError, Result};
use serde::{Deserialize, Serialize};

/// Lifecycle of a claim digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DigestState {
    /// Never seen. The only state a digest can be performed or cancelled from.
    #[default]
    Unknown,
    /// The maker withdrew the order. **Terminal.**
    Cancelled,
    /// The order settled. **Terminal.**
    Performed,
}

impl DigestState {
    #[must_use]
    pub fn can_transition_to(&self, target: Self) -> bool {
        matches!((self, target), (Self::Unknown, Self::Cancelled | Self::Performed))
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl std::fmt::Display for DigestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "UNKNOWN"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Performed => write!(f, "PERFORMED"),
        }
    }
}

/// Digest state table owned by one settlement engine.
#[derive(Debug, Default)]
pub struct OrderLedger {
    states: HashMap<ClaimDigest, DigestState>,
}

impl OrderLedger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn state(&self, digest: &ClaimDigest) -> DigestState {
        self.states.get(digest).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_performed(&self, digest: &ClaimDigest) -> bool {
        self.state(digest) == DigestState::Performed
    }

    #[must_use]
    pub fn is_cancelled(&self, digest: &ClaimDigest) -> bool {
        self.state(digest) == DigestState::Cancelled
    }

    /// # Errors
    /// `OrderAlreadyPerformed` / `OrderAlreadyCancelled` for a terminal digest.
    pub fn ensure_unknown(&self, digest: &ClaimDigest) -> Result<()> {
        match self.state(digest) {
            DigestState::Unknown => Ok(()),
            DigestState::Cancelled => Err(OpenswapError::OrderAlreadyCancelled(*digest)),
            DigestState::Performed => Err(OpenswapError::OrderAlreadyPerformed(*digest)),
        }
    }

    pub fn mark_cancelled(&mut self, digest: ClaimDigest) -> Result<()> {
        self.transition(digest, DigestState::Cancelled)
    }

    pub fn mark_performed(&mut self, digest: ClaimDigest) -> Result<()> {
        self.transition(digest, DigestState::Performed)
    }

    /// Number of digests in a terminal state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    fn transition(&mut self, digest: ClaimDigest, target: DigestState) -> Result<()> {
        let current = self.state(&digest);
        if !current.can_transition_to(target) {
            self.ensure_unknown(&digest)?;
            return Err(OpenswapError::Internal(format!(
                "illegal digest transition {current} -> {target}"
            )));
        }
        self.states.insert(digest, target);
        Ok(())
    }
}
