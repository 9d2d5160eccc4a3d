//! Identifiers used throughout OpenSwap.
//!
//! Participants are addressed by their raw ed25519 public key. Principals
//! that hold no key (engines, proxies, registries, the fee token) get an
//! [`Address`] derived from a label, so every principal shares one 32-byte
//! namespace.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::constants;

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A 32-byte principal identity.
///
/// For a signing participant this is the ed25519 verifying key itself, which
/// is what lets signature checks compare "claimed signer" against the key
/// that produced a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct Address(pub [u8; 32]);

impl Address {
    /// The null address. Never a valid recipient or participant.
    pub const ZERO: Self = Self([0u8; 32]);

    #[must_use]
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Address of a signing participant.
    #[must_use]
    pub fn from_verifying_key(key: &ed25519_dalek::VerifyingKey) -> Self {
        Self(key.to_bytes())
    }

    /// Deterministic address for a keyless principal (engine, proxy, registry).
    ///
    /// Every caller derives the **same** address from the same label.
    #[must_use]
    pub fn derive(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(constants::ADDRESS_DOMAIN_TAG);
        hasher.update(label.as_bytes());
        Self(hasher.finalize().into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// Identifier of a unique asset within one registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetId(pub [u8; 32]);

impl AssetId {
    /// Hash a human label into an asset id.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(constants::ASSET_ID_DOMAIN_TAG);
        hasher.update(label.as_bytes());
        Self(hasher.finalize().into())
    }

    /// Big-endian, left-padded integer id (`1` → `0x00…01`).
    #[must_use]
    pub fn from_u64(n: u64) -> Self {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&n.to_be_bytes());
        Self(bytes)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "asset:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// ClaimDigest
// ---------------------------------------------------------------------------

/// Canonical SHA-256 digest of an order's terms plus the engine's address.
///
/// This is the value the authorizing party signs and the key under which the
/// order ledger tracks replay state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ClaimDigest(pub [u8; 32]);

impl ClaimDigest {
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ClaimDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "claim:{}", hex::encode(&self.0[..8]))
    }
}

// ---------------------------------------------------------------------------
// ReceiptId
// ---------------------------------------------------------------------------

/// Unique settlement receipt identifier. Uses UUIDv7 for time-ordered sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ReceiptId(pub Uuid);

impl ReceiptId {
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ReceiptId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rcpt:{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
