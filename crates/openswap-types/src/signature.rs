//! # Order signatures
//!
//! Makers authorize an order by signing its [`ClaimDigest`] with ed25519.
//! A participant's [`Address`] *is* its verifying key, so checking
//! "did `signer` authorize this digest" needs no separate key lookup.
//!
//! [`is_valid_signature`] is a total function: malformed keys, wrong-length
//! signatures, non-canonical encodings, and signatures by other keys all
//! yield `false`. It never panics and never errors. Order validity is a
//! separate concern that fails loudly in the engines.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Address, ClaimDigest};

/// Opaque signature bytes as submitted by a taker.
///
/// Not length-checked on construction: a malformed value must reach the
/// verifier and be rejected there, not at parse time.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct OrderSignature(pub Vec<u8>);

impl OrderSignature {
    #[must_use]
    pub fn from_bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }

    /// # Errors
    /// Returns the hex decoding error message for non-hex input.
    pub fn from_hex(s: &str) -> std::result::Result<Self, String> {
        hex::decode(s.trim()).map(Self).map_err(|e| e.to_string())
    }
}

impl Serialize for OrderSignature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for OrderSignature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

impl std::fmt::Debug for OrderSignature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix: String = self.to_hex().chars().take(16).collect();
        write!(f, "OrderSignature({prefix}..., {} bytes)", self.0.len())
    }
}

/// Returns `true` iff `signature` is a valid ed25519 signature by `signer`
/// over `digest`.
#[must_use]
pub fn is_valid_signature(signer: &Address, digest: &ClaimDigest, signature: &OrderSignature) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(signer.as_bytes()) else {
        return false;
    };
    let Ok(sig) = ed25519_dalek::Signature::from_slice(signature.as_bytes()) else {
        return false;
    };
    key.verify_strict(digest.as_bytes(), &sig).is_ok()
}

/// A maker's signing key.
///
/// Does not implement `Serialize`, and `Debug` never prints key material.
pub struct OrderSigner {
    signing_key: SigningKey,
}

impl OrderSigner {
    /// Signer from a raw 32-byte secret seed.
    #[must_use]
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// The address (verifying key) orders must name as maker / issuer.
    #[must_use]
    pub fn address(&self) -> Address {
        Address::from_verifying_key(&self.signing_key.verifying_key())
    }

    /// Sign a claim digest.
    #[must_use]
    pub fn sign(&self, digest: &ClaimDigest) -> OrderSignature {
        OrderSignature(self.signing_key.sign(digest.as_bytes()).to_bytes().to_vec())
    }
}

impl std::fmt::Debug for OrderSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OrderSigner({}, <private>)", self.address())
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl OrderSigner {
    /// Random signer from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    /// Deterministic signer for account `n` of a test fixture.
    pub fn account(n: u8) -> Self {
        let mut seed = [0xA5u8; 32];
        seed[0] = n;
        Self::from_seed(&seed)
    }
}
