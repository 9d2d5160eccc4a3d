//! # Claim codec
//!
//! Builds the canonical, domain-separated digest that a maker signs.
//!
//! ## Format
//!
//! ```text
//! SHA-256( "openswap:claim:v1:" || kind-tag || engine-address || fields... )
//! ```
//!
//! Every variable-length item is prefixed with its element count (u64 LE),
//! so `[]` and `[0]` never encode to the same bytes. Decimal amounts are
//! normalized first, so `20` and `20.00` encode identically. Timestamps are
//! encoded at full resolution: signed seconds since the UNIX epoch (i64 LE)
//! followed by the sub-second nanoseconds (u32 LE).
//!
//! The codec is pure: any client can precompute the digest off-ledger.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sha2::{Digest, Sha256};

use crate::{constants, Address, AssetId, ClaimDigest};

/// Incremental encoder for claim preimages.
pub struct ClaimEncoder {
    hasher: Sha256,
}

impl ClaimEncoder {
    /// Start a preimage for the given kind tag, bound to `engine`.
    #[must_use]
    pub fn new(kind_tag: &[u8], engine: &Address) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(constants::CLAIM_DOMAIN_TAG);
        hasher.update((kind_tag.len() as u64).to_le_bytes());
        hasher.update(kind_tag);
        hasher.update(engine.as_bytes());
        Self { hasher }
    }

    #[must_use]
    pub fn address(mut self, address: &Address) -> Self {
        self.hasher.update(address.as_bytes());
        self
    }

    #[must_use]
    pub fn asset_id(mut self, id: &AssetId) -> Self {
        self.hasher.update(id.as_bytes());
        self
    }

    #[must_use]
    pub fn count(mut self, n: usize) -> Self {
        self.hasher.update((n as u64).to_le_bytes());
        self
    }

    /// Length-prefixed byte string.
    #[must_use]
    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.hasher.update((data.len() as u64).to_le_bytes());
        self.hasher.update(data);
        self
    }

    #[must_use]
    pub fn amount(mut self, amount: &Decimal) -> Self {
        self.hasher.update(amount.normalize().serialize());
        self
    }

    #[must_use]
    pub fn timestamp(mut self, at: &DateTime<Utc>) -> Self {
        self.hasher.update(at.timestamp().to_le_bytes());
        self.hasher.update(at.timestamp_subsec_nanos().to_le_bytes());
        self
    }

    /// Length-prefixed address array.
    #[must_use]
    pub fn addresses(self, items: &[Address]) -> Self {
        items
            .iter()
            .fold(self.count(items.len()), |enc, a| enc.address(a))
    }

    /// Length-prefixed amount array.
    #[must_use]
    pub fn amounts(self, items: &[Decimal]) -> Self {
        items
            .iter()
            .fold(self.count(items.len()), |enc, a| enc.amount(a))
    }

    #[must_use]
    pub fn finish(self) -> ClaimDigest {
        ClaimDigest(self.hasher.finalize().into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Address {
        Address::derive("engine:test")
    }

    #[test]
    fn identical_input_identical_digest() {
        let a = ClaimEncoder::new(b"mint", &engine())
            .address(&Address::derive("a"))
            .finish();
        let b = ClaimEncoder::new(b"mint", &engine())
            .address(&Address::derive("a"))
            .finish();
        assert_eq!(a, b);
    }

    #[test]
    fn engine_address_separates_domains() {
        let a = ClaimEncoder::new(b"mint", &Address::derive("engine:a")).finish();
        let b = ClaimEncoder::new(b"mint", &Address::derive("engine:b")).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn kind_tag_separates_domains() {
        let a = ClaimEncoder::new(b"mint", &engine()).finish();
        let b = ClaimEncoder::new(b"swap", &engine()).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn empty_array_differs_from_zero_amount_array() {
        let empty = ClaimEncoder::new(b"t", &engine()).amounts(&[]).finish();
        let one_zero = ClaimEncoder::new(b"t", &engine())
            .amounts(&[Decimal::ZERO])
            .finish();
        let two_zero = ClaimEncoder::new(b"t", &engine())
            .amounts(&[Decimal::ZERO, Decimal::ZERO])
            .finish();
        assert_ne!(empty, one_zero);
        assert_ne!(one_zero, two_zero);
        assert_ne!(empty, two_zero);
    }

    #[test]
    fn array_boundaries_are_unambiguous() {
        let x = Address::derive("x");
        let split_left = ClaimEncoder::new(b"t", &engine())
            .addresses(&[x, x])
            .addresses(&[x])
            .finish();
        let split_right = ClaimEncoder::new(b"t", &engine())
            .addresses(&[x])
            .addresses(&[x, x])
            .finish();
        assert_ne!(split_left, split_right);
    }

    #[test]
    fn equal_decimals_encode_equally() {
        let a = ClaimEncoder::new(b"t", &engine())
            .amount(&Decimal::new(20, 0))
            .finish();
        let b = ClaimEncoder::new(b"t", &engine())
            .amount(&Decimal::new(2000, 2))
            .finish();
        assert_eq!(a, b);
    }

    #[test]
    fn timestamp_changes_digest() {
        let t = DateTime::from_timestamp(1_521_195_657, 0).unwrap();
        let u = DateTime::from_timestamp(1_521_195_658, 0).unwrap();
        let a = ClaimEncoder::new(b"t", &engine()).timestamp(&t).finish();
        let b = ClaimEncoder::new(b"t", &engine()).timestamp(&u).finish();
        assert_ne!(a, b);
    }

    #[test]
    fn sub_millisecond_timestamp_changes_digest() {
        let t = DateTime::from_timestamp(1_521_195_657, 0).unwrap();
        let u = t + chrono::Duration::microseconds(1);
        let a = ClaimEncoder::new(b"t", &engine()).timestamp(&t).finish();
        let b = ClaimEncoder::new(b"t", &engine()).timestamp(&u).finish();
        assert_ne!(a, b);
    }
}
