//! Order (claim) types for the three settlement kinds.
//!
//! An order is never persisted. Engines hash it into a [`ClaimDigest`] and
//! only that digest's state is tracked.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    constants, Address, AssetId, ClaimDigest, ClaimEncoder, OpenswapError, Result,
    SettlementConfig, SwapSide,
};

/// Which settlement engine an order targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderKind {
    Mint,
    Transfer,
    Swap,
}

impl OrderKind {
    /// Tag mixed into the claim digest.
    #[must_use]
    pub fn tag(self) -> &'static [u8] {
        match self {
            Self::Mint => b"mint",
            Self::Transfer => b"transfer",
            Self::Swap => b"swap",
        }
    }
}

impl std::fmt::Display for OrderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mint => write!(f, "MINT"),
            Self::Transfer => write!(f, "TRANSFER"),
            Self::Swap => write!(f, "SWAP"),
        }
    }
}

// ---------------------------------------------------------------------------
// FeeLegs
// ---------------------------------------------------------------------------

/// Parallel fee recipient / amount arrays, paid by the taker.
///
/// Kept as two arrays (not pairs) because that is what the maker signs; the
/// arrays must have equal length, and zero length is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeLegs {
    pub recipients: Vec<Address>,
    pub amounts: Vec<Decimal>,
}

impl FeeLegs {
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn single(recipient: Address, amount: Decimal) -> Self {
        Self {
            recipients: vec![recipient],
            amounts: vec![amount],
        }
    }

    #[must_use]
    pub fn new(recipients: Vec<Address>, amounts: Vec<Decimal>) -> Self {
        Self {
            recipients,
            amounts,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty() && self.amounts.is_empty()
    }

    /// Paired legs. Only meaningful after [`FeeLegs::validate`].
    pub fn iter(&self) -> impl Iterator<Item = (&Address, &Decimal)> {
        self.recipients.iter().zip(self.amounts.iter())
    }

    /// Sum of all fee amounts.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.amounts.iter().copied().sum()
    }

    /// # Errors
    /// - `FeeLegMismatch` if the arrays differ in length
    /// - `TooManyLegs` above `max_legs`
    /// - `InvalidOrder` for a negative amount or a zero recipient
    pub fn validate(&self, max_legs: usize) -> Result<()> {
        if self.recipients.len() != self.amounts.len() {
            return Err(OpenswapError::FeeLegMismatch {
                recipients: self.recipients.len(),
                amounts: self.amounts.len(),
            });
        }
        if self.recipients.len() > max_legs {
            return Err(OpenswapError::TooManyLegs {
                what: "fee legs",
                count: self.recipients.len(),
                limit: max_legs,
            });
        }
        if let Some(amount) = self.amounts.iter().find(|a| **a < Decimal::ZERO) {
            return Err(OpenswapError::InvalidOrder {
                reason: format!("negative fee amount {amount}"),
            });
        }
        if self.recipients.iter().any(Address::is_zero) {
            return Err(OpenswapError::InvalidOrder {
                reason: "fee recipient is the zero address".into(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// AssetRef
// ---------------------------------------------------------------------------

/// A unique asset: (registry address, asset id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct AssetRef {
    pub registry: Address,
    pub id: AssetId,
}

impl AssetRef {
    #[must_use]
    pub fn new(registry: Address, id: AssetId) -> Self {
        Self { registry, id }
    }
}

impl std::fmt::Display for AssetRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}", self.id, self.registry)
    }
}

fn ensure_parties(maker: &Address, taker: &Address) -> Result<()> {
    if maker.is_zero() || taker.is_zero() {
        return Err(OpenswapError::InvalidOrder {
            reason: "maker and taker must be non-zero".into(),
        });
    }
    if maker == taker {
        return Err(OpenswapError::SelfSettlement(*maker));
    }
    Ok(())
}

fn ensure_not_expired(expiration: &DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    if now > *expiration {
        return Err(OpenswapError::OrderExpired {
            expiration: *expiration,
            now,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// MintOrder
// ---------------------------------------------------------------------------

/// Mint a new unique asset to the taker against fungible fees.
///
/// Signed by the `issuer`, who must own the target registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintOrder {
    pub issuer: Address,
    pub taker: Address,
    pub registry: Address,
    pub asset_id: AssetId,
    /// Opaque proof committed into the minted asset.
    pub proof: String,
    /// Metadata URI of the minted asset.
    pub uri: String,
    pub fees: FeeLegs,
    pub timestamp: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
}

impl MintOrder {
    #[must_use]
    pub fn claim(&self, engine: &Address) -> ClaimDigest {
        ClaimEncoder::new(OrderKind::Mint.tag(), engine)
            .address(&self.issuer)
            .address(&self.taker)
            .address(&self.registry)
            .asset_id(&self.asset_id)
            .bytes(self.proof.as_bytes())
            .bytes(self.uri.as_bytes())
            .addresses(&self.fees.recipients)
            .amounts(&self.fees.amounts)
            .timestamp(&self.timestamp)
            .timestamp(&self.expiration)
            .finish()
    }

    /// Structural validation plus expiry at `now`.
    pub fn validate(&self, now: DateTime<Utc>, config: &SettlementConfig) -> Result<()> {
        ensure_parties(&self.issuer, &self.taker)?;
        if self.registry.is_zero() {
            return Err(OpenswapError::InvalidOrder {
                reason: "registry must be non-zero".into(),
            });
        }
        if self.proof.is_empty() {
            return Err(OpenswapError::InvalidOrder {
                reason: "mint proof must not be empty".into(),
            });
        }
        if self.uri.is_empty() {
            return Err(OpenswapError::InvalidOrder {
                reason: "mint uri must not be empty".into(),
            });
        }
        if self.uri.chars().count() > constants::MAX_URI_LEN {
            return Err(OpenswapError::InvalidOrder {
                reason: format!("uri exceeds {} characters", constants::MAX_URI_LEN),
            });
        }
        self.fees.validate(config.max_fee_legs)?;
        ensure_not_expired(&self.expiration, now)
    }
}

// ---------------------------------------------------------------------------
// TransferOrder
// ---------------------------------------------------------------------------

/// Move one existing unique asset from maker to taker against fungible fees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOrder {
    pub maker: Address,
    pub taker: Address,
    pub registry: Address,
    pub asset_id: AssetId,
    pub fees: FeeLegs,
    pub timestamp: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
}

impl TransferOrder {
    #[must_use]
    pub fn claim(&self, engine: &Address) -> ClaimDigest {
        ClaimEncoder::new(OrderKind::Transfer.tag(), engine)
            .address(&self.maker)
            .address(&self.taker)
            .address(&self.registry)
            .asset_id(&self.asset_id)
            .addresses(&self.fees.recipients)
            .amounts(&self.fees.amounts)
            .timestamp(&self.timestamp)
            .timestamp(&self.expiration)
            .finish()
    }

    pub fn validate(&self, now: DateTime<Utc>, config: &SettlementConfig) -> Result<()> {
        ensure_parties(&self.maker, &self.taker)?;
        if self.registry.is_zero() {
            return Err(OpenswapError::InvalidOrder {
                reason: "registry must be non-zero".into(),
            });
        }
        self.fees.validate(config.max_fee_legs)?;
        ensure_not_expired(&self.expiration, now)
    }
}

// ---------------------------------------------------------------------------
// SwapOrder
// ---------------------------------------------------------------------------

/// N-for-M barter of unique assets plus optional fungible fees.
///
/// `declared_give` / `declared_take` are the counts the maker signed over;
/// they must match the supplied arrays exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapOrder {
    pub maker: Address,
    pub taker: Address,
    pub declared_give: usize,
    /// Assets moving maker → taker.
    pub give: Vec<AssetRef>,
    pub declared_take: usize,
    /// Assets moving taker → maker.
    pub take: Vec<AssetRef>,
    pub fees: FeeLegs,
    pub timestamp: DateTime<Utc>,
    pub expiration: DateTime<Utc>,
}

impl SwapOrder {
    #[must_use]
    pub fn claim(&self, engine: &Address) -> ClaimDigest {
        let enc = ClaimEncoder::new(OrderKind::Swap.tag(), engine)
            .address(&self.maker)
            .address(&self.taker)
            .count(self.declared_give)
            .count(self.give.len());
        let enc = self
            .give
            .iter()
            .fold(enc, |enc, a| enc.address(&a.registry).asset_id(&a.id));
        let enc = enc.count(self.declared_take).count(self.take.len());
        let enc = self
            .take
            .iter()
            .fold(enc, |enc, a| enc.address(&a.registry).asset_id(&a.id));
        enc.addresses(&self.fees.recipients)
            .amounts(&self.fees.amounts)
            .timestamp(&self.timestamp)
            .timestamp(&self.expiration)
            .finish()
    }

    pub fn validate(&self, now: DateTime<Utc>, config: &SettlementConfig) -> Result<()> {
        ensure_parties(&self.maker, &self.taker)?;
        for (side, declared, supplied) in [
            (SwapSide::Give, self.declared_give, &self.give),
            (SwapSide::Take, self.declared_take, &self.take),
        ] {
            if declared != supplied.len() {
                return Err(OpenswapError::SwapCountMismatch {
                    side,
                    declared,
                    supplied: supplied.len(),
                });
            }
            if supplied.len() > config.max_swap_assets {
                return Err(OpenswapError::TooManyLegs {
                    what: "swap assets",
                    count: supplied.len(),
                    limit: config.max_swap_assets,
                });
            }
            if supplied.iter().any(|a| a.registry.is_zero()) {
                return Err(OpenswapError::InvalidOrder {
                    reason: format!("{side} asset has a zero registry"),
                });
            }
        }
        if self.give.is_empty() && self.take.is_empty() {
            return Err(OpenswapError::InvalidOrder {
                reason: "swap moves no assets".into(),
            });
        }
        self.fees.validate(config.max_fee_legs)?;
        ensure_not_expired(&self.expiration, now)
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
mod helpers {
    use super::*;

    fn window() -> (DateTime<Utc>, DateTime<Utc>) {
        let now = Utc::now();
        (now, now + chrono::Duration::hours(1))
    }

    impl MintOrder {
        pub fn dummy(issuer: Address, taker: Address, registry: Address, asset_id: AssetId) -> Self {
            let (timestamp, expiration) = window();
            Self {
                issuer,
                taker,
                registry,
                asset_id,
                proof: "1e205550c271490347e5e2393a02e94d284bbe9903f023ba098355b8d75974c8".into(),
                uri: "https://example.org/cert".into(),
                fees: FeeLegs::none(),
                timestamp,
                expiration,
            }
        }
    }

    impl TransferOrder {
        pub fn dummy(maker: Address, taker: Address, registry: Address, asset_id: AssetId) -> Self {
            let (timestamp, expiration) = window();
            Self {
                maker,
                taker,
                registry,
                asset_id,
                fees: FeeLegs::none(),
                timestamp,
                expiration,
            }
        }
    }

    impl SwapOrder {
        pub fn dummy(maker: Address, taker: Address, give: Vec<AssetRef>, take: Vec<AssetRef>) -> Self {
            let (timestamp, expiration) = window();
            Self {
                maker,
                taker,
                declared_give: give.len(),
                give,
                declared_take: take.len(),
                take,
                fees: FeeLegs::none(),
                timestamp,
                expiration,
            }
        }
    }
}
