//! Mint-for-payment settlement.
//!
//! The taker pays the fee legs and receives a freshly minted unique asset.
//! The engine never holds mint rights itself: it mints through the
//! [`MintProxy`](openswap_proxy::MintProxy), which the registry owner
//! delegated mint authorization to.

use chrono::{DateTime, Utc};
use openswap_assets::UniqueAssetRegistry;
use openswap_types::{
    Address, Call, ClaimDigest, ExecutionMode, MintOrder, OpenswapError, OrderKind,
    OrderSignature, PerformOutcome, Result, SettlementConfig,
};

use crate::engine::{SettlementEngine, SettlementOrder};
use crate::venue::Venue;

pub type Minter = SettlementEngine<MintOrder>;

impl SettlementOrder for MintOrder {
    const KIND: OrderKind = OrderKind::Mint;

    fn digest(&self, engine: &Address) -> ClaimDigest {
        self.claim(engine)
    }

    fn maker(&self) -> Address {
        self.issuer
    }

    fn taker(&self) -> Address {
        self.taker
    }

    fn validate_at(&self, now: DateTime<Utc>, config: &SettlementConfig) -> Result<()> {
        self.validate(now, config)
    }

    /// Only the registry owner may sell mints of its assets.
    fn authorize(&self, venue: &Venue) -> Result<()> {
        let owner = venue.assets().registry(&self.registry)?.owner();
        if owner != self.issuer {
            return Err(OpenswapError::NotRegistryOwner {
                issuer: self.issuer,
                registry: self.registry,
            });
        }
        Ok(())
    }

    fn execute(&self, engine: Address, venue: &mut Venue) -> Result<()> {
        venue.pay_fees(engine, self.taker, &self.fees)?;
        venue.mint_asset(
            engine,
            self.registry,
            self.taker,
            self.asset_id,
            &self.proof,
            &self.uri,
        )
    }
}

impl Minter {
    pub fn perform_mint(
        &mut self,
        venue: &mut Venue,
        call: &Call,
        order: &MintOrder,
        signature: &OrderSignature,
        mode: ExecutionMode,
    ) -> Result<PerformOutcome> {
        self.perform(venue, call, order, signature, mode)
    }

    pub fn cancel_mint(&mut self, call: &Call, order: &MintOrder) -> Result<ClaimDigest> {
        self.cancel(call, order)
    }

    #[must_use]
    pub fn mint_claim(&self, order: &MintOrder) -> ClaimDigest {
        self.claim(order)
    }
}
