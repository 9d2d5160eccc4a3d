//! Single-asset transfer settlement: one unique asset from maker to taker,
//! fee legs paid by the taker.

use chrono::{DateTime, Utc};
use openswap_types::{
    Address, AssetRef, Call, ClaimDigest, ExecutionMode, OrderKind, OrderSignature,
    PerformOutcome, Result, SettlementConfig, TransferOrder,
};

use crate::engine::{SettlementEngine, SettlementOrder};
use crate::venue::Venue;

pub type Trader = SettlementEngine<TransferOrder>;

impl SettlementOrder for TransferOrder {
    const KIND: OrderKind = OrderKind::Transfer;

    fn digest(&self, engine: &Address) -> ClaimDigest {
        self.claim(engine)
    }

    fn maker(&self) -> Address {
        self.maker
    }

    fn taker(&self) -> Address {
        self.taker
    }

    fn validate_at(&self, now: DateTime<Utc>, config: &SettlementConfig) -> Result<()> {
        self.validate(now, config)
    }

    fn execute(&self, engine: Address, venue: &mut Venue) -> Result<()> {
        let asset = AssetRef::new(self.registry, self.asset_id);
        venue.move_asset(engine, &asset, self.maker, self.taker)?;
        venue.pay_fees(engine, self.taker, &self.fees)
    }
}

impl Trader {
    pub fn perform_transfer(
        &mut self,
        venue: &mut Venue,
        call: &Call,
        order: &TransferOrder,
        signature: &OrderSignature,
        mode: ExecutionMode,
    ) -> Result<PerformOutcome> {
        self.perform(venue, call, order, signature, mode)
    }

    pub fn cancel_transfer(&mut self, call: &Call, order: &TransferOrder) -> Result<ClaimDigest> {
        self.cancel(call, order)
    }

    #[must_use]
    pub fn transfer_claim(&self, order: &TransferOrder) -> ClaimDigest {
        self.claim(order)
    }
}
