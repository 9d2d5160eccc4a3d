//! N-for-M unique-asset barter.
//!
//! `give` assets move maker → taker, `take` assets move taker → maker, and
//! the taker pays the fee legs. Assets may come from any number of
//! registries. The declared counts are part of the signed claim and have to
//! match the supplied arrays exactly, which `SwapOrder::validate` enforces
//! before anything moves.

use chrono::{DateTime, Utc};
use openswap_types::{
    Address, Call, ClaimDigest, ExecutionMode, OrderKind, OrderSignature, PerformOutcome, Result,
    SettlementConfig, SwapOrder,
};

use crate::engine::{SettlementEngine, SettlementOrder};
use crate::venue::Venue;

pub type Swapper = SettlementEngine<SwapOrder>;

impl SettlementOrder for SwapOrder {
    const KIND: OrderKind = OrderKind::Swap;

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
        for asset in &self.give {
            venue.move_asset(engine, asset, self.maker, self.taker)?;
        }
        for asset in &self.take {
            venue.move_asset(engine, asset, self.taker, self.maker)?;
        }
        venue.pay_fees(engine, self.taker, &self.fees)
    }
}

impl Swapper {
    pub fn perform_swap(
        &mut self,
        venue: &mut Venue,
        call: &Call,
        order: &SwapOrder,
        signature: &OrderSignature,
        mode: ExecutionMode,
    ) -> Result<PerformOutcome> {
        self.perform(venue, call, order, signature, mode)
    }

    pub fn cancel_swap(&mut self, call: &Call, order: &SwapOrder) -> Result<ClaimDigest> {
        self.cancel(call, order)
    }

    #[must_use]
    pub fn swap_claim(&self, order: &SwapOrder) -> ClaimDigest {
        self.claim(order)
    }
}

#[cfg(test)]
mod tests {
    use openswap_types::{AssetId, AssetRef, FeeLegs, OpenswapError, SwapSide};
    use rust_decimal::Decimal;

    use super::*;
    use crate::order_ledger::DigestState;
    use crate::testkit::Harness;

    fn setup() -> (Harness, Swapper) {
        let mut h = Harness::new();
        let swapper = Swapper::new(Address::derive("engine:swapper"), &h.venue, SettlementConfig::default()).unwrap();
        h.authorize(swapper.address());
        (h, swapper)
    }

    /// Maker holds ids 1 and 2, taker holds id 3, all approved to the proxy.
    fn stock(h: &mut Harness) -> (Vec<AssetRef>, Vec<AssetRef>) {
        let (maker, taker) = (h.maker.address(), h.taker.address());
        for (n, owner) in [(1, maker), (2, maker), (3, taker)] {
            let id = AssetId::from_u64(n);
            h.mint_to(owner, id);
            h.approve_asset(owner, id);
        }
        let asset = |n| AssetRef::new(h.registry, AssetId::from_u64(n));
        (vec![asset(1), asset(2)], vec![asset(3)])
    }

    #[test]
    fn performs_two_for_one_swap() {
        let (mut h, mut swapper) = setup();
        let (give, take) = stock(&mut h);
        let mut order = SwapOrder::dummy(h.maker.address(), h.taker.address(), give, take);
        order.fees = FeeLegs::single(h.issuer.address(), Decimal::new(5, 0));
        h.approve_fees(h.taker.address(), Decimal::new(5, 0));
        let sig = h.maker.sign(&swapper.swap_claim(&order));

        swapper
            .perform_swap(&mut h.venue, &Call::new(h.taker.address()), &order, &sig, ExecutionMode::Strict)
            .unwrap();
        assert_eq!(h.owner_of(&AssetId::from_u64(1)), Some(h.taker.address()));
        assert_eq!(h.owner_of(&AssetId::from_u64(2)), Some(h.taker.address()));
        assert_eq!(h.owner_of(&AssetId::from_u64(3)), Some(h.maker.address()));
        assert_eq!(h.balance(&h.issuer.address()), Decimal::new(5, 0));
    }

    #[test]
    fn declared_take_count_too_high() {
        let (mut h, mut swapper) = setup();
        let (give, take) = stock(&mut h);
        let mut order = SwapOrder::dummy(h.maker.address(), h.taker.address(), give, take);
        order.declared_take = 2;
        let sig = h.maker.sign(&swapper.swap_claim(&order));

        for mode in [ExecutionMode::Strict, ExecutionMode::Lenient] {
            let err = swapper
                .perform_swap(&mut h.venue, &Call::new(h.taker.address()), &order, &sig, mode)
                .unwrap_err();
            assert!(matches!(
                err,
                OpenswapError::SwapCountMismatch { side: SwapSide::Take, declared: 2, supplied: 1 }
            ));
        }
        assert_eq!(h.owner_of(&AssetId::from_u64(1)), Some(h.maker.address()));
    }

    #[test]
    fn declared_give_count_too_low_or_zero() {
        let (mut h, mut swapper) = setup();
        let (give, take) = stock(&mut h);
        let base = SwapOrder::dummy(h.maker.address(), h.taker.address(), give, take);
        for declared in [0, 1] {
            let mut order = base.clone();
            order.declared_give = declared;
            let sig = h.maker.sign(&swapper.swap_claim(&order));
            let err = swapper
                .perform_swap(&mut h.venue, &Call::new(h.taker.address()), &order, &sig, ExecutionMode::Strict)
                .unwrap_err();
            assert!(matches!(err, OpenswapError::SwapCountMismatch { side: SwapSide::Give, .. }));
        }
    }

    #[test]
    fn taker_side_failure_reverts_maker_side() {
        let (mut h, mut swapper) = setup();
        let (give, _) = stock(&mut h);
        let foreign = AssetRef::new(h.registry, AssetId::from_u64(4));
        h.mint_to(h.issuer.address(), foreign.id);
        let order = SwapOrder::dummy(h.maker.address(), h.taker.address(), give, vec![foreign]);
        let sig = h.maker.sign(&swapper.swap_claim(&order));

        let err = swapper
            .perform_swap(&mut h.venue, &Call::new(h.taker.address()), &order, &sig, ExecutionMode::Strict)
            .unwrap_err();
        assert!(matches!(err, OpenswapError::NotAssetOwner { .. }));
        assert_eq!(h.owner_of(&AssetId::from_u64(1)), Some(h.maker.address()));
        assert_eq!(h.owner_of(&AssetId::from_u64(2)), Some(h.maker.address()));
        assert_eq!(swapper.order_state(&swapper.swap_claim(&order)), DigestState::Unknown);
    }

    #[test]
    fn cancelled_swap_soft_fails_in_lenient_mode() {
        let (mut h, mut swapper) = setup();
        let (give, take) = stock(&mut h);
        let order = SwapOrder::dummy(h.maker.address(), h.taker.address(), give, take);
        let sig = h.maker.sign(&swapper.swap_claim(&order));
        swapper
            .cancel_swap(&Call::new(h.maker.address()), &order)
            .unwrap();

        let outcome = swapper
            .perform_swap(&mut h.venue, &Call::new(h.taker.address()), &order, &sig, ExecutionMode::Lenient)
            .unwrap();
        assert!(!outcome.is_performed());
        assert_eq!(h.owner_of(&AssetId::from_u64(3)), Some(h.taker.address()));
    }
}
