//! The validate-then-execute skeleton shared by every settlement engine.
//!
//! ```text
//! perform(order, signature, mode):
//!   1. wiring check         venue proxies match the engine     (hard)
//!   2. order validation     shape, fee legs, counts, expiry     (hard)
//!   3. caller == taker                                          (soft)
//!   4. signature by maker over this engine's digest             (soft)
//!   5. digest Unknown                                           (soft)
//!   6. kind-specific authorization (mint: issuer owns registry) (soft)
//!   7. unit of work: asset legs, then digest -> Performed       (soft)
//! ```
//!
//! In strict mode a soft failure is returned as an error. In lenient mode it
//! becomes [`PerformOutcome::Failed`] plus a `Failed` event, and the digest
//! stays `Unknown`. Either way the unit of work has already rolled back every
//! movement it made.

use std::marker::PhantomData;

use chrono::{DateTime, Utc};
use openswap_assets::FungibleLedger;
use openswap_types::{
    Address, Call, ClaimDigest, ExecutionMode, OpenswapError, OrderKind, OrderSignature,
    PerformOutcome, Result, SettlementConfig, SettlementEvent, SettlementReceipt,
};
use tracing::{info, warn};

use crate::order_ledger::{DigestState, OrderLedger};
use crate::venue::Venue;

/// An order kind a [`SettlementEngine`] can settle.
pub trait SettlementOrder {
    const KIND: OrderKind;

    /// Claim digest bound to `engine`.
    fn digest(&self, engine: &Address) -> ClaimDigest;

    /// The party whose signature authorizes the order.
    fn maker(&self) -> Address;

    /// The only party allowed to perform the order.
    fn taker(&self) -> Address;

    fn validate_at(&self, now: DateTime<Utc>, config: &SettlementConfig) -> Result<()>;

    /// Checks against venue state that must pass before any leg moves.
    /// Only mint overrides this: transfer and swap have nothing to check
    /// beyond what the proxies enforce during `execute`.
    fn authorize(&self, _venue: &Venue) -> Result<()> {
        Ok(())
    }

    /// Move every asset leg. Runs inside the unit of work.
    fn execute(&self, engine: Address, venue: &mut Venue) -> Result<()>;
}

/// Settles orders of kind `O` against a shared [`Venue`].
#[derive(Debug)]
pub struct SettlementEngine<O> {
    address: Address,
    token_address: Address,
    token_proxy_address: Address,
    nft_proxy_address: Address,
    mint_proxy_address: Address,
    ledger: OrderLedger,
    config: SettlementConfig,
    events: Vec<SettlementEvent>,
    _order: PhantomData<fn(&O)>,
}

impl<O: SettlementOrder> SettlementEngine<O> {
    /// Create an engine at `address`, wired to the venue's token and proxies.
    ///
    /// The engine still has to be added to the relevant proxy allowlists by
    /// their administrators before it can move anything.
    ///
    /// # Errors
    /// `Configuration` if `config` is invalid or `address` is zero.
    pub fn new(address: Address, venue: &Venue, config: SettlementConfig) -> Result<Self> {
        config.validate()?;
        if address.is_zero() {
            return Err(OpenswapError::Configuration(
                "engine address must be non-zero".into(),
            ));
        }
        Ok(Self {
            address,
            token_address: venue.assets().token().address(),
            token_proxy_address: venue.token_proxy().address(),
            nft_proxy_address: venue.nft_proxy().address(),
            mint_proxy_address: venue.mint_proxy().address(),
            ledger: OrderLedger::new(),
            config,
            events: Vec::new(),
            _order: PhantomData,
        })
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn token_address(&self) -> Address {
        self.token_address
    }

    #[must_use]
    pub fn token_proxy_address(&self) -> Address {
        self.token_proxy_address
    }

    #[must_use]
    pub fn nft_proxy_address(&self) -> Address {
        self.nft_proxy_address
    }

    #[must_use]
    pub fn mint_proxy_address(&self) -> Address {
        self.mint_proxy_address
    }

    #[must_use]
    pub fn config(&self) -> &SettlementConfig {
        &self.config
    }

    #[must_use]
    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    #[must_use]
    pub fn order_state(&self, digest: &ClaimDigest) -> DigestState {
        self.ledger.state(digest)
    }

    /// Queued events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[SettlementEvent] {
        &self.events
    }

    /// Drain the event queue.
    pub fn take_events(&mut self) -> Vec<SettlementEvent> {
        std::mem::take(&mut self.events)
    }

    /// The digest the maker has to sign for `order` on this engine.
    #[must_use]
    pub fn claim(&self, order: &O) -> ClaimDigest {
        order.digest(&self.address)
    }

    #[must_use]
    pub fn is_valid_signature(
        &self,
        signer: &Address,
        digest: &ClaimDigest,
        signature: &OrderSignature,
    ) -> bool {
        openswap_types::is_valid_signature(signer, digest, signature)
    }

    /// Settle `order`.
    ///
    /// # Errors
    /// Validation and internal errors in every mode. Authorization and state
    /// conflict errors only in [`ExecutionMode::Strict`].
    pub fn perform(
        &mut self,
        venue: &mut Venue,
        call: &Call,
        order: &O,
        signature: &OrderSignature,
        mode: ExecutionMode,
    ) -> Result<PerformOutcome> {
        self.ensure_wiring(venue)?;
        order.validate_at(call.now, &self.config)?;
        let digest = self.claim(order);

        match self.settle(venue, call, order, &digest, signature) {
            Ok(receipt) => {
                info!(
                    kind = %O::KIND,
                    digest = %digest,
                    maker = %receipt.maker,
                    taker = %receipt.taker,
                    receipt = %receipt.id,
                    "order performed"
                );
                self.events.push(SettlementEvent::Performed {
                    kind: O::KIND,
                    digest,
                    maker: receipt.maker,
                    taker: receipt.taker,
                });
                Ok(PerformOutcome::Performed(receipt))
            }
            Err(err) if mode == ExecutionMode::Lenient && err.is_soft_failable() => {
                let class = err.class();
                warn!(kind = %O::KIND, digest = %digest, %class, error = %err, "order failed");
                self.events.push(SettlementEvent::Failed {
                    kind: O::KIND,
                    digest,
                    class,
                    error: err.to_string(),
                });
                Ok(PerformOutcome::Failed {
                    digest,
                    class,
                    error: err.to_string(),
                })
            }
            Err(err) => Err(err),
        }
    }

    /// Cancel `order` before it is performed. Only the maker may cancel.
    ///
    /// # Errors
    /// `WrongCaller` for anyone but the maker, `OrderAlreadyPerformed` /
    /// `OrderAlreadyCancelled` for a terminal digest. Never lenient.
    pub fn cancel(&mut self, call: &Call, order: &O) -> Result<ClaimDigest> {
        let maker = order.maker();
        if call.caller != maker {
            return Err(OpenswapError::WrongCaller {
                expected: maker,
                actual: call.caller,
            });
        }
        let digest = self.claim(order);
        self.ledger.mark_cancelled(digest)?;
        info!(kind = %O::KIND, digest = %digest, %maker, "order cancelled");
        self.events.push(SettlementEvent::Cancelled {
            kind: O::KIND,
            digest,
            maker,
        });
        Ok(digest)
    }

    /// Perform each order in lenient mode. Every order gets its own result,
    /// so a malformed order does not stop the rest of the batch.
    pub fn perform_batch(
        &mut self,
        venue: &mut Venue,
        call: &Call,
        orders: &[(O, OrderSignature)],
    ) -> Vec<Result<PerformOutcome>> {
        orders
            .iter()
            .map(|(order, signature)| {
                self.perform(venue, call, order, signature, ExecutionMode::Lenient)
            })
            .collect()
    }

    fn settle(
        &mut self,
        venue: &mut Venue,
        call: &Call,
        order: &O,
        digest: &ClaimDigest,
        signature: &OrderSignature,
    ) -> Result<SettlementReceipt> {
        let (maker, taker) = (order.maker(), order.taker());
        if call.caller != taker {
            return Err(OpenswapError::WrongCaller {
                expected: taker,
                actual: call.caller,
            });
        }
        if !self.is_valid_signature(&maker, digest, signature) {
            return Err(OpenswapError::InvalidSignature {
                signer: maker,
                digest: *digest,
            });
        }
        self.ledger.ensure_unknown(digest)?;
        order.authorize(venue)?;

        let engine = self.address;
        let ledger = &mut self.ledger;
        venue.atomically(|venue| {
            order.execute(engine, venue)?;
            ledger.mark_performed(*digest)
        })?;

        Ok(SettlementReceipt::new(O::KIND, *digest, engine, maker, taker, call.now))
    }

    fn ensure_wiring(&self, venue: &Venue) -> Result<()> {
        let wired = [
            ("token proxy", self.token_proxy_address, venue.token_proxy().address()),
            ("nft proxy", self.nft_proxy_address, venue.nft_proxy().address()),
            ("mint proxy", self.mint_proxy_address, venue.mint_proxy().address()),
        ];
        for (what, expected, actual) in wired {
            if expected != actual {
                return Err(OpenswapError::Configuration(format!(
                    "{what} mismatch: engine wired to {expected}, venue has {actual}"
                )));
            }
        }
        Ok(())
    }
}
