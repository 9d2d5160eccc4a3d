//! Fungible supply conservation checker.
//!
//! Settlement only moves balances between accounts:
//! ```text
//! Σ balances == recorded supply - Σ burns
//! ```
//! If this ever breaks, a settlement path created or destroyed value.

use std::collections::BTreeMap;

use openswap_types::{Address, OpenswapError, Result};
use rust_decimal::Decimal;

use crate::{FungibleLedger, TokenLedger};

/// Per-token expected supply.
#[derive(Debug, Default)]
pub struct SupplyConservation {
    /// Supply at the time each token was recorded.
    recorded: BTreeMap<Address, Decimal>,
    /// Burns since recording.
    burned: BTreeMap<Address, Decimal>,
}

impl SupplyConservation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a token's current supply as the baseline.
    pub fn record(&mut self, token: &TokenLedger) {
        self.recorded.insert(token.address(), token.total_supply());
        self.burned.remove(&token.address());
    }

    pub fn record_burn(&mut self, token: Address, amount: Decimal) {
        *self.burned.entry(token).or_insert(Decimal::ZERO) += amount;
    }

    #[must_use]
    pub fn expected_supply(&self, token: &Address) -> Decimal {
        let recorded = self.recorded.get(token).copied().unwrap_or(Decimal::ZERO);
        let burned = self.burned.get(token).copied().unwrap_or(Decimal::ZERO);
        recorded - burned
    }

    /// # Errors
    /// Returns [`OpenswapError::SupplyInvariantViolation`] if the sum of
    /// balances or the reported supply differs from the expected supply.
    pub fn verify(&self, token: &TokenLedger) -> Result<()> {
        let address = token.address();
        let expected = self.expected_supply(&address);
        let circulating = token.circulating();
        if circulating != expected || token.total_supply() != expected {
            return Err(OpenswapError::SupplyInvariantViolation {
                reason: format!(
                    "token {address}: circulating {circulating}, reported {}, expected {expected}",
                    token.total_supply()
                ),
            });
        }
        Ok(())
    }

    /// Tokens with a recorded baseline.
    pub fn tracked(&self) -> impl Iterator<Item = &Address> {
        self.recorded.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owner() -> Address {
        Address::derive("owner")
    }

    fn token() -> TokenLedger {
        let mut t = TokenLedger::new(Address::derive("token"), owner(), "XCT", Decimal::new(1000, 0));
        t.enable_transfer(owner()).unwrap();
        t
    }

    #[test]
    fn unrecorded_token_expects_zero() {
        let sc = SupplyConservation::new();
        assert_eq!(sc.expected_supply(&Address::derive("token")), Decimal::ZERO);
        assert_eq!(sc.tracked().count(), 0);
    }

    #[test]
    fn transfers_conserve_supply() {
        let mut t = token();
        let mut sc = SupplyConservation::new();
        sc.record(&t);
        t.transfer(owner(), Address::derive("a"), Decimal::new(300, 0))
            .unwrap();
        t.transfer(Address::derive("a"), Address::derive("b"), Decimal::new(100, 0))
            .unwrap();
        assert!(sc.verify(&t).is_ok());
    }

    #[test]
    fn recorded_burn_is_accounted() {
        let mut t = token();
        let mut sc = SupplyConservation::new();
        sc.record(&t);
        t.burn(owner(), Decimal::new(10, 0)).unwrap();
        assert!(sc.verify(&t).is_err());
        sc.record_burn(t.address(), Decimal::new(10, 0));
        assert!(sc.verify(&t).is_ok());
    }

    #[test]
    fn baseline_mismatch_detected() {
        let t = token();
        let other = TokenLedger::new(t.address(), owner(), "XCT", Decimal::new(999, 0));
        let mut sc = SupplyConservation::new();
        sc.record(&t);
        let err = sc.verify(&other).unwrap_err();
        assert!(matches!(err, OpenswapError::SupplyInvariantViolation { .. }));
    }
}
