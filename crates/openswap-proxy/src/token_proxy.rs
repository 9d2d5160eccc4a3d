//! Fungible transfer proxy.

use openswap_assets::FungibleLedger;
use openswap_types::{Address, Result};
use rust_decimal::Decimal;
use tracing::debug;

use crate::Allowlist;

/// Moves fungible balances for allowlisted engines, spending the allowance
/// owners granted to this proxy's address.
#[derive(Debug, Clone)]
pub struct TokenTransferProxy {
    address: Address,
    allowlist: Allowlist,
}

impl TokenTransferProxy {
    #[must_use]
    pub fn new(address: Address, admin: Address) -> Self {
        Self {
            address,
            allowlist: Allowlist::new(admin),
        }
    }

    /// The address owners approve.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    #[must_use]
    pub fn allowlist(&self) -> &Allowlist {
        &self.allowlist
    }

    pub fn allowlist_mut(&mut self) -> &mut Allowlist {
        &mut self.allowlist
    }

    /// # Errors
    /// `SpenderNotAuthorized` if `caller` is not allowlisted, otherwise
    /// whatever the ledger reports (allowance, balance, recipient).
    pub fn transfer_from<L: FungibleLedger + ?Sized>(
        &self,
        caller: Address,
        ledger: &mut L,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<()> {
        self.allowlist.ensure_authorized(caller)?;
        debug!(proxy = %self.address, %caller, %from, %to, %amount, "proxied token transfer");
        ledger.transfer_from(self.address, from, to, amount)
    }
}
