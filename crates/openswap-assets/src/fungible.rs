//! Fungible balances and allowances.
//!
//! [`TokenLedger`] is the fee token settlement engines charge in. It starts
//! with a fixed supply credited to its owner and refuses every transfer until
//! the owner enables them.

use std::collections::HashMap;

use openswap_types::{Address, OpenswapError, Result};
use rust_decimal::Decimal;
use tracing::debug;

/// Balance / allowance / transfer-on-behalf surface consumed by the token
/// transfer proxy.
pub trait FungibleLedger {
    /// The ledger's own address.
    fn address(&self) -> Address;

    fn total_supply(&self) -> Decimal;

    fn balance_of(&self, owner: &Address) -> Decimal;

    /// How much `spender` may still move out of `owner`'s balance.
    fn allowance(&self, owner: &Address, spender: &Address) -> Decimal;

    fn approve(&mut self, owner: Address, spender: Address, amount: Decimal) -> Result<()>;

    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()>;

    /// Move `amount` from `from` to `to`, consuming `spender`'s allowance.
    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<()>;
}

/// In-memory reference fungible token.
#[derive(Debug, Clone)]
pub struct TokenLedger {
    address: Address,
    owner: Address,
    symbol: String,
    total_supply: Decimal,
    transfer_enabled: bool,
    balances: HashMap<Address, Decimal>,
    /// (owner, spender) → remaining allowance.
    allowances: HashMap<(Address, Address), Decimal>,
}

impl TokenLedger {
    /// Create a token with `supply` credited to `owner`. Transfers start
    /// disabled.
    #[must_use]
    pub fn new(address: Address, owner: Address, symbol: &str, supply: Decimal) -> Self {
        let mut balances = HashMap::new();
        balances.insert(owner, supply);
        Self {
            address,
            owner,
            symbol: symbol.to_string(),
            total_supply: supply,
            transfer_enabled: false,
            balances,
            allowances: HashMap::new(),
        }
    }

    #[must_use]
    pub fn owner(&self) -> Address {
        self.owner
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    #[must_use]
    pub fn is_transfer_enabled(&self) -> bool {
        self.transfer_enabled
    }

    /// Turn transfers on. One-way; owner only.
    pub fn enable_transfer(&mut self, caller: Address) -> Result<()> {
        self.ensure_owner(caller)?;
        self.transfer_enabled = true;
        debug!(token = %self.address, "transfers enabled");
        Ok(())
    }

    /// Destroy `amount` of the owner's balance, shrinking the supply.
    pub fn burn(&mut self, caller: Address, amount: Decimal) -> Result<()> {
        self.ensure_owner(caller)?;
        ensure_non_negative(amount)?;
        self.debit(caller, amount)?;
        self.total_supply -= amount;
        Ok(())
    }

    /// Sum of all account balances. Equals `total_supply` unless something
    /// minted or destroyed value outside `burn`.
    #[must_use]
    pub fn circulating(&self) -> Decimal {
        self.balances.values().copied().sum()
    }

    fn ensure_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            return Err(OpenswapError::NotAdministrator { caller });
        }
        Ok(())
    }

    fn ensure_transferable(&self, to: Address, amount: Decimal) -> Result<()> {
        if !self.transfer_enabled {
            return Err(OpenswapError::TransfersDisabled);
        }
        if to.is_zero() || to == self.address {
            return Err(OpenswapError::InvalidRecipient(to));
        }
        ensure_non_negative(amount)
    }

    fn debit(&mut self, from: Address, amount: Decimal) -> Result<()> {
        let available = self.balance_of(&from);
        if available < amount {
            return Err(OpenswapError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        self.balances.insert(from, available - amount);
        Ok(())
    }

    fn credit(&mut self, to: Address, amount: Decimal) {
        *self.balances.entry(to).or_insert(Decimal::ZERO) += amount;
    }
}

fn ensure_non_negative(amount: Decimal) -> Result<()> {
    if amount < Decimal::ZERO {
        return Err(OpenswapError::InvalidAssetData {
            reason: format!("negative amount {amount}"),
        });
    }
    Ok(())
}

impl FungibleLedger for TokenLedger {
    fn address(&self) -> Address {
        self.address
    }

    fn total_supply(&self) -> Decimal {
        self.total_supply
    }

    fn balance_of(&self, owner: &Address) -> Decimal {
        self.balances.get(owner).copied().unwrap_or(Decimal::ZERO)
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Decimal {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Changing a non-zero allowance to another non-zero value is refused;
    /// reset it to zero first.
    fn approve(&mut self, owner: Address, spender: Address, amount: Decimal) -> Result<()> {
        ensure_non_negative(amount)?;
        let current = self.allowance(&owner, &spender);
        if !current.is_zero() && !amount.is_zero() {
            return Err(OpenswapError::AllowanceNotReset { current });
        }
        self.allowances.insert((owner, spender), amount);
        Ok(())
    }

    fn transfer(&mut self, from: Address, to: Address, amount: Decimal) -> Result<()> {
        self.ensure_transferable(to, amount)?;
        self.debit(from, amount)?;
        self.credit(to, amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: Decimal,
    ) -> Result<()> {
        self.ensure_transferable(to, amount)?;
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(OpenswapError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        self.debit(from, amount)?;
        self.allowances.insert((from, spender), allowed - amount);
        self.credit(to, amount);
        Ok(())
    }
}
