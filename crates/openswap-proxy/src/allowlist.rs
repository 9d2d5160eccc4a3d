//! Capability registry: which engines a proxy acts for.

use std::collections::BTreeSet;

use openswap_types::{Address, OpenswapError, Result};
use tracing::debug;

/// Administrator-controlled set of authorized callers.
///
/// Checked at the start of every proxied operation. Only the administrator
/// can mutate it.
#[derive(Debug, Clone)]
pub struct Allowlist {
    admin: Address,
    authorized: BTreeSet<Address>,
}

impl Allowlist {
    #[must_use]
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            authorized: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn admin(&self) -> Address {
        self.admin
    }

    /// # Errors
    /// - `NotAdministrator` if `caller` is not the admin
    /// - `InvalidRecipient` for the zero address
    /// - `AlreadyAuthorized` if `target` is already listed
    pub fn add_authorized(&mut self, caller: Address, target: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        if target.is_zero() {
            return Err(OpenswapError::InvalidRecipient(target));
        }
        if !self.authorized.insert(target) {
            return Err(OpenswapError::AlreadyAuthorized(target));
        }
        debug!(%target, "authorized");
        Ok(())
    }

    /// # Errors
    /// - `NotAdministrator` if `caller` is not the admin
    /// - `NotAuthorized` if `target` is not listed
    pub fn remove_authorized(&mut self, caller: Address, target: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        if !self.authorized.remove(&target) {
            return Err(OpenswapError::NotAuthorized(target));
        }
        debug!(%target, "authorization revoked");
        Ok(())
    }

    /// Hand administration to `new_admin`.
    pub fn transfer_admin(&mut self, caller: Address, new_admin: Address) -> Result<()> {
        self.ensure_admin(caller)?;
        if new_admin.is_zero() {
            return Err(OpenswapError::InvalidRecipient(new_admin));
        }
        self.admin = new_admin;
        Ok(())
    }

    #[must_use]
    pub fn is_authorized(&self, caller: &Address) -> bool {
        self.authorized.contains(caller)
    }

    /// Gate for proxied operations.
    pub fn ensure_authorized(&self, caller: Address) -> Result<()> {
        if !self.is_authorized(&caller) {
            return Err(OpenswapError::SpenderNotAuthorized { caller });
        }
        Ok(())
    }

    /// Listed addresses in ascending order.
    #[must_use]
    pub fn authorized(&self) -> Vec<Address> {
        self.authorized.iter().copied().collect()
    }

    fn ensure_admin(&self, caller: Address) -> Result<()> {
        if caller != self.admin {
            return Err(OpenswapError::NotAdministrator { caller });
        }
        Ok(())
    }
}
