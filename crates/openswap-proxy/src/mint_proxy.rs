//! Delegated mint proxy.
//!
//! Registry owners grant mint rights to the proxy's address once. Engines on
//! the allowlist can then mint through it without holding mint rights
//! themselves.

use openswap_assets::UniqueAssetRegistry;
use openswap_types::{Address, AssetId, Result};
use tracing::debug;

use crate::Allowlist;

#[derive(Debug, Clone)]
pub struct MintProxy {
    address: Address,
    allowlist: Allowlist,
}

impl MintProxy {
    #[must_use]
    pub fn new(address: Address, admin: Address) -> Self {
        Self {
            address,
            allowlist: Allowlist::new(admin),
        }
    }

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
    /// `SpenderNotAuthorized` for an unlisted caller, `MintNotAuthorized` if
    /// the registry has not delegated mint rights to this proxy, and any
    /// registry rejection of the asset data.
    pub fn mint<R: UniqueAssetRegistry + ?Sized>(
        &self,
        caller: Address,
        registry: &mut R,
        to: Address,
        id: AssetId,
        proof: &str,
        uri: &str,
    ) -> Result<()> {
        self.allowlist.ensure_authorized(caller)?;
        debug!(proxy = %self.address, %caller, registry = %registry.address(), asset = %id, %to, "proxied mint");
        registry.mint(self.address, to, id, proof, uri)
    }
}
