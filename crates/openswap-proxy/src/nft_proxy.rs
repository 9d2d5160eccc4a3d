//! Unique-asset transfer proxy.

use openswap_assets::UniqueAssetRegistry;
use openswap_types::{Address, AssetId, Result};
use tracing::debug;

use crate::Allowlist;

/// Moves unique assets for allowlisted engines. The proxy must be approved
/// for the asset, or be an operator of its owner.
#[derive(Debug, Clone)]
pub struct NftTransferProxy {
    address: Address,
    allowlist: Allowlist,
}

impl NftTransferProxy {
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

    pub fn transfer_from<R: UniqueAssetRegistry + ?Sized>(
        &self,
        caller: Address,
        registry: &mut R,
        from: Address,
        to: Address,
        id: AssetId,
    ) -> Result<()> {
        self.allowlist.ensure_authorized(caller)?;
        debug!(proxy = %self.address, %caller, registry = %registry.address(), asset = %id, %from, %to, "proxied asset transfer");
        registry.transfer_from(self.address, from, to, id)
    }
}
