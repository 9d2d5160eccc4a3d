//! The set of asset collaborators a venue settles against.

use std::collections::BTreeMap;

use openswap_types::{Address, OpenswapError, Result};

use crate::{CertRegistry, TokenLedger, UniqueAssetRegistry};

/// One fee token plus every unique-asset registry, keyed by address.
///
/// `Clone` is load-bearing: the settlement unit of work checkpoints the whole
/// book and restores it if any leg fails.
#[derive(Debug, Clone)]
pub struct AssetBook {
    token: TokenLedger,
    registries: BTreeMap<Address, CertRegistry>,
}

impl AssetBook {
    #[must_use]
    pub fn new(token: TokenLedger) -> Self {
        Self {
            token,
            registries: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn token(&self) -> &TokenLedger {
        &self.token
    }

    pub fn token_mut(&mut self) -> &mut TokenLedger {
        &mut self.token
    }

    /// Register a unique-asset registry under its own address.
    ///
    /// # Errors
    /// `Configuration` if a registry already sits at that address.
    pub fn add_registry(&mut self, registry: CertRegistry) -> Result<()> {
        let address = registry.address();
        if self.registries.contains_key(&address) {
            return Err(OpenswapError::Configuration(format!(
                "registry {address} already registered"
            )));
        }
        self.registries.insert(address, registry);
        Ok(())
    }

    pub fn registry(&self, address: &Address) -> Result<&CertRegistry> {
        self.registries
            .get(address)
            .ok_or(OpenswapError::RegistryNotFound(*address))
    }

    pub fn registry_mut(&mut self, address: &Address) -> Result<&mut CertRegistry> {
        self.registries
            .get_mut(address)
            .ok_or(OpenswapError::RegistryNotFound(*address))
    }

    /// Registry addresses in deterministic order.
    pub fn registry_addresses(&self) -> impl Iterator<Item = &Address> {
        self.registries.keys()
    }
}
