//! The shared settlement venue and its unit of work.
//!
//! A [`Venue`] owns the asset book and the three proxies. Every engine
//! settles against the same venue, so the proxies' allowlists are the only
//! thing separating one engine's rights from another's.

use openswap_assets::AssetBook;
use openswap_proxy::{MintProxy, NftTransferProxy, TokenTransferProxy};
use openswap_types::{Address, AssetId, AssetRef, FeeLegs, Result};

pub struct Venue {
    assets: AssetBook,
    token_proxy: TokenTransferProxy,
    nft_proxy: NftTransferProxy,
    mint_proxy: MintProxy,
}

impl Venue {
    #[must_use]
    pub fn new(
        assets: AssetBook,
        token_proxy: TokenTransferProxy,
        nft_proxy: NftTransferProxy,
        mint_proxy: MintProxy,
    ) -> Self {
        Self {
            assets,
            token_proxy,
            nft_proxy,
            mint_proxy,
        }
    }

    #[must_use]
    pub fn assets(&self) -> &AssetBook {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetBook {
        &mut self.assets
    }

    #[must_use]
    pub fn token_proxy(&self) -> &TokenTransferProxy {
        &self.token_proxy
    }

    pub fn token_proxy_mut(&mut self) -> &mut TokenTransferProxy {
        &mut self.token_proxy
    }

    #[must_use]
    pub fn nft_proxy(&self) -> &NftTransferProxy {
        &self.nft_proxy
    }

    pub fn nft_proxy_mut(&mut self) -> &mut NftTransferProxy {
        &mut self.nft_proxy
    }

    #[must_use]
    pub fn mint_proxy(&self) -> &MintProxy {
        &self.mint_proxy
    }

    pub fn mint_proxy_mut(&mut self) -> &mut MintProxy {
        &mut self.mint_proxy
    }

    /// Run `f` as one unit of work.
    ///
    /// The asset book is checkpointed first. If `f` returns an error the
    /// checkpoint is restored, so no movement made inside `f` survives.
    pub fn atomically<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        let checkpoint = self.assets.clone();
        let result = f(self);
        if result.is_err() {
            self.assets = checkpoint;
        }
        result
    }

    /// Pay every fee leg from `payer` through the token proxy. Zero-amount
    /// legs move nothing and are skipped.
    pub fn pay_fees(&mut self, engine: Address, payer: Address, fees: &FeeLegs) -> Result<()> {
        for (recipient, amount) in fees.iter() {
            if amount.is_zero() {
                continue;
            }
            self.token_proxy.transfer_from(
                engine,
                self.assets.token_mut(),
                payer,
                *recipient,
                *amount,
            )?;
        }
        Ok(())
    }

    /// Move one unique asset through the NFT proxy.
    pub fn move_asset(
        &mut self,
        engine: Address,
        asset: &AssetRef,
        from: Address,
        to: Address,
    ) -> Result<()> {
        let registry = self.assets.registry_mut(&asset.registry)?;
        self.nft_proxy
            .transfer_from(engine, registry, from, to, asset.id)
    }

    /// Mint a new unique asset through the mint proxy.
    pub fn mint_asset(
        &mut self,
        engine: Address,
        registry: Address,
        to: Address,
        id: AssetId,
        proof: &str,
        uri: &str,
    ) -> Result<()> {
        let registry = self.assets.registry_mut(&registry)?;
        self.mint_proxy.mint(engine, registry, to, id, proof, uri)
    }
}
