//! Unique-asset registry.
//!
//! [`CertRegistry`] models an issuer's certificate registry: every asset has
//! exactly one owner, carries an immutable proof and metadata URI, and can be
//! minted only by the registry owner or an address the owner delegated mint
//! rights to.

use std::collections::{BTreeSet, HashMap, HashSet};

use openswap_types::{constants, Address, AssetId, OpenswapError, Result};
use tracing::debug;

/// Ownership / approval / mint / burn surface consumed by the NFT transfer
/// proxy and the mint proxy.
pub trait UniqueAssetRegistry {
    /// The registry's own address.
    fn address(&self) -> Address;

    /// The registry owner (issuer).
    fn owner(&self) -> Address;

    fn owner_of(&self, id: &AssetId) -> Result<Address>;

    fn balance_of(&self, owner: &Address) -> Result<usize>;

    /// Approve `approved` to move asset `id`. `caller` must own the asset or
    /// be one of the owner's operators.
    fn approve(&mut self, caller: Address, approved: Address, id: AssetId) -> Result<()>;

    fn get_approved(&self, id: &AssetId) -> Result<Option<Address>>;

    fn set_approval_for_all(&mut self, owner: Address, operator: Address, approved: bool)
    -> Result<()>;

    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool;

    /// Whether `spender` may move asset `id`: owner, approved, or operator.
    fn is_authorized_spender(&self, spender: &Address, id: &AssetId) -> Result<bool>;

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        id: AssetId,
    ) -> Result<()>;

    fn mint(&mut self, minter: Address, to: Address, id: AssetId, proof: &str, uri: &str)
    -> Result<()>;

    fn burn(&mut self, caller: Address, id: AssetId) -> Result<()>;

    fn is_mint_authorized(&self, minter: &Address) -> bool;
}

/// In-memory reference unique-asset registry.
#[derive(Debug, Clone)]
pub struct CertRegistry {
    address: Address,
    owner: Address,
    name: String,
    symbol: String,
    mint_authorized: BTreeSet<Address>,
    owners: HashMap<AssetId, Address>,
    counts: HashMap<Address, usize>,
    approvals: HashMap<AssetId, Address>,
    /// (owner, operator) pairs.
    operators: HashSet<(Address, Address)>,
    proofs: HashMap<AssetId, String>,
    uris: HashMap<AssetId, String>,
}

impl CertRegistry {
    #[must_use]
    pub fn new(address: Address, owner: Address, name: &str, symbol: &str) -> Self {
        Self {
            address,
            owner,
            name: name.to_string(),
            symbol: symbol.to_string(),
            mint_authorized: BTreeSet::new(),
            owners: HashMap::new(),
            counts: HashMap::new(),
            approvals: HashMap::new(),
            operators: HashSet::new(),
            proofs: HashMap::new(),
            uris: HashMap::new(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Grant or revoke delegated mint rights. Registry owner only.
    pub fn set_mint_authorized_address(
        &mut self,
        caller: Address,
        target: Address,
        authorized: bool,
    ) -> Result<()> {
        if caller != self.owner {
            return Err(OpenswapError::NotAdministrator { caller });
        }
        if target.is_zero() {
            return Err(OpenswapError::InvalidRecipient(target));
        }
        if authorized {
            self.mint_authorized.insert(target);
        } else {
            self.mint_authorized.remove(&target);
        }
        debug!(registry = %self.address, %target, authorized, "mint authorization changed");
        Ok(())
    }

    pub fn token_uri(&self, id: &AssetId) -> Result<&str> {
        self.uris
            .get(id)
            .map(String::as_str)
            .ok_or(OpenswapError::AssetNotFound(*id))
    }

    pub fn token_proof(&self, id: &AssetId) -> Result<&str> {
        self.proofs
            .get(id)
            .map(String::as_str)
            .ok_or(OpenswapError::AssetNotFound(*id))
    }

    /// Number of assets currently in existence.
    #[must_use]
    pub fn len(&self) -> usize {
        self.owners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }

    fn move_asset(&mut self, from: Address, to: Address, id: AssetId) {
        self.approvals.remove(&id);
        self.owners.insert(id, to);
        if let Some(n) = self.counts.get_mut(&from) {
            *n = n.saturating_sub(1);
        }
        *self.counts.entry(to).or_insert(0) += 1;
    }
}

impl UniqueAssetRegistry for CertRegistry {
    fn address(&self) -> Address {
        self.address
    }

    fn owner(&self) -> Address {
        self.owner
    }

    fn owner_of(&self, id: &AssetId) -> Result<Address> {
        self.owners
            .get(id)
            .copied()
            .ok_or(OpenswapError::AssetNotFound(*id))
    }

    fn balance_of(&self, owner: &Address) -> Result<usize> {
        if owner.is_zero() {
            return Err(OpenswapError::InvalidRecipient(*owner));
        }
        Ok(self.counts.get(owner).copied().unwrap_or(0))
    }

    fn approve(&mut self, caller: Address, approved: Address, id: AssetId) -> Result<()> {
        let owner = self.owner_of(&id)?;
        if caller != owner && !self.is_approved_for_all(&owner, &caller) {
            return Err(OpenswapError::NotAssetOwner {
                claimed: caller,
                asset: id,
            });
        }
        if approved == owner {
            return Err(OpenswapError::InvalidRecipient(approved));
        }
        if approved.is_zero() {
            self.approvals.remove(&id);
        } else {
            self.approvals.insert(id, approved);
        }
        Ok(())
    }

    fn get_approved(&self, id: &AssetId) -> Result<Option<Address>> {
        self.owner_of(id)?;
        Ok(self.approvals.get(id).copied())
    }

    fn set_approval_for_all(
        &mut self,
        owner: Address,
        operator: Address,
        approved: bool,
    ) -> Result<()> {
        if operator.is_zero() || operator == owner {
            return Err(OpenswapError::InvalidRecipient(operator));
        }
        if approved {
            self.operators.insert((owner, operator));
        } else {
            self.operators.remove(&(owner, operator));
        }
        Ok(())
    }

    fn is_approved_for_all(&self, owner: &Address, operator: &Address) -> bool {
        self.operators.contains(&(*owner, *operator))
    }

    fn is_authorized_spender(&self, spender: &Address, id: &AssetId) -> Result<bool> {
        let owner = self.owner_of(id)?;
        Ok(*spender == owner
            || self.approvals.get(id) == Some(spender)
            || self.is_approved_for_all(&owner, spender))
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        id: AssetId,
    ) -> Result<()> {
        let owner = self.owner_of(&id)?;
        if owner != from {
            return Err(OpenswapError::NotAssetOwner {
                claimed: from,
                asset: id,
            });
        }
        if !self.is_authorized_spender(&spender, &id)? {
            return Err(OpenswapError::NotApproved { spender, asset: id });
        }
        if to.is_zero() {
            return Err(OpenswapError::InvalidRecipient(to));
        }
        self.move_asset(from, to, id);
        Ok(())
    }

    fn mint(
        &mut self,
        minter: Address,
        to: Address,
        id: AssetId,
        proof: &str,
        uri: &str,
    ) -> Result<()> {
        if !self.is_mint_authorized(&minter) {
            return Err(OpenswapError::MintNotAuthorized { minter });
        }
        if to.is_zero() {
            return Err(OpenswapError::InvalidRecipient(to));
        }
        if self.owners.contains_key(&id) {
            return Err(OpenswapError::AssetAlreadyExists(id));
        }
        if proof.is_empty() {
            return Err(OpenswapError::InvalidAssetData {
                reason: "empty proof".into(),
            });
        }
        if uri.chars().count() > constants::MAX_URI_LEN {
            return Err(OpenswapError::InvalidAssetData {
                reason: format!("uri exceeds {} characters", constants::MAX_URI_LEN),
            });
        }
        self.owners.insert(id, to);
        *self.counts.entry(to).or_insert(0) += 1;
        self.proofs.insert(id, proof.to_string());
        self.uris.insert(id, uri.to_string());
        debug!(registry = %self.address, asset = %id, %to, "minted");
        Ok(())
    }

    fn burn(&mut self, caller: Address, id: AssetId) -> Result<()> {
        let owner = self.owner_of(&id)?;
        if caller != owner {
            return Err(OpenswapError::NotAssetOwner {
                claimed: caller,
                asset: id,
            });
        }
        self.owners.remove(&id);
        self.approvals.remove(&id);
        self.proofs.remove(&id);
        self.uris.remove(&id);
        if let Some(n) = self.counts.get_mut(&owner) {
            *n = n.saturating_sub(1);
        }
        Ok(())
    }

    fn is_mint_authorized(&self, minter: &Address) -> bool {
        *minter == self.owner || self.mint_authorized.contains(minter)
    }
}
