//! Shared fixture for engine unit tests.

use openswap_assets::{AssetBook, CertRegistry, FungibleLedger, TokenLedger, UniqueAssetRegistry};
use openswap_proxy::{MintProxy, NftTransferProxy, TokenTransferProxy};
use openswap_types::{Address, AssetId, OrderSigner};
use rust_decimal::Decimal;

use crate::Venue;

pub(crate) struct Harness {
    pub venue: Venue,
    pub admin: Address,
    pub registry: Address,
    pub issuer: OrderSigner,
    pub maker: OrderSigner,
    pub taker: OrderSigner,
}

impl Harness {
    /// Token with transfers enabled, 100 XCT credited to the taker, one
    /// registry owned by the issuer.
    pub fn new() -> Self {
        let admin = Address::derive("admin");
        let issuer = OrderSigner::account(0);
        let maker = OrderSigner::account(1);
        let taker = OrderSigner::account(2);

        let mut token = TokenLedger::new(Address::derive("token:xct"), admin, "XCT", Decimal::new(1000, 0));
        token.enable_transfer(admin).unwrap();
        token
            .transfer(admin, taker.address(), Decimal::new(100, 0))
            .unwrap();
        let mut book = AssetBook::new(token);
        let registry = Address::derive("registry:foo");
        book.add_registry(CertRegistry::new(registry, issuer.address(), "Foo", "F"))
            .unwrap();

        let venue = Venue::new(
            book,
            TokenTransferProxy::new(Address::derive("proxy:token"), admin),
            NftTransferProxy::new(Address::derive("proxy:nft"), admin),
            MintProxy::new(Address::derive("proxy:mint"), admin),
        );
        Self {
            venue,
            admin,
            registry,
            issuer,
            maker,
            taker,
        }
    }

    /// Allowlist `engine` on every proxy.
    pub fn authorize(&mut self, engine: Address) {
        let admin = self.admin;
        self.venue
            .token_proxy_mut()
            .allowlist_mut()
            .add_authorized(admin, engine)
            .unwrap();
        self.venue
            .nft_proxy_mut()
            .allowlist_mut()
            .add_authorized(admin, engine)
            .unwrap();
        self.venue
            .mint_proxy_mut()
            .allowlist_mut()
            .add_authorized(admin, engine)
            .unwrap();
    }

    pub fn mint_to(&mut self, owner: Address, id: AssetId) {
        let issuer = self.issuer.address();
        self.venue
            .assets_mut()
            .registry_mut(&self.registry)
            .unwrap()
            .mint(issuer, owner, id, "proof", "https://example.org/cert")
            .unwrap();
    }

    pub fn approve_fees(&mut self, owner: Address, amount: Decimal) {
        let proxy = self.venue.token_proxy().address();
        self.venue
            .assets_mut()
            .token_mut()
            .approve(owner, proxy, amount)
            .unwrap();
    }

    pub fn approve_asset(&mut self, owner: Address, id: AssetId) {
        let proxy = self.venue.nft_proxy().address();
        self.venue
            .assets_mut()
            .registry_mut(&self.registry)
            .unwrap()
            .approve(owner, proxy, id)
            .unwrap();
    }

    pub fn delegate_mint(&mut self) {
        let proxy = self.venue.mint_proxy().address();
        let issuer = self.issuer.address();
        self.venue
            .assets_mut()
            .registry_mut(&self.registry)
            .unwrap()
            .set_mint_authorized_address(issuer, proxy, true)
            .unwrap();
    }

    pub fn balance(&self, who: &Address) -> Decimal {
        self.venue.assets().token().balance_of(who)
    }

    pub fn owner_of(&self, id: &AssetId) -> Option<Address> {
        self.venue
            .assets()
            .registry(&self.registry)
            .unwrap()
            .owner_of(id)
            .ok()
    }
}
