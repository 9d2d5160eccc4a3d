//! # openswap-proxy
//!
//! Authorization brokers standing between asset owners and settlement
//! engines.
//!
//! Owners grant allowance (fungible) or approval (unique assets) to a
//! proxy's address, never to an engine. Each proxy keeps an [`Allowlist`] of
//! engine addresses it will act for. Revoking one engine is a single
//! `remove_authorized` by the proxy administrator; no owner has to
//! re-approve anything.
//!
//! - [`TokenTransferProxy`]: fungible `transfer_from` on an owner's behalf
//! - [`NftTransferProxy`]: unique-asset `transfer_from` on an owner's behalf
//! - [`MintProxy`]: delegated mint, holding the registry's mint authorization

pub mod allowlist;
pub mod mint_proxy;
pub mod nft_proxy;
pub mod token_proxy;

pub use allowlist::Allowlist;
pub use mint_proxy::MintProxy;
pub use nft_proxy::NftTransferProxy;
pub use token_proxy::TokenTransferProxy;
