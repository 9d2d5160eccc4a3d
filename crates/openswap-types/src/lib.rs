//! # openswap-types
//!
//! Shared types, errors, and configuration for the **OpenSwap** settlement
//! protocol.
//!
//! This crate is the leaf dependency of the workspace. Every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`Address`], [`AssetId`], [`ClaimDigest`], [`ReceiptId`]
//! - **Order model**: [`MintOrder`], [`TransferOrder`], [`SwapOrder`], [`FeeLegs`], [`AssetRef`]
//! - **Claim codec**: [`ClaimEncoder`] and the per-kind `claim` digests
//! - **Signatures**: [`OrderSigner`], [`OrderSignature`], [`is_valid_signature`]
//! - **Call context**: [`Call`], [`ExecutionMode`]
//! - **Events & receipts**: [`SettlementEvent`], [`SettlementReceipt`], [`PerformOutcome`]
//! - **Configuration**: [`SettlementConfig`]
//! - **Errors**: [`OpenswapError`] with `OS_ERR_` prefix codes
//! - **Constants**: protocol tags and default limits

pub mod call;
pub mod claim;
pub mod config;
pub mod constants;
pub mod error;
pub mod event;
pub mod ids;
pub mod order;
pub mod receipt;
pub mod signature;

// Re-export all primary types at crate root for ergonomic imports:
//   use openswap_types::{Address, MintOrder, OrderSignature, ...};

pub use call::*;
pub use claim::*;
pub use config::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use order::*;
pub use receipt::*;
pub use signature::*;

// Constants are accessed via `openswap_types::constants::FOO`
// (not re-exported to avoid name collisions).
