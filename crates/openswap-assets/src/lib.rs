//! # openswap-assets
//!
//! The asset collaborators that settlement engines move value through.
//!
//! Settlement never touches balances or ownership tables directly. It goes
//! through two seams:
//!
//! - [`FungibleLedger`]: balances, allowances, transfer-on-behalf
//! - [`UniqueAssetRegistry`]: ownership, per-asset and operator approvals,
//!   delegated mint, burn
//!
//! [`TokenLedger`] and [`CertRegistry`] are in-memory reference
//! implementations. [`AssetBook`] groups one fee token with any number of
//! registries and is `Clone`, which is what the settlement unit of work
//! checkpoints. [`SupplyConservation`] checks that settlement only ever moves
//! fungible balances.

pub mod book;
pub mod fungible;
pub mod registry;
pub mod supply_conservation;

pub use book::AssetBook;
pub use fungible::{FungibleLedger, TokenLedger};
pub use registry::{CertRegistry, UniqueAssetRegistry};
pub use supply_conservation::SupplyConservation;
