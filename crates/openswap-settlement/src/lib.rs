//! # openswap-settlement
//!
//! Signed-order settlement engines.
//!
//! ## Architecture
//!
//! A client builds an order, computes its claim digest for a specific
//! engine, and has the maker sign it. The taker then submits order and
//! signature to that engine, which:
//! 1. Validates the order (shape, fee legs, swap counts, expiry)
//! 2. Checks the caller is the taker and the signature is the maker's
//! 3. Checks the [`OrderLedger`] has never seen the digest
//! 4. Moves every asset leg through the venue's proxies as one unit of work
//! 5. Marks the digest performed and returns a receipt
//!
//! ## Engines
//!
//! - [`Minter`]: fees for a freshly minted unique asset
//! - [`Trader`]: fees for one existing unique asset
//! - [`Swapper`]: N unique assets for M unique assets, plus fees
//!
//! All three are [`SettlementEngine`] over a different [`SettlementOrder`].

pub mod engine;
pub mod minter;
pub mod order_ledger;
pub mod swapper;
pub mod trader;
pub mod venue;

#[cfg(test)]
mod testkit;

pub use engine::{SettlementEngine, SettlementOrder};
pub use minter::Minter;
pub use order_ledger::{DigestState, OrderLedger};
pub use swapper::Swapper;
pub use trader::Trader;
pub use venue::Venue;
