//! Settlement receipts for the audit trail.
//!
//! Every successful `perform` returns a [`SettlementReceipt`] naming the
//! engine, the digest it consumed, and both parties.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Address, ClaimDigest, OrderKind, ReceiptId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementReceipt {
    pub id: ReceiptId,
    pub kind: OrderKind,
    pub digest: ClaimDigest,
    /// The engine that settled the order.
    pub engine: Address,
    pub maker: Address,
    pub taker: Address,
    /// Evaluation instant of the settling call.
    pub executed_at: DateTime<Utc>,
}

impl SettlementReceipt {
    #[must_use]
    pub fn new(
        kind: OrderKind,
        digest: ClaimDigest,
        engine: Address,
        maker: Address,
        taker: Address,
        executed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReceiptId::new(),
            kind,
            digest,
            engine,
            maker,
            taker,
            executed_at,
        }
    }
}
