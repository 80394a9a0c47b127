//! Proposals: a named, ordered batch of module transactions.

use crate::TransactionSpec;
use serde::{Deserialize, Serialize};

/// A proposal as submitted off-chain.
///
/// Never stored directly: the module only keeps hashes derived from it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proposal {
    /// Opaque, human-readable proposal id (e.g. a snapshot id).
    pub id: String,
    /// Transactions in execution order.
    #[serde(alias = "txs")]
    pub transactions: Vec<TransactionSpec>,
}

impl Proposal {
    pub fn new(id: impl Into<String>, transactions: Vec<TransactionSpec>) -> Self {
        Self {
            id: id.into(),
            transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
