//! Executed-transaction set and in-order execution rules.

use crate::ModuleError;
use gate_types::{QuestionHash, TxHash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Records which `(question, transaction)` pairs have run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedTransactions {
    executed: BTreeSet<(QuestionHash, TxHash)>,
}

impl ExecutedTransactions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_executed(&self, question_hash: &QuestionHash, tx_hash: &TxHash) -> bool {
        self.executed.contains(&(*question_hash, *tx_hash))
    }

    /// Check that `tx_hashes[index]` may run now: not run before, and its
    /// predecessor (if any) already ran.
    pub fn check_order(
        &self,
        question_hash: &QuestionHash,
        tx_hashes: &[TxHash],
        index: usize,
    ) -> Result<(), ModuleError> {
        let tx_hash = tx_hashes.get(index).ok_or(ModuleError::IndexOutOfRange {
            index,
            len: tx_hashes.len(),
        })?;
        if self.is_executed(question_hash, tx_hash) {
            return Err(ModuleError::AlreadyExecuted);
        }
        if index > 0 && !self.is_executed(question_hash, &tx_hashes[index - 1]) {
            return Err(ModuleError::PreviousNotExecuted);
        }
        Ok(())
    }

    /// First position of `tx_hashes` not yet executed for this question.
    pub fn next_index(&self, question_hash: &QuestionHash, tx_hashes: &[TxHash]) -> Option<usize> {
        tx_hashes
            .iter()
            .position(|tx_hash| !self.is_executed(question_hash, tx_hash))
    }

    /// Returns `false` if the pair was already recorded.
    pub fn mark_executed(&mut self, question_hash: QuestionHash, tx_hash: TxHash) -> bool {
        self.executed.insert((question_hash, tx_hash))
    }

    pub fn len(&self) -> usize {
        self.executed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executed.is_empty()
    }
}
