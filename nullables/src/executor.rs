//! Nullable controlled account: records calls instead of performing them.

use alloy_primitives::{Address, U256};
use gate_oracle::{Executor, ExecutorError};
use gate_types::Operation;
use std::cell::{Cell, RefCell};

/// One recorded `exec_transaction_from_module` call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutedCall {
    pub to: Address,
    pub value: U256,
    pub data: Vec<u8>,
    pub operation: Operation,
}

/// A controlled account whose calls succeed (or fail) on demand.
pub struct NullExecutor {
    success: Cell<bool>,
    unavailable: Cell<bool>,
    calls: RefCell<Vec<ExecutedCall>>,
}

impl NullExecutor {
    pub fn new() -> Self {
        Self {
            success: Cell::new(true),
            unavailable: Cell::new(false),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Whether subsequent calls report success.
    pub fn set_success(&self, success: bool) {
        self.success.set(success);
    }

    /// Make subsequent calls fail with an executor error.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.set(unavailable);
    }

    /// All calls received so far, including failed ones.
    pub fn calls(&self) -> Vec<ExecutedCall> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl Default for NullExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl Executor for NullExecutor {
    fn exec_transaction_from_module(
        &self,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> Result<bool, ExecutorError> {
        if self.unavailable.get() {
            return Err(ExecutorError::Unavailable("null executor offline".into()));
        }
        self.calls.borrow_mut().push(ExecutedCall {
            to,
            value,
            data: data.to_vec(),
            operation,
        });
        Ok(self.success.get())
    }
}
