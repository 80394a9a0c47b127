//! Controlled account trait.

use crate::ExecutorError;
use alloy_primitives::{Address, U256};
use gate_types::Operation;

/// The account the module executes approved transactions on behalf of.
pub trait Executor {
    /// Perform a call as the controlled account.
    ///
    /// `Ok(false)` means the call itself failed and nothing happened; the
    /// module reports that and leaves the transaction retryable. `Err` means
    /// the executor could not be reached at all.
    fn exec_transaction_from_module(
        &self,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> Result<bool, ExecutorError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn exec_transaction_from_module(
        &self,
        to: Address,
        value: U256,
        data: &[u8],
        operation: Operation,
    ) -> Result<bool, ExecutorError> {
        (**self).exec_transaction_from_module(to, value, data, operation)
    }
}
