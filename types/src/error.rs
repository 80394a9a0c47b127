//! Top-level error type for malformed primitive values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("invalid operation {0}: expected 0 (call) or 1 (delegatecall)")]
    InvalidOperation(u8),

    #[error("invalid hash: {0}")]
    InvalidHash(String),
}
