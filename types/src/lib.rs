//! Fundamental types for the oracle-gated execution module.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! content hashes, oracle answers, timestamps, module transactions and proposals.
//! EVM primitives (`Address`, `U256`, `Bytes`) are re-exported from `alloy-primitives`
//! so downstream crates agree on a single representation.

pub mod answer;
pub mod error;
pub mod hash;
pub mod proposal;
pub mod time;
pub mod transaction;

pub use alloy_primitives::{Address, Bytes, U256};
pub use answer::Answer;
pub use error::GateError;
pub use hash::{QuestionHash, QuestionId, TxHash};
pub use proposal::Proposal;
pub use time::{Clock, SystemClock, Timestamp};
pub use transaction::{Operation, TransactionSpec};
