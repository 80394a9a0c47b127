//! Nullable infrastructure for deterministic testing.
//!
//! Every external dependency of the module (clock, oracle, controlled
//! account) sits behind a trait. This crate provides test-friendly
//! implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Record how they were called, for assertions
//!
//! Usage: swap real implementations for nullables in tests.

pub mod clock;
pub mod executor;
pub mod oracle;

pub use clock::NullClock;
pub use executor::{ExecutedCall, NullExecutor};
pub use oracle::{AskedQuestion, NullOracle};
