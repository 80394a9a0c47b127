//! 32-byte content hashes used by the registry and the executed-transaction set.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! hash_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub struct $name([u8; 32]);

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl $name {
            pub const ZERO: Self = Self([0u8; 32]);

            pub fn new(bytes: [u8; 32]) -> Self {
                Self(bytes)
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }

            pub fn is_zero(&self) -> bool {
                self.0 == [0u8; 32]
            }

            /// Parse from a 64-character hex string, with or without `0x`.
            pub fn from_hex(s: &str) -> Result<Self, crate::GateError> {
                let raw = s.strip_prefix("0x").unwrap_or(s);
                let bytes = hex::decode(raw)
                    .map_err(|e| crate::GateError::InvalidHash(format!("{s}: {e}")))?;
                let array: [u8; 32] = bytes.try_into().map_err(|_| {
                    crate::GateError::InvalidHash(format!("{s}: expected 32 bytes"))
                })?;
                Ok(Self(array))
            }
        }

        impl From<alloy_primitives::B256> for $name {
            fn from(value: alloy_primitives::B256) -> Self {
                Self(value.0)
            }
        }

        impl From<$name> for alloy_primitives::B256 {
            fn from(value: $name) -> Self {
                alloy_primitives::B256::new(value.0)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), hex::encode(&self.0[..4]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{}", hex::encode(self.0))
            }
        }
    };
}

hash_type!(
    /// EIP-712 hash of a single module transaction.
    TxHash
);

hash_type!(
    /// Identifier of a question on the oracle.
    QuestionId
);

hash_type!(
    /// `keccak256` of the question text. Stable across parameter changes,
    /// so it keys the executed-transaction records.
    QuestionHash
);
