//! Oracle answers for binary questions.
//!
//! The oracle reports a raw 32-byte word. Only three values carry meaning for
//! the module: accepted (`1`), rejected (`0`) and the invalidated sentinel
//! (all bits set). Anything else is treated as "not approved".

use serde::{Deserialize, Serialize};
use std::fmt;

/// A raw 32-byte answer word as reported by the oracle.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Answer([u8; 32]);

impl Answer {
    /// The question resolved to "no".
    pub const REJECTED: Self = Self([0u8; 32]);

    /// The question resolved to "yes".
    pub const ACCEPTED: Self = {
        let mut word = [0u8; 32];
        word[31] = 1;
        Self(word)
    };

    /// The question was resolved as invalid; its outcome must not be trusted.
    pub const INVALIDATED: Self = Self([0xFF; 32]);

    pub fn new(word: [u8; 32]) -> Self {
        Self(word)
    }

    /// Encode a small integer as a big-endian word (e.g. `2` for an
    /// out-of-range boolean answer).
    pub fn from_u64(value: u64) -> Self {
        let mut word = [0u8; 32];
        word[24..].copy_from_slice(&value.to_be_bytes());
        Self(word)
    }

    pub fn from_bool(value: bool) -> Self {
        if value {
            Self::ACCEPTED
        } else {
            Self::REJECTED
        }
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Exactly the accepted sentinel.
    pub fn is_accepted(&self) -> bool {
        *self == Self::ACCEPTED
    }

    /// Exactly the invalidated sentinel.
    pub fn is_invalidated(&self) -> bool {
        *self == Self::INVALIDATED
    }
}

impl fmt::Debug for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::ACCEPTED => write!(f, "Answer(accepted)"),
            Self::REJECTED => write!(f, "Answer(rejected)"),
            Self::INVALIDATED => write!(f, "Answer(invalidated)"),
            _ => write!(f, "Answer(0x{})", hex::encode(self.0)),
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
