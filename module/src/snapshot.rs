//! Persisted engine state.

use crate::announcement::Announcements;
use crate::registry::ProposalRegistry;
use crate::sequencer::ExecutedTransactions;
use crate::ModuleError;
use serde::{Deserialize, Serialize};

/// Everything the engine accumulates at runtime. Configuration is persisted
/// separately as TOML.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSnapshot {
    pub registry: ProposalRegistry,
    pub executed: ExecutedTransactions,
    pub announcements: Announcements,
}

impl ModuleSnapshot {
    pub fn to_bytes(&self) -> Result<Vec<u8>, ModuleError> {
        bincode::serialize(self).map_err(|e| ModuleError::Snapshot(e.to_string()))
    }

    pub fn from_bytes(data: &[u8]) -> Result<Self, ModuleError> {
        bincode::deserialize(data).map_err(|e| ModuleError::Snapshot(e.to_string()))
    }
}
