//! Proposal registry: one binding per proposal slot.
//!
//! A slot is either a question hash or a question id, depending on the
//! variant. Each slot is unset, bound to one question, or invalidated.
//! Invalidation is terminal for the slot.
//!
//! In the id-indexed registry the hash slot of a proposal is only ever
//! invalidated: it blocks the proposal under every question id, including
//! ids derived after a parameter change.

use crate::variant::RegistryIndex;
use gate_types::{QuestionHash, QuestionId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registry key of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RegistryKey {
    Hash(QuestionHash),
    Id(QuestionId),
}

/// The question a slot is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundQuestion {
    pub question_id: QuestionId,
    pub question_hash: QuestionHash,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binding {
    #[default]
    Unset,
    Bound(BoundQuestion),
    Invalidated,
}

impl Binding {
    pub fn is_invalidated(&self) -> bool {
        matches!(self, Self::Invalidated)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRegistry {
    bindings: BTreeMap<RegistryKey, Binding>,
    /// Most recent question id bound for each question hash.
    latest: BTreeMap<QuestionHash, QuestionId>,
}

impl Default for ProposalRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ProposalRegistry {
    pub fn new() -> Self {
        Self {
            bindings: BTreeMap::new(),
            latest: BTreeMap::new(),
        }
    }

    /// Slot of a proposal under `index`.
    pub fn key(index: RegistryIndex, question_hash: QuestionHash, question_id: QuestionId) -> RegistryKey {
        match index {
            RegistryIndex::ByHash => RegistryKey::Hash(question_hash),
            RegistryIndex::ById => RegistryKey::Id(question_id),
        }
    }

    pub fn get(&self, key: &RegistryKey) -> Binding {
        self.bindings.get(key).copied().unwrap_or_default()
    }

    /// Bind `key` to `question`, replacing any live binding.
    ///
    /// Callers decide whether replacing is allowed; an invalidated slot is
    /// never rebound.
    pub fn bind(&mut self, key: RegistryKey, question: BoundQuestion) -> bool {
        if self.get(&key).is_invalidated() {
            return false;
        }
        self.bindings.insert(key, Binding::Bound(question));
        self.latest.insert(question.question_hash, question.question_id);
        true
    }

    /// Mark `key` invalidated. Returns the previous binding.
    pub fn invalidate(&mut self, key: RegistryKey) -> Binding {
        self.bindings
            .insert(key, Binding::Invalidated)
            .unwrap_or_default()
    }

    /// Slot that currently stands for the proposal with `question_hash`.
    ///
    /// Id-indexed: the most recently bound question, else the hash slot.
    pub fn live_key(&self, index: RegistryIndex, question_hash: QuestionHash) -> RegistryKey {
        match index {
            RegistryIndex::ByHash => RegistryKey::Hash(question_hash),
            RegistryIndex::ById => self
                .latest_question_id(&question_hash)
                .map(RegistryKey::Id)
                .unwrap_or(RegistryKey::Hash(question_hash)),
        }
    }

    /// Whether the proposal was invalidated as a whole.
    pub fn is_hash_blocked(&self, question_hash: &QuestionHash) -> bool {
        self.get(&RegistryKey::Hash(*question_hash)).is_invalidated()
    }

    /// The question id most recently bound for `question_hash`, if any.
    pub fn latest_question_id(&self, question_hash: &QuestionHash) -> Option<QuestionId> {
        self.latest.get(question_hash).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
