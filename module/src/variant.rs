//! Variant selection.
//!
//! The plain, announced and bonded modules share one state machine. They
//! differ only in how the registry is keyed, how question ids are derived,
//! whether the bond is checked and what the cooldown is measured from.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the proposal registry is keyed by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistryIndex {
    /// `question_id -> question_hash`. Callers name the question id.
    ById,
    /// `question_hash -> question_id`. The id is looked up from content.
    ByHash,
}

/// How the module derives (and asks for) question ids.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum QuestionIdScheme {
    /// `askQuestion`; id over template, question, arbitrator, timeout,
    /// opening time, asker and nonce.
    Explicit,
    /// `askQuestionWithMinBond`; the id also commits to the minimum bond and
    /// the oracle instance.
    MinBond,
}

/// Start of the cooldown window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CooldownAnchor {
    /// The oracle's finalization time. Expiration applies.
    Finalization,
    /// The time the proposal was announced ready. Expiration does not apply.
    Announcement,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ModuleVariant {
    pub registry: RegistryIndex,
    pub question_ids: QuestionIdScheme,
    pub bond_check: bool,
    pub cooldown_anchor: CooldownAnchor,
}

impl ModuleVariant {
    pub const fn plain() -> Self {
        Self {
            registry: RegistryIndex::ById,
            question_ids: QuestionIdScheme::Explicit,
            bond_check: false,
            cooldown_anchor: CooldownAnchor::Finalization,
        }
    }

    pub const fn announced() -> Self {
        Self {
            cooldown_anchor: CooldownAnchor::Announcement,
            ..Self::plain()
        }
    }

    pub const fn bonded() -> Self {
        Self {
            registry: RegistryIndex::ByHash,
            question_ids: QuestionIdScheme::MinBond,
            bond_check: true,
            cooldown_anchor: CooldownAnchor::Finalization,
        }
    }

    /// Whether execution needs a readiness announcement first.
    pub fn requires_announcement(&self) -> bool {
        self.cooldown_anchor == CooldownAnchor::Announcement
    }

    /// Whether accepted answers can expire under this variant.
    pub fn applies_expiration(&self) -> bool {
        self.cooldown_anchor == CooldownAnchor::Finalization
    }
}

/// Variant name as written in config files.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantKind {
    Plain,
    Announced,
    #[default]
    Bonded,
}

impl From<VariantKind> for ModuleVariant {
    fn from(kind: VariantKind) -> Self {
        match kind {
            VariantKind::Plain => Self::plain(),
            VariantKind::Announced => Self::announced(),
            VariantKind::Bonded => Self::bonded(),
        }
    }
}

impl fmt::Display for VariantKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Announced => write!(f, "announced"),
            Self::Bonded => write!(f, "bonded"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announced_differs_from_plain_only_in_anchor() {
        let plain = ModuleVariant::plain();
        let announced = ModuleVariant::announced();
        assert_eq!(plain.registry, announced.registry);
        assert_eq!(plain.question_ids, announced.question_ids);
        assert_eq!(plain.bond_check, announced.bond_check);
        assert!(announced.requires_announcement());
        assert!(!announced.applies_expiration());
        assert!(plain.applies_expiration());
    }

    #[test]
    fn bonded_checks_bond() {
        let bonded = ModuleVariant::from(VariantKind::Bonded);
        assert!(bonded.bond_check);
        assert_eq!(bonded.registry, RegistryIndex::ByHash);
        assert_eq!(bonded.question_ids, QuestionIdScheme::MinBond);
    }
}
