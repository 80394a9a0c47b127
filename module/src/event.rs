//! Events emitted by the module for its host to process.

use alloy_primitives::{Address, U256};
use gate_types::{QuestionHash, QuestionId, TxHash};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModuleEvent {
    /// The module was configured.
    ModuleSetUp {
        initiator: Address,
        owner: Address,
        avatar: Address,
        target: Address,
    },
    /// A question was opened for a proposal.
    ProposalQuestionCreated {
        question_id: QuestionId,
        proposal_id: String,
    },
    /// A proposal was announced ready for execution.
    ExecutionAnnouncement {
        question_id: QuestionId,
        question: String,
    },
    /// A proposal slot was invalidated, by the owner or through an expired
    /// answer.
    ProposalInvalidated {
        question_hash: QuestionHash,
        question_id: Option<QuestionId>,
        expired: bool,
    },
    /// A module transaction ran on the controlled account.
    TransactionExecuted {
        question_hash: QuestionHash,
        tx_hash: TxHash,
        index: usize,
    },
    QuestionTimeoutSet(u32),
    QuestionCooldownSet(u32),
    AnswerExpirationSet(u32),
    ArbitratorSet(Address),
    MinimumBondSet(U256),
    TemplateSet(U256),
    OwnershipTransferred {
        previous: Address,
        new: Address,
    },
    AvatarSet {
        previous: Address,
        new: Address,
    },
    TargetSet {
        previous: Address,
        new: Address,
    },
}
