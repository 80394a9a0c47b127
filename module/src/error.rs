use alloy_primitives::U256;
use gate_oracle::{ExecutorError, OracleError};
use gate_types::QuestionId;
use thiserror::Error;

/// Broad classification of a failed module operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Caller lacks the required role.
    Authorization,
    /// Proposal or module in an incompatible state.
    State,
    /// The oracle's answer or bond does not permit the operation.
    OracleAnswer,
    /// Cooldown not over, or answer no longer valid.
    Timing,
    /// Recomputed hash or id does not match what was supplied.
    Integrity,
    /// Out-of-order or repeated execution.
    Sequencing,
    /// The controlled account reported a failed call.
    Downstream,
    /// Configuration rejected.
    Config,
    /// A collaborator could not be reached.
    External,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("owner can not be zero address")]
    ZeroOwner,

    #[error("avatar can not be zero address")]
    ZeroAvatar,

    #[error("target can not be zero address")]
    ZeroTarget,

    #[error("timeout has to be greater 0")]
    ZeroTimeout,

    #[error("there need to be at least 60s between end of cooldown and expiration")]
    ExpirationWindowTooShort { cooldown: u32, expiration: u32 },

    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("failed to serialize config: {0}")]
    Serialize(String),
}

#[derive(Debug, Error)]
pub enum ModuleError {
    // ── Authorization ──────────────────────────────────────────────────
    #[error("caller is not the owner")]
    NotOwner,

    #[error("not authorized to mark proposal as ready")]
    NotAvatar,

    // ── State ──────────────────────────────────────────────────────────
    #[error("module is not initialized")]
    NotInitialized,

    #[error("module is already initialized")]
    AlreadyInitialized,

    #[error("proposal has already been submitted")]
    ProposalAlreadySubmitted,

    #[error("this proposal has been marked as invalid")]
    ProposalMarkedInvalid,

    #[error("no question id set for provided proposal")]
    NoQuestionId,

    #[error("proposal has been invalidated")]
    ProposalInvalidated,

    #[error("proposal is already invalidated")]
    AlreadyInvalidated,

    #[error("answers are valid forever")]
    AnswersValidForever,

    #[error("transaction was already marked as ready")]
    AlreadyMarkedReady,

    #[error("proposal execution has not been marked as ready")]
    NotMarkedReady,

    #[error("readiness announcements are not enabled for this module")]
    AnnouncementsDisabled,

    // ── Oracle answer ──────────────────────────────────────────────────
    #[error("transaction was not approved")]
    NotApproved,

    #[error("bond on question not high enough: {have} < {need}")]
    BondTooLow { have: U256, need: U256 },

    #[error("previous proposal was not invalidated")]
    PreviousNotInvalidated,

    #[error("only positive answers can expire")]
    OnlyPositiveAnswersCanExpire,

    // ── Timing ─────────────────────────────────────────────────────────
    #[error("wait for additional cooldown: {remaining_secs}s remaining")]
    CooldownActive { remaining_secs: u64 },

    #[error("answer has expired")]
    AnswerExpired,

    #[error("answer has not expired yet")]
    AnswerNotExpired,

    // ── Integrity ──────────────────────────────────────────────────────
    #[error("unexpected question id: expected {expected}, oracle returned {actual}")]
    UnexpectedQuestionId {
        expected: QuestionId,
        actual: QuestionId,
    },

    #[error("unexpected transaction hash")]
    UnexpectedTransactionHash,

    #[error("transaction data does not belong to this question id")]
    QuestionNotForProposal,

    // ── Sequencing ─────────────────────────────────────────────────────
    #[error("cannot execute transaction again")]
    AlreadyExecuted,

    #[error("previous transaction not executed yet")]
    PreviousNotExecuted,

    #[error("transaction index {index} out of range for {len} transactions")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("all transactions of the proposal have been executed")]
    NothingToExecute,

    // ── Downstream ─────────────────────────────────────────────────────
    #[error("module transaction failed")]
    TransactionFailed,

    #[error("could not mark proposal ready for execution")]
    ReadinessRequestFailed,

    // ── Config / external ──────────────────────────────────────────────
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("snapshot error: {0}")]
    Snapshot(String),

    #[error("oracle error: {0}")]
    Oracle(#[from] OracleError),

    #[error("executor error: {0}")]
    Executor(#[from] ExecutorError),
}

impl ModuleError {
    pub fn kind(&self) -> ErrorKind {
        use ModuleError::*;
        match self {
            NotOwner | NotAvatar => ErrorKind::Authorization,
            NotInitialized
            | AlreadyInitialized
            | ProposalAlreadySubmitted
            | ProposalMarkedInvalid
            | NoQuestionId
            | ProposalInvalidated
            | AlreadyInvalidated
            | AnswersValidForever
            | AlreadyMarkedReady
            | NotMarkedReady
            | AnnouncementsDisabled => ErrorKind::State,
            NotApproved | BondTooLow { .. } | PreviousNotInvalidated | OnlyPositiveAnswersCanExpire => {
                ErrorKind::OracleAnswer
            }
            CooldownActive { .. } | AnswerExpired | AnswerNotExpired => ErrorKind::Timing,
            UnexpectedQuestionId { .. } | UnexpectedTransactionHash | QuestionNotForProposal => {
                ErrorKind::Integrity
            }
            AlreadyExecuted | PreviousNotExecuted | IndexOutOfRange { .. } | NothingToExecute => {
                ErrorKind::Sequencing
            }
            TransactionFailed | ReadinessRequestFailed => ErrorKind::Downstream,
            Config(_) | Snapshot(_) => ErrorKind::Config,
            Oracle(_) | Executor(_) => ErrorKind::External,
        }
    }
}
