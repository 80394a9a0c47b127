use gate_types::QuestionId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("question {0} is unknown to the oracle")]
    UnknownQuestion(QuestionId),

    #[error("question {0} is not finalized")]
    NotFinalized(QuestionId),

    #[error("oracle rejected the request: {0}")]
    Rejected(String),

    #[error("oracle unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("executor reverted: {0}")]
    Reverted(String),

    #[error("executor unavailable: {0}")]
    Unavailable(String),
}
