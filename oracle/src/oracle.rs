//! Oracle adapter trait.

use crate::OracleError;
use alloy_primitives::{Address, U256};
use gate_types::{Answer, QuestionId, Timestamp};
use serde::{Deserialize, Serialize};

/// Everything the oracle needs to open a question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionRequest {
    pub template: U256,
    pub question: String,
    pub arbitrator: Address,
    /// Answer timeout in seconds.
    pub timeout: u32,
    /// Earliest time the question may be answered; `0` means immediately.
    pub opening_ts: u32,
    pub nonce: U256,
}

/// Binary-question oracle as consumed by the module.
///
/// Implementations take `&self`; anything that mutates internally (a client
/// connection, a test double) uses interior mutability.
pub trait Oracle {
    /// Open a question and return the id the oracle assigned to it.
    fn ask_question(&self, request: &QuestionRequest) -> Result<QuestionId, OracleError>;

    /// Open a question that only accepts answers backed by at least `min_bond`.
    fn ask_question_with_min_bond(
        &self,
        request: &QuestionRequest,
        min_bond: U256,
    ) -> Result<QuestionId, OracleError>;

    /// Finalized answer of a question.
    fn result_for(&self, question_id: &QuestionId) -> Result<Answer, OracleError>;

    /// Bond posted with the final answer.
    fn get_bond(&self, question_id: &QuestionId) -> Result<U256, OracleError>;

    /// Time at which the answer became final.
    fn get_finalize_ts(&self, question_id: &QuestionId) -> Result<Timestamp, OracleError>;

    /// Register a question template and return its id.
    fn create_template(&self, template: &str) -> Result<U256, OracleError>;
}

impl<O: Oracle + ?Sized> Oracle for &O {
    fn ask_question(&self, request: &QuestionRequest) -> Result<QuestionId, OracleError> {
        (**self).ask_question(request)
    }

    fn ask_question_with_min_bond(
        &self,
        request: &QuestionRequest,
        min_bond: U256,
    ) -> Result<QuestionId, OracleError> {
        (**self).ask_question_with_min_bond(request, min_bond)
    }

    fn result_for(&self, question_id: &QuestionId) -> Result<Answer, OracleError> {
        (**self).result_for(question_id)
    }

    fn get_bond(&self, question_id: &QuestionId) -> Result<U256, OracleError> {
        (**self).get_bond(question_id)
    }

    fn get_finalize_ts(&self, question_id: &QuestionId) -> Result<Timestamp, OracleError> {
        (**self).get_finalize_ts(question_id)
    }

    fn create_template(&self, template: &str) -> Result<U256, OracleError> {
        (**self).create_template(template)
    }
}
