//! Question ids, derived exactly as the oracle derives them.
//!
//! The module never trusts the id returned by the oracle: it recomputes it
//! from the same inputs and rejects a mismatch.

use crate::hash::keccak256_multi;
use alloy_primitives::{Address, U256};
use gate_types::QuestionId;

/// Resolution parameters a question is asked with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionParams {
    pub template: U256,
    pub arbitrator: Address,
    pub timeout: u32,
    /// Earliest time the question may be answered; `0` means immediately.
    pub opening_ts: u32,
    /// Retry nonce of the proposal.
    pub nonce: U256,
}

/// `keccak256(abi.encodePacked(template, opening_ts, question))`
pub fn content_hash(template: U256, opening_ts: u32, question: &str) -> [u8; 32] {
    keccak256_multi(&[
        &template.to_be_bytes::<32>(),
        &opening_ts.to_be_bytes(),
        question.as_bytes(),
    ])
}

/// Id of a question asked without a minimum bond.
///
/// `keccak256(content_hash ‖ arbitrator ‖ timeout ‖ asker ‖ nonce)`
pub fn question_id(params: &QuestionParams, question: &str, asker: Address) -> QuestionId {
    let content = content_hash(params.template, params.opening_ts, question);
    QuestionId::new(keccak256_multi(&[
        &content,
        params.arbitrator.as_slice(),
        &params.timeout.to_be_bytes(),
        asker.as_slice(),
        &params.nonce.to_be_bytes::<32>(),
    ]))
}

/// Id of a question asked with a minimum bond. The id also commits to the
/// bond and to the oracle instance.
///
/// `keccak256(content_hash ‖ arbitrator ‖ timeout ‖ min_bond ‖ oracle ‖ asker ‖ nonce)`
pub fn question_id_with_min_bond(
    params: &QuestionParams,
    question: &str,
    min_bond: U256,
    oracle: Address,
    asker: Address,
) -> QuestionId {
    let content = content_hash(params.template, params.opening_ts, question);
    QuestionId::new(keccak256_multi(&[
        &content,
        params.arbitrator.as_slice(),
        &params.timeout.to_be_bytes(),
        &min_bond.to_be_bytes::<32>(),
        oracle.as_slice(),
        asker.as_slice(),
        &params.nonce.to_be_bytes::<32>(),
    ]))
}
