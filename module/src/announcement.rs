//! Readiness announcements for the two-phase variant.
//!
//! A proposal is announced once, by the controlled account, after its
//! question resolved to yes. The announcement time starts the cooldown.

use gate_crypto::{keccak256, question_hash};
use gate_types::{QuestionHash, QuestionId, Timestamp, TxHash};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Signature of the call the controlled account makes back into the module.
pub const MARK_READY_SIGNATURE: &str = "markProposalReadyForExecution(string,bytes32[])";

/// `(question_id, question) -> announcement time`. The question text is
/// keyed by its hash.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcements {
    announced: BTreeMap<(QuestionId, QuestionHash), Timestamp>,
}

impl Announcements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, question_id: &QuestionId, question: &str) -> Option<Timestamp> {
        self.announced
            .get(&(*question_id, question_hash(question)))
            .copied()
    }

    /// Returns `false` if the question was already announced.
    pub fn record(&mut self, question_id: QuestionId, question: &str, at: Timestamp) -> bool {
        let key = (question_id, question_hash(question));
        if self.announced.contains_key(&key) {
            return false;
        }
        self.announced.insert(key, at);
        true
    }

    pub fn len(&self) -> usize {
        self.announced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.announced.is_empty()
    }
}

/// ABI calldata of `markProposalReadyForExecution(proposal_id, tx_hashes)`.
pub fn mark_ready_calldata(proposal_id: &str, tx_hashes: &[TxHash]) -> Vec<u8> {
    let id = proposal_id.as_bytes();
    let padded_id_len = id.len().div_ceil(32) * 32;

    let mut data = Vec::with_capacity(4 + 32 * 4 + padded_id_len + 32 * tx_hashes.len());
    data.extend_from_slice(&keccak256(MARK_READY_SIGNATURE.as_bytes())[..4]);
    // Head: offsets of the two dynamic arguments.
    data.extend_from_slice(&word(64));
    data.extend_from_slice(&word(64 + 32 + padded_id_len as u64));
    // string
    data.extend_from_slice(&word(id.len() as u64));
    data.extend_from_slice(id);
    data.resize(data.len() + (padded_id_len - id.len()), 0);
    // bytes32[]
    data.extend_from_slice(&word(tx_hashes.len() as u64));
    for hash in tx_hashes {
        data.extend_from_slice(hash.as_bytes());
    }
    data
}

fn word(value: u64) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[24..].copy_from_slice(&value.to_be_bytes());
    word
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn announcement_is_recorded_once() {
        let mut announcements = Announcements::new();
        let id = QuestionId::new([1; 32]);
        assert!(announcements.record(id, "q", Timestamp::new(100)));
        assert!(!announcements.record(id, "q", Timestamp::new(200)));
        assert_eq!(announcements.get(&id, "q"), Some(Timestamp::new(100)));
        assert_eq!(announcements.get(&id, "other"), None);
    }

    #[test]
    fn calldata_layout() {
        let hashes = [TxHash::new([0xab; 32])];
        let data = mark_ready_calldata("some_random_id", &hashes);
        // selector + 2 offsets + string (len + 1 word) + array (len + 1 word)
        assert_eq!(data.len(), 4 + 32 * 6);
        assert_eq!(&data[4..36], &word(64));
        assert_eq!(&data[36..68], &word(128));
        assert_eq!(&data[68..100], &word(14));
        assert_eq!(&data[100..114], b"some_random_id");
        assert!(data[114..132].iter().all(|b| *b == 0));
        assert_eq!(&data[132..164], &word(1));
        assert_eq!(&data[164..196], &[0xab; 32]);
    }
}
