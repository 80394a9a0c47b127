//! Question text. Binds a proposal id to the exact, ordered transaction set.

use crate::hash::keccak256;
use gate_types::{QuestionHash, TxHash};

/// Separator between the proposal id and the transactions digest
/// (U+241F, "symbol for unit separator").
pub const QUESTION_SEPARATOR: char = '\u{241f}';

/// `keccak256` over the tightly packed 32-byte transaction hashes.
///
/// Order-sensitive: any reordering yields a different digest.
pub fn hash_transaction_hashes(tx_hashes: &[TxHash]) -> [u8; 32] {
    let mut packed = Vec::with_capacity(tx_hashes.len() * 32);
    for hash in tx_hashes {
        packed.extend_from_slice(hash.as_bytes());
    }
    keccak256(&packed)
}

/// Build the question text `id ␟ hex(keccak(tx_hashes))`.
///
/// The digest is rendered as 64 lowercase hex characters without a prefix.
pub fn build_question(proposal_id: &str, tx_hashes: &[TxHash]) -> String {
    let digest = hex::encode(hash_transaction_hashes(tx_hashes));
    let mut question = String::with_capacity(proposal_id.len() + 3 + digest.len());
    question.push_str(proposal_id);
    question.push(QUESTION_SEPARATOR);
    question.push_str(&digest);
    question
}

/// Content key of a question: `keccak256(question_text)`.
pub fn question_hash(question: &str) -> QuestionHash {
    QuestionHash::new(keccak256(question.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_hash(s: &str) -> TxHash {
        TxHash::new(keccak256(s.as_bytes()))
    }

    #[test]
    fn concatenates_id_and_hashed_hashes() {
        let hashes = [string_hash("some_tx_data"), string_hash("some_other_tx_data")];
        assert_eq!(
            build_question("some_random_id", &hashes),
            "some_random_id\u{241f}bbd1b9b0bb0391d23c1bce8c4516d0801f7ade9eb3a34ac351221447bda5076d"
        );
    }

    #[test]
    fn question_hash_matches_reference() {
        let hashes = [string_hash("some_tx_data"), string_hash("some_other_tx_data")];
        let question = build_question("some_random_id", &hashes);
        assert_eq!(
            question_hash(&question).to_string(),
            "0xd449d96d895e07f20ad12a31c3355d4eb0e233d9abd6c50156214855fd46a82b"
        );
    }

    #[test]
    fn separator_is_three_utf8_bytes() {
        let mut buf = [0u8; 4];
        assert_eq!(QUESTION_SEPARATOR.encode_utf8(&mut buf).as_bytes(), &[0xe2, 0x90, 0x9f]);
    }

    #[test]
    fn order_matters() {
        let a = string_hash("a");
        let b = string_hash("b");
        assert_ne!(build_question("p", &[a, b]), build_question("p", &[b, a]));
    }

    #[test]
    fn empty_transaction_list_is_allowed() {
        let question = build_question("p", &[]);
        assert!(question.starts_with("p\u{241f}"));
        assert_eq!(question.len(), "p".len() + 3 + 64);
    }
}
