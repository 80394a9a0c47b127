//! Hashing and identity for oracle-gated proposals.
//!
//! - **Keccak-256** for every content hash (EVM compatible)
//! - **EIP-712** structured hashing for module transactions, bound to a
//!   chain id and the module's own address
//! - **Question text** built from a proposal id and its transaction hashes
//! - **Question ids** as the oracle derives them, so a returned id can be
//!   checked independently
//! - CREATE2 address prediction for module proxies

pub mod eip712;
pub mod hash;
pub mod proxy;
pub mod question;
pub mod question_id;

pub use eip712::{transaction_data, transaction_hash, SigningDomain};
pub use hash::{keccak256, keccak256_multi};
pub use proxy::{predict_proxy_address, proxy_init_code};
pub use question::{build_question, hash_transaction_hashes, question_hash, QUESTION_SEPARATOR};
pub use question_id::{content_hash, question_id, question_id_with_min_bond, QuestionParams};
