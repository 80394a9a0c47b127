//! EIP-712 hashing of module transactions.
//!
//! The signing domain binds a hash to one chain and one module address, so
//! the same transaction approved for one module can never be replayed on
//! another.

use crate::hash::{keccak256, keccak256_multi};
use alloy_primitives::{Address, U256};
use gate_types::{TransactionSpec, TxHash};

/// `EIP712Domain(uint256 chainId,address verifyingContract)`
pub const DOMAIN_TYPE: &str = "EIP712Domain(uint256 chainId,address verifyingContract)";

/// `Transaction(address to,uint256 value,bytes data,uint8 operation,uint256 nonce)`
pub const TRANSACTION_TYPE: &str =
    "Transaction(address to,uint256 value,bytes data,uint8 operation,uint256 nonce)";

/// The (chain, verifying contract) pair a transaction hash is bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigningDomain {
    pub chain_id: U256,
    pub verifying_contract: Address,
}

impl SigningDomain {
    pub fn new(chain_id: u64, verifying_contract: Address) -> Self {
        Self {
            chain_id: U256::from(chain_id),
            verifying_contract,
        }
    }

    /// `keccak256(abi.encode(DOMAIN_TYPEHASH, chainId, verifyingContract))`
    pub fn separator(&self) -> [u8; 32] {
        let type_hash = keccak256(DOMAIN_TYPE.as_bytes());
        let chain_id = self.chain_id.to_be_bytes::<32>();
        let contract = address_word(&self.verifying_contract);
        keccak256_multi(&[&type_hash, &chain_id, &contract])
    }
}

/// Left-pad an address to a 32-byte ABI word.
fn address_word(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address.as_slice());
    word
}

fn struct_hash(tx: &TransactionSpec) -> [u8; 32] {
    let type_hash = keccak256(TRANSACTION_TYPE.as_bytes());
    let to = address_word(&tx.to);
    let value = tx.value.to_be_bytes::<32>();
    let data_hash = keccak256(&tx.data);
    let mut operation = [0u8; 32];
    operation[31] = tx.operation.as_u8();
    let nonce = tx.nonce.to_be_bytes::<32>();
    keccak256_multi(&[&type_hash, &to, &value, &data_hash, &operation, &nonce])
}

/// The 66-byte pre-image `0x19 ‖ 0x01 ‖ domainSeparator ‖ structHash`.
pub fn transaction_data(domain: &SigningDomain, tx: &TransactionSpec) -> Vec<u8> {
    let mut data = Vec::with_capacity(66);
    data.push(0x19);
    data.push(0x01);
    data.extend_from_slice(&domain.separator());
    data.extend_from_slice(&struct_hash(tx));
    data
}

/// EIP-712 hash of a module transaction.
pub fn transaction_hash(domain: &SigningDomain, tx: &TransactionSpec) -> TxHash {
    TxHash::new(keccak256(&transaction_data(domain, tx)))
}
