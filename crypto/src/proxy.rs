//! CREATE2 address prediction for minimal module proxies.
//!
//! A deployment is a 45-byte EIP-1167 proxy delegating to a mastercopy. The
//! salt commits to the initializer call, so the address is known before the
//! proxy is deployed and set up.

use crate::hash::{keccak256, keccak256_multi};
use alloy_primitives::{Address, U256};

const PROXY_PREFIX: [u8; 19] = [
    0x60, 0x2d, 0x80, 0x60, 0x09, 0x3d, 0x39, 0x3d, 0xf3, 0x36, 0x3d, 0x3d, 0x37, 0x3d, 0x3d,
    0x3d, 0x36, 0x3d, 0x73,
];

const PROXY_SUFFIX: [u8; 15] = [
    0x5a, 0xf4, 0x3d, 0x82, 0x80, 0x3e, 0x90, 0x3d, 0x91, 0x60, 0x2b, 0x57, 0xfd, 0x5b, 0xf3,
];

/// Deployment code of a minimal proxy pointing at `mastercopy`.
pub fn proxy_init_code(mastercopy: Address) -> Vec<u8> {
    let mut code = Vec::with_capacity(PROXY_PREFIX.len() + 20 + PROXY_SUFFIX.len());
    code.extend_from_slice(&PROXY_PREFIX);
    code.extend_from_slice(mastercopy.as_slice());
    code.extend_from_slice(&PROXY_SUFFIX);
    code
}

/// Address the factory will deploy a proxy of `mastercopy` to.
///
/// `salt = keccak256(keccak256(initializer) ‖ salt_nonce)`
pub fn predict_proxy_address(
    factory: Address,
    mastercopy: Address,
    initializer: &[u8],
    salt_nonce: U256,
) -> Address {
    let salt = keccak256_multi(&[&keccak256(initializer), &salt_nonce.to_be_bytes::<32>()]);
    let code_hash = keccak256(&proxy_init_code(mastercopy));
    let digest = keccak256_multi(&[&[0xff], factory.as_slice(), &salt, &code_hash]);
    Address::from_slice(&digest[12..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_code_embeds_mastercopy() {
        let code = proxy_init_code(Address::repeat_byte(0x55));
        assert_eq!(code.len(), 54);
        assert_eq!(&code[19..39], Address::repeat_byte(0x55).as_slice());
        assert_eq!(code[0], 0x60);
        assert_eq!(code[53], 0xf3);
    }

    #[test]
    fn predicted_address_matches_reference() {
        let address = predict_proxy_address(
            Address::repeat_byte(0x66),
            Address::repeat_byte(0x55),
            &[0xde, 0xad, 0xbe, 0xef],
            U256::from(0xfa),
        );
        assert_eq!(
            hex::encode(address.as_slice()),
            "f031854bf82aace4b2bcf51359c27bf068540b0d"
        );
    }

    #[test]
    fn salt_nonce_changes_address() {
        let factory = Address::repeat_byte(0x66);
        let mastercopy = Address::repeat_byte(0x55);
        assert_ne!(
            predict_proxy_address(factory, mastercopy, b"init", U256::from(1)),
            predict_proxy_address(factory, mastercopy, b"init", U256::from(2))
        );
    }
}
