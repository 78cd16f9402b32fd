use alloy_primitives::U256;

use crate::abi::{encode_function_call, AbiParam};
use crate::error::TokenError;

/// Function selector for `transfer(address,uint256)`: `0xa9059cbb`.
const TRANSFER_SELECTOR: [u8; 4] = [0xa9, 0x05, 0x9c, 0xbb];

/// Function selector for `balanceOf(address)`: `0x70a08231`.
const BALANCE_OF_SELECTOR: [u8; 4] = [0x70, 0xa0, 0x82, 0x31];

/// Parses a 0x-prefixed hex address string into a 20-byte array.
pub fn parse_address(address: &str) -> Result<[u8; 20], TokenError> {
    let hex_str = address.strip_prefix("0x").or_else(|| address.strip_prefix("0X")).ok_or_else(
        || TokenError::InvalidAddress("address must start with 0x".into()),
    )?;

    if hex_str.len() != 40 {
        return Err(TokenError::InvalidAddress(format!(
            "expected 40 hex characters, got {}",
            hex_str.len()
        )));
    }

    let bytes = hex::decode(hex_str)
        .map_err(|e| TokenError::InvalidAddress(format!("invalid hex: {e}")))?;

    let mut addr = [0u8; 20];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

/// Encodes an ERC-20 `transfer(address,uint256)` call.
///
/// Returns the complete calldata: 4-byte selector + 64 bytes of ABI-encoded
/// recipient and base-unit amount.
pub fn encode_transfer(to: &str, amount: U256) -> Result<Vec<u8>, TokenError> {
    let addr = parse_address(to)?;
    let params = [
        AbiParam::Address(addr),
        AbiParam::Uint256(amount.to_be_bytes::<32>()),
    ];
    Ok(encode_function_call(TRANSFER_SELECTOR, &params))
}

/// Encodes an ERC-20 `balanceOf(address)` call.
///
/// Returns the complete calldata: 4-byte selector + 32 bytes of ABI-encoded
/// owner address.
pub fn encode_balance_of(owner: &str) -> Result<Vec<u8>, TokenError> {
    let addr = parse_address(owner)?;
    let params = [AbiParam::Address(addr)];
    Ok(encode_function_call(BALANCE_OF_SELECTOR, &params))
}

/// Encodes the token constructor argument (initial supply) for deployment.
///
/// The returned 32-byte word is appended to the contract creation bytecode.
pub fn encode_constructor_args(initial_supply: U256) -> Vec<u8> {
    initial_supply.to_be_bytes::<32>().to_vec()
}

/// Decodes a single uint256 return value from ABI-encoded data.
///
/// Used for the return value of `balanceOf` and similar view functions.
pub fn decode_uint256(data: &[u8]) -> Result<U256, TokenError> {
    if data.len() < 32 {
        return Err(TokenError::EncodingError(format!(
            "expected at least 32 bytes for uint256, got {}",
            data.len()
        )));
    }

    Ok(U256::from_be_slice(&data[..32]))
}
