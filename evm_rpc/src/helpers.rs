//! Encoding and decoding helpers for the handful of RPC payloads the gateway uses.
use epg_common::{Address, TokenAmount};

use crate::RpcError;

/// The 4-byte function selector for `balanceOf(address)`.
pub const BALANCE_OF_SELECTOR: &str = "0x70a08231";

/// Builds the `eth_call` calldata for `balanceOf(owner)`: the selector followed by the owner address left-padded to
/// a 32-byte word.
pub fn balance_of_calldata(owner: &Address) -> String {
    format!("{BALANCE_OF_SELECTOR}{:0>64}", owner.hex_digits())
}

/// Parses a JSON-RPC quantity (`"0x1b4"`) into an integer.
pub fn parse_quantity(value: &str) -> Result<u128, RpcError> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("quantity '{value}' is missing the 0x prefix")))?;
    if digits.is_empty() {
        return Err(RpcError::InvalidResponse(format!("quantity '{value}' has no digits")));
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("quantity '{value}' is not a hex integer: {e}")))
}

/// Parses the 32-byte word returned by an `eth_call` into a [`TokenAmount`].
///
/// Token balances are `uint256` on chain. Anything above 128 bits is treated as a malformed response rather than
/// truncated; no real-world token balance comes anywhere near that range.
pub fn parse_call_word(value: &str) -> Result<TokenAmount, RpcError> {
    let digits = value
        .strip_prefix("0x")
        .ok_or_else(|| RpcError::InvalidResponse(format!("call result '{value}' is missing the 0x prefix")))?;
    if digits.len() != 64 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(RpcError::InvalidResponse(format!("call result '{value}' is not a 32-byte word")));
    }
    let (high, low) = digits.split_at(32);
    if high.bytes().any(|b| b != b'0') {
        return Err(RpcError::InvalidResponse(format!("call result '{value}' exceeds 128 bits")));
    }
    // the digits are validated above, so this parse cannot fail
    let amount = u128::from_str_radix(low, 16)
        .map_err(|e| RpcError::InvalidResponse(format!("call result '{value}': {e}")))?;
    Ok(TokenAmount::from(amount))
}

#[cfg(test)]
mod test {
    use super::*;

    fn addr(s: &str) -> Address {
        s.parse().unwrap()
    }

    #[test]
    fn balance_of_calldata_is_selector_plus_padded_owner() {
        let owner = addr("0xdAC17F958D2ee523a2206206994597C13D831ec7");
        let data = balance_of_calldata(&owner);
        assert_eq!(
            data,
            "0x70a08231000000000000000000000000dac17f958d2ee523a2206206994597c13d831ec7"
        );
        assert_eq!(data.len(), 2 + 8 + 64);
    }

    #[test]
    fn quantities_parse() {
        assert_eq!(parse_quantity("0x0").unwrap(), 0);
        assert_eq!(parse_quantity("0x1b4").unwrap(), 436);
        assert_eq!(parse_quantity("0xde0b6b3a7640000").unwrap(), 1_000_000_000_000_000_000);
    }

    #[test]
    fn malformed_quantities_are_rejected() {
        assert!(parse_quantity("1b4").is_err());
        assert!(parse_quantity("0x").is_err());
        assert!(parse_quantity("0xzz").is_err());
    }

    #[test]
    fn call_words_parse() {
        let word = format!("0x{:0>64}", "989680");
        assert_eq!(parse_call_word(&word).unwrap(), TokenAmount::from(10_000_000u64));
        let zero = format!("0x{}", "0".repeat(64));
        assert_eq!(parse_call_word(&zero).unwrap(), TokenAmount::zero());
    }

    #[test]
    fn oversized_call_words_are_rejected() {
        let too_wide = format!("0x1{}", "0".repeat(63));
        assert!(parse_call_word(&too_wide).is_err());
        assert!(parse_call_word("0x1234").is_err());
        assert!(parse_call_word(&format!("0x{}", "g".repeat(64))).is_err());
    }
}
