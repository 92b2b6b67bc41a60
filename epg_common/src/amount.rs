//! Exact conversions between human decimal amounts and smallest-unit integers.
//!
//! Order prices are stored as decimal strings and only ever converted with string and integer arithmetic. Binary
//! floating point never enters the picture, so financial comparisons are exact at any decimal scale.
use thiserror::Error;

use crate::TokenAmount;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AmountError {
    #[error("'{0}' is not a valid decimal amount")]
    MalformedAmount(String),
    #[error("'{0}' has more than {1} decimal places")]
    TooManyDecimals(String, u8),
    #[error("'{0}' cannot be represented in smallest units at scale {1}")]
    AmountTooLarge(String, u8),
}

/// Converts a decimal string like `"123.456789"` into the smallest-unit integer for an asset with the given number
/// of decimal places.
///
/// The conversion is exact. Amounts with more fractional digits than the asset supports are rejected rather than
/// rounded.
pub fn to_base_units(amount: &str, decimals: u8) -> Result<TokenAmount, AmountError> {
    let trimmed = amount.trim();
    let (int_part, frac_part) = match trimmed.split_once('.') {
        Some((i, f)) => (i, f),
        None => (trimmed, ""),
    };
    let malformed = || AmountError::MalformedAmount(amount.to_string());
    if int_part.is_empty() || !int_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    if trimmed.contains('.') && (frac_part.is_empty() || !frac_part.bytes().all(|b| b.is_ascii_digit())) {
        return Err(malformed());
    }
    if frac_part.len() > usize::from(decimals) {
        return Err(AmountError::TooManyDecimals(amount.to_string(), decimals));
    }
    let too_large = || AmountError::AmountTooLarge(amount.to_string(), decimals);
    let scale = 10u128.checked_pow(u32::from(decimals)).ok_or_else(too_large)?;
    let int_units = int_part.parse::<u128>().map_err(|_| too_large())?;
    let frac_units = if frac_part.is_empty() {
        0u128
    } else {
        // Right-pad the fraction to the full scale: "45" at 6 decimals is 450_000 base units.
        let padded = format!("{frac_part:0<width$}", width = usize::from(decimals));
        padded.parse::<u128>().map_err(|_| too_large())?
    };
    int_units.checked_mul(scale).and_then(|v| v.checked_add(frac_units)).map(TokenAmount::from).ok_or_else(too_large)
}

/// Renders a smallest-unit integer back into a decimal string, trimming trailing fractional zeroes.
pub fn from_base_units(amount: TokenAmount, decimals: u8) -> String {
    if decimals == 0 {
        return amount.value().to_string();
    }
    // decimals is validated at registry construction, so the scale always fits in a u128
    let scale = 10u128.pow(u32::from(decimals));
    let int_part = amount.value() / scale;
    let frac_part = amount.value() % scale;
    if frac_part == 0 {
        return int_part.to_string();
    }
    let frac = format!("{frac_part:0>width$}", width = usize::from(decimals));
    format!("{int_part}.{}", frac.trim_end_matches('0'))
}
