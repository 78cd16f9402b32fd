//! Fixed-point conversion between human-entered decimal strings and the
//! token's integer base-unit representation.

use alloy_primitives::U256;

use crate::error::TokenError;

/// Decimal places of the KAT token.
pub const KAT_DECIMALS: u8 = 18;

/// Parses a human-entered decimal amount into base units.
///
/// Accepts plain integers (`"2"`), fractional amounts (`"1.5"`), and amounts
/// with a leading dot (`".5"`). Rejects empty input, more fractional digits
/// than `decimals`, and anything that is not an unsigned decimal number.
pub fn parse_units(amount: &str, decimals: u8) -> Result<U256, TokenError> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(TokenError::InvalidAmount("empty amount".into()));
    }

    let (whole, frac) = match amount.split_once('.') {
        Some((w, f)) => (w, f),
        None => (amount, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(TokenError::InvalidAmount("no digits".into()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenError::InvalidAmount(format!(
            "not an unsigned decimal number: {amount}"
        )));
    }
    if frac.len() > decimals as usize {
        return Err(TokenError::InvalidAmount(format!(
            "more than {decimals} fractional digits"
        )));
    }

    let scale = U256::from(10u64).pow(U256::from(decimals as u64));

    let whole_units = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10)
            .map_err(|e| TokenError::InvalidAmount(e.to_string()))?
    };

    // Right-pad the fractional part to `decimals` digits before parsing.
    let frac_units = if frac.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{frac:0<width$}", width = decimals as usize);
        U256::from_str_radix(&padded, 10)
            .map_err(|e| TokenError::InvalidAmount(e.to_string()))?
    };

    whole_units
        .checked_mul(scale)
        .and_then(|w| w.checked_add(frac_units))
        .ok_or_else(|| TokenError::InvalidAmount("amount overflows uint256".into()))
}

/// Formats a base-unit amount as a normalized decimal string.
///
/// Trailing fractional zeros are trimmed but at least one fractional digit is
/// always kept, so `5 * 10^18` formats as `"5.0"` at 18 decimals.
pub fn format_units(value: U256, decimals: u8) -> String {
    let scale = U256::from(10u64).pow(U256::from(decimals as u64));
    let whole = value / scale;
    let frac = value % scale;

    if frac.is_zero() {
        return format!("{whole}.0");
    }

    let digits = frac.to_string();
    let padded = format!("{digits:0>width$}", width = decimals as usize);
    format!("{whole}.{}", padded.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(n: u64) -> U256 {
        U256::from(n) * U256::from(10u64).pow(U256::from(18u64))
    }

    #[test]
    fn parse_whole_tokens() {
        assert_eq!(parse_units("2", 18).unwrap(), base(2));
        assert_eq!(parse_units("1000", 18).unwrap(), base(1000));
    }

    #[test]
    fn parse_fractional_tokens() {
        let got = parse_units("1.5", 18).unwrap();
        assert_eq!(got, base(3) / U256::from(2u64));
    }

    #[test]
    fn parse_leading_dot() {
        assert_eq!(parse_units(".5", 18).unwrap(), base(1) / U256::from(2u64));
    }

    #[test]
    fn parse_trailing_dot() {
        assert_eq!(parse_units("7.", 18).unwrap(), base(7));
    }

    #[test]
    fn parse_zero() {
        assert_eq!(parse_units("0", 18).unwrap(), U256::ZERO);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_units("  2 ", 18).unwrap(), base(2));
    }

    #[test]
    fn parse_rejects_empty() {
        assert!(parse_units("", 18).is_err());
        assert!(parse_units("   ", 18).is_err());
    }

    #[test]
    fn parse_rejects_lone_dot() {
        assert!(parse_units(".", 18).is_err());
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert!(parse_units("2x", 18).is_err());
        assert!(parse_units("-1", 18).is_err());
        assert!(parse_units("1.2.3", 18).is_err());
    }

    #[test]
    fn parse_rejects_excess_precision() {
        let too_precise = format!("0.{}", "1".repeat(19));
        assert!(parse_units(&too_precise, 18).is_err());
        // Exactly 18 fractional digits is fine.
        assert!(parse_units(&format!("0.{}", "1".repeat(18)), 18).is_ok());
    }

    #[test]
    fn format_whole_balance() {
        assert_eq!(format_units(base(5), 18), "5.0");
    }

    #[test]
    fn format_zero_balance() {
        assert_eq!(format_units(U256::ZERO, 18), "0.0");
    }

    #[test]
    fn format_fractional_balance_trims_trailing_zeros() {
        let one_and_a_half = base(3) / U256::from(2u64);
        assert_eq!(format_units(one_and_a_half, 18), "1.5");
    }

    #[test]
    fn format_smallest_unit() {
        assert_eq!(
            format_units(U256::from(1u64), 18),
            "0.000000000000000001"
        );
    }

    #[test]
    fn parse_format_agree_on_user_input() {
        let raw = parse_units("12.25", 18).unwrap();
        assert_eq!(format_units(raw, 18), "12.25");
    }
}
