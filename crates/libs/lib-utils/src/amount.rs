//! # Token Amounts
//!
//! Exact conversion between human-readable decimal strings (`"1.5"`) and raw
//! on-chain integer units (`1500000000` for a 9-decimal token).
//!
//! Conversion is string based. The fractional part is padded or truncated to
//! exactly `decimals` digits, never rounded, so any amount with at most
//! `decimals` fractional digits survives a round trip unchanged:
//!
//! ```rust
//! use lib_utils::amount::{to_raw_amount, from_raw_amount};
//!
//! let raw = to_raw_amount("1.5", 9).unwrap();
//! assert_eq!(raw, 1_500_000_000);
//! assert_eq!(from_raw_amount(raw, 9), "1.5");
//! ```

/// Convert a decimal string into raw units for a token with `decimals` places.
///
/// Extra fractional digits beyond `decimals` are dropped (truncation).
pub fn to_raw_amount(amount: &str, decimals: u8) -> Result<u128, Error> {
    let amount = amount.trim();
    if amount.is_empty() {
        return Err(Error::Empty);
    }

    let (whole, frac) = match amount.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (amount, ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return Err(Error::InvalidDigits(amount.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidDigits(amount.to_string()));
    }

    let decimals = decimals as usize;
    let mut digits = String::with_capacity(whole.len() + decimals);
    digits.push_str(if whole.is_empty() { "0" } else { whole });
    if frac.len() >= decimals {
        digits.push_str(&frac[..decimals]);
    } else {
        digits.push_str(frac);
        digits.extend(std::iter::repeat('0').take(decimals - frac.len()));
    }

    digits
        .parse::<u128>()
        .map_err(|_| Error::Overflow(amount.to_string()))
}

/// Convert raw units back into a decimal string with trailing zeros trimmed.
pub fn from_raw_amount(raw: u128, decimals: u8) -> String {
    let decimals = decimals as usize;
    let digits = raw.to_string();
    if decimals == 0 {
        return digits;
    }

    let padded = format!("{:0>width$}", digits, width = decimals + 1);
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let frac = frac.trim_end_matches('0');

    if frac.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{frac}")
    }
}

/// Truncate a decimal string to at most `decimals` fractional digits.
///
/// Used for display values and for bounding computed amounts to a token's
/// precision before converting them to raw units.
pub fn truncate_decimals(amount: &str, decimals: u8) -> Result<String, Error> {
    to_raw_amount(amount, decimals).map(|raw| from_raw_amount(raw, decimals))
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    Empty,
    InvalidDigits(String),
    Overflow(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Empty => write!(fmt, "amount is empty"),
            Error::InvalidDigits(value) => write!(fmt, "amount '{value}' is not a decimal number"),
            Error::Overflow(value) => write!(fmt, "amount '{value}' is too large"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_raw_pads_fraction() {
        assert_eq!(to_raw_amount("1.5", 9).unwrap(), 1_500_000_000);
        assert_eq!(to_raw_amount("1", 6).unwrap(), 1_000_000);
        assert_eq!(to_raw_amount("0.000001", 6).unwrap(), 1);
        assert_eq!(to_raw_amount(".25", 2).unwrap(), 25);
        assert_eq!(to_raw_amount("3.", 2).unwrap(), 300);
    }

    #[test]
    fn test_to_raw_truncates_extra_digits() {
        // No rounding: the 9th digit is dropped
        assert_eq!(to_raw_amount("0.12345678", 6).unwrap(), 123_456);
        assert_eq!(to_raw_amount("1.9999999999", 9).unwrap(), 1_999_999_999);
    }

    #[test]
    fn test_to_raw_rejects_garbage() {
        assert_eq!(to_raw_amount("", 9), Err(Error::Empty));
        assert_eq!(to_raw_amount("   ", 9), Err(Error::Empty));
        assert!(matches!(to_raw_amount("-1", 9), Err(Error::InvalidDigits(_))));
        assert!(matches!(to_raw_amount("1e9", 9), Err(Error::InvalidDigits(_))));
        assert!(matches!(to_raw_amount("1.2.3", 9), Err(Error::InvalidDigits(_))));
        assert!(matches!(to_raw_amount(".", 9), Err(Error::InvalidDigits(_))));
        assert!(matches!(
            to_raw_amount("999999999999999999999999999999999999999", 9),
            Err(Error::Overflow(_))
        ));
    }

    #[test]
    fn test_from_raw_trims_trailing_zeros() {
        assert_eq!(from_raw_amount(1_500_000_000, 9), "1.5");
        assert_eq!(from_raw_amount(1_000_000, 6), "1");
        assert_eq!(from_raw_amount(1, 6), "0.000001");
        assert_eq!(from_raw_amount(0, 9), "0");
        assert_eq!(from_raw_amount(42, 0), "42");
    }

    #[test]
    fn test_round_trip_for_token_precisions() {
        for decimals in [6u8, 8, 9] {
            for amount in ["1.5", "0.1", "123456.789", "42", "0.000001"] {
                let raw = to_raw_amount(amount, decimals).unwrap();
                assert_eq!(from_raw_amount(raw, decimals), amount, "decimals={decimals}");
            }
        }
    }

    #[test]
    fn test_truncate_decimals() {
        assert_eq!(truncate_decimals("2.4567891", 6).unwrap(), "2.456789");
        assert_eq!(truncate_decimals("99.000", 6).unwrap(), "99");
    }
}
