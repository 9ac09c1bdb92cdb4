//! # Shared Utility Functions
//!
//! Common display helpers used by the backend and the client hooks.
//!
//! ## Address Formatting
//!
//! - [`format_address`] - Keep the `0x` prefix plus `chars` leading and trailing characters
//! - [`truncate_address`] - `format_address` with four characters
//!
//! ## Coin Types
//!
//! - [`coin_symbol`] - Last `::` segment of a Move coin type
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::format_address;
//!
//! assert_eq!(format_address("0x1234567890abcdef", 4), "0x1234...cdef");
//! ```

/// Shorten an address to `0x` + `chars` leading characters, `...`, and `chars`
/// trailing characters.
///
/// Addresses no longer than `2 * chars + 2` are returned unmodified.
///
/// # Examples
///
/// ```rust
/// use shared::utils::format_address;
///
/// assert_eq!(format_address("0x1234567890abcdef", 4), "0x1234...cdef");
/// assert_eq!(format_address("0x1234567890abcdef", 6), "0x123456...abcdef");
/// assert_eq!(format_address("0x12345678", 4), "0x12345678");
/// ```
pub fn format_address(address: &str, chars: usize) -> String {
    let address_len = address.len();

    // Non-ASCII input cannot be sliced on byte offsets
    if address_len <= chars * 2 + 2 || !address.is_ascii() {
        return address.to_string();
    }

    let prefix = &address[..chars + 2];
    let suffix = &address[address_len - chars..];

    format!("{}...{}", prefix, suffix)
}

/// Format an address with the default four characters on each side.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4)
}

/// Symbol from a coin type: `0x2::sui::SUI` → `SUI`.
///
/// Generic parameters are dropped: `0x..::lp::LP<0x2::sui::SUI>` → `LP`.
pub fn coin_symbol(coin_type: &str) -> String {
    let base = coin_type.split('<').next().unwrap_or(coin_type);
    base.rsplit("::").next().unwrap_or(base).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_address() {
        assert_eq!(format_address("0x1234567890abcdef", 4), "0x1234...cdef");
        assert_eq!(format_address("0x1234567890abcdef", 2), "0x12...ef");
    }

    #[test]
    fn test_format_address_boundary() {
        // Exactly 2 * chars + 2 characters stays intact
        assert_eq!(format_address("0x12345678", 4), "0x12345678");
        assert_eq!(format_address("0x123456789", 4), "0x1234...6789");
        assert_eq!(format_address("0x1", 4), "0x1");
        assert_eq!(format_address("", 4), "");
    }

    #[test]
    fn test_truncate_address() {
        let addr = format!("0x{}", "ab".repeat(32));
        assert_eq!(truncate_address(&addr), "0xabab...abab");
    }

    #[test]
    fn test_coin_symbol() {
        assert_eq!(coin_symbol("0x2::sui::SUI"), "SUI");
        assert_eq!(coin_symbol("0xabc::lp::LP<0x2::sui::SUI>"), "LP");
        assert_eq!(coin_symbol("PLAIN"), "PLAIN");
    }
}
