//! # Sui Addresses
//!
//! Sui addresses are 32 bytes rendered as `0x` followed by 64 hex digits.
//! Wallet providers and explorers sometimes hand out the short form with
//! leading zeros stripped (`0x2`), so input is normalized before use.

/// Length of a normalized address including the `0x` prefix.
pub const SUI_ADDRESS_LENGTH: usize = 66;

/// Normalize an address to the full `0x` + 64 lowercase hex digit form.
///
/// ```rust
/// use lib_utils::address::normalize_sui_address;
///
/// assert_eq!(
///     normalize_sui_address("0x2").unwrap(),
///     "0x0000000000000000000000000000000000000000000000000000000000000002"
/// );
/// ```
pub fn normalize_sui_address(address: &str) -> Result<String, Error> {
    let hex = address
        .trim()
        .strip_prefix("0x")
        .ok_or_else(|| Error::MissingPrefix(address.to_string()))?;

    if hex.is_empty() || hex.len() > 64 {
        return Err(Error::InvalidLength(address.to_string()));
    }
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidHex(address.to_string()));
    }

    Ok(format!("0x{:0>64}", hex.to_ascii_lowercase()))
}

/// Check whether an address normalizes cleanly.
pub fn is_valid_sui_address(address: &str) -> bool {
    normalize_sui_address(address).is_ok()
}

/// Decode a normalized address into its 32 raw bytes.
pub fn address_bytes(address: &str) -> Result<[u8; 32], Error> {
    let normalized = normalize_sui_address(address)?;
    let hex = &normalized[2..];
    let mut out = [0u8; 32];
    for (i, byte) in out.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16)
            .map_err(|_| Error::InvalidHex(address.to_string()))?;
    }
    Ok(out)
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingPrefix(String),
    InvalidLength(String),
    InvalidHex(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(fmt, "{self:?}")
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
