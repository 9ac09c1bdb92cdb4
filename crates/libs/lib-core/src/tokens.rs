//! # Token Table
//!
//! Static table of the testnet tokens the backend quotes and swaps. Loaded
//! into the binary, immutable for the life of the process.

use lib_utils::address::normalize_sui_address;

/// Token metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenConfig {
    /// Upper-case symbol, the lookup key
    pub symbol: &'static str,
    pub name: &'static str,
    pub decimals: u8,
    /// Fully qualified Move coin type
    pub coin_type: &'static str,
}

pub const TOKENS: &[TokenConfig] = &[
    TokenConfig {
        symbol: "SUI",
        name: "Sui",
        decimals: 9,
        coin_type: "0x0000000000000000000000000000000000000000000000000000000000000002::sui::SUI",
    },
    TokenConfig {
        symbol: "DEEP",
        name: "DeepBook Token",
        decimals: 6,
        coin_type: "0x36dbef866a1d62bf7328989a10fb2f07d769f4ee587c0de4a0a256e57e0a58a8::deep::DEEP",
    },
    TokenConfig {
        symbol: "DBUSDC",
        name: "DeepBook USDC",
        decimals: 6,
        coin_type: "0xf7152c05930480cd740d7311b5b8b45c6f488e3a53a11c3f74a6fac36a52e0d7::DBUSDC::DBUSDC",
    },
    TokenConfig {
        symbol: "DBUSDT",
        name: "DeepBook USDT",
        decimals: 6,
        coin_type: "0xf7152c05930480cd740d7311b5b8b45c6f488e3a53a11c3f74a6fac36a52e0d7::DBUSDT::DBUSDT",
    },
    TokenConfig {
        symbol: "WAL",
        name: "Walrus",
        decimals: 9,
        coin_type: "0x9ef7676a9f81937a52ae4b2af8d511a28a0b080477c0c2db40b0ab8882240d76::wal::WAL",
    },
    TokenConfig {
        symbol: "DBTC",
        name: "DeepBook BTC",
        decimals: 8,
        coin_type: "0x6502dae813dbe5e42643c119a6450a518481f03063febc7e20238e43b6ea9e86::dbtc::DBTC",
    },
];

/// Look up a token by symbol. Symbols are matched exactly; callers upper-case first.
pub fn token(symbol: &str) -> Option<&'static TokenConfig> {
    TOKENS.iter().find(|t| t.symbol == symbol)
}

pub fn is_valid_token(symbol: &str) -> bool {
    token(symbol).is_some()
}

/// Look up a token by coin type, accepting short addresses (`0x2::sui::SUI`).
pub fn token_by_coin_type(coin_type: &str) -> Option<&'static TokenConfig> {
    let wanted = normalize_coin_type(coin_type)?;
    TOKENS
        .iter()
        .find(|t| normalize_coin_type(t.coin_type).as_deref() == Some(wanted.as_str()))
}

/// Pad the address part of a coin type to its full length.
pub fn normalize_coin_type(coin_type: &str) -> Option<String> {
    let (address, rest) = coin_type.split_once("::")?;
    let address = normalize_sui_address(address).ok()?;
    Some(format!("{address}::{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_symbol() {
        assert_eq!(token("SUI").map(|t| t.decimals), Some(9));
        assert_eq!(token("DBTC").map(|t| t.decimals), Some(8));
        assert!(token("sui").is_none());
        assert!(!is_valid_token("DOGE"));
    }

    #[test]
    fn test_lookup_by_short_coin_type() {
        assert_eq!(token_by_coin_type("0x2::sui::SUI").map(|t| t.symbol), Some("SUI"));
        assert!(token_by_coin_type("0x2::coin::UNKNOWN").is_none());
        assert!(token_by_coin_type("garbage").is_none());
    }

    #[test]
    fn test_amount_round_trip_for_every_token() {
        use lib_utils::{from_raw_amount, to_raw_amount};

        for token in TOKENS {
            let amount = format!("12.{}", "3".repeat(token.decimals as usize));
            let raw = to_raw_amount(&amount, token.decimals).unwrap();
            assert_eq!(from_raw_amount(raw, token.decimals), amount, "{}", token.symbol);
        }
    }

    #[test]
    fn test_symbols_are_unique() {
        for (i, a) in TOKENS.iter().enumerate() {
            assert!(TOKENS[i + 1..].iter().all(|b| b.symbol != a.symbol));
        }
    }
}
