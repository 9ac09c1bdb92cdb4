//! # Quoting
//!
//! Turns `(tokenIn, tokenOut, amountIn)` into a [`Quote`] priced off the live
//! order book of the pool that trades the pair.
//!
//! ```text
//! amountIn ──► raw units (truncated) ──► pool by pair ──► order book
//!                                              │
//!          pool base == tokenIn ? sell into bids : buy from asks
//!                                              │
//!        estimatedAmountOut (truncated to output decimals), priceImpact
//! ```

use lib_core::tokens::{self, TokenConfig};
use lib_core::{AppError, Result};
use lib_utils::amount::{from_raw_amount, to_raw_amount};
use rust_decimal::{Decimal, RoundingStrategy};
use shared::{Pool, Quote};
use std::str::FromStr;
use tracing::{debug, instrument};

use super::book::{self, Fill};
use super::DeepBook;

/// A quote plus the context a swap transaction is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOutcome {
    pub quote: Quote,
    pub pool: Pool,
    /// `tokenIn` is the pool's quote asset.
    pub is_reversed: bool,
    pub token_in: &'static TokenConfig,
    pub token_out: &'static TokenConfig,
    pub amount_in_raw: u128,
    pub amount_out_raw: u128,
}

/// Resolve a symbol against the token table.
pub fn lookup_token(symbol: &str) -> Result<&'static TokenConfig> {
    tokens::token(symbol).ok_or_else(|| AppError::InvalidToken("Invalid token symbol".to_string()))
}

impl DeepBook {
    /// Quote a swap of `amount_in` `token_in` into `token_out`.
    ///
    /// Symbols are expected upper-cased.
    #[instrument(skip(self), fields(pair = %format!("{}/{}", token_in, token_out)))]
    pub async fn quote(&self, token_in: &str, token_out: &str, amount_in: &str) -> Result<QuoteOutcome> {
        let token_in = lookup_token(token_in)?;
        let token_out = lookup_token(token_out)?;
        if token_in.symbol == token_out.symbol {
            return Err(AppError::InvalidRequest(
                "tokenIn and tokenOut must differ".to_string(),
            ));
        }

        let amount_in_raw = to_raw_amount(amount_in, token_in.decimals)?;
        if amount_in_raw == 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be greater than zero".to_string(),
            ));
        }
        let amount_in_display = from_raw_amount(amount_in_raw, token_in.decimals);
        let amount_in_dec = to_decimal(&amount_in_display)?;

        let matched = self.pools.pool_by_pair(token_in.symbol, token_out.symbol).await?;
        let order_book = self
            .venue
            .order_book(&matched.pool.pool_name, self.book_depth)
            .await?;

        // Pool base is tokenIn unless the pair matched reversed
        let fill = if matched.is_reversed {
            book::buy_base(&order_book.asks, amount_in_dec)
        } else {
            book::sell_base(&order_book.bids, amount_in_dec)
        }
        .ok_or_else(|| {
            AppError::InsufficientLiquidity(format!(
                "Insufficient liquidity in {} for {} {}",
                matched.pool.pool_name, amount_in_display, token_in.symbol
            ))
        })?;

        let amount_out = truncate(fill.amount_out, token_out.decimals);
        let amount_out_display = amount_out.to_string();
        let amount_out_raw = to_raw_amount(&amount_out_display, token_out.decimals)?;

        debug!(
            pool = %matched.pool.pool_name,
            amount_in = %amount_in_display,
            amount_out = %amount_out_display,
            "[QUOTE] priced"
        );

        let quote = Quote {
            token_in: token_in.symbol.to_string(),
            token_out: token_out.symbol.to_string(),
            amount_in: amount_in_display,
            amount_in_raw: amount_in_raw.to_string(),
            estimated_amount_out: amount_out_display,
            estimated_amount_out_raw: amount_out_raw.to_string(),
            price_per_token: fixed(amount_out / amount_in_dec, 6),
            price_impact: price_impact(&fill),
            pool_id: matched.pool.pool_id.clone(),
        };

        Ok(QuoteOutcome {
            quote,
            pool: matched.pool,
            is_reversed: matched.is_reversed,
            token_in,
            token_out,
            amount_in_raw,
            amount_out_raw,
        })
    }
}

/// Price impact in percent with two decimals.
fn price_impact(fill: &Fill) -> String {
    fixed(fill.price_impact_pct(), 2)
}

/// Round half away from zero and render exactly `places` decimals.
fn fixed(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", places as usize, rounded)
}

fn to_decimal(amount: &str) -> Result<Decimal> {
    Decimal::from_str(amount)
        .map_err(|_| AppError::InvalidAmount(format!("Amount {} is too large", amount)))
}

/// Truncate toward zero to `decimals` places, dropping trailing zeros.
fn truncate(value: Decimal, decimals: u8) -> Decimal {
    value
        .round_dp_with_strategy(u32::from(decimals), RoundingStrategy::ToZero)
        .normalize()
}

// region:    --- Slippage

/// Convert a wire slippage fraction into an exact decimal in `[0, 1)`.
pub fn slippage_from_f64(slippage: f64) -> Result<Decimal> {
    let invalid = || AppError::InvalidRequest("Slippage must be between 0 and 1".to_string());
    if !slippage.is_finite() {
        return Err(invalid());
    }
    // Going through the shortest decimal rendering keeps 0.01 exactly 0.01
    let value = Decimal::from_str(&slippage.to_string()).map_err(|_| invalid())?;
    if value < Decimal::ZERO || value >= Decimal::ONE {
        return Err(invalid());
    }
    Ok(value)
}

/// `estimated × (1 − slippage)`, truncated to `decimals` and normalized.
///
/// ```rust
/// use lib_sui::deepbook::min_amount_out;
/// use rust_decimal::Decimal;
///
/// assert_eq!(min_amount_out("100", Decimal::new(1, 2), 6).unwrap(), "99");
/// ```
pub fn min_amount_out(estimated_out: &str, slippage: Decimal, decimals: u8) -> Result<String> {
    let estimated = Decimal::from_str(estimated_out).map_err(|e| {
        AppError::TransactionBuildFailed(format!("Invalid estimated amount {}: {}", estimated_out, e))
    })?;
    let min = truncate(estimated * (Decimal::ONE - slippage), decimals);
    Ok(min.to_string())
}

// endregion: --- Slippage

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deepbook::testing::{deepbook_with_book, DEEP_SUI_POOL};

    #[test]
    fn test_min_amount_out() {
        let one_pct = Decimal::new(1, 2);
        assert_eq!(min_amount_out("100", one_pct, 6).unwrap(), "99");
        assert_eq!(min_amount_out("1.2345678", one_pct, 6).unwrap(), "1.222222");
        assert_eq!(min_amount_out("5", Decimal::ZERO, 9).unwrap(), "5");
    }

    #[test]
    fn test_slippage_bounds() {
        assert_eq!(slippage_from_f64(0.01).unwrap(), Decimal::new(1, 2));
        assert_eq!(slippage_from_f64(0.0).unwrap(), Decimal::ZERO);
        for bad in [1.0, 1.5, -0.1, f64::NAN] {
            let err = slippage_from_f64(bad).unwrap_err();
            assert_eq!(err.code(), "INVALID_REQUEST");
        }
    }

    #[tokio::test]
    async fn test_quote_selling_base() {
        // DEEP is base of DEEP_SUI: selling DEEP walks the bids
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.06", "1000")]);
        let outcome = deepbook.quote("DEEP", "SUI", "100").await.unwrap();

        assert!(!outcome.is_reversed);
        assert_eq!(outcome.quote.estimated_amount_out, "5");
        assert_eq!(outcome.quote.estimated_amount_out_raw, "5000000000");
        assert_eq!(outcome.quote.amount_in_raw, "100000000");
        assert_eq!(outcome.quote.price_per_token, "0.050000");
        assert_eq!(outcome.quote.price_impact, "0.00");
        assert_eq!(outcome.quote.pool_id, DEEP_SUI_POOL);
    }

    #[tokio::test]
    async fn test_quote_buying_base_truncates_output() {
        // SUI is quote of DEEP_SUI: spending SUI walks the asks
        let deepbook = deepbook_with_book(&[("0.05", "1000")], &[("0.03", "10"), ("0.07", "1000")]);
        let outcome = deepbook.quote("SUI", "DEEP", "1").await.unwrap();

        assert!(outcome.is_reversed);
        // 0.3 SUI buys 10 DEEP, 0.7 SUI buys 10 more at 0.07
        assert_eq!(outcome.quote.estimated_amount_out, "20");
        assert_eq!(outcome.amount_out_raw, 20_000_000);
        assert_eq!(outcome.quote.price_impact, "66.67");
    }

    #[tokio::test]
    async fn test_quote_rejections() {
        let deepbook = deepbook_with_book(&[("0.05", "1")], &[]);

        let err = deepbook.quote("DOGE", "SUI", "1").await.unwrap_err();
        assert_eq!(err.code(), "INVALID_TOKEN");

        let err = deepbook.quote("DEEP", "SUI", "abc").await.unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");

        let err = deepbook.quote("DEEP", "SUI", "0").await.unwrap_err();
        assert_eq!(err.code(), "INVALID_AMOUNT");

        let err = deepbook.quote("DEEP", "SUI", "10").await.unwrap_err();
        assert_eq!(err.code(), "INSUFFICIENT_LIQUIDITY");

        let err = deepbook.quote("WAL", "DBTC", "1").await.unwrap_err();
        assert_eq!(err.code(), "POOL_NOT_FOUND");
    }
}
