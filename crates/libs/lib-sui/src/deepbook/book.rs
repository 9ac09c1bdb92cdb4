//! # Order Book Fills
//!
//! Simulates a market order against a level-2 book.
//!
//! - Selling base ([`sell_base`]) consumes bids from the best price down and
//!   yields quote.
//! - Buying base with a quote budget ([`buy_base`]) consumes asks from the best
//!   price up and yields base.
//!
//! Both return `None` when the visible book cannot absorb the full amount.

use rust_decimal::Decimal;

use super::types::Level;

/// Result of walking the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fill {
    /// Amount received, in the output asset
    pub amount_out: Decimal,
    /// Best level price (quote per base)
    pub best_price: Decimal,
    /// Volume-weighted execution price (quote per base)
    pub average_price: Decimal,
}

impl Fill {
    /// Deviation of the average execution price from the best price, in percent.
    pub fn price_impact_pct(&self) -> Decimal {
        if self.best_price.is_zero() {
            return Decimal::ZERO;
        }
        ((self.average_price - self.best_price).abs() / self.best_price) * Decimal::ONE_HUNDRED
    }
}

/// Sell `base_in` into the bids.
pub fn sell_base(bids: &[Level], base_in: Decimal) -> Option<Fill> {
    let best_price = bids.first()?.price;
    let mut remaining = base_in;
    let mut quote_out = Decimal::ZERO;

    for level in bids {
        if remaining.is_zero() {
            break;
        }
        let take = remaining.min(level.quantity);
        quote_out += take * level.price;
        remaining -= take;
    }

    if !remaining.is_zero() || base_in.is_zero() {
        return None;
    }

    Some(Fill {
        amount_out: quote_out,
        best_price,
        average_price: quote_out / base_in,
    })
}

/// Spend `quote_in` on the asks.
pub fn buy_base(asks: &[Level], quote_in: Decimal) -> Option<Fill> {
    let best_price = asks.first()?.price;
    let mut remaining = quote_in;
    let mut base_out = Decimal::ZERO;

    for level in asks {
        if remaining.is_zero() {
            break;
        }
        let level_cost = level.price * level.quantity;
        if level_cost <= remaining {
            base_out += level.quantity;
            remaining -= level_cost;
        } else {
            base_out += remaining / level.price;
            remaining = Decimal::ZERO;
        }
    }

    if !remaining.is_zero() || base_out.is_zero() {
        return None;
    }

    Some(Fill {
        amount_out: base_out,
        best_price,
        average_price: quote_in / base_out,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn d(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn level(price: &str, quantity: &str) -> Level {
        Level {
            price: d(price),
            quantity: d(quantity),
        }
    }

    #[test]
    fn test_sell_within_best_level() {
        let bids = [level("0.5", "100")];
        let fill = sell_base(&bids, d("10")).unwrap();
        assert_eq!(fill.amount_out, d("5"));
        assert_eq!(fill.price_impact_pct(), Decimal::ZERO);
    }

    #[test]
    fn test_sell_across_levels() {
        let bids = [level("1.0", "5"), level("0.8", "10")];
        let fill = sell_base(&bids, d("10")).unwrap();
        // 5 * 1.0 + 5 * 0.8
        assert_eq!(fill.amount_out, d("9"));
        assert_eq!(fill.average_price, d("0.9"));
        assert_eq!(fill.price_impact_pct(), d("10"));
    }

    #[test]
    fn test_buy_across_levels() {
        let asks = [level("2", "1"), level("4", "10")];
        // 2 quote buys 1 base at 2, the remaining 4 buy 1 base at 4
        let fill = buy_base(&asks, d("6")).unwrap();
        assert_eq!(fill.amount_out, d("2"));
        assert_eq!(fill.average_price, d("3"));
        assert_eq!(fill.price_impact_pct(), d("50"));
    }

    #[test]
    fn test_insufficient_liquidity() {
        let bids = [level("1", "1")];
        assert!(sell_base(&bids, d("2")).is_none());

        let asks = [level("1", "1")];
        assert!(buy_base(&asks, d("5")).is_none());

        assert!(sell_base(&[], d("1")).is_none());
    }
}
