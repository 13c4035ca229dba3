//! Entry ladder, averaging and stop-loss calculations
//!
//! All functions are pure and work on `rust_decimal::Decimal` so that chained
//! percentage arithmetic never accumulates binary floating-point error.
//!
//! ```text
//! entry[i]  = upper - (upper - lower) * i / (n - 1)
//! dca       = sum(entry) / n
//! sl        = dca * (1 - sl_pct / 100)      (buy)
//!           = dca * (1 + sl_pct / 100)      (sell)
//! diff[i]   = (price[i] - dca) / dca * 100
//! ```

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::{LadderError, LadderResult};
use crate::types::Side;

/// Generate `num_orders` evenly spaced entry prices from `upper_price` down to
/// `lower_price` (both inclusive).
///
/// A single order sits at the midpoint of the range. Bounds are not checked:
/// callers clamp `lower_price <= upper_price` beforehand. The returned order is
/// always descending; orienting the ladder for display is up to the caller.
pub fn generate_entry_prices(
    upper_price: Decimal,
    lower_price: Decimal,
    num_orders: usize,
) -> LadderResult<Vec<Decimal>> {
    match num_orders {
        0 => Err(LadderError::ZeroOrders),
        1 => Ok(vec![midpoint(upper_price, lower_price)?]),
        n => {
            let span = upper_price
                .checked_sub(lower_price)
                .ok_or(LadderError::MathDomain { operation: "subtraction" })?;
            let intervals = Decimal::from(n - 1);
            (0..n)
                .map(|i| match i {
                    0 => Ok(upper_price),
                    i if i == n - 1 => Ok(lower_price),
                    i => upper_price
                        .checked_sub(scale_span(span, Decimal::from(i), intervals)?)
                        .ok_or(LadderError::MathDomain { operation: "subtraction" }),
                })
                .collect()
        }
    }
}

/// Dollar-cost average of the entry ladder
pub fn calculate_dca_price(entry_prices: &[Decimal]) -> LadderResult<Decimal> {
    mean(entry_prices)
}

/// Average of the take-profit ladder
pub fn calculate_average_tp(tp_prices: &[Decimal]) -> LadderResult<Decimal> {
    mean(tp_prices)
}

/// Stop-loss level `sl_pct` percent away from the average on the losing side.
///
/// No upper bound is placed on the percentage: 100% yields zero for a buy and
/// twice the average for a sell.
pub fn calculate_sl_price(dca_price: Decimal, sl_pct: Decimal, side: Side) -> LadderResult<Decimal> {
    side.loss_level(dca_price, sl_pct)
}

/// Percentage deviation of each price from the average.
///
/// Empty input yields empty output.
pub fn calculate_percentage_diffs(
    prices: &[Decimal],
    dca_price: Decimal,
) -> LadderResult<Vec<Decimal>> {
    if prices.is_empty() {
        return Ok(Vec::new());
    }
    if dca_price.is_zero() {
        return Err(LadderError::ZeroAverage);
    }
    prices
        .iter()
        .map(|price| {
            price
                .checked_sub(dca_price)
                .ok_or(LadderError::MathDomain { operation: "subtraction" })?
                .checked_div(dca_price)
                .ok_or(LadderError::MathDomain { operation: "division" })?
                .checked_mul(dec!(100))
                .ok_or(LadderError::MathDomain { operation: "multiplication" })
        })
        .collect()
}

/// `span * num / den`, multiplying first so whole steps stay exact and
/// dividing first only when the product would not fit.
pub(crate) fn scale_span(span: Decimal, num: Decimal, den: Decimal) -> LadderResult<Decimal> {
    let scaled = match span.checked_mul(num) {
        Some(product) => product.checked_div(den),
        None => span.checked_div(den).and_then(|step| step.checked_mul(num)),
    };
    scaled.ok_or(LadderError::MathDomain { operation: "multiplication" })
}

pub(crate) fn midpoint(a: Decimal, b: Decimal) -> LadderResult<Decimal> {
    let sum = a
        .checked_add(b)
        .ok_or(LadderError::MathDomain { operation: "addition" })?;
    Ok(sum / dec!(2))
}

fn mean(values: &[Decimal]) -> LadderResult<Decimal> {
    if values.is_empty() {
        return Err(LadderError::EmptyPrices);
    }
    let total = values.iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v)
            .ok_or(LadderError::MathDomain { operation: "addition" })
    })?;
    Ok(total / Decimal::from(values.len()))
}
