//! Take-profit ladder calculation
//!
//! Each order gets a take-profit percentage interpolated between `min_tp_pct`
//! and `max_tp_pct`; the percentage is then applied to the average entry on the
//! profit side of the trade (above for a buy, below for a sell).
//!
//! With `n` orders and 0-based index `i`:
//!
//! | algorithm   | tp_pct(i)                                          |
//! |-------------|----------------------------------------------------|
//! | linear      | min + (max - min) * i / (n - 1)                    |
//! | exponential | min * (max / min) ^ (i / (n - 1))                  |
//! | fibonacci   | min + (max - min) * fib[i] / fib[n - 1]            |
//! | logarithmic | min + (max - min) * ln(i + 1) / ln(n)              |
//!
//! A single order uses the midpoint `(min + max) / 2`. Every algorithm starts
//! at exactly `min` and ends at exactly `max`.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::{LadderError, LadderResult};
use crate::ladder::{midpoint, scale_span};
use crate::types::{Side, TpAlgorithm};

/// Take-profit price ladder for the given average entry price.
///
/// The ladder is returned in interpolation order (smallest percentage first)
/// and is never reversed here, whatever the side.
pub fn calculate_tp_prices(
    dca_price: Decimal,
    num_orders: usize,
    min_tp_pct: Decimal,
    max_tp_pct: Decimal,
    side: Side,
    algorithm: TpAlgorithm,
) -> LadderResult<Vec<Decimal>> {
    let percentages = tp_percentages(algorithm, num_orders, min_tp_pct, max_tp_pct)?;
    percentages
        .into_iter()
        .map(|pct| side.profit_level(dca_price, pct))
        .collect()
}

/// Interpolated take-profit percentages, one per order
pub fn tp_percentages(
    algorithm: TpAlgorithm,
    num_orders: usize,
    min_tp_pct: Decimal,
    max_tp_pct: Decimal,
) -> LadderResult<Vec<Decimal>> {
    match num_orders {
        0 => Err(LadderError::ZeroOrders),
        1 => Ok(vec![midpoint(min_tp_pct, max_tp_pct)?]),
        n => {
            let spread = Spread::new(algorithm, n, min_tp_pct, max_tp_pct)?;
            (0..n).map(|i| spread.percentage_at(i)).collect()
        }
    }
}

/// Precomputed state for one ladder of `n >= 2` orders
struct Spread {
    algorithm: TpAlgorithm,
    last: usize,
    min: Decimal,
    max: Decimal,
    /// Fibonacci weights for indices 0..n, fibonacci only
    fib: Vec<Decimal>,
    /// ln(n), logarithmic only
    ln_n: Decimal,
}

impl Spread {
    fn new(algorithm: TpAlgorithm, n: usize, min: Decimal, max: Decimal) -> LadderResult<Self> {
        let mut fib = Vec::new();
        let mut ln_n = Decimal::ZERO;

        match algorithm {
            TpAlgorithm::Exponential if min <= Decimal::ZERO => {
                return Err(LadderError::ExponentialDomain { min_tp_pct: min });
            }
            TpAlgorithm::Fibonacci => fib = fibonacci(n),
            TpAlgorithm::Logarithmic => ln_n = Decimal::from(n).ln(),
            _ => {}
        }

        Ok(Self {
            algorithm,
            last: n - 1,
            min,
            max,
            fib,
            ln_n,
        })
    }

    fn percentage_at(&self, i: usize) -> LadderResult<Decimal> {
        let span = self
            .max
            .checked_sub(self.min)
            .ok_or(LadderError::MathDomain { operation: "subtraction" })?;
        if i == 0 || span.is_zero() {
            return Ok(self.min);
        }
        if i == self.last {
            return Ok(self.max);
        }

        let offset = match self.algorithm {
            TpAlgorithm::Linear => scale_span(span, Decimal::from(i), Decimal::from(self.last))?,
            TpAlgorithm::Exponential => {
                let ratio = self
                    .max
                    .checked_div(self.min)
                    .ok_or(LadderError::MathDomain { operation: "division" })?;
                let exponent = Decimal::from(i) / Decimal::from(self.last);
                let growth = ratio
                    .checked_powd(exponent)
                    .ok_or(LadderError::MathDomain { operation: "power" })?;
                return self
                    .min
                    .checked_mul(growth)
                    .ok_or(LadderError::MathDomain { operation: "multiplication" });
            }
            TpAlgorithm::Fibonacci => scale_span(span, self.fib[i], self.fib[self.last])?,
            TpAlgorithm::Logarithmic => {
                let weight = Decimal::from(i + 1).ln() / self.ln_n;
                weight
                    .checked_mul(span)
                    .ok_or(LadderError::MathDomain { operation: "multiplication" })?
            }
        };
        self.min
            .checked_add(offset)
            .ok_or(LadderError::MathDomain { operation: "addition" })
    }
}

/// Fibonacci weights for the first `n` indices, starting 0, 1, 1, 2, ...
///
/// Terms past the Decimal range are not representable, so whenever the next
/// sum would overflow the whole sequence is divided by its current last term.
/// Ratios between terms are what the ladder uses, and rescaling keeps them.
fn fibonacci(n: usize) -> Vec<Decimal> {
    let mut fib = Vec::with_capacity(n.max(2));
    fib.push(Decimal::ZERO);
    fib.push(Decimal::ONE);
    for j in 2..n {
        let next = match fib[j - 1].checked_add(fib[j - 2]) {
            Some(next) => next,
            None => {
                let last = fib[j - 1];
                for term in fib.iter_mut() {
                    *term /= last;
                }
                fib[j - 1] + fib[j - 2]
            }
        };
        fib.push(next);
    }
    fib.truncate(n);
    fib
}
