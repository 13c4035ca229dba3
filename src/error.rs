//! Error types for ladder calculations

use rust_decimal::Decimal;
use thiserror::Error;

/// Failures raised by the ladder calculations.
///
/// Degenerate inputs (a single order, equal bounds, zero percentages) are not
/// errors; they produce flat or single-point ladders.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LadderError {
    #[error("cannot average an empty price sequence")]
    EmptyPrices,

    #[error("order count must be at least 1")]
    ZeroOrders,

    #[error("percentage deviation is undefined for a zero average price")]
    ZeroAverage,

    #[error("exponential take-profit spacing requires a positive minimum percentage (got {min_tp_pct})")]
    ExponentialDomain { min_tp_pct: Decimal },

    #[error("decimal {operation} is out of range")]
    MathDomain { operation: &'static str },
}

pub type LadderResult<T> = Result<T, LadderError>;
