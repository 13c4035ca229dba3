//! Core value types shared across the ladder calculations

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{LadderError, LadderResult};

/// Trade direction
///
/// Flips the sign of every percentage-to-price conversion: the stop-loss sits
/// below the average for a buy and above it for a sell, take-profit the other
/// way round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Buy,
    Sell,
}

impl Side {
    pub fn from_is_buy(is_buy: bool) -> Self {
        if is_buy {
            Side::Buy
        } else {
            Side::Sell
        }
    }

    pub fn is_buy(self) -> bool {
        matches!(self, Side::Buy)
    }

    /// Apply a percentage move on the loss side of the trade
    pub fn loss_level(self, base: Decimal, pct: Decimal) -> LadderResult<Decimal> {
        match self {
            Side::Buy => shift(base, -pct),
            Side::Sell => shift(base, pct),
        }
    }

    /// Apply a percentage move on the profit side of the trade
    pub fn profit_level(self, base: Decimal, pct: Decimal) -> LadderResult<Decimal> {
        match self {
            Side::Buy => shift(base, pct),
            Side::Sell => shift(base, -pct),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "Buy"),
            Side::Sell => write!(f, "Sell"),
        }
    }
}

/// `base * (1 + pct / 100)`
fn shift(base: Decimal, pct: Decimal) -> LadderResult<Decimal> {
    Decimal::ONE
        .checked_add(pct_to_fraction(pct))
        .ok_or(LadderError::MathDomain { operation: "addition" })?
        .checked_mul(base)
        .ok_or(LadderError::MathDomain { operation: "multiplication" })
}

/// Convert "parts per hundred" into a fraction
#[inline]
pub fn pct_to_fraction(pct: Decimal) -> Decimal {
    pct / dec!(100)
}

/// How take-profit percentages are spread between the minimum and maximum
/// across the order ladder.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum TpAlgorithm {
    /// Uniform spacing
    #[default]
    Linear,
    /// Geometric growth from min to max
    Exponential,
    /// Weights taken from the Fibonacci sequence
    Fibonacci,
    /// Front-loaded spacing following ln(i + 1) / ln(n)
    Logarithmic,
}

impl TpAlgorithm {
    pub const ALL: [TpAlgorithm; 4] = [
        TpAlgorithm::Linear,
        TpAlgorithm::Exponential,
        TpAlgorithm::Fibonacci,
        TpAlgorithm::Logarithmic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TpAlgorithm::Linear => "linear",
            TpAlgorithm::Exponential => "exponential",
            TpAlgorithm::Fibonacci => "fibonacci",
            TpAlgorithm::Logarithmic => "logarithmic",
        }
    }

    /// Parse an algorithm name, falling back to linear for anything unknown
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linear" => TpAlgorithm::Linear,
            "exponential" => TpAlgorithm::Exponential,
            "fibonacci" => TpAlgorithm::Fibonacci,
            "logarithmic" => TpAlgorithm::Logarithmic,
            other => {
                tracing::warn!("Unknown TP algorithm '{}', falling back to linear", other);
                TpAlgorithm::Linear
            }
        }
    }
}

impl FromStr for TpAlgorithm {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TpAlgorithm::from_name(s))
    }
}

impl From<String> for TpAlgorithm {
    fn from(value: String) -> Self {
        TpAlgorithm::from_name(&value)
    }
}

impl fmt::Display for TpAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
