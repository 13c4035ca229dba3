//! Full trade plan pipeline
//!
//! Takes every input of a plan in one struct and recomputes the whole result
//! set from scratch:
//!
//! ```text
//! inputs -> normalized -> entry ladder -> dca -> stop-loss
//!                                          \-> tp ladder -> average tp
//!                                          \-> percentage deviations
//! ```
//!
//! Nothing is cached between calls; identical inputs give identical plans.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::LadderResult;
use crate::ladder::{
    calculate_average_tp, calculate_dca_price, calculate_percentage_diffs, calculate_sl_price,
    generate_entry_prices,
};
use crate::take_profit::calculate_tp_prices;
use crate::types::{Side, TpAlgorithm};

/// All inputs of a trade plan, built with the `with_*` methods
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanInputs {
    pub upper_price: Decimal,
    pub lower_price: Decimal,
    pub num_orders: usize,
    /// Stop-loss distance from the average, in percent
    pub sl_pct: Decimal,
    /// Take-profit distance of the first order, in percent
    pub min_tp_pct: Decimal,
    /// Take-profit distance of the last order, in percent
    pub max_tp_pct: Decimal,
    pub side: Side,
    pub algorithm: TpAlgorithm,
}

impl Default for PlanInputs {
    fn default() -> Self {
        Self {
            upper_price: dec!(1),
            lower_price: dec!(1),
            num_orders: 5,
            sl_pct: dec!(5),
            min_tp_pct: dec!(1.5),
            max_tp_pct: dec!(8.5),
            side: Side::Buy,
            algorithm: TpAlgorithm::Exponential,
        }
    }
}

impl PlanInputs {
    /// Set both ends of the entry range
    pub fn with_range(mut self, upper: Decimal, lower: Decimal) -> Self {
        self.upper_price = upper;
        self.lower_price = lower;
        self
    }

    pub fn with_orders(mut self, num_orders: usize) -> Self {
        self.num_orders = num_orders;
        self
    }

    pub fn with_stop_loss(mut self, sl_pct: Decimal) -> Self {
        self.sl_pct = sl_pct;
        self
    }

    /// Set the take-profit percentage range
    pub fn with_take_profit(mut self, min_pct: Decimal, max_pct: Decimal) -> Self {
        self.min_tp_pct = min_pct;
        self.max_tp_pct = max_pct;
        self
    }

    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_algorithm(mut self, algorithm: TpAlgorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    /// Clamp inputs into the range the calculations expect.
    ///
    /// Prices and percentages are floored at zero, the order count at one,
    /// the lower price at the upper price and the minimum take-profit at the
    /// maximum.
    pub fn normalized(&self) -> Self {
        let mut inputs = self.clone();

        inputs.upper_price = floor_at_zero("upper_price", inputs.upper_price);
        inputs.lower_price = floor_at_zero("lower_price", inputs.lower_price);
        inputs.sl_pct = floor_at_zero("sl_pct", inputs.sl_pct);
        inputs.min_tp_pct = floor_at_zero("min_tp_pct", inputs.min_tp_pct);
        inputs.max_tp_pct = floor_at_zero("max_tp_pct", inputs.max_tp_pct);

        if inputs.num_orders == 0 {
            debug!("num_orders 0 raised to 1");
            inputs.num_orders = 1;
        }
        if inputs.lower_price > inputs.upper_price {
            debug!(
                "lower_price {} clamped to upper_price {}",
                inputs.lower_price, inputs.upper_price
            );
            inputs.lower_price = inputs.upper_price;
        }
        if inputs.min_tp_pct > inputs.max_tp_pct {
            debug!(
                "min_tp_pct {} clamped to max_tp_pct {}",
                inputs.min_tp_pct, inputs.max_tp_pct
            );
            inputs.min_tp_pct = inputs.max_tp_pct;
        }

        inputs
    }
}

fn floor_at_zero(field: &str, value: Decimal) -> Decimal {
    if value.is_sign_negative() && !value.is_zero() {
        debug!("{} {} raised to 0", field, value);
        Decimal::ZERO
    } else {
        value
    }
}

/// One row of the plan: an entry order and its take-profit level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrderLevel {
    /// 1-based order number
    pub number: usize,
    pub entry_price: Decimal,
    pub entry_diff_pct: Decimal,
    pub tp_price: Decimal,
    pub tp_diff_pct: Decimal,
}

/// Computed trade plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradePlan {
    /// Inputs after clamping
    pub inputs: PlanInputs,
    /// Descending for a buy (first fill at the upper price), ascending for a sell
    pub entry_prices: Vec<Decimal>,
    pub dca_price: Decimal,
    pub sl_price: Decimal,
    pub tp_prices: Vec<Decimal>,
    pub average_tp: Decimal,
    /// Deviation of the average take-profit from the DCA price, in percent
    pub average_tp_diff_pct: Decimal,
    pub entry_diffs_pct: Vec<Decimal>,
    pub tp_diffs_pct: Vec<Decimal>,
}

impl TradePlan {
    pub fn orders(&self) -> impl Iterator<Item = OrderLevel> + '_ {
        itertools::izip!(
            &self.entry_prices,
            &self.entry_diffs_pct,
            &self.tp_prices,
            &self.tp_diffs_pct
        )
        .enumerate()
        .map(|(i, (entry, entry_diff, tp, tp_diff))| OrderLevel {
            number: i + 1,
            entry_price: *entry,
            entry_diff_pct: *entry_diff,
            tp_price: *tp,
            tp_diff_pct: *tp_diff,
        })
    }
}

/// Compute a full trade plan from raw inputs
pub fn compute_plan(inputs: &PlanInputs) -> LadderResult<TradePlan> {
    let inputs = inputs.normalized();
    debug!(
        "Computing {} plan: range {}..{}, {} orders, {} TP",
        inputs.side, inputs.lower_price, inputs.upper_price, inputs.num_orders, inputs.algorithm
    );

    let mut entry_prices =
        generate_entry_prices(inputs.upper_price, inputs.lower_price, inputs.num_orders)?;
    if !inputs.side.is_buy() {
        entry_prices.reverse();
    }

    let dca_price = calculate_dca_price(&entry_prices)?;
    let sl_price = calculate_sl_price(dca_price, inputs.sl_pct, inputs.side)?;
    let tp_prices = calculate_tp_prices(
        dca_price,
        inputs.num_orders,
        inputs.min_tp_pct,
        inputs.max_tp_pct,
        inputs.side,
        inputs.algorithm,
    )?;
    let average_tp = calculate_average_tp(&tp_prices)?;
    let average_tp_diff_pct = calculate_percentage_diffs(&[average_tp], dca_price)?
        .pop()
        .unwrap_or_default();
    let entry_diffs_pct = calculate_percentage_diffs(&entry_prices, dca_price)?;
    let tp_diffs_pct = calculate_percentage_diffs(&tp_prices, dca_price)?;

    debug!(
        "Plan computed: dca={}, sl={}, avg_tp={}",
        dca_price, sl_price, average_tp
    );

    Ok(TradePlan {
        inputs,
        entry_prices,
        dca_price,
        sl_price,
        tp_prices,
        average_tp,
        average_tp_diff_pct,
        entry_diffs_pct,
        tp_diffs_pct,
    })
}

/// Take-profit ladder of one algorithm in a comparison
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmLadder {
    pub algorithm: TpAlgorithm,
    pub tp_prices: LadderResult<Vec<Decimal>>,
}

/// Compute the take-profit ladder of every algorithm for the same inputs.
///
/// An algorithm that rejects the inputs is reported in its own row; the others
/// are still computed.
pub fn compare_algorithms(inputs: &PlanInputs) -> LadderResult<Vec<AlgorithmLadder>> {
    let inputs = inputs.normalized();
    let entry_prices =
        generate_entry_prices(inputs.upper_price, inputs.lower_price, inputs.num_orders)?;
    let dca_price = calculate_dca_price(&entry_prices)?;

    Ok(TpAlgorithm::ALL
        .iter()
        .map(|&algorithm| AlgorithmLadder {
            algorithm,
            tp_prices: calculate_tp_prices(
                dca_price,
                inputs.num_orders,
                inputs.min_tp_pct,
                inputs.max_tp_pct,
                inputs.side,
                algorithm,
            ),
        })
        .collect())
}
