//! Trade Ladder
//!
//! Computes a dollar-cost-averaging entry ladder between two prices, the
//! average entry, a stop-loss level and a ladder of take-profit levels spread
//! by one of several interpolation algorithms. All arithmetic is done in
//! `rust_decimal::Decimal`.

pub mod config;
pub mod error;
pub mod ladder;
pub mod plan;
pub mod report;
pub mod take_profit;
pub mod types;

pub use config::{Config, DisplaySettings};
pub use error::{LadderError, LadderResult};
pub use ladder::{
    calculate_average_tp, calculate_dca_price, calculate_percentage_diffs, calculate_sl_price,
    generate_entry_prices,
};
pub use plan::{compare_algorithms, compute_plan, PlanInputs, TradePlan};
pub use take_profit::{calculate_tp_prices, tp_percentages};
pub use types::*;
