//! Text rendering of computed plans
//!
//! Prices and percentages are rendered with independent fixed precision,
//! rounding half away from zero.

use itertools::Itertools;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DisplaySettings;
use crate::plan::{AlgorithmLadder, TradePlan};

/// Render a decimal with exactly `dp` fractional digits
pub fn format_fixed(value: Decimal, dp: u32) -> String {
    let mut rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        rounded = Decimal::ZERO;
    }
    format!("{:.*}", dp as usize, rounded)
}

/// Render a percentage with an explicit `+` for non-negative values
pub fn format_signed_pct(value: Decimal, dp: u32) -> String {
    let text = format_fixed(value, dp);
    if text.starts_with('-') {
        format!("{}%", text)
    } else {
        format!("+{}%", text)
    }
}

/// Human-readable plan summary followed by one block per order
pub fn render_plan(plan: &TradePlan, display: &DisplaySettings) -> String {
    let price = |v: Decimal| format_fixed(v, display.price_decimals);
    let pct = |v: Decimal| format_signed_pct(v, display.percent_decimals);

    let mut lines = vec![
        format!(
            "{} plan | {} orders | {} TP spacing",
            plan.inputs.side, plan.inputs.num_orders, plan.inputs.algorithm
        ),
        "=".repeat(60),
        format!("Average DCA Price:    {}", price(plan.dca_price)),
        format!(
            "Average TP Value:     {} (DCA {})",
            price(plan.average_tp),
            pct(plan.average_tp_diff_pct)
        ),
        format!("Stop Loss (SL) Level: {}", price(plan.sl_price)),
        "-".repeat(60),
    ];

    for order in plan.orders() {
        lines.push(format!("Order {}:", order.number));
        lines.push(format!(
            "  Entry Price: {} (DCA {})",
            price(order.entry_price),
            pct(order.entry_diff_pct)
        ));
        lines.push(format!(
            "  TP Level:    {} (DCA {})",
            price(order.tp_price),
            pct(order.tp_diff_pct)
        ));
    }

    join_lines(&lines)
}

/// Table of take-profit ladders, one column per algorithm
pub fn render_comparison(rows: &[AlgorithmLadder], display: &DisplaySettings) -> String {
    const WIDTH: usize = 14;

    let num_orders = rows
        .iter()
        .filter_map(|r| r.tp_prices.as_ref().ok())
        .map(|p| p.len())
        .max()
        .unwrap_or(0);

    let header = rows
        .iter()
        .map(|r| format!("{:>width$}", r.algorithm.as_str(), width = WIDTH))
        .join(" ");
    let mut lines = vec![format!("{:<6} {}", "Order", header)];

    for i in 0..num_orders {
        let cells = rows
            .iter()
            .map(|r| match &r.tp_prices {
                Ok(prices) => prices
                    .get(i)
                    .map(|p| format_fixed(*p, display.price_decimals))
                    .unwrap_or_default(),
                Err(_) => "n/a".to_string(),
            })
            .map(|cell| format!("{:>width$}", cell, width = WIDTH))
            .join(" ");
        lines.push(format!("{:<6} {}", i + 1, cells));
    }

    for row in rows {
        if let Err(e) = &row.tp_prices {
            lines.push(format!("{}: {}", row.algorithm, e));
        }
    }

    join_lines(&lines)
}

/// One line per entry, each newline-terminated
fn join_lines(lines: &[String]) -> String {
    lines.iter().map(|line| format!("{}\n", line)).collect()
}
