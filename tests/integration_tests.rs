//! Integration tests for the trade ladder calculations
//!
//! These tests run the public API end to end against known reference values.

use approx::assert_relative_eq;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use trade_ladder::report::render_plan;
use trade_ladder::{
    calculate_average_tp, calculate_dca_price, calculate_percentage_diffs, calculate_sl_price,
    calculate_tp_prices, compare_algorithms, compute_plan, generate_entry_prices, tp_percentages,
    Config, LadderError, PlanInputs, Side, TpAlgorithm,
};

// =============================================================================
// Test Utilities
// =============================================================================

fn tp(num_orders: usize, side: Side, algorithm: TpAlgorithm) -> Vec<Decimal> {
    calculate_tp_prices(dec!(200), num_orders, dec!(10), dec!(30), side, algorithm).unwrap()
}

fn as_f64(values: &[Decimal]) -> Vec<f64> {
    values.iter().map(|v| v.to_f64().unwrap()).collect()
}

// =============================================================================
// Entry Ladder Tests
// =============================================================================

#[test]
fn test_entry_ladder_length_and_order() {
    for n in 1..=25 {
        let prices = generate_entry_prices(dec!(64250.75), dec!(58100.25), n).unwrap();
        assert_eq!(prices.len(), n);
        assert!(prices.windows(2).all(|w| w[0] > w[1]), "n={}", n);
        if n > 1 {
            assert_eq!(prices[0], dec!(64250.75));
            assert_eq!(prices[n - 1], dec!(58100.25));
        }
    }
}

#[test]
fn test_entry_ladder_degenerate_cases() {
    assert_eq!(
        generate_entry_prices(dec!(300), dec!(100), 1).unwrap(),
        vec![dec!(200)]
    );
    assert_eq!(
        generate_entry_prices(dec!(200), dec!(200), 3).unwrap(),
        vec![dec!(200), dec!(200), dec!(200)]
    );
}

// =============================================================================
// Averaging and Stop-Loss Tests
// =============================================================================

#[test]
fn test_averages() {
    assert_eq!(
        calculate_dca_price(&[dec!(100), dec!(200), dec!(300)]).unwrap(),
        dec!(200)
    );
    assert_eq!(calculate_dca_price(&[dec!(100)]).unwrap(), dec!(100));
    assert_eq!(calculate_dca_price(&[]), Err(LadderError::EmptyPrices));
    assert_eq!(
        calculate_average_tp(&[dec!(220), dec!(240), dec!(260)]).unwrap(),
        dec!(240)
    );
}

#[test]
fn test_stop_loss() {
    assert_eq!(calculate_sl_price(dec!(200), dec!(10), Side::Buy), Ok(dec!(180)));
    assert_eq!(calculate_sl_price(dec!(200), dec!(10), Side::Sell), Ok(dec!(220)));
    assert_eq!(calculate_sl_price(dec!(200), dec!(0), Side::Buy), Ok(dec!(200)));
    assert_eq!(calculate_sl_price(dec!(200), dec!(0), Side::Sell), Ok(dec!(200)));
}

#[test]
fn test_decimal_precision_is_preserved() {
    // 0.1 + 0.2 style drift would show up here with binary floats
    let dca = calculate_dca_price(&[dec!(0.1), dec!(0.2)]).unwrap();
    assert_eq!(dca, dec!(0.15));
    let diffs = calculate_percentage_diffs(&[dec!(0.3)], dca).unwrap();
    assert_eq!(diffs, vec![dec!(100)]);
}

// =============================================================================
// Take-Profit Tests
// =============================================================================

#[test]
fn test_tp_reference_values() {
    assert_eq!(
        tp(3, Side::Buy, TpAlgorithm::Linear),
        vec![dec!(220), dec!(240), dec!(260)]
    );

    let exponential = as_f64(&tp(3, Side::Buy, TpAlgorithm::Exponential));
    assert_relative_eq!(exponential[0], 220.0);
    assert_relative_eq!(exponential[1], 234.64101615137756, epsilon = 1e-9);
    assert_relative_eq!(exponential[2], 260.0);

    let logarithmic = as_f64(&tp(3, Side::Buy, TpAlgorithm::Logarithmic));
    assert_relative_eq!(logarithmic[0], 220.0);
    assert_relative_eq!(logarithmic[1], 245.2371901428583, epsilon = 1e-9);
    assert_relative_eq!(logarithmic[2], 260.0);

    assert_eq!(tp(1, Side::Buy, TpAlgorithm::Linear), vec![dec!(240)]);
}

#[test]
fn test_tp_sell_is_below_average() {
    for algo in TpAlgorithm::ALL {
        let prices = tp(6, Side::Sell, algo);
        assert!(prices.iter().all(|p| *p < dec!(200)), "{}", algo);
        assert_eq!(prices[0], dec!(180));
        assert_eq!(prices[5], dec!(140));
    }
}

#[test]
fn test_linear_endpoints_are_exact() {
    for n in 2..=40 {
        let pct = tp_percentages(TpAlgorithm::Linear, n, dec!(1.37), dec!(9.11)).unwrap();
        assert_eq!(pct[0], dec!(1.37));
        assert_eq!(pct[n - 1], dec!(9.11));
    }
}

#[test]
fn test_fibonacci_starts_at_minimum() {
    let pct = tp_percentages(TpAlgorithm::Fibonacci, 7, dec!(2), dec!(10)).unwrap();
    // fib = [0, 1, 1, 2, 3, 5, 8]
    assert_eq!(pct[0], dec!(2));
    assert_eq!(pct[1], dec!(3));
    assert_eq!(pct[2], dec!(3));
    assert_eq!(pct[3], dec!(4));
    assert_eq!(pct[4], dec!(5));
    assert_eq!(pct[5], dec!(7));
    assert_eq!(pct[6], dec!(10));
}

#[test]
fn test_exponential_domain_error() {
    let result = calculate_tp_prices(
        dec!(200),
        4,
        dec!(0),
        dec!(30),
        Side::Buy,
        TpAlgorithm::Exponential,
    );
    assert!(matches!(result, Err(LadderError::ExponentialDomain { .. })));
}

#[test]
fn test_long_fibonacci_ladder() {
    let prices = tp(300, Side::Buy, TpAlgorithm::Fibonacci);
    assert_eq!(prices.len(), 300);
    assert_eq!(prices[0], dec!(220));
    assert_eq!(prices[299], dec!(260));
    assert!(prices.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_out_of_range_inputs_are_errors() {
    let inputs = PlanInputs::default()
        .with_range(Decimal::MAX, dec!(0))
        .with_orders(3);
    assert!(matches!(
        compute_plan(&inputs),
        Err(LadderError::MathDomain { .. })
    ));
    assert!(matches!(
        calculate_percentage_diffs(&[dec!(1e20)], dec!(0.00000001)),
        Err(LadderError::MathDomain { operation: "multiplication" })
    ));
}

#[test]
fn test_unknown_algorithm_behaves_linear() {
    let algo: TpAlgorithm = "quadratic".parse().unwrap();
    assert_eq!(tp(5, Side::Buy, algo), tp(5, Side::Buy, TpAlgorithm::Linear));
}

// =============================================================================
// Percentage Deviation Tests
// =============================================================================

#[test]
fn test_percentage_diffs() {
    assert_eq!(
        calculate_percentage_diffs(&[dec!(100), dec!(200), dec!(300)], dec!(200)).unwrap(),
        vec![dec!(-50), dec!(0), dec!(50)]
    );
    assert!(calculate_percentage_diffs(&[], dec!(200)).unwrap().is_empty());
}

// =============================================================================
// Plan Pipeline Tests
// =============================================================================

#[test]
fn test_plan_pipeline_is_repeatable() {
    let inputs = PlanInputs::default()
        .with_range(dec!(1.2345), dec!(0.9876))
        .with_orders(9)
        .with_stop_loss(dec!(7.5))
        .with_take_profit(dec!(1.5), dec!(8.5))
        .with_algorithm(TpAlgorithm::Exponential);

    let first = compute_plan(&inputs).unwrap();
    let second = compute_plan(&inputs).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_plan_consistency() {
    let inputs = PlanInputs::default()
        .with_range(dec!(110), dec!(90))
        .with_orders(5)
        .with_stop_loss(dec!(5))
        .with_take_profit(dec!(2), dec!(6))
        .with_side(Side::Sell)
        .with_algorithm(TpAlgorithm::Logarithmic);
    let plan = compute_plan(&inputs).unwrap();

    assert_eq!(
        plan.entry_prices,
        vec![dec!(90), dec!(95), dec!(100), dec!(105), dec!(110)]
    );
    assert_eq!(plan.dca_price, dec!(100));
    assert_eq!(plan.sl_price, dec!(105));
    assert_eq!(plan.tp_prices[0], dec!(98));
    assert_eq!(plan.tp_prices[4], dec!(94));
    assert_eq!(plan.orders().count(), 5);
    assert!(plan.average_tp_diff_pct < Decimal::ZERO);
}

#[test]
fn test_plan_clamps_inverted_inputs() {
    let inputs = PlanInputs::default()
        .with_range(dec!(100), dec!(120))
        .with_take_profit(dec!(9), dec!(3))
        .with_algorithm(TpAlgorithm::Linear);
    let plan = compute_plan(&inputs).unwrap();

    assert!(plan.entry_prices.iter().all(|p| *p == dec!(100)));
    assert!(plan.tp_prices.iter().all(|p| *p == dec!(103)));
}

#[test]
fn test_compare_covers_every_algorithm() {
    let rows = compare_algorithms(&PlanInputs::default().with_range(dec!(300), dec!(100)))
        .unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.tp_prices.is_ok()));
}

#[test]
fn test_config_to_report() {
    let config: Config = serde_json::from_str(
        r#"{
            "plan": {
                "upper_price": "300",
                "lower_price": "100",
                "num_orders": 3,
                "sl_pct": "10",
                "min_tp_pct": "10",
                "max_tp_pct": "30",
                "algorithm": "linear"
            },
            "display": { "price_decimals": 2, "percent_decimals": 1 }
        }"#,
    )
    .unwrap();

    let plan = compute_plan(&config.plan).unwrap();
    let text = render_plan(&plan, &config.display);

    assert!(text.contains("Average DCA Price:    200.00"));
    assert!(text.contains("Stop Loss (SL) Level: 180.00"));
    assert!(text.contains("  TP Level:    220.00 (DCA +10.0%)"));
}
