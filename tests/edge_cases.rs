//! Edge-case tests: adversarial inputs to every public API.

use flowsplit::{
    Asset, RebalanceError, RebalancePlan, Strategy, allocation_of, constrained_rebalance,
    precise_sum, unconstrained_rebalance,
};

fn reference_holdings() -> [f64; 3] {
    [6000.0, 5000.0, 6000.0]
}

fn reference_target() -> [f64; 3] {
    [0.3, 0.5, 0.2]
}

// ============================================================================
// Precise summation
// ============================================================================

#[test]
fn sum_of_nothing() {
    assert_eq!(precise_sum(&[]), 0.0);
}

#[test]
fn sum_of_one() {
    assert_eq!(precise_sum(&[-42.5]), -42.5);
}

#[test]
fn compensated_beats_naive_on_magnitude_disparity() {
    // Exact sum is 2^53 + 8192; naive rounds every +1 away
    let mut values = vec![9_007_199_254_740_992.0];
    values.extend(std::iter::repeat_n(1.0, 8192));

    let exact = 9_007_199_254_749_184.0;
    let naive: f64 = values.iter().sum();
    let precise = precise_sum(&values);

    assert_ne!(naive, precise);
    assert!((precise - exact).abs() < (naive - exact).abs());
    assert_eq!(precise, exact);
}

#[test]
fn compensated_recovers_tiny_terms_between_cancelling_giants() {
    let values = [1.0e8, 1.0e-8, 1.0e-8, 1.0e-8, 1.0e-8, -1.0e8];
    let precise = precise_sum(&values);
    let naive: f64 = values.iter().sum();
    assert!((precise - 4.0e-8).abs() < (naive - 4.0e-8).abs());
}

// ============================================================================
// Allocation
// ============================================================================

#[test]
fn allocation_of_reference_holdings() {
    let alloc = allocation_of(&reference_holdings()).unwrap();
    assert_eq!(alloc.total, 17_000.0);
    let rounded: Vec<f64> = alloc
        .fractions
        .iter()
        .map(|f| (f * 10_000.0).round() / 10_000.0)
        .collect();
    assert_eq!(rounded, vec![0.3529, 0.2941, 0.3529]);
}

#[test]
fn allocation_of_all_zero_fails() {
    assert_eq!(allocation_of(&[0.0; 4]), Err(RebalanceError::ZeroTotal));
}

#[test]
fn allocation_of_cancelling_values_fails() {
    assert_eq!(allocation_of(&[5.0, -5.0]), Err(RebalanceError::ZeroTotal));
}

// ============================================================================
// Unconstrained
// ============================================================================

#[test]
fn unconstrained_reference_sells_over_allocated_asset() {
    let current = allocation_of(&reference_holdings()).unwrap();
    let split = unconstrained_rebalance(
        current.total,
        &current.fractions,
        &reference_target(),
        10_000.0,
    )
    .unwrap();

    assert!((precise_sum(&split) - 10_000.0).abs() < 1e-9);
    assert!(split[2] < 0.0);
    assert!(split[0] > 0.0 && split[1] > 0.0);
}

#[test]
fn unconstrained_empty_inputs() {
    let split = unconstrained_rebalance(0.0, &[], &[], 10.0).unwrap();
    assert!(split.is_empty());
}

#[test]
fn unconstrained_rejects_mismatch_before_computing() {
    let err = unconstrained_rebalance(1.0, &[1.0], &[0.5, 0.25, 0.25], 1.0).unwrap_err();
    assert_eq!(err, RebalanceError::LengthMismatch { left: 1, right: 3 });
}

// ============================================================================
// Constrained
// ============================================================================

#[test]
fn constrained_reference_has_no_sell() {
    let current = allocation_of(&reference_holdings()).unwrap();
    let free = unconstrained_rebalance(
        current.total,
        &current.fractions,
        &reference_target(),
        10_000.0,
    )
    .unwrap();
    let bound = constrained_rebalance(&reference_holdings(), &reference_target(), 10_000.0).unwrap();

    assert!(bound.iter().all(|&x| x >= 0.0));
    assert!((precise_sum(&bound) - 10_000.0).abs() < 1e-9);
    assert!(bound[2] <= free[2].max(0.0));
    assert_eq!(bound[2], 0.0);
}

#[test]
fn constrained_full_liquidation_is_exact() {
    let holdings = [0.1, 0.2, 0.3, 1234.5678];
    let total = precise_sum(&holdings);
    let split = constrained_rebalance(&holdings, &[0.25; 4], -total).unwrap();
    assert_eq!(split, vec![-0.1, -0.2, -0.3, -1234.5678]);
}

#[test]
fn constrained_tiny_withdrawal_from_balanced_portfolio() {
    let split = constrained_rebalance(&[500.0, 500.0], &[0.5, 0.5], -1.0).unwrap();
    assert!((split[0] + 0.5).abs() < 1e-12);
    assert!((split[1] + 0.5).abs() < 1e-12);
}

#[test]
fn constrained_deposit_larger_than_portfolio() {
    // Final total 1_001_000: every asset is under target, none clamps
    let split = constrained_rebalance(&[900.0, 100.0], &[0.5, 0.5], 1_000_000.0).unwrap();
    assert!((split[0] - 499_600.0).abs() < 1e-6);
    assert!((split[1] - 500_400.0).abs() < 1e-6);
}

#[test]
fn constrained_single_asset_takes_everything() {
    let split = constrained_rebalance(&[100.0], &[1.0], 50.0).unwrap();
    assert_eq!(split, vec![50.0]);
}

#[test]
fn constrained_mismatch() {
    assert!(matches!(
        constrained_rebalance(&[1.0, 2.0], &[1.0], 5.0),
        Err(RebalanceError::LengthMismatch { .. })
    ));
}

#[test]
fn constrained_infinite_delta() {
    assert_eq!(
        constrained_rebalance(&[1.0, 2.0], &[0.5, 0.5], f64::INFINITY),
        Err(RebalanceError::NonFinite)
    );
}

// ============================================================================
// Plans
// ============================================================================

#[test]
fn plan_withdrawal_constrained_never_buys() {
    let assets = vec![
        Asset::new("Stocks", 6000.0, 0.3),
        Asset::new("Bonds", 5000.0, 0.5),
        Asset::new("Cash", 6000.0, 0.2),
    ];
    let plan = RebalancePlan::compute(&assets, -5000.0, Strategy::Constrained).unwrap();
    assert_eq!(plan.counter_trades(), 0);
    assert!(plan.rows.iter().all(|r| r.adjustment <= 0.0));
    assert_eq!(plan.rows[1].resulting_value, 5000.0);
}

#[test]
fn plan_rows_keep_asset_order_and_names() {
    let assets = vec![
        Asset::new("zeta", 1.0, 0.5),
        Asset::new("alpha", 1.0, 0.5),
    ];
    let plan = RebalancePlan::compute(&assets, 2.0, Strategy::Unconstrained).unwrap();
    let names: Vec<&str> = plan.rows.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["zeta", "alpha"]);
}
