//! Rebalance plans: the engine output bundled with per-asset context.
//!
//! A [`RebalancePlan`] runs one of the rebalancers over a list of [`Asset`]s
//! and records, for each asset, what it holds now, what it should trade, and
//! where it ends up. This is everything a presentation layer needs to render
//! the result without recomputing totals itself.

use crate::allocation::allocation_of;
use crate::asset::{Asset, Strategy};
use crate::error::{RebalanceError, Result};
use crate::rebalance::{constrained_rebalance, unconstrained_rebalance};
use crate::sum::precise_sum;

/// One asset's line in a plan.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanRow {
    pub name: String,
    pub current_value: f64,
    pub current_fraction: f64,
    pub target_fraction: f64,
    /// Signed amount to buy (> 0) or sell (< 0).
    pub adjustment: f64,
    pub resulting_value: f64,
    pub resulting_fraction: f64,
}

impl PlanRow {
    /// Distance between where the asset ends up and its target.
    pub fn drift(&self) -> f64 {
        self.resulting_fraction - self.target_fraction
    }
}

/// A computed split of `delta` across a portfolio.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RebalancePlan {
    pub strategy: Strategy,
    pub delta: f64,
    pub total_before: f64,
    pub total_after: f64,
    pub rows: Vec<PlanRow>,
}

/// Fractions of `values`, or all zeros when the values sum to zero.
fn fractions_or_zero(values: &[f64]) -> Result<Vec<f64>> {
    match allocation_of(values) {
        Ok(alloc) => Ok(alloc.fractions),
        Err(RebalanceError::ZeroTotal) => Ok(vec![0.0; values.len()]),
        Err(e) => Err(e),
    }
}

impl RebalancePlan {
    /// Split `delta` across `assets` with the given strategy.
    ///
    /// Inputs are expected to be validated by the caller (targets sum to 1,
    /// values non-negative, `total + delta >= 0`). An empty or all-zero
    /// portfolio is accepted: its current fractions are reported as zero.
    ///
    /// ```
    /// use flowsplit::{Asset, RebalancePlan, Strategy};
    ///
    /// let assets = vec![
    ///     Asset::new("Stocks", 6000.0, 0.3),
    ///     Asset::new("Bonds", 5000.0, 0.5),
    ///     Asset::new("Cash", 6000.0, 0.2),
    /// ];
    /// let plan = RebalancePlan::compute(&assets, 10_000.0, Strategy::Unconstrained).unwrap();
    ///
    /// assert!((plan.total_after - 27_000.0).abs() < 1e-6);
    /// assert!(plan.max_drift() < 1e-9);
    /// ```
    pub fn compute(assets: &[Asset], delta: f64, strategy: Strategy) -> Result<Self> {
        if assets.is_empty() {
            return Err(RebalanceError::EmptyPortfolio);
        }

        let values: Vec<f64> = assets.iter().map(|a| a.current_value).collect();
        let targets: Vec<f64> = assets.iter().map(|a| a.target_fraction).collect();

        let total_before = precise_sum(&values);
        let current_fractions = fractions_or_zero(&values)?;

        let adjustments = match strategy {
            Strategy::Unconstrained => {
                unconstrained_rebalance(total_before, &current_fractions, &targets, delta)?
            }
            Strategy::Constrained => constrained_rebalance(&values, &targets, delta)?,
        };

        let resulting: Vec<f64> = values
            .iter()
            .zip(&adjustments)
            .map(|(v, a)| v + a)
            .collect();
        let total_after = precise_sum(&resulting);
        let resulting_fractions = fractions_or_zero(&resulting)?;

        let rows = assets
            .iter()
            .enumerate()
            .map(|(i, asset)| PlanRow {
                name: asset.name.clone(),
                current_value: asset.current_value,
                current_fraction: current_fractions[i],
                target_fraction: asset.target_fraction,
                adjustment: adjustments[i],
                resulting_value: resulting[i],
                resulting_fraction: resulting_fractions[i],
            })
            .collect();

        Ok(Self {
            strategy,
            delta,
            total_before,
            total_after,
            rows,
        })
    }

    /// Per-asset adjustments, in asset order.
    pub fn adjustments(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.adjustment).collect()
    }

    /// Per-asset magnitudes after applying the adjustments.
    pub fn resulting_values(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.resulting_value).collect()
    }

    /// Per-asset allocation after applying the adjustments.
    pub fn resulting_fractions(&self) -> Vec<f64> {
        self.rows.iter().map(|r| r.resulting_fraction).collect()
    }

    /// Largest absolute distance from target across all assets.
    pub fn max_drift(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.drift().abs())
            .fold(0.0_f64, f64::max)
    }

    /// Number of assets the plan sells while money comes in, or buys while
    /// money goes out.
    pub fn counter_trades(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.adjustment * self.delta < 0.0)
            .count()
    }
}

/// Compute plans for many independent portfolios in parallel.
///
/// Each entry is `(assets, delta)`. Results are returned in input order; one
/// failing portfolio does not affect the others.
#[cfg(feature = "parallel")]
pub fn plan_batch(portfolios: &[(Vec<Asset>, f64)], strategy: Strategy) -> Vec<Result<RebalancePlan>> {
    use rayon::prelude::*;

    portfolios
        .par_iter()
        .map(|(assets, delta)| RebalancePlan::compute(assets, *delta, strategy))
        .collect()
}
