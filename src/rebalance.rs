//! Splitting a delta across assets.
//!
//! Two rebalancers share one contract: the returned adjustments are parallel
//! to the input assets and sum to `delta`.
//!
//! - [`unconstrained_rebalance`] lands exactly on the target allocation and
//!   may prescribe selling an over-allocated asset while money is coming in.
//! - [`constrained_rebalance`] never trades against the direction of `delta`:
//!   a deposit only buys, a withdrawal only sells. It moves toward the target
//!   as far as that allows.

use log::{debug, trace};

use crate::allocation::{Allocation, allocation_of};
use crate::error::{RebalanceError, Result};
use crate::sum::precise_sum;

fn check_lengths(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(RebalanceError::LengthMismatch { left, right });
    }
    Ok(())
}

/// Closed-form split that reaches `target_allocation` exactly.
///
/// For each asset:
///
/// ```text
/// adjustment[i] = (target[i] - current[i]) * total_before + target[i] * delta
/// ```
///
/// The first term repairs the existing holdings, the second allocates the new
/// money by target. Both allocations sum to 1, so the adjustments sum to
/// `delta`.
///
/// # Errors
///
/// [`RebalanceError::LengthMismatch`] if the two allocations differ in length.
///
/// ```
/// use flowsplit::{allocation_of, unconstrained_rebalance};
///
/// let current = allocation_of(&[6000.0, 5000.0, 6000.0]).unwrap();
/// let split = unconstrained_rebalance(
///     current.total,
///     &current.fractions,
///     &[0.3, 0.5, 0.2],
///     10_000.0,
/// )
/// .unwrap();
///
/// assert!(split[2] < 0.0); // over-allocated asset sells even on a deposit
/// ```
pub fn unconstrained_rebalance(
    total_before: f64,
    current_allocation: &[f64],
    target_allocation: &[f64],
    delta: f64,
) -> Result<Vec<f64>> {
    check_lengths(current_allocation.len(), target_allocation.len())?;

    Ok(current_allocation
        .iter()
        .zip(target_allocation)
        .map(|(&current, &target)| (target - current) * total_before + target * delta)
        .collect())
}

/// Every clamped distance is zero. When the raw distances agree with `delta`
/// up to rounding the holdings already sit on target (`delta` is below their
/// resolution), so `delta` is shared out by target instead.
fn on_target_split(
    diffs: &[f64],
    target_allocation: &[f64],
    final_total: f64,
    delta: f64,
) -> Result<Allocation> {
    let slack = final_total.abs() * f64::EPSILON * diffs.len() as f64;
    if precise_sum(diffs) * delta.signum() < -slack {
        return Err(RebalanceError::NoMovableAsset { delta });
    }
    debug!("constrained split of {delta} below holding resolution, following targets");
    allocation_of(target_allocation).map_err(|e| match e {
        RebalanceError::ZeroTotal => RebalanceError::NoMovableAsset { delta },
        e => e,
    })
}

/// Split `delta` without trading against its direction.
///
/// Works in two passes over the assets:
///
/// 1. Compute each asset's distance to its ideal final magnitude
///    `target[i] * (total + delta)`.
/// 2. Zero every distance whose sign disagrees with `delta`, then hand out
///    `delta` in proportion to what is left.
///
/// The result sums to `delta` and every entry has the sign of `delta` (or is
/// zero). A zero `delta` yields all zeros. Withdrawing the whole portfolio
/// (`delta == -total`) yields exactly `-current_magnitudes[i]`.
///
/// # Errors
///
/// - [`RebalanceError::LengthMismatch`] if the slices differ in length.
/// - [`RebalanceError::NoMovableAsset`] if no asset may move in the
///   direction of `delta`.
/// - [`RebalanceError::NonFinite`] if a holding, a target or `delta` is NaN
///   or infinite.
///
/// A `delta` too small to register against the holdings (every distance
/// rounds to zero) is split by target.
///
/// ```
/// use flowsplit::constrained_rebalance;
///
/// let split = constrained_rebalance(&[6000.0, 5000.0, 6000.0], &[0.3, 0.5, 0.2], 10_000.0).unwrap();
///
/// assert!(split.iter().all(|&x| x >= 0.0));
/// assert!((split.iter().sum::<f64>() - 10_000.0).abs() < 1e-6);
/// ```
pub fn constrained_rebalance(
    current_magnitudes: &[f64],
    target_allocation: &[f64],
    delta: f64,
) -> Result<Vec<f64>> {
    check_lengths(current_magnitudes.len(), target_allocation.len())?;

    if delta == 0.0 {
        return Ok(vec![0.0; current_magnitudes.len()]);
    }

    let current_total = precise_sum(current_magnitudes);
    let final_total = current_total + delta;
    if !final_total.is_finite() {
        return Err(RebalanceError::NonFinite);
    }

    // Full liquidation: every ideal magnitude is zero
    if final_total == 0.0 {
        return Ok(current_magnitudes.iter().map(|&v| -v).collect());
    }

    let mut diffs = Vec::with_capacity(current_magnitudes.len());
    for (&current, &target) in current_magnitudes.iter().zip(target_allocation) {
        let diff = target * final_total - current;
        if !diff.is_finite() {
            return Err(RebalanceError::NonFinite);
        }
        diffs.push(diff);
    }

    let clamped: Vec<f64> = diffs
        .iter()
        .map(|&diff| if delta > 0.0 { diff.max(0.0) } else { diff.min(0.0) })
        .collect();

    trace!("constrained split: total={current_total} final={final_total} clamped={clamped:?}");

    let movable = match allocation_of(&clamped) {
        Ok(alloc) => alloc,
        Err(RebalanceError::ZeroTotal) => {
            on_target_split(&diffs, target_allocation, final_total, delta)?
        }
        Err(e) => return Err(e),
    };

    debug!(
        "constrained split of {delta}: {} of {} assets movable",
        clamped.iter().filter(|&&d| d != 0.0).count(),
        clamped.len()
    );

    Ok(movable.fractions.iter().map(|&f| f * delta).collect())
}
