//! Fractional allocations derived from raw magnitudes.

use crate::error::{RebalanceError, Result};
use crate::sum::precise_sum;

/// A precise total together with each value's share of it.
///
/// `fractions` is parallel to the input values and sums to 1 (within
/// floating tolerance).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Allocation {
    pub total: f64,
    pub fractions: Vec<f64>,
}

impl Allocation {
    /// Number of entries.
    pub fn len(&self) -> usize {
        self.fractions.len()
    }

    /// True if the allocation has no entries.
    pub fn is_empty(&self) -> bool {
        self.fractions.is_empty()
    }
}

/// Compute the precise total of `values` and each value's fraction of it.
///
/// Values may all be negative (a withdrawal split): the fractions are still
/// non-negative and sum to 1 because numerator and total share a sign.
///
/// # Errors
///
/// [`RebalanceError::ZeroTotal`] if the values sum to zero (this includes an
/// empty slice), [`RebalanceError::NonFinite`] if the total is NaN or infinite.
///
/// ```
/// use flowsplit::allocation_of;
///
/// let alloc = allocation_of(&[6000.0, 2000.0]).unwrap();
/// assert_eq!(alloc.total, 8000.0);
/// assert_eq!(alloc.fractions, vec![0.75, 0.25]);
/// ```
pub fn allocation_of(values: &[f64]) -> Result<Allocation> {
    let total = precise_sum(values);
    if !total.is_finite() {
        return Err(RebalanceError::NonFinite);
    }
    if total == 0.0 {
        return Err(RebalanceError::ZeroTotal);
    }

    let fractions = values.iter().map(|&v| v / total).collect();
    Ok(Allocation { total, fractions })
}
