//! Compensated (Kahan) summation.
//!
//! Every total in the crate goes through [`precise_sum`] so that the error of
//! adding many values of very different magnitude stays bounded instead of
//! growing with the number of terms.
//!
//! # References
//!
//! - W. Kahan, "Further remarks on reducing truncation errors", CACM 8(1), 1965.

/// Sum `values` with a running compensation term.
///
/// Returns `0.0` for an empty slice. Once the running sum turns NaN or
/// infinite the rest is added without compensation, so the result follows
/// plain IEEE addition (`inf + x == inf`, `inf - inf` is NaN).
///
/// ```
/// use flowsplit::precise_sum;
///
/// let values = [1.0e16, 1.0, 1.0];
/// assert_eq!(precise_sum(&values), 1.0e16 + 2.0);
/// assert_eq!(values.iter().sum::<f64>(), 1.0e16); // naive drops both ones
/// ```
pub fn precise_sum(values: &[f64]) -> f64 {
    let Some((&first, rest)) = values.split_first() else {
        return 0.0;
    };

    let mut sum = first;
    let mut compensation = 0.0_f64;
    for (i, &v) in rest.iter().enumerate() {
        let adjusted = v - compensation;
        let next = sum + adjusted;
        if !next.is_finite() {
            return rest[i + 1..].iter().fold(next, |acc, &x| acc + x);
        }
        // Low-order bits of `adjusted` that `next` could not hold
        compensation = (next - sum) - adjusted;
        sum = next;
    }
    sum
}
