//! Relative-difference metric shared by both refinement passes.

use tracing::warn;

/// Sentinel returned when the percentage difference is undefined.
pub const UNDEFINED_DIFF: f64 = f64::INFINITY;

/// Symmetric percentage difference between two quantities.
///
/// Computes `|(a - b) / (a + b) / 2| * 100`. The result is the same for
/// `(a, b)` and `(b, a)` and is `0.0` when both values are equal and
/// non-zero.
///
/// A zero-sum denominator or a non-finite operand yields
/// [`UNDEFINED_DIFF`] and a warning carrying the operands; it never panics.
///
/// # Examples
///
/// ```
/// use flipscan::domain::{percent_diff, UNDEFINED_DIFF};
///
/// assert_eq!(percent_diff(10.0, 10.0), 0.0);
/// assert_eq!(percent_diff(3.0, 1.0), percent_diff(1.0, 3.0));
/// assert_eq!(percent_diff(5.0, -5.0), UNDEFINED_DIFF);
/// ```
#[must_use]
pub fn percent_diff(a: f64, b: f64) -> f64 {
    if !a.is_finite() || !b.is_finite() {
        warn!(a, b, "Percentage difference over non-finite operands");
        return UNDEFINED_DIFF;
    }

    let sum = a + b;
    if sum == 0.0 {
        warn!(a, b, "Percentage difference undefined, operands sum to zero");
        return UNDEFINED_DIFF;
    }

    ((a - b) / sum / 2.0).abs() * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_values_have_no_difference() {
        assert_eq!(percent_diff(42.5, 42.5), 0.0);
    }

    #[test]
    fn literal_formula() {
        // (30 - 10) / 40 / 2 = 0.25
        assert!((percent_diff(30.0, 10.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn zero_sum_is_undefined() {
        assert_eq!(percent_diff(0.0, 0.0), UNDEFINED_DIFF);
        assert_eq!(percent_diff(-3.0, 3.0), UNDEFINED_DIFF);
    }

    #[test]
    fn non_finite_operands_are_undefined() {
        assert_eq!(percent_diff(f64::NAN, 1.0), UNDEFINED_DIFF);
        assert_eq!(percent_diff(1.0, f64::INFINITY), UNDEFINED_DIFF);
    }
}
