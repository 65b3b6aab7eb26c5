//! Linear algebra utilities
//!
//! Numerical helpers shared by the forward filter and the smoother.

use nalgebra::DVector;

use crate::filter::errors::HmmError;

/// Tolerance for checking that a belief vector sums to 1
pub const NORMALIZATION_TOLERANCE: f64 = 1e-9;

/// Normalize a non-negative vector in place so its entries sum to 1
///
/// # Arguments
/// * `v` - Vector to normalize
/// * `context` - Where the vector was formed, for error reporting
///
/// # Errors
/// Returns [`HmmError::NumericalDegeneracy`] when the entry sum is zero,
/// negative, or non-finite. The vector is left untouched in that case, so
/// no NaN can leak into caller-visible state.
pub fn normalize(v: &mut DVector<f64>, context: &str) -> Result<(), HmmError> {
    let sum = v.sum();
    if !sum.is_finite() || sum <= 0.0 {
        return Err(HmmError::NumericalDegeneracy {
            description: format!("{} produced normalization sum {}", context, sum),
        });
    }
    *v /= sum;
    Ok(())
}

/// Check that a vector sums to 1 within [`NORMALIZATION_TOLERANCE`]
pub fn is_normalized(v: &DVector<f64>) -> bool {
    (v.sum() - 1.0).abs() <= NORMALIZATION_TOLERANCE
}

/// Index of the largest entry
///
/// Ties resolve to the lowest index. Empty vectors return 0.
pub fn argmax(v: &DVector<f64>) -> usize {
    let mut best = 0;
    let mut best_value = f64::NEG_INFINITY;
    for (i, &value) in v.iter().enumerate() {
        if value > best_value {
            best_value = value;
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        let mut v = DVector::from_vec(vec![1.0, 3.0]);
        normalize(&mut v, "test").unwrap();
        assert!((v[0] - 0.25).abs() < 1e-12);
        assert!((v[1] - 0.75).abs() < 1e-12);
        assert!(is_normalized(&v));
    }

    #[test]
    fn test_normalize_zero_sum_is_degenerate() {
        let mut v = DVector::from_vec(vec![0.0, 0.0, 0.0]);
        let err = normalize(&mut v, "zero test").unwrap_err();
        assert!(matches!(err, HmmError::NumericalDegeneracy { .. }));
        // Input untouched on failure
        assert_eq!(v[0], 0.0);
    }

    #[test]
    fn test_normalize_nan_sum_is_degenerate() {
        let mut v = DVector::from_vec(vec![f64::NAN, 1.0]);
        let err = normalize(&mut v, "nan test").unwrap_err();
        assert!(matches!(err, HmmError::NumericalDegeneracy { .. }));
    }

    #[test]
    fn test_argmax() {
        let v = DVector::from_vec(vec![0.1, 0.7, 0.2]);
        assert_eq!(argmax(&v), 1);

        // Ties resolve to the lowest index
        let v = DVector::from_vec(vec![0.5, 0.5]);
        assert_eq!(argmax(&v), 0);
    }
}
