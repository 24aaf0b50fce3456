//! Numeric helpers shared by the reliability models

use nalgebra::DVector;

use crate::error::DomainError;

/// Gradient vector attached to one entity (3 components for solid meshes,
/// but any dimension is accepted)
pub type GradVec = DVector<f64>;

/// Boltzmann constant in eV/K
pub const BOLTZMANN_EV: f64 = 8.617e-5;

/// Arithmetic mean of a set of sub-samples
///
/// # Returns
/// `DomainError` for an empty slice
pub fn mean(values: &[f64]) -> Result<f64, DomainError> {
    if values.is_empty() {
        return Err(DomainError::new("sample_count", 0.0, ">= 1"));
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Range (max - min) over every value yielded by the iterator.
/// Returns `None` when the iterator is empty.
pub fn range<I>(values: I) -> Option<f64>
where
    I: IntoIterator<Item = f64>,
{
    let mut iter = values.into_iter();
    let first = iter.next()?;
    let (min, max) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    Some(max - min)
}

/// Euclidean (L2) norm of a gradient vector
pub fn magnitude(gradient: &GradVec) -> f64 {
    gradient.norm()
}

/// Reject non-finite or non-positive values
pub fn require_positive(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::new(quantity, value, "finite and > 0"))
    }
}

/// Reject non-finite or negative values
pub fn require_non_negative(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(DomainError::new(quantity, value, "finite and >= 0"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean() {
        assert_relative_eq!(mean(&[300.0, 320.0]).unwrap(), 310.0, epsilon = 1e-12);
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_range_over_all_values() {
        let r = range([310.0, 295.0, 330.0, 301.0]).unwrap();
        assert_relative_eq!(r, 35.0, epsilon = 1e-12);
        assert_eq!(range(std::iter::empty()), None);
        assert_eq!(range([42.0]), Some(0.0));
    }

    #[test]
    fn test_magnitude() {
        let g = GradVec::from_vec(vec![3.0, 4.0, 0.0]);
        assert_relative_eq!(magnitude(&g), 5.0, epsilon = 1e-12);

        // N-component gradients are accepted
        let g2 = GradVec::from_vec(vec![1.0, 2.0, 2.0, 4.0]);
        assert_relative_eq!(magnitude(&g2), 5.0, epsilon = 1e-12);
    }

    #[test]
    fn test_require_positive() {
        assert!(require_positive("x", 1.0).is_ok());
        assert!(require_positive("x", 0.0).is_err());
        assert!(require_positive("x", f64::NAN).is_err());
        assert!(require_non_negative("x", 0.0).is_ok());
        assert!(require_non_negative("x", -1e-12).is_err());
    }
}
