//! Weibull cumulative failure probability

use crate::error::DomainError;
use crate::math::require_positive;

/// `F(N) = 1 - exp(-(N / eta)^beta)`
///
/// # Arguments
/// * `cycles` - Cycle count (may be `+inf`)
/// * `beta` - Shape parameter
/// * `eta` - Scale parameter after degradation
pub fn weibull_failure_probability(cycles: f64, beta: f64, eta: f64) -> Result<f64, DomainError> {
    require_positive("eta", eta)?;
    require_positive("weibull_beta", beta)?;
    let ratio = cycles / eta;
    if ratio.is_nan() || ratio < 0.0 {
        return Err(DomainError::new("cycles / eta", ratio, ">= 0"));
    }
    Ok(1.0 - (-ratio.powf(beta)).exp())
}
