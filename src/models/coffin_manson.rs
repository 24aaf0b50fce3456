//! Coffin-Manson low-cycle fatigue life

use crate::error::DomainError;
use crate::math::require_positive;

/// Plastic strain amplitude produced by a thermal swing
///
/// # Arguments
/// * `alpha` - Thermal-expansion-to-strain coefficient (1/K)
/// * `delta_temp` - Temperature range of the cycle (K)
pub fn plastic_strain(alpha: f64, delta_temp: f64) -> f64 {
    alpha * delta_temp
}

/// Cycles to failure, `N = (C / plastic_strain)^(1/m)`
///
/// # Arguments
/// * `c` - Ductility coefficient
/// * `m` - Exponent
/// * `plastic_strain` - Plastic strain amplitude
///
/// # Returns
/// Cycle count. May overflow to `+inf` for very small strains, which the
/// Weibull law maps to a failure probability of 1.
pub fn coffin_manson_cycles(c: f64, m: f64, plastic_strain: f64) -> Result<f64, DomainError> {
    require_positive("plastic_strain", plastic_strain)?;
    require_positive("m", m)?;
    let base = c / plastic_strain;
    if base.is_nan() || base < 0.0 {
        // Negative base under a fractional exponent
        return Err(DomainError::new("C / plastic_strain", base, ">= 0"));
    }
    Ok(base.powf(1.0 / m))
}
