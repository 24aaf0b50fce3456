//! Arrhenius thermal degradation

use crate::error::DomainError;
use crate::math::{require_positive, BOLTZMANN_EV};

/// Life scaling factor `exp(-Ea / (k_B * T))`
///
/// # Arguments
/// * `ea` - Activation energy in eV
/// * `mean_temp` - Mean temperature of the entity in Kelvin
pub fn arrhenius_degradation(ea: f64, mean_temp: f64) -> Result<f64, DomainError> {
    require_positive("mean_temperature", mean_temp)?;
    let factor = (-ea / (BOLTZMANN_EV * mean_temp)).exp();
    if factor.is_nan() {
        return Err(DomainError::new("Ea", ea, "finite"));
    }
    Ok(factor)
}
