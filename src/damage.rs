//! Fatigue damage calculator
//!
//! Combines, per entity and time step:
//! 1. Coffin-Manson cycles to failure from the step's thermal swing
//! 2. Arrhenius degradation of the Weibull scale from the entity's mean temperature
//! 3. Weibull failure probability
//!
//! `damage = failure_probability * |gradient| * stress_sensitivity`

use log::{debug, info};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::analysis::{DamageOptions, ZeroStrainPolicy};
use crate::error::{DomainError, FatigueResult};
use crate::field::{DamageField, DamageResult, Field, GradientSeries, Scoping, TemperatureSeries};
use crate::material::{MaterialMap, MaterialProperties};
use crate::math::{self, GradVec};
use crate::models::{
    arrhenius_degradation, coffin_manson_cycles, plastic_strain, weibull_failure_probability,
};
use crate::sample::{SampleEntry, TimeSample};

/// Intermediate quantities of one entity's damage evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityDamage {
    /// Mean of the entity's temperature sub-samples (K)
    pub mean_temperature: f64,
    pub gradient_magnitude: f64,
    pub plastic_strain: f64,
    pub cycles_to_failure: f64,
    pub degradation: f64,
    /// Weibull scale after degradation
    pub eta: f64,
    pub failure_probability: f64,
    pub damage: f64,
}

/// Evaluate one entity.
///
/// # Arguments
/// * `props` - Material parameters of the entity
/// * `delta_temp` - Thermal swing of the whole time step
/// * `temperatures` - Temperature sub-samples of the entity (K)
/// * `gradient` - Thermal gradient vector of the entity
/// * `options` - Probability bound and zero-strain handling
pub fn evaluate_entity(
    props: &MaterialProperties,
    delta_temp: f64,
    temperatures: &[f64],
    gradient: &GradVec,
    options: &DamageOptions,
) -> Result<EntityDamage, DomainError> {
    let mean_temperature = math::mean(temperatures)?;
    let gradient_magnitude = math::magnitude(gradient);
    if !gradient_magnitude.is_finite() {
        return Err(DomainError::new("gradient_magnitude", gradient_magnitude, "finite"));
    }

    let degradation = arrhenius_degradation(props.ea, mean_temperature)?;
    let eta = props.weibull_eta * degradation;
    let strain = plastic_strain(props.alpha, delta_temp);

    if strain == 0.0 && options.zero_strain == ZeroStrainPolicy::NoDamage {
        // No cycle: unbounded life and nothing accrued
        return Ok(EntityDamage {
            mean_temperature,
            gradient_magnitude,
            plastic_strain: strain,
            cycles_to_failure: f64::INFINITY,
            degradation,
            eta,
            failure_probability: 0.0,
            damage: 0.0,
        });
    }

    let cycles_to_failure = coffin_manson_cycles(props.c, props.m, strain)?;
    let failure_probability = options.probability_bound.apply(weibull_failure_probability(
        cycles_to_failure,
        props.weibull_beta,
        eta,
    )?);

    let damage = failure_probability * gradient_magnitude * props.stress_sensitivity;
    if !damage.is_finite() {
        return Err(DomainError::new("damage", damage, "finite"));
    }

    Ok(EntityDamage {
        mean_temperature,
        gradient_magnitude,
        plastic_strain: strain,
        cycles_to_failure,
        degradation,
        eta,
        failure_probability,
        damage,
    })
}

/// Stateless damage evaluator.
///
/// ## Example
/// ```rust
/// use thermal_fatigue::prelude::*;
///
/// let mut materials = MaterialMap::new();
/// materials.add_material(1, MaterialProperties::silicon()).unwrap();
/// materials.assign(7, 1).unwrap();
///
/// let mut temps = TemperatureSeries::new();
/// temps.add_field(0, Field::new(Scoping::elemental(vec![7]), vec![vec![300.0, 320.0]]).unwrap());
/// let mut grads = GradientSeries::new();
/// grads.add_field(0, Field::new(Scoping::elemental(vec![7]), vec![GradVec::from_vec(vec![3.0, 4.0, 0.0])]).unwrap());
///
/// let damage = DamageCalculator::new().compute(&temps, &grads, &materials).unwrap();
/// let value = *damage.at_time(0).unwrap().get(7).unwrap();
/// assert!((value - 4.25).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DamageCalculator {
    options: DamageOptions,
}

impl DamageCalculator {
    /// Calculator with reference options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DamageOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DamageOptions {
        &self.options
    }

    /// Damage for every entity of every time step.
    ///
    /// Series shapes are validated for all steps before any step is evaluated.
    /// Any failure aborts the whole invocation without output.
    ///
    /// When several entities of one step fail, the sequential path reports the
    /// first failing entity in input order; the parallel path may report any of
    /// them.
    pub fn compute(
        &self,
        temperatures: &TemperatureSeries,
        gradients: &GradientSeries,
        materials: &MaterialMap,
    ) -> FatigueResult<DamageResult> {
        let samples = TimeSample::zip_series(temperatures, gradients)?;

        let mut result = DamageResult::new();
        for sample in &samples {
            let field = self.compute_step(sample, materials)?;
            result.add_field(sample.time, field);
        }

        if self.options.log {
            info!(
                "Fatigue damage computed for {} time steps",
                result.len()
            );
        }
        Ok(result)
    }

    /// Damage for a single time step, entities in input order
    pub fn compute_step(
        &self,
        sample: &TimeSample<'_>,
        materials: &MaterialMap,
    ) -> FatigueResult<DamageField> {
        let detailed = self.compute_step_detailed(sample, materials)?;
        Ok(Field::from_entries(
            sample.location,
            detailed.iter().map(|(id, d)| (id, d.damage)),
        ))
    }

    /// All intermediate quantities for a single time step
    pub fn compute_step_detailed(
        &self,
        sample: &TimeSample<'_>,
        materials: &MaterialMap,
    ) -> FatigueResult<Field<EntityDamage>> {
        let delta_temp = sample.step_delta_temp();
        debug!(
            "time {}: {} entities, delta_temp = {}",
            sample.time,
            sample.len(),
            delta_temp
        );
        if delta_temp == 0.0 && !sample.is_empty() {
            debug!("time {}: uniform temperature, zero plastic strain", sample.time);
        }

        let values = self.map_entries(&sample.entries, |entry| {
            let props = materials.properties(entry.entity)?;
            evaluate_entity(
                props,
                delta_temp,
                entry.temperatures,
                entry.gradient,
                &self.options,
            )
            .map_err(|e| e.at(sample.time, entry.entity))
        })?;

        if self.options.log {
            let peak = values.iter().map(|d| d.damage).fold(f64::NEG_INFINITY, f64::max);
            info!(
                "time {}: evaluated {} entities, peak damage {:.6e}",
                sample.time,
                values.len(),
                peak
            );
        }

        let ids = sample.entries.iter().map(|e| e.entity).collect();
        Field::new(Scoping::new(sample.location, ids), values)
    }

    /// Evaluate `f` over every entry, keeping input order. With `parallel`
    /// set, the reported error is from whichever failing entry rayon reaches
    /// first.
    #[cfg(feature = "parallel")]
    fn map_entries<F>(&self, entries: &[SampleEntry<'_>], f: F) -> FatigueResult<Vec<EntityDamage>>
    where
        F: Fn(&SampleEntry<'_>) -> FatigueResult<EntityDamage> + Send + Sync,
    {
        // Indexed collect keeps input order regardless of completion order
        if self.options.parallel {
            entries.par_iter().map(f).collect()
        } else {
            entries.iter().map(f).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn map_entries<F>(&self, entries: &[SampleEntry<'_>], f: F) -> FatigueResult<Vec<EntityDamage>>
    where
        F: Fn(&SampleEntry<'_>) -> FatigueResult<EntityDamage>,
    {
        entries.iter().map(f).collect()
    }
}

/// Compute damage with the reference options
pub fn calculate_fatigue_damage(
    temperatures: &TemperatureSeries,
    gradients: &GradientSeries,
    materials: &MaterialMap,
) -> FatigueResult<DamageResult> {
    DamageCalculator::new().compute(temperatures, gradients, materials)
}
