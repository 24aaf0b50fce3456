//! Typed thermo-mechanical fatigue pipeline
//!
//! Damage evaluation followed by critical-region thresholding, per-material
//! rescoping and per-entity statistics, composed as plain function calls.

use std::collections::BTreeMap;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::analysis::DamageOptions;
use crate::damage::DamageCalculator;
use crate::error::{FatigueError, FatigueResult};
use crate::field::{DamageResult, Field, FieldsContainer, GradientSeries, TemperatureSeries};
use crate::material::{MaterialId, MaterialMap};
use crate::postprocess::{self, EntityStatistics};

/// Configuration of a [`FatigueWorkflow`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub options: DamageOptions,
    /// Damage level above which an entity is flagged as critical
    pub critical_damage: f64,
    /// Produce one rescoped damage result per registered material
    pub per_material: bool,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            options: DamageOptions::default(),
            critical_damage: 0.8,
            per_material: true,
        }
    }
}

impl WorkflowConfig {
    pub fn with_options(mut self, options: DamageOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_critical_damage(mut self, critical: f64) -> Self {
        self.critical_damage = critical;
        self
    }

    pub fn without_material_split(mut self) -> Self {
        self.per_material = false;
        self
    }

    pub fn from_json(json: &str) -> FatigueResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FatigueResult<()> {
        if !self.critical_damage.is_finite() {
            return Err(FatigueError::InvalidInput(format!(
                "critical_damage must be finite, got {}",
                self.critical_damage
            )));
        }
        Ok(())
    }
}

/// Everything the pipeline produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowOutput {
    pub damage: DamageResult,
    /// `true` where damage exceeds the critical level
    pub critical_regions: FieldsContainer<bool>,
    /// Damage restricted to each material's entities
    pub by_material: BTreeMap<MaterialId, DamageResult>,
    pub statistics: Field<EntityStatistics>,
}

impl WorkflowOutput {
    /// Number of (time step, entity) pairs flagged critical
    pub fn critical_count(&self) -> usize {
        self.critical_regions
            .iter()
            .map(|tf| tf.field.data().iter().filter(|&&c| c).count())
            .sum()
    }
}

/// Damage evaluation plus downstream processing
#[derive(Debug, Clone, Default)]
pub struct FatigueWorkflow {
    config: WorkflowConfig,
}

impl FatigueWorkflow {
    pub fn new(config: WorkflowConfig) -> FatigueResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WorkflowConfig {
        &self.config
    }

    pub fn run(
        &self,
        temperatures: &TemperatureSeries,
        gradients: &GradientSeries,
        materials: &MaterialMap,
    ) -> FatigueResult<WorkflowOutput> {
        let calculator = DamageCalculator::with_options(self.config.options.clone());
        let damage = calculator.compute(temperatures, gradients, materials)?;

        let critical_regions = postprocess::threshold(&damage, self.config.critical_damage);

        let mut by_material = BTreeMap::new();
        if self.config.per_material {
            for id in materials.material_ids() {
                by_material.insert(id, postprocess::rescope_by_material(&damage, materials, id)?);
            }
        }

        let statistics = postprocess::statistics(&damage);

        let output = WorkflowOutput {
            damage,
            critical_regions,
            by_material,
            statistics,
        };
        debug!(
            "workflow: {} time steps, {} critical entries (threshold {})",
            output.damage.len(),
            output.critical_count(),
            self.config.critical_damage
        );
        Ok(output)
    }
}
