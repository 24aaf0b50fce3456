//! Thermal Fatigue - per-entity fatigue damage from thermal result fields
//!
//! Turns time-indexed temperature and thermal-gradient fields into a scalar
//! damage value per mesh entity per time step by combining:
//! - Coffin-Manson cycles to failure
//! - Arrhenius degradation of the Weibull scale
//! - Weibull failure probability
//!
//! ## Example
//! ```rust
//! use thermal_fatigue::prelude::*;
//!
//! let mut materials = MaterialMap::new();
//! materials.add_material(1, MaterialProperties::silicon()).unwrap();
//! materials.add_material(2, MaterialProperties::solder()).unwrap();
//! materials.assign(10, 1).unwrap();
//! materials.assign(20, 2).unwrap();
//!
//! let scoping = Scoping::elemental(vec![10, 20]);
//! let mut temps = TemperatureSeries::new();
//! temps.add_field(0, Field::new(scoping.clone(), vec![vec![300.0, 320.0], vec![330.0]]).unwrap());
//! let mut grads = GradientSeries::new();
//! grads.add_field(
//!     0,
//!     Field::new(
//!         scoping,
//!         vec![
//!             GradVec::from_vec(vec![3.0, 4.0, 0.0]),
//!             GradVec::from_vec(vec![0.0, 0.0, 0.0]),
//!         ],
//!     )
//!     .unwrap(),
//! );
//!
//! let output = FatigueWorkflow::default().run(&temps, &grads, &materials).unwrap();
//! assert_eq!(output.damage.at_time(0).unwrap().get(20), Some(&0.0));
//! assert_eq!(output.critical_count(), 1);
//! ```

pub mod analysis;
pub mod damage;
pub mod error;
pub mod field;
pub mod material;
pub mod math;
pub mod models;
pub mod postprocess;
pub mod sample;
pub mod workflow;

// Re-export common types
pub mod prelude {
    pub use crate::analysis::{DamageOptions, ProbabilityBound, ZeroStrainPolicy};
    pub use crate::damage::{calculate_fatigue_damage, evaluate_entity, DamageCalculator, EntityDamage};
    pub use crate::error::{DomainError, ErrorCategory, FatigueError, FatigueResult};
    pub use crate::field::{
        DamageField, DamageResult, EntityId, Field, FieldsContainer, GradientField,
        GradientSeries, Location, Scoping, TemperatureField, TemperatureSeries, TimeField,
    };
    pub use crate::material::{MaterialId, MaterialMap, MaterialProperties};
    pub use crate::math::GradVec;
    pub use crate::postprocess::EntityStatistics;
    pub use crate::sample::{SampleEntry, TimeSample};
    pub use crate::workflow::{FatigueWorkflow, WorkflowConfig, WorkflowOutput};
}
