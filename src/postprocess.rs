//! Downstream processing of damage results: thresholding, rescoping, statistics

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::FatigueResult;
use crate::field::{DamageResult, EntityId, Field, FieldsContainer, Location};
use crate::material::{MaterialId, MaterialMap};

/// Flag entities whose damage exceeds `critical` (strictly greater)
pub fn threshold(damage: &DamageResult, critical: f64) -> FieldsContainer<bool> {
    damage.map_fields(|field| {
        Field::from_entries(
            field.scoping().location,
            field.iter().map(|(id, &d)| (id, d > critical)),
        )
    })
}

/// Keep only the listed entities in every time step. Order within a step is
/// the order of the damage field, not of `ids`.
pub fn rescope(damage: &DamageResult, ids: &[EntityId]) -> DamageResult {
    let keep: HashSet<EntityId> = ids.iter().copied().collect();
    damage.map_fields(|field| {
        Field::from_entries(
            field.scoping().location,
            field
                .iter()
                .filter(|(id, _)| keep.contains(id))
                .map(|(id, &d)| (id, d)),
        )
    })
}

/// Restrict a damage result to the entities assigned to one material
pub fn rescope_by_material(
    damage: &DamageResult,
    materials: &MaterialMap,
    material: MaterialId,
) -> FatigueResult<DamageResult> {
    let entities = materials.entities_of(material)?;
    Ok(rescope(damage, &entities))
}

/// Damage statistics of one entity over all time steps
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityStatistics {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Number of time steps the entity appeared in
    pub count: usize,
}

impl EntityStatistics {
    fn first(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            mean: value,
            count: 1,
        }
    }

    fn push(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
        self.count += 1;
        // Running mean
        self.mean += (value - self.mean) / self.count as f64;
    }
}

/// Per-entity min / max / mean over time. Entities are listed in the order
/// they first appear; the location is taken from the first step.
pub fn statistics(damage: &DamageResult) -> Field<EntityStatistics> {
    let location = damage
        .get(0)
        .map(|tf| tf.field.scoping().location)
        .unwrap_or(Location::Elemental);

    let mut order: Vec<EntityId> = Vec::new();
    let mut stats: HashMap<EntityId, EntityStatistics> = HashMap::new();
    for tf in damage {
        for (id, &d) in tf.field.iter() {
            match stats.get_mut(&id) {
                Some(s) => s.push(d),
                None => {
                    order.push(id);
                    stats.insert(id, EntityStatistics::first(d));
                }
            }
        }
    }

    Field::from_entries(
        location,
        order.into_iter().filter_map(|id| stats.remove(&id).map(|s| (id, s))),
    )
}

/// Entity with the largest damage in each time step: `(time, entity, damage)`
pub fn peak_per_step(damage: &DamageResult) -> Vec<(usize, EntityId, f64)> {
    damage
        .iter()
        .filter_map(|tf| {
            tf.field
                .iter()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(id, &d)| (tf.time, id, d))
        })
        .collect()
}
