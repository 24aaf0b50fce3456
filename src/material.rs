//! Material reliability parameters and the entity → material → properties map

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, FatigueError, FatigueResult};
use crate::field::EntityId;
use crate::math::{require_non_negative, require_positive};

/// Material identifier
pub type MaterialId = u32;

/// Reliability-model parameters of one material
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MaterialProperties {
    /// Thermal-expansion-to-strain coefficient (1/K)
    pub alpha: f64,
    /// Coffin-Manson ductility coefficient
    #[serde(rename = "C")]
    pub c: f64,
    /// Coffin-Manson exponent
    pub m: f64,
    /// Arrhenius activation energy in eV
    #[serde(rename = "Ea")]
    pub ea: f64,
    /// Weibull shape parameter
    pub weibull_beta: f64,
    /// Weibull scale parameter before thermal degradation (cycles)
    pub weibull_eta: f64,
    /// Linear scale factor applied to the final damage value
    pub stress_sensitivity: f64,
}

impl MaterialProperties {
    /// Silicon die
    pub fn silicon() -> Self {
        Self {
            alpha: 2.6e-6,
            c: 0.026,
            m: 0.12,
            ea: 0.7,
            weibull_beta: 2.3,
            weibull_eta: 1e6,
            stress_sensitivity: 0.85,
        }
    }

    /// Solder joint alloy
    pub fn solder() -> Self {
        Self {
            alpha: 21e-6,
            c: 0.33,
            m: 0.18,
            ea: 0.5,
            weibull_beta: 1.8,
            weibull_eta: 5e5,
            stress_sensitivity: 1.2,
        }
    }

    /// Set the stress sensitivity
    pub fn with_stress_sensitivity(mut self, stress_sensitivity: f64) -> Self {
        self.stress_sensitivity = stress_sensitivity;
        self
    }

    /// Check every parameter that ends up under a root, power, logarithm or
    /// in a denominator.
    pub fn validate(&self) -> Result<(), DomainError> {
        require_positive("alpha", self.alpha)?;
        require_positive("C", self.c)?;
        require_positive("m", self.m)?;
        require_non_negative("Ea", self.ea)?;
        require_positive("weibull_beta", self.weibull_beta)?;
        require_positive("weibull_eta", self.weibull_eta)?;
        require_non_negative("stress_sensitivity", self.stress_sensitivity)?;
        Ok(())
    }
}

/// Serialized form of a [`MaterialMap`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct MaterialMapData {
    materials: BTreeMap<MaterialId, MaterialProperties>,
    #[serde(default)]
    assignments: BTreeMap<EntityId, MaterialId>,
}

/// Two-level lookup: entity id → material id → [`MaterialProperties`].
///
/// A missing entry at either level is an error; there is no default material.
#[derive(Debug, Clone, Default)]
pub struct MaterialMap {
    materials: BTreeMap<MaterialId, MaterialProperties>,
    assignments: HashMap<EntityId, MaterialId>,
}

impl MaterialMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a material's parameters
    pub fn add_material(&mut self, id: MaterialId, properties: MaterialProperties) -> FatigueResult<()> {
        if self.materials.contains_key(&id) {
            return Err(FatigueError::DuplicateMaterial(id));
        }
        properties
            .validate()
            .map_err(|source| FatigueError::InvalidMaterial { material: id, source })?;
        self.materials.insert(id, properties);
        Ok(())
    }

    /// Assign an entity to a registered material. Reassigning replaces the
    /// previous material.
    pub fn assign(&mut self, entity: EntityId, material: MaterialId) -> FatigueResult<()> {
        if !self.materials.contains_key(&material) {
            return Err(FatigueError::MaterialNotFound(material));
        }
        self.assignments.insert(entity, material);
        Ok(())
    }

    /// Assign every entity in `entities` to `material`
    pub fn assign_all<I>(&mut self, entities: I, material: MaterialId) -> FatigueResult<()>
    where
        I: IntoIterator<Item = EntityId>,
    {
        if !self.materials.contains_key(&material) {
            return Err(FatigueError::MaterialNotFound(material));
        }
        for entity in entities {
            self.assignments.insert(entity, material);
        }
        Ok(())
    }

    /// Material id of an entity
    pub fn material_of(&self, entity: EntityId) -> FatigueResult<MaterialId> {
        self.assignments
            .get(&entity)
            .copied()
            .ok_or(FatigueError::EntityNotAssigned(entity))
    }

    /// Resolve an entity to its material parameters through both levels
    pub fn properties(&self, entity: EntityId) -> FatigueResult<&MaterialProperties> {
        let material = self.material_of(entity)?;
        self.materials
            .get(&material)
            .ok_or(FatigueError::MaterialNotFound(material))
    }

    pub fn material(&self, id: MaterialId) -> Option<&MaterialProperties> {
        self.materials.get(&id)
    }

    /// Registered material ids in ascending order
    pub fn material_ids(&self) -> Vec<MaterialId> {
        self.materials.keys().copied().collect()
    }

    /// Entities assigned to `material`, sorted by id
    pub fn entities_of(&self, material: MaterialId) -> FatigueResult<Vec<EntityId>> {
        if !self.materials.contains_key(&material) {
            return Err(FatigueError::MaterialNotFound(material));
        }
        let mut entities: Vec<_> = self
            .assignments
            .iter()
            .filter(|(_, &m)| m == material)
            .map(|(&e, _)| e)
            .collect();
        entities.sort_unstable();
        Ok(entities)
    }

    pub fn num_assignments(&self) -> usize {
        self.assignments.len()
    }

    /// Parse a material table of the form
    /// `{"materials": {"1": {"alpha": ..., "C": ..., ...}}, "assignments": {"101": 1}}`
    pub fn from_json(json: &str) -> FatigueResult<Self> {
        let data: MaterialMapData = serde_json::from_str(json)?;
        let mut map = Self::new();
        for (id, props) in data.materials {
            map.add_material(id, props)?;
        }
        for (entity, material) in data.assignments {
            map.assign(entity, material)?;
        }
        Ok(map)
    }

    pub fn to_json(&self) -> FatigueResult<String> {
        let data = MaterialMapData {
            materials: self.materials.clone(),
            assignments: self.assignments.iter().map(|(&e, &m)| (e, m)).collect(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }
}
