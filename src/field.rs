//! Result fields and time-indexed field containers

use serde::{Deserialize, Serialize};

use crate::error::{FatigueError, FatigueResult};
use crate::math::GradVec;

/// Mesh entity (node or element) identifier
pub type EntityId = u32;

/// Where the values of a field live on the mesh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Location {
    Nodal,
    #[default]
    Elemental,
}

/// Ordered set of entity ids a field is defined on
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoping {
    #[serde(default)]
    pub location: Location,
    ids: Vec<EntityId>,
}

impl Scoping {
    /// Create a scoping over the given ids, in order
    pub fn new(location: Location, ids: Vec<EntityId>) -> Self {
        Self { location, ids }
    }

    pub fn elemental(ids: Vec<EntityId>) -> Self {
        Self::new(Location::Elemental, ids)
    }

    pub fn nodal(ids: Vec<EntityId>) -> Self {
        Self::new(Location::Nodal, ids)
    }

    /// Entity id at position `index`
    pub fn id(&self, index: usize) -> Option<EntityId> {
        self.ids.get(index).copied()
    }

    pub fn ids(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Position of an entity in this scoping
    pub fn index_of(&self, entity: EntityId) -> Option<usize> {
        self.ids.iter().position(|&id| id == entity)
    }
}

/// One value per scoped entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "RawField<T>",
    bound(deserialize = "T: Deserialize<'de>")
)]
pub struct Field<T> {
    scoping: Scoping,
    data: Vec<T>,
}

/// Unchecked wire form of a [`Field`]
#[derive(Deserialize)]
struct RawField<T> {
    scoping: Scoping,
    data: Vec<T>,
}

impl<T> TryFrom<RawField<T>> for Field<T> {
    type Error = FatigueError;

    fn try_from(raw: RawField<T>) -> FatigueResult<Self> {
        Self::new(raw.scoping, raw.data)
    }
}

impl<T> Field<T> {
    /// Create a field, checking that every scoped entity has exactly one value
    pub fn new(scoping: Scoping, data: Vec<T>) -> FatigueResult<Self> {
        if scoping.len() != data.len() {
            return Err(FatigueError::ShapeMismatch(format!(
                "field has {} entities but {} values",
                scoping.len(),
                data.len()
            )));
        }
        Ok(Self { scoping, data })
    }

    /// Build a field from `(entity, value)` pairs, keeping their order
    pub fn from_entries<I>(location: Location, entries: I) -> Self
    where
        I: IntoIterator<Item = (EntityId, T)>,
    {
        let (ids, data): (Vec<_>, Vec<_>) = entries.into_iter().unzip();
        Self {
            scoping: Scoping::new(location, ids),
            data,
        }
    }

    pub fn scoping(&self) -> &Scoping {
        &self.scoping
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value for a given entity id
    pub fn get(&self, entity: EntityId) -> Option<&T> {
        self.scoping.index_of(entity).and_then(|i| self.data.get(i))
    }

    /// Iterate `(entity, value)` in scoping order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
        self.scoping.ids().iter().copied().zip(self.data.iter())
    }
}

/// A field labelled with its time step index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeField<T> {
    pub time: usize,
    pub field: Field<T>,
}

/// Ordered-by-time collection of fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldsContainer<T> {
    fields: Vec<TimeField<T>>,
}

impl<T> Default for FieldsContainer<T> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<T> FieldsContainer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the field for a time step
    pub fn add_field(&mut self, time: usize, field: Field<T>) {
        self.fields.push(TimeField { time, field });
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field at position `index` in the container (not the time label)
    pub fn get(&self, index: usize) -> Option<&TimeField<T>> {
        self.fields.get(index)
    }

    /// Field carrying the given time label
    pub fn at_time(&self, time: usize) -> Option<&Field<T>> {
        self.fields.iter().find(|f| f.time == time).map(|f| &f.field)
    }

    pub fn times(&self) -> Vec<usize> {
        self.fields.iter().map(|f| f.time).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeField<T>> {
        self.fields.iter()
    }

    /// Apply `f` to every field, keeping the time labels
    pub fn map_fields<U, F>(&self, mut f: F) -> FieldsContainer<U>
    where
        F: FnMut(&Field<T>) -> Field<U>,
    {
        FieldsContainer {
            fields: self
                .fields
                .iter()
                .map(|tf| TimeField {
                    time: tf.time,
                    field: f(&tf.field),
                })
                .collect(),
        }
    }
}

impl<'a, T> IntoIterator for &'a FieldsContainer<T> {
    type Item = &'a TimeField<T>;
    type IntoIter = std::slice::Iter<'a, TimeField<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Temperature sub-samples (Kelvin) per entity
pub type TemperatureField = Field<Vec<f64>>;
/// Thermal gradient vector per entity
pub type GradientField = Field<GradVec>;
/// Scalar damage per entity
pub type DamageField = Field<f64>;

pub type TemperatureSeries = FieldsContainer<Vec<f64>>;
pub type GradientSeries = FieldsContainer<GradVec>;
/// Damage per entity per time step, same indexing as the input series
pub type DamageResult = FieldsContainer<f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_length_checked() {
        let scoping = Scoping::elemental(vec![1, 2, 3]);
        assert!(Field::new(scoping.clone(), vec![0.1, 0.2, 0.3]).is_ok());

        let err = Field::new(scoping, vec![0.1]).unwrap_err();
        assert!(matches!(err, FatigueError::ShapeMismatch(_)));
    }

    #[test]
    fn test_field_lookup_by_entity() {
        let field = Field::new(Scoping::nodal(vec![10, 4]), vec![1.5, 2.5]).unwrap();
        assert_eq!(field.get(4), Some(&2.5));
        assert_eq!(field.get(99), None);
        assert_eq!(field.scoping().ids(), &[10, 4]);
        assert_eq!(field.scoping().location, Location::Nodal);
    }

    #[test]
    fn test_deserialize_checks_field_length() {
        let json = r#"{"fields": [{"time": 0, "field": {"scoping": {"ids": [1, 2]}, "data": [0.5]}}]}"#;
        let err = serde_json::from_str::<DamageResult>(json).unwrap_err();
        assert!(err.to_string().contains("2 entities but 1 values"));

        let json = r#"{"fields": [{"time": 0, "field": {"scoping": {"ids": [1, 2]}, "data": [0.5, 0.7]}}]}"#;
        let damage: DamageResult = serde_json::from_str(json).unwrap();
        let field = damage.at_time(0).unwrap();
        assert_eq!(field.get(2), Some(&0.7));
        assert_eq!(field.scoping().location, Location::Elemental);
    }

    #[test]
    fn test_serialize_then_deserialize_field() {
        let field = Field::new(Scoping::nodal(vec![3, 1]), vec![0.25, 0.5]).unwrap();
        let json = serde_json::to_string(&field).unwrap();
        let back: Field<f64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, field);
    }

    #[test]
    fn test_container_time_labels() {
        let mut fc = FieldsContainer::new();
        fc.add_field(1, Field::from_entries(Location::Elemental, vec![(1, 0.5)]));
        fc.add_field(2, Field::from_entries(Location::Elemental, vec![(1, 0.7)]));

        assert_eq!(fc.len(), 2);
        assert_eq!(fc.times(), vec![1, 2]);
        assert_eq!(fc.at_time(2).and_then(|f| f.get(1)), Some(&0.7));
        assert!(fc.at_time(0).is_none());

        let doubled = fc.map_fields(|f| Field::from_entries(Location::Elemental, f.iter().map(|(id, v)| (id, v * 2.0))));
        assert_eq!(doubled.at_time(1).and_then(|f| f.get(1)), Some(&1.0));
    }
}
