//! Zipped per-time-step view over a temperature field and a gradient field

use crate::error::{FatigueError, FatigueResult};
use crate::field::{EntityId, GradientSeries, Location, TemperatureSeries, TimeField};
use crate::math::{self, GradVec};

/// Inputs for one entity within one time step
#[derive(Debug, Clone, Copy)]
pub struct SampleEntry<'a> {
    pub entity: EntityId,
    /// Temperature sub-samples in Kelvin (e.g. nodal values within an element)
    pub temperatures: &'a [f64],
    pub gradient: &'a GradVec,
}

/// One discrete time step: ordered (entity, temperatures, gradient) tuples
#[derive(Debug, Clone)]
pub struct TimeSample<'a> {
    pub time: usize,
    pub location: Location,
    pub entries: Vec<SampleEntry<'a>>,
}

impl<'a> TimeSample<'a> {
    /// Pair a temperature field with a gradient field for the same step.
    ///
    /// Both fields must share the time label and list the same entities in
    /// the same order.
    pub fn zip(
        temperature: &'a TimeField<Vec<f64>>,
        gradient: &'a TimeField<GradVec>,
    ) -> FatigueResult<Self> {
        if temperature.time != gradient.time {
            return Err(FatigueError::ShapeMismatch(format!(
                "temperature field is labelled time {} but gradient field is labelled time {}",
                temperature.time, gradient.time
            )));
        }
        let time = temperature.time;

        let t_ids = temperature.field.scoping().ids();
        let g_ids = gradient.field.scoping().ids();
        if t_ids != g_ids {
            return Err(FatigueError::ShapeMismatch(format!(
                "time {}: temperature and gradient fields are scoped on different entities ({} vs {})",
                time,
                t_ids.len(),
                g_ids.len()
            )));
        }

        let entries = temperature
            .field
            .iter()
            .zip(gradient.field.data())
            .map(|((entity, temps), grad)| SampleEntry {
                entity,
                temperatures: temps.as_slice(),
                gradient: grad,
            })
            .collect();

        Ok(Self {
            time,
            location: temperature.field.scoping().location,
            entries,
        })
    }

    /// Zip every step of two series, failing before anything is computed if
    /// the series disagree in length or in any step's entity set.
    pub fn zip_series(
        temperatures: &'a TemperatureSeries,
        gradients: &'a GradientSeries,
    ) -> FatigueResult<Vec<Self>> {
        if temperatures.len() != gradients.len() {
            return Err(FatigueError::ShapeMismatch(format!(
                "temperature series has {} time steps but gradient series has {}",
                temperatures.len(),
                gradients.len()
            )));
        }
        temperatures
            .iter()
            .zip(gradients.iter())
            .map(|(t, g)| Self::zip(t, g))
            .collect()
    }

    /// Thermal swing of the whole step: max minus min over every temperature
    /// sub-sample of every entity. This is one value shared by all entities,
    /// not a per-entity range. Zero for an empty step.
    pub fn step_delta_temp(&self) -> f64 {
        math::range(
            self.entries
                .iter()
                .flat_map(|e| e.temperatures.iter().copied()),
        )
        .unwrap_or(0.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, FieldsContainer, Scoping};
    use approx::assert_relative_eq;

    fn grad(x: f64, y: f64, z: f64) -> GradVec {
        GradVec::from_vec(vec![x, y, z])
    }

    fn temps(entries: Vec<(EntityId, Vec<f64>)>) -> TimeField<Vec<f64>> {
        TimeField {
            time: 0,
            field: Field::from_entries(Location::Elemental, entries),
        }
    }

    fn grads(entries: Vec<(EntityId, GradVec)>) -> TimeField<GradVec> {
        TimeField {
            time: 0,
            field: Field::from_entries(Location::Elemental, entries),
        }
    }

    #[test]
    fn test_zip_preserves_order() {
        let t = temps(vec![(5, vec![300.0]), (2, vec![310.0, 320.0])]);
        let g = grads(vec![(5, grad(1.0, 0.0, 0.0)), (2, grad(0.0, 2.0, 0.0))]);
        let sample = TimeSample::zip(&t, &g).unwrap();

        let ids: Vec<_> = sample.entries.iter().map(|e| e.entity).collect();
        assert_eq!(ids, vec![5, 2]);
        assert_eq!(sample.entries[1].temperatures, &[310.0, 320.0]);
    }

    #[test]
    fn test_delta_temp_is_global_range() {
        let t = temps(vec![(1, vec![300.0, 305.0]), (2, vec![290.0, 330.0])]);
        let g = grads(vec![(1, grad(0.0, 0.0, 0.0)), (2, grad(0.0, 0.0, 0.0))]);
        let sample = TimeSample::zip(&t, &g).unwrap();
        assert_relative_eq!(sample.step_delta_temp(), 40.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zip_rejects_different_entities() {
        let t = temps(vec![(1, vec![300.0]), (2, vec![300.0])]);
        let g = grads(vec![(2, grad(0.0, 0.0, 0.0)), (1, grad(0.0, 0.0, 0.0))]);
        let err = TimeSample::zip(&t, &g).unwrap_err();
        assert!(matches!(err, FatigueError::ShapeMismatch(_)));
    }

    #[test]
    fn test_zip_rejects_time_label_mismatch() {
        let t = temps(vec![(1, vec![300.0])]);
        let mut g = grads(vec![(1, grad(0.0, 0.0, 0.0))]);
        g.time = 4;
        assert!(TimeSample::zip(&t, &g).is_err());
    }

    #[test]
    fn test_zip_series_length_mismatch() {
        let mut ts = FieldsContainer::new();
        ts.add_field(0, Field::new(Scoping::elemental(vec![1]), vec![vec![300.0]]).unwrap());
        ts.add_field(1, Field::new(Scoping::elemental(vec![1]), vec![vec![310.0]]).unwrap());
        let mut gs = FieldsContainer::new();
        gs.add_field(0, Field::new(Scoping::elemental(vec![1]), vec![grad(1.0, 0.0, 0.0)]).unwrap());

        let err = TimeSample::zip_series(&ts, &gs).unwrap_err();
        assert!(matches!(err, FatigueError::ShapeMismatch(_)));
    }
}
