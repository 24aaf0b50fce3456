//! Benchmarks for fatigue damage evaluation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use thermal_fatigue::prelude::*;

fn create_series(entities: u32, steps: usize) -> (TemperatureSeries, GradientSeries, MaterialMap) {
    let mut materials = MaterialMap::new();
    materials.add_material(1, MaterialProperties::silicon()).unwrap();
    materials.add_material(2, MaterialProperties::solder()).unwrap();
    materials.assign_all(0..entities / 2, 1).unwrap();
    materials.assign_all(entities / 2..entities, 2).unwrap();

    let ids: Vec<EntityId> = (0..entities).collect();
    let mut temps = TemperatureSeries::new();
    let mut grads = GradientSeries::new();
    for t in 0..steps {
        let data: Vec<Vec<f64>> = ids
            .iter()
            .map(|&id| {
                let base = 300.0 + (id % 50) as f64 + t as f64;
                vec![base, base + 2.0, base + 4.0, base + 1.0]
            })
            .collect();
        let g: Vec<GradVec> = ids
            .iter()
            .map(|&id| GradVec::from_vec(vec![(id % 7) as f64, 1.0, 0.5]))
            .collect();
        temps.add_field(t, Field::new(Scoping::elemental(ids.clone()), data).unwrap());
        grads.add_field(t, Field::new(Scoping::elemental(ids.clone()), g).unwrap());
    }
    (temps, grads, materials)
}

fn benchmark_small_mesh(c: &mut Criterion) {
    let (temps, grads, materials) = create_series(1_000, 10);
    c.bench_function("damage_1k_entities_10_steps", |b| {
        b.iter(|| {
            let result = DamageCalculator::new().compute(&temps, &grads, &materials).unwrap();
            black_box(result);
        })
    });
}

fn benchmark_large_mesh(c: &mut Criterion) {
    let (temps, grads, materials) = create_series(100_000, 10);
    c.bench_function("damage_100k_entities_10_steps_parallel", |b| {
        b.iter(|| {
            let result = DamageCalculator::new().compute(&temps, &grads, &materials).unwrap();
            black_box(result);
        })
    });
    c.bench_function("damage_100k_entities_10_steps_sequential", |b| {
        let calc = DamageCalculator::with_options(DamageOptions::default().sequential());
        b.iter(|| {
            let result = calc.compute(&temps, &grads, &materials).unwrap();
            black_box(result);
        })
    });
}

fn benchmark_workflow(c: &mut Criterion) {
    let (temps, grads, materials) = create_series(10_000, 10);
    c.bench_function("workflow_10k_entities", |b| {
        let wf = FatigueWorkflow::default();
        b.iter(|| {
            let out = wf.run(&temps, &grads, &materials).unwrap();
            black_box(out);
        })
    });
}

criterion_group!(
    benches,
    benchmark_small_mesh,
    benchmark_large_mesh,
    benchmark_workflow,
);

criterion_main!(benches);
