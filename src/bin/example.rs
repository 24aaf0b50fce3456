//! Thermal Fatigue Example - silicon die on a solder layer under a heating cycle

use anyhow::Context;
use thermal_fatigue::postprocess;
use thermal_fatigue::prelude::*;

const SILICON: MaterialId = 1;
const SOLDER: MaterialId = 2;

/// Elements per material layer
const ELEMENTS_PER_LAYER: u32 = 8;
/// Element length in metres
const DX: f64 = 0.5e-3;

/// Nodal temperature (K) at position `x` during step `t`: a hot spot centred
/// on the strip whose amplitude swings over the cycle.
fn nodal_temperature(x: f64, t: usize, length: f64) -> f64 {
    let amplitude = 40.0 + 30.0 * (2.0 * std::f64::consts::PI * t as f64 / 10.0).sin();
    let width = length / 4.0;
    let r = (x - length / 2.0) / width;
    300.0 + amplitude * (-r * r).exp()
}

fn build_inputs() -> anyhow::Result<(TemperatureSeries, GradientSeries, MaterialMap)> {
    let mut materials = MaterialMap::new();
    materials.add_material(SILICON, MaterialProperties::silicon())?;
    materials.add_material(SOLDER, MaterialProperties::solder())?;

    // Elements 1..=8 are silicon, 9..=16 solder, laid out along X
    let silicon: Vec<EntityId> = (1..=ELEMENTS_PER_LAYER).collect();
    let solder: Vec<EntityId> = (ELEMENTS_PER_LAYER + 1..=2 * ELEMENTS_PER_LAYER).collect();
    materials.assign_all(silicon.iter().copied(), SILICON)?;
    materials.assign_all(solder.iter().copied(), SOLDER)?;

    let ids: Vec<EntityId> = silicon.into_iter().chain(solder).collect();
    let length = DX * ids.len() as f64;

    let mut temps = TemperatureSeries::new();
    let mut grads = GradientSeries::new();
    for t in 1..=10 {
        let mut element_temps = Vec::with_capacity(ids.len());
        let mut element_grads = Vec::with_capacity(ids.len());
        for (i, _) in ids.iter().enumerate() {
            let x0 = DX * i as f64;
            let t0 = nodal_temperature(x0, t, length);
            let t1 = nodal_temperature(x0 + DX, t, length);
            element_temps.push(vec![t0, t1]);
            // K/mm along the strip, small through-thickness component
            element_grads.push(GradVec::from_vec(vec![(t1 - t0) / (DX * 1e3), 0.05, 0.0]));
        }
        temps.add_field(t, Field::new(Scoping::elemental(ids.clone()), element_temps)?);
        grads.add_field(t, Field::new(Scoping::elemental(ids.clone()), element_grads)?);
    }

    Ok((temps, grads, materials))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("=== Thermal Fatigue Example: Die / Solder Strip ===\n");

    let (temps, grads, materials) = build_inputs().context("Failed to build inputs")?;

    let config = WorkflowConfig::default().with_options(DamageOptions::default().with_logging());
    let workflow = FatigueWorkflow::new(config)?;
    let output = workflow
        .run(&temps, &grads, &materials)
        .context("Fatigue workflow failed")?;

    println!("Peak damage per time step:");
    for (time, entity, damage) in postprocess::peak_per_step(&output.damage) {
        let material = materials.material_of(entity)?;
        println!(
            "  t={:>2}: {:.4} at element {} (material {})",
            time, damage, entity, material
        );
    }

    println!(
        "\nCritical entries (damage > {}): {}",
        workflow.config().critical_damage,
        output.critical_count()
    );

    println!("\nPer-material damage:");
    for (material, damage) in &output.by_material {
        let stats = postprocess::statistics(damage);
        let worst = stats
            .iter()
            .max_by(|a, b| a.1.max.total_cmp(&b.1.max))
            .map(|(id, s)| (id, s.max));
        match worst {
            Some((id, max)) => println!(
                "  material {}: {} elements, worst element {} (max {:.4})",
                material,
                stats.len(),
                id,
                max
            ),
            None => println!("  material {}: no elements", material),
        }
    }

    println!("\nPer-element statistics over the cycle:");
    for (id, s) in output.statistics.iter() {
        println!(
            "  element {:>2}: min={:.4}, max={:.4}, mean={:.4} ({} steps)",
            id, s.min, s.max, s.mean, s.count
        );
    }

    println!("\n=== Analysis Complete ===");
    Ok(())
}
