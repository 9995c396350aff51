//! Creates a synthetic ABL statistics file for trying out abl_stats.
//!
//! The velocity follows a log-law profile with a slow oscillation in time, the
//! resolved stress decays with height, and the temperature is a stable
//! linear profile.

use netcdf::create;
use std::path::Path;

const N_TIMES: usize = 301;
const N_HEIGHTS: usize = 40;
const DT: f64 = 5.0;
const DZ: f64 = 10.0;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_path = Path::new("abl_statistics.nc");

    println!("🔨 Creating statistics file: {}", output_path.display());

    if output_path.exists() {
        std::fs::remove_file(output_path)?
    }

    let mut file = create(output_path)?;

    file.add_attribute("title", "Synthetic neutral ABL statistics")?;
    file.add_attribute("created_by", "create_abl_stats.rs")?;

    file.add_dimension("num_time_steps", N_TIMES)?;
    file.add_dimension("nheights", N_HEIGHTS)?;
    file.add_dimension("ndim", 3)?;
    file.add_dimension("nstress", 6)?;

    let time: Vec<f64> = (0..N_TIMES).map(|i| i as f64 * DT).collect();
    let heights: Vec<f64> = (0..N_HEIGHTS).map(|k| 5.0 + k as f64 * DZ).collect();

    {
        let mut var = file.add_variable::<f64>("time", &["num_time_steps"])?;
        var.put_attribute("units", "s")?;
        var.put_values(&time, ..)?;
    }

    {
        let mut var = file.add_variable::<f64>("heights", &["nheights"])?;
        var.put_attribute("units", "m")?;
        var.put_values(&heights, ..)?;
    }

    // Log law with u* = 0.4 m/s, z0 = 0.1 m, wind from 30 degrees
    let kappa = 0.41;
    let (utau, z0) = (0.4, 0.1);
    let direction = 30f64.to_radians();

    let mut velocity = Vec::with_capacity(N_TIMES * N_HEIGHTS * 3);
    let mut stress = Vec::with_capacity(N_TIMES * N_HEIGHTS * 6);
    let mut temperature = Vec::with_capacity(N_TIMES * N_HEIGHTS);
    for &t in &time {
        let gust = 1.0 + 0.05 * (t * std::f64::consts::TAU / 600.0).sin();
        for &z in &heights {
            let speed = gust * utau / kappa * (z / z0).ln();
            velocity.extend([speed * direction.cos(), speed * direction.sin(), 0.0]);

            let decay = (-z / 200.0).exp();
            stress.extend([
                0.8 * decay,
                -0.1 * decay,
                -0.16 * decay,
                0.5 * decay,
                0.0,
                0.3 * decay,
            ]);

            temperature.push(300.0 + 0.003 * z);
        }
    }

    {
        let mut var = file.add_variable::<f64>("velocity", &["num_time_steps", "nheights", "ndim"])?;
        var.put_attribute("units", "m/s")?;
        var.put_values(&velocity, ..)?;
    }

    {
        let mut var =
            file.add_variable::<f64>("resolved_stress", &["num_time_steps", "nheights", "nstress"])?;
        var.put_attribute("units", "m^2/s^2")?;
        var.put_values(&stress, ..)?;
    }

    {
        let mut var = file.add_variable::<f64>("temperature", &["num_time_steps", "nheights"])?;
        var.put_attribute("units", "K")?;
        var.put_values(&temperature, ..)?;
    }

    {
        let mut var = file.add_variable::<f64>("utau", &["num_time_steps"])?;
        var.put_attribute("units", "m/s")?;
        var.put_values(&vec![utau; N_TIMES], ..)?;
    }

    println!("✅ Successfully created statistics file with:");
    println!("   📏 Dimensions: num_time_steps({N_TIMES}), nheights({N_HEIGHTS}), ndim(3), nstress(6)");
    println!("   📈 Variables: time, heights, velocity, resolved_stress, temperature, utau");
    println!("\n🧪 Plot it with:");
    println!("   cargo run -- -f abl_statistics.nc");

    Ok(())
}
