//! Shared fixtures: in-memory statistics datasets and their NetCDF form.
#![allow(dead_code)]

use abl_stats::prelude::*;
use ndarray::{Array1, Array3};
use netcdf::create;
use std::collections::HashSet;
use std::path::Path;

/// Dataset with the given coordinates, velocity and optional resolved stress
pub fn abl_source(
    time: &[f64],
    heights: &[f64],
    velocity: Array3<f64>,
    stress: Option<Array3<f64>>,
) -> MemorySource {
    let mut source = MemorySource::new()
        .with_field("time", &["time"], Array1::from(time.to_vec()))
        .with_field("heights", &["heights"], Array1::from(heights.to_vec()))
        .with_field("velocity", &["time", "heights", "ndim"], velocity);
    if let Some(stress) = stress {
        source.insert("resolved_stress", &["time", "heights", "nstress"], stress);
    }
    source
}

/// Velocity `(T, H, 3)` built from a function of (time index, height index, component)
pub fn velocity_from(
    n_times: usize,
    n_heights: usize,
    f: impl Fn(usize, usize, usize) -> f64,
) -> Array3<f64> {
    Array3::from_shape_fn((n_times, n_heights, 3), |(t, h, c)| f(t, h, c))
}

/// Four samples 10 s apart over two heights; u at the lower height is `1, 2, 3, 4`
pub fn scenario_source() -> MemorySource {
    let velocity = velocity_from(4, 2, |t, h, c| match (h, c) {
        (0, 0) => t as f64 + 1.0,
        (1, 0) => 10.0,
        _ => 0.0,
    });
    abl_source(&[0.0, 10.0, 20.0, 30.0], &[0.0, 100.0], velocity, None)
}

/// Realistic dataset: log-law velocity, decaying stress and a 2-D temperature field
pub fn log_law_source() -> MemorySource {
    let time: Vec<f64> = (0..31).map(|i| i as f64 * 50.0).collect();
    let heights: Vec<f64> = (0..20).map(|k| 10.0 + k as f64 * 20.0).collect();

    let velocity = Array3::from_shape_fn((time.len(), heights.len(), 3), |(t, h, c)| {
        let speed = (1.0 + 0.01 * t as f64) * 0.4 / 0.41 * (heights[h] / 0.1).ln();
        match c {
            0 => 0.8 * speed,
            1 => 0.6 * speed,
            _ => 0.0,
        }
    });
    let stress = Array3::from_shape_fn((time.len(), heights.len(), 6), |(_, h, c)| {
        (c as f64 + 1.0) * (-heights[h] / 200.0).exp()
    });
    let temperature = ndarray::Array2::from_shape_fn((time.len(), heights.len()), |(_, h)| {
        300.0 + 0.003 * heights[h]
    });

    abl_source(&time, &heights, velocity, Some(stress)).with_field(
        "temperature",
        &["time", "heights"],
        temperature,
    )
}

/// Write every variable of `source` to a NetCDF file
pub fn write_netcdf(path: &Path, source: &MemorySource) -> Result<()> {
    let mut file = create(path)?;
    let mut added = HashSet::new();

    let fields = source.describe()?;
    for field in &fields {
        for (name, &len) in field.dimensions.iter().zip(&field.shape) {
            if added.insert(name.clone()) {
                file.add_dimension(name, len)?;
            }
        }
    }

    for field in &fields {
        let values: Vec<f64> = source.read(&field.name)?.iter().copied().collect();
        let dims: Vec<&str> = field.dimensions.iter().map(String::as_str).collect();
        let mut var = file.add_variable::<f64>(&field.name, &dims)?;
        var.put_values(&values, ..)?;
    }

    Ok(())
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
