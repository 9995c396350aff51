mod common;

use abl_stats::{
    analysis::{self, AnalysisConfig},
    errors::AblStatsError,
    prelude::*,
};
use common::{assert_close, log_law_source, scenario_source, write_netcdf};
use netcdf::open;
use tempfile::tempdir;

#[test]
fn test_open_missing_file_is_not_found() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("does_not_exist.nc");

    match AblStatsFile::open(&path) {
        Err(AblStatsError::NotFound { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected NotFound error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_open_unreadable_file_is_not_found() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("not_netcdf.nc");
    std::fs::write(&path, "this is not a NetCDF file").expect("Failed to write file");

    assert!(matches!(
        AblStatsFile::open(&path),
        Err(AblStatsError::NotFound { .. })
    ));
}

#[test]
fn test_open_file_without_velocity_is_schema_error() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("no_velocity.nc");

    let mut source = scenario_source();
    source.remove("velocity");
    write_netcdf(&path, &source).expect("Failed to write NetCDF file");

    match AblStatsFile::open(&path) {
        Err(AblStatsError::Schema(message)) => assert!(message.contains("velocity")),
        other => panic!("Expected Schema error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_open_and_query_netcdf_file() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("abl_statistics.nc");
    let source = log_law_source();
    write_netcdf(&path, &source).expect("Failed to write NetCDF file");

    let stats = AblStatsFile::open(&path).expect("Failed to open statistics file");

    let names: Vec<&str> = stats.variables().iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        ["heights", "resolved_stress", "temperature", "time", "velocity"]
    );
    assert_eq!(stats.field("resolved_stress").unwrap().shape(), &[31, 20, 6]);

    // matches the in-memory load exactly
    let reference = AblStatsFile::open_with(&source, &Linear::default()).unwrap();
    assert_eq!(stats.heights(), reference.heights());
    assert_eq!(stats.times(), reference.times());
    assert_eq!(
        stats.velocity_at(Component::U, 123.0).unwrap(),
        reference.velocity_at(Component::U, 123.0).unwrap()
    );

    let window = TimeWindow::new(0.0, 1500.0);
    assert_eq!(
        stats.time_average("resolved_stress", 2, window).unwrap(),
        reference.time_average("resolved_stress", 2, window).unwrap()
    );
}

#[test]
fn test_trapezoidal_average_from_netcdf() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = temp_dir.path().join("scenario.nc");
    write_netcdf(&path, &scenario_source()).expect("Failed to write NetCDF file");

    let stats = AblStatsFile::open(&path).expect("Failed to open statistics file");

    assert_eq!(stats.u_at(0.0).unwrap().to_vec(), vec![1.0, 2.0, 3.0, 4.0]);

    let profile = stats
        .time_average("velocity", 0, TimeWindow::new(0.0, 30.0))
        .unwrap();
    assert_close(profile[0], 2.5);
    assert_close(profile[1], 10.0);
}

#[test]
fn test_analysis_writes_figures_and_profiles() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("abl_statistics.nc");
    write_netcdf(&input, &log_law_source()).expect("Failed to write NetCDF file");

    let stats = AblStatsFile::open(&input).expect("Failed to open statistics file");
    let output_dir = temp_dir.path().join("figures");
    let profile_path = temp_dir.path().join("profiles.nc");
    let config = AnalysisConfig {
        output_dir: output_dir.clone(),
        profile_output: Some(profile_path.clone()),
        ..AnalysisConfig::default()
    };

    let mut plotter = SvgPlotter::new(&config.output_dir).with_size(640, 480);
    let report = analysis::run(&stats, &config, &mut plotter).expect("Analysis failed");

    for name in ["Velocity.svg", "Velocity_average.svg", "rs_average.svg"] {
        let figure = output_dir.join(name);
        assert!(report.figures.contains(&figure));
        let content = std::fs::read_to_string(&figure).expect("Failed to read figure");
        assert!(content.contains("<svg"));
        assert!(content.contains("width=\"640\""), "{name} not rendered at 640x480");
    }
    assert_eq!(report.profile_file, Some(profile_path.clone()));

    // Reopen the exported profiles
    let file = open(&profile_path).expect("Failed to open profile file");
    let heights: Vec<f64> = file
        .variable("heights")
        .expect("heights not found")
        .get_values(..)
        .expect("Failed to read heights");
    assert_eq!(heights, stats.heights().to_vec());

    let u: Vec<f64> = file
        .variable("velocity_x")
        .expect("velocity_x not found")
        .get_values(..)
        .expect("Failed to read velocity_x");
    let expected = stats
        .time_average("velocity", 0, config.window)
        .unwrap();
    assert_eq!(u, expected.to_vec());

    for name in ["velocity_y", "velocity_magnitude", "resolved_stress_0", "resolved_stress_2"] {
        assert!(file.variable(name).is_some(), "missing {name}");
    }
    assert!(file.attribute("history").is_some());

    println!("✅ Integration test passed: figures and profiles written");
}
