//! Diagnostic plots of an ABL statistics file
//!
//! The driver turns an [`AblStatsFile`] into three figures:
//!
//! - `Velocity`: horizontal velocity magnitude against time at fixed heights
//! - `Velocity_average`: time-averaged u, v and |U| against height
//! - `rs_average`: time-averaged resolved stress components 0 and 2 against height
//!
//! Rendering goes through a [`PlotSink`]; the averaged profiles can also be
//! exported to NetCDF.

use crate::averaging::TimeWindow;
use crate::errors::Result;
use crate::fields::{RESOLVED_STRESS, VELOCITY};
use crate::interpolation::Interpolant;
use crate::netcdf_io::ProfileWriter;
use crate::plotting::{LinePlot, PlotSink, Series};
use crate::stats_file::{AblStatsFile, Component};
use ndarray::{Array1, Zip};
use std::path::PathBuf;
use tracing::info;

/// Settings for one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Heights [m] of the velocity time histories
    pub heights: Vec<f64>,
    /// Averaging window [s] for the profiles
    pub window: TimeWindow,
    /// Directory receiving the rendered figures
    pub output_dir: PathBuf,
    /// Optional NetCDF file receiving the averaged profiles
    pub profile_output: Option<PathBuf>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            heights: vec![70.0, 100.0, 150.0, 300.0],
            window: TimeWindow::new(0.0, 1500.0),
            output_dir: PathBuf::from("."),
            profile_output: None,
        }
    }
}

/// Averaged profiles computed for the profile figures
#[derive(Debug, Clone)]
pub struct Profiles {
    pub u: Array1<f64>,
    pub v: Array1<f64>,
    pub magnitude: Array1<f64>,
    pub stress_0: Array1<f64>,
    pub stress_2: Array1<f64>,
}

impl Profiles {
    /// Compute every profile over `window`
    pub fn compute<P: Interpolant>(stats: &AblStatsFile<P>, window: TimeWindow) -> Result<Self> {
        let u = stats.time_average(VELOCITY, Component::U.index(), window)?;
        let v = stats.time_average(VELOCITY, Component::V.index(), window)?;
        let magnitude = horizontal_magnitude(&u, &v);
        let stress_0 = stats.time_average(RESOLVED_STRESS, 0, window)?;
        let stress_2 = stats.time_average(RESOLVED_STRESS, 2, window)?;

        Ok(Self {
            u,
            v,
            magnitude,
            stress_0,
            stress_2,
        })
    }

    /// Named profiles, in the order they are exported
    pub fn named(&self) -> Vec<(String, Array1<f64>)> {
        vec![
            ("velocity_x".to_string(), self.u.clone()),
            ("velocity_y".to_string(), self.v.clone()),
            ("velocity_magnitude".to_string(), self.magnitude.clone()),
            ("resolved_stress_0".to_string(), self.stress_0.clone()),
            ("resolved_stress_2".to_string(), self.stress_2.clone()),
        ]
    }
}

/// What a run produced
#[derive(Debug, Clone, Default)]
pub struct Report {
    pub figures: Vec<PathBuf>,
    pub profile_file: Option<PathBuf>,
}

/// Element-wise `sqrt(u² + v²)`
pub fn horizontal_magnitude(u: &Array1<f64>, v: &Array1<f64>) -> Array1<f64> {
    Zip::from(u).and(v).map_collect(|&u, &v| u.hypot(v))
}

/// Velocity magnitude against time, one series per height
pub fn velocity_history<P: Interpolant>(stats: &AblStatsFile<P>, heights: &[f64]) -> Result<LinePlot> {
    let mut plot = LinePlot::new("Velocity", "Time [s]", "Velocity [m/s]");

    for &z in heights {
        let u = stats.u_at(z)?;
        let v = stats.v_at(z)?;
        let magnitude = horizontal_magnitude(&u, &v);
        plot = plot.with_series(Series::new(
            format!("U_mag, z={z} [m]"),
            stats.times().iter().copied(),
            magnitude.iter().copied(),
        ));
    }

    Ok(plot)
}

/// Time-averaged velocity profiles against height
pub fn velocity_profile<P: Interpolant>(stats: &AblStatsFile<P>, profiles: &Profiles) -> LinePlot {
    let z = stats.heights();
    LinePlot::new("Velocity_average", "Velocity [m/s]", "z [m]")
        .with_series(Series::new("U", profiles.u.iter().copied(), z.iter().copied()).with_markers())
        .with_series(Series::new("V", profiles.v.iter().copied(), z.iter().copied()).with_markers())
        .with_series(
            Series::new("U mag", profiles.magnitude.iter().copied(), z.iter().copied())
                .with_markers(),
        )
}

/// Time-averaged resolved stress profiles against height
pub fn stress_profile<P: Interpolant>(stats: &AblStatsFile<P>, profiles: &Profiles) -> LinePlot {
    let z = stats.heights();
    LinePlot::new("rs_average", "Resolved Stress [m^2/s^2]", "z [m]")
        .with_series(
            Series::new("U", profiles.stress_0.iter().copied(), z.iter().copied()).with_markers(),
        )
        .with_series(
            Series::new("V", profiles.stress_2.iter().copied(), z.iter().copied()).with_markers(),
        )
}

/// Build and render all figures, then export profiles if configured
pub fn run<P, K>(stats: &AblStatsFile<P>, config: &AnalysisConfig, sink: &mut K) -> Result<Report>
where
    P: Interpolant,
    K: PlotSink + ?Sized,
{
    let mut report = Report::default();

    let history = velocity_history(stats, &config.heights)?;
    report.figures.push(sink.render(&history)?);

    let profiles = Profiles::compute(stats, config.window)?;
    report
        .figures
        .push(sink.render(&velocity_profile(stats, &profiles))?);
    report
        .figures
        .push(sink.render(&stress_profile(stats, &profiles))?);

    for figure in &report.figures {
        info!(path = %figure.display(), "figure written");
    }

    if let Some(path) = &config.profile_output {
        ProfileWriter::new(path).write(
            stats.heights(),
            &profiles.named(),
            config.window,
            "abl_stats time average",
        )?;
        info!(path = %path.display(), "profiles written");
        report.profile_file = Some(path.clone());
    }

    Ok(report)
}
