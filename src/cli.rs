//! Defines command-line interface options using `clap` for the abl_stats binary.

use abl_stats::analysis::AnalysisConfig;
use abl_stats::averaging::TimeWindow;
use abl_stats::interpolation::Extrapolation;
use clap::Parser;
use std::path::PathBuf;

/// Diagnostic plots for ABL statistics files
#[derive(Parser, Debug)]
#[command(
    version,
    name = "abl_stats",
    about = "Velocity histories and time-averaged profiles from ABL statistics"
)]
pub struct Args {
    /// Path to the NetCDF statistics file
    #[arg(short, long, default_value = "abl_statistics.nc")]
    pub file: PathBuf,

    /// Heights [m] of the velocity time histories, comma separated
    #[arg(long, value_delimiter = ',', default_values_t = [70.0, 100.0, 150.0, 300.0])]
    pub heights: Vec<f64>,

    /// Averaging window in seconds, formatted as <start>:<end>
    #[arg(long, value_parser = parse_window, default_value = "0:1500")]
    pub window: TimeWindow,

    /// Directory receiving the SVG figures
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Path to save the averaged profiles as NetCDF
    #[arg(long)]
    pub output_netcdf: Option<PathBuf>,

    /// Behaviour for heights outside the stored range: error, clamp or linear
    #[arg(long, value_parser = parse_extrapolation, default_value = "error")]
    pub extrapolation: Extrapolation,

    /// List all variables in the statistics file and exit
    #[arg(long)]
    pub list_vars: bool,

    /// Enable verbose output.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    pub fn config(&self) -> AnalysisConfig {
        AnalysisConfig {
            heights: self.heights.clone(),
            window: self.window,
            output_dir: self.output_dir.clone(),
            profile_output: self.output_netcdf.clone(),
        }
    }
}

fn parse_window(s: &str) -> Result<TimeWindow, String> {
    s.parse()
}

fn parse_extrapolation(s: &str) -> Result<Extrapolation, String> {
    s.parse()
}
