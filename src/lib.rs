//! abl_stats: atmospheric boundary-layer statistics from NetCDF
//!
//! Reads the time-height statistics written by an ABL flow solver and derives
//! diagnostics from them: velocity time histories at arbitrary heights and
//! time-averaged height profiles of any `[time, height, component]` field.
//!
//! ## Key Features
//!
//! - **Height interpolation**: velocity components at any height, for every stored time
//! - **Time averaging**: trapezoidal integration over an inclusive time window
//! - **Validated loading**: coordinates and field shapes are checked when the file is opened
//! - **Plots**: velocity history and averaged profiles rendered to SVG
//! - **Profile export**: averaged profiles written back to NetCDF
//!
//! ## Module Organization
//!
//! - [`stats_file`]: the dataset accessor
//! - [`averaging`]: time windows and trapezoidal averaging
//! - [`interpolation`]: height interpolants and extrapolation policy
//! - [`fields`]: typed registry of time-height fields
//! - [`source`]: dataset reading (NetCDF or in-memory)
//! - [`metadata`]: variable description and listing
//! - [`analysis`]: the diagnostic plot driver
//! - [`plotting`]: plot data model and SVG rendering
//! - [`netcdf_io`]: profile export
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//!
//! ```rust,no_run
//! use abl_stats::prelude::*;
//!
//! let stats = AblStatsFile::open("abl_statistics.nc").unwrap();
//!
//! // Streamwise velocity at 90 m for every stored time
//! let u = stats.velocity_at(Component::U, 90.0).unwrap();
//!
//! // Time-averaged streamwise resolved stress over the first 1500 s
//! let uu = stats
//!     .time_average("resolved_stress", 0, TimeWindow::new(0.0, 1500.0))
//!     .unwrap();
//! ```

pub mod analysis;
pub mod averaging;
pub mod errors;
pub mod fields;
pub mod interpolation;
pub mod metadata;
pub mod netcdf_io;
pub mod plotting;
pub mod source;
pub mod stats_file;

pub use errors::*;

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::analysis::{AnalysisConfig, Profiles, Report};
    pub use crate::averaging::TimeWindow;
    pub use crate::errors::{AblStatsError, Result};
    pub use crate::interpolation::{Extrapolation, Interpolant, Interpolation, Linear};
    pub use crate::plotting::{LinePlot, PlotSink, Series, SvgPlotter};
    pub use crate::source::{MemorySource, NetCDFSource, StatsSource};
    pub use crate::stats_file::{AblStatsFile, Component};
}
