//! NetCDF export of time-averaged profiles
//!
//! Writes the profiles produced by the analysis to a small NetCDF file with a
//! `heights` coordinate, one variable per profile and provenance attributes.

use crate::averaging::TimeWindow;
use crate::errors::{AblStatsError, Result};
use crate::fields::HEIGHTS;
use chrono::Utc;
use ndarray::{Array1, ArrayView1};
use netcdf::create;
use std::{fs, path::Path};

/// Writer for averaged height profiles
pub struct ProfileWriter<'a> {
    output_path: &'a Path,
}

impl<'a> ProfileWriter<'a> {
    pub fn new(output_path: &'a Path) -> Self {
        Self { output_path }
    }

    /// Write `profiles` (name, values) over `heights`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`AblStatsError::Schema`] if a profile length differs from the
    /// number of heights, or a NetCDF/I/O error if the file cannot be written.
    pub fn write(
        &self,
        heights: ArrayView1<'_, f64>,
        profiles: &[(String, Array1<f64>)],
        window: TimeWindow,
        source: &str,
    ) -> Result<()> {
        if let Some((name, values)) = profiles.iter().find(|(_, p)| p.len() != heights.len()) {
            return Err(AblStatsError::schema(format!(
                "profile '{name}' has {} values for {} heights",
                values.len(),
                heights.len()
            )));
        }

        if self.output_path.exists() {
            fs::remove_file(self.output_path)?;
        }

        let mut file = create(self.output_path)?;
        file.add_dimension(HEIGHTS, heights.len())?;

        {
            let mut var = file.add_variable::<f64>(HEIGHTS, &[HEIGHTS])?;
            var.put_attribute("units", "m")?;
            var.put_values(&heights.to_vec(), ..)?;
        }

        for (name, values) in profiles {
            let mut var = file.add_variable::<f64>(name, &[HEIGHTS])?;
            var.put_attribute("long_name", format!("time average of {name}"))?;
            var.put_values(&values.to_vec(), ..)?;
        }

        file.add_attribute("time_window_start", window.start)?;
        file.add_attribute("time_window_end", window.end)?;
        file.add_attribute("source", source)?;
        file.add_attribute(
            "history",
            format!("Created by abl_stats on {}", Utc::now().to_rfc3339()),
        )?;

        Ok(())
    }
}
