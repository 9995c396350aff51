//! Accessor for ABL statistics files
//!
//! [`AblStatsFile`] loads the height and time coordinates, every
//! `[time, height, component]` field and one height interpolant per velocity
//! component. After construction it is a read-only view of the dataset.
//!
//! ```rust,no_run
//! use abl_stats::prelude::*;
//!
//! let stats = AblStatsFile::open("abl_statistics.nc").unwrap();
//! let u = stats.velocity_at(Component::U, 90.0).unwrap();
//! let profile = stats
//!     .time_average("velocity", 0, TimeWindow::new(0.0, 1500.0))
//!     .unwrap();
//! assert_eq!(u.len(), stats.times().len());
//! assert_eq!(profile.len(), stats.heights().len());
//! ```

use crate::averaging::{self, TimeWindow};
use crate::errors::{AblStatsError, Result};
use crate::fields::{FieldRegistry, HEIGHTS, TIME, VELOCITY};
use crate::interpolation::{Extrapolation, Interpolant, Interpolation, Linear, LinearInterpolant};
use crate::metadata::{log_fields, FieldInfo};
use crate::source::{NetCDFSource, StatsSource};
use ndarray::{Array1, ArrayView1, ArrayView3, Ix1};
use std::fmt;
use std::path::Path;
use tracing::info;

/// Velocity component, indexing the trailing dimension of `velocity`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    /// x (streamwise)
    U,
    /// y (spanwise)
    V,
    /// z (vertical)
    W,
}

impl Component {
    pub const ALL: [Self; 3] = [Self::U, Self::V, Self::W];

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::U => 0,
            Self::V => 1,
            Self::W => 2,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::U => "u",
            Self::V => "v",
            Self::W => "w",
        }
    }
}

impl TryFrom<usize> for Component {
    type Error = AblStatsError;

    fn try_from(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| AblStatsError::ComponentOutOfRange {
                field: VELOCITY.to_string(),
                index,
                components: Self::ALL.len(),
            })
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loaded statistics dataset with interpolated velocity access
#[derive(Debug, Clone)]
pub struct AblStatsFile<P = LinearInterpolant> {
    heights: Array1<f64>,
    times: Array1<f64>,
    variables: Vec<FieldInfo>,
    fields: FieldRegistry,
    velocity: [P; 3],
}

impl AblStatsFile<LinearInterpolant> {
    /// Open a NetCDF statistics file with linear interpolation that rejects
    /// heights outside the stored range.
    ///
    /// # Errors
    ///
    /// [`AblStatsError::NotFound`] if the file is missing or unreadable,
    /// [`AblStatsError::Schema`] if required variables are absent or misshapen.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with_extrapolation(path, Extrapolation::default())
    }

    /// Open a NetCDF statistics file with the given out-of-range behaviour
    pub fn open_with_extrapolation(
        path: impl AsRef<Path>,
        extrapolation: Extrapolation,
    ) -> Result<Self> {
        let source = NetCDFSource::open(path.as_ref())?;
        info!(
            path = %source.path().display(),
            extrapolation = extrapolation.as_str(),
            "opened statistics file"
        );
        Self::open_with(&source, &Linear::new(extrapolation))
    }
}

impl<P: Interpolant> AblStatsFile<P> {
    /// Load a dataset from any source, building velocity interpolants with
    /// the supplied interpolation.
    pub fn open_with<S, I>(source: &S, interpolation: &I) -> Result<Self>
    where
        S: StatsSource + ?Sized,
        I: Interpolation<Output = P>,
    {
        let variables = source.describe()?;
        log_fields(&variables);

        let (heights, height_dim) = read_coordinate(source, &variables, HEIGHTS)?;
        let (times, time_dim) = read_coordinate(source, &variables, TIME)?;
        let fields = FieldRegistry::load(
            source,
            &variables,
            (time_dim.as_str(), times.len()),
            (height_dim.as_str(), heights.len()),
        )?;

        if !fields.contains(VELOCITY) {
            return Err(match variables.iter().find(|v| v.name == VELOCITY) {
                Some(v) => AblStatsError::schema(format!(
                    "'{VELOCITY}' has shape {} over [{}], expected ({}, {}, 3) over [{}, {}, ..]",
                    v.shape_string(),
                    v.dimensions.join(", "),
                    times.len(),
                    heights.len(),
                    time_dim,
                    height_dim
                )),
                None => AblStatsError::schema(format!("missing required variable '{VELOCITY}'")),
            });
        }
        let components = fields.components(VELOCITY)?;
        if components != 3 {
            return Err(AblStatsError::schema(format!(
                "'{VELOCITY}' has {components} components, expected 3"
            )));
        }

        let [u, v, w] = Component::ALL.map(|c| {
            fields
                .component(VELOCITY, c.index())
                .and_then(|slab| interpolation.build(&heights, slab.to_owned()))
        });
        let velocity = [u?, v?, w?];

        info!(
            times = times.len(),
            heights = heights.len(),
            fields = fields.len(),
            "statistics loaded"
        );

        Ok(Self {
            heights,
            times,
            variables,
            fields,
            velocity,
        })
    }

    /// Height levels, ascending
    pub fn heights(&self) -> ArrayView1<'_, f64> {
        self.heights.view()
    }

    /// Sample times in seconds, ascending
    pub fn times(&self) -> ArrayView1<'_, f64> {
        self.times.view()
    }

    pub fn height_range(&self) -> (f64, f64) {
        (self.heights[0], self.heights[self.heights.len() - 1])
    }

    /// Every variable found in the dataset, as listed at load time
    pub fn variables(&self) -> &[FieldInfo] {
        &self.variables
    }

    /// Names of the fields that can be time-averaged
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.names().collect()
    }

    /// `(T, H, C)` view of a registered field
    pub fn field(&self, name: &str) -> Result<ArrayView3<'_, f64>> {
        self.fields.get(name)
    }

    pub fn velocity_interpolant(&self, component: Component) -> &P {
        &self.velocity[component.index()]
    }

    /// Velocity component at `height` for every stored time
    pub fn velocity_at(&self, component: Component, height: f64) -> Result<Array1<f64>> {
        self.velocity[component.index()].evaluate(height)
    }

    pub fn u_at(&self, height: f64) -> Result<Array1<f64>> {
        self.velocity_at(Component::U, height)
    }

    pub fn v_at(&self, height: f64) -> Result<Array1<f64>> {
        self.velocity_at(Component::V, height)
    }

    pub fn w_at(&self, height: f64) -> Result<Array1<f64>> {
        self.velocity_at(Component::W, height)
    }

    /// Time-averaged height profile of one component of `field` over `window`.
    ///
    /// # Errors
    ///
    /// - [`AblStatsError::Schema`] if `field` is not a `[time, height, component]` field
    /// - [`AblStatsError::ComponentOutOfRange`] if `index` exceeds its components
    /// - [`AblStatsError::EmptyWindow`] if no sample falls in the window
    /// - [`AblStatsError::DegenerateWindow`] if the window spans zero time
    pub fn time_average(&self, field: &str, index: usize, window: TimeWindow) -> Result<Array1<f64>> {
        let slab = self.fields.component(field, index)?;
        averaging::time_average(self.times.view(), slab, window)
    }
}

/// Read a required 1-D, strictly increasing coordinate variable together with
/// the name of its dimension
fn read_coordinate<S: StatsSource + ?Sized>(
    source: &S,
    variables: &[FieldInfo],
    name: &str,
) -> Result<(Array1<f64>, String)> {
    let info = variables
        .iter()
        .find(|v| v.name == name)
        .ok_or_else(|| AblStatsError::schema(format!("missing required variable '{name}'")))?;
    if info.ndim() != 1 {
        return Err(AblStatsError::schema(format!(
            "'{name}' must be one-dimensional, found shape {}",
            info.shape_string()
        )));
    }

    let values = source.read(name)?.into_dimensionality::<Ix1>()?;
    if values.is_empty() {
        return Err(AblStatsError::schema(format!("'{name}' is empty")));
    }
    if values.iter().any(|v| !v.is_finite()) {
        return Err(AblStatsError::schema(format!(
            "'{name}' contains non-finite values"
        )));
    }
    if values.iter().zip(values.iter().skip(1)).any(|(a, b)| a >= b) {
        return Err(AblStatsError::schema(format!(
            "'{name}' must be strictly increasing"
        )));
    }

    let dimension = info.dimensions.first().cloned().unwrap_or_default();
    Ok((values, dimension))
}
