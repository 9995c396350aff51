//! Typed registry of `[time, height, component]` fields
//!
//! At load time every variable whose leading dimensions match `(time, height)`
//! is read into a three-dimensional array and registered under its name. Fields
//! stored as `(time, height)` are registered with a single component. Other
//! variables stay in the listing but cannot be averaged.

use crate::errors::{AblStatsError, Result};
use crate::metadata::FieldInfo;
use crate::source::StatsSource;
use ndarray::{Array3, ArrayView2, ArrayView3, Axis, Ix2, Ix3};
use std::collections::BTreeMap;
use tracing::debug;

/// Name of the coordinate variable holding the height levels
pub const HEIGHTS: &str = "heights";
/// Name of the coordinate variable holding the sample times
pub const TIME: &str = "time";
/// Name of the required velocity field
pub const VELOCITY: &str = "velocity";
/// Name of the resolved Reynolds stress field
pub const RESOLVED_STRESS: &str = "resolved_stress";

/// True when `info` is laid out as `[time, height]` or `[time, height, component]`
fn on_grid(info: &FieldInfo, time_axis: (&str, usize), height_axis: (&str, usize)) -> bool {
    let ndim = info.ndim();
    (ndim == 2 || ndim == 3)
        && info.dimensions.len() == ndim
        && (info.dimensions[0].as_str(), info.shape[0]) == time_axis
        && (info.dimensions[1].as_str(), info.shape[1]) == height_axis
}

#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: BTreeMap<String, Array3<f64>>,
}

impl FieldRegistry {
    /// Read every variable described in `infos` whose leading dimensions are
    /// the time and height axes, matched by name and length.
    pub fn load<S: StatsSource + ?Sized>(
        source: &S,
        infos: &[FieldInfo],
        time_axis: (&str, usize),
        height_axis: (&str, usize),
    ) -> Result<Self> {
        let mut fields = BTreeMap::new();

        for info in infos {
            if info.name == HEIGHTS || info.name == TIME {
                continue;
            }

            if !on_grid(info, time_axis, height_axis) {
                debug!(
                    field = %info.name,
                    shape = %info.shape_string(),
                    dims = %info.dimensions.join(", "),
                    "not a time-height field, skipped"
                );
                continue;
            }

            let values = source.read(&info.name)?;
            let values = match values.ndim() {
                2 => values.into_dimensionality::<Ix2>()?.insert_axis(Axis(2)),
                _ => values.into_dimensionality::<Ix3>()?,
            };
            fields.insert(info.name.clone(), values);
        }

        Ok(Self { fields })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Full `(T, H, C)` view of a registered field
    pub fn get(&self, name: &str) -> Result<ArrayView3<'_, f64>> {
        self.fields
            .get(name)
            .map(|values| values.view())
            .ok_or_else(|| {
                AblStatsError::schema(format!(
                    "field '{name}' is not shaped [time, height, component]"
                ))
            })
    }

    /// Number of components of a registered field
    pub fn components(&self, name: &str) -> Result<usize> {
        Ok(self.get(name)?.len_of(Axis(2)))
    }

    /// `(T, H)` slab of one component
    pub fn component(&self, name: &str, index: usize) -> Result<ArrayView2<'_, f64>> {
        let values = self.get(name)?;
        let components = values.len_of(Axis(2));
        if index >= components {
            return Err(AblStatsError::ComponentOutOfRange {
                field: name.to_string(),
                index,
                components,
            });
        }

        Ok(values.index_axis_move(Axis(2), index))
    }
}
