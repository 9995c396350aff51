//! Dataset access abstraction
//!
//! The accessor never talks to the netcdf crate directly: it is handed a
//! [`StatsSource`], which can describe its variables and read any of them as an
//! `f64` array. [`NetCDFSource`] reads from a file on disk and
//! [`MemorySource`] serves arrays held in memory.

use crate::errors::{AblStatsError, Result};
use crate::metadata::{describe_variables, FieldInfo};
use ndarray::{Array, ArrayD, Dimension, IxDyn};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Read-only access to the variables of a statistics dataset
pub trait StatsSource {
    /// List every variable with its dimension names and shape
    fn describe(&self) -> Result<Vec<FieldInfo>>;

    /// Read an entire variable, converted to `f64`
    fn read(&self, name: &str) -> Result<ArrayD<f64>>;
}

/// A NetCDF file opened for reading
pub struct NetCDFSource {
    path: PathBuf,
    file: netcdf::File,
}

impl NetCDFSource {
    /// Open a NetCDF file, failing with [`AblStatsError::NotFound`] when the
    /// path does not exist or the library cannot read it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AblStatsError::NotFound {
                path: path.to_path_buf(),
                reason: "no such file".to_string(),
            });
        }

        let file = netcdf::open(path).map_err(|e| AblStatsError::NotFound {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StatsSource for NetCDFSource {
    fn describe(&self) -> Result<Vec<FieldInfo>> {
        Ok(describe_variables(&self.file))
    }

    fn read(&self, name: &str) -> Result<ArrayD<f64>> {
        let var = self
            .file
            .variable(name)
            .ok_or_else(|| AblStatsError::schema(format!("variable '{name}' not found")))?;

        let shape: Vec<usize> = var
            .dimensions()
            .iter()
            .map(netcdf::Dimension::len)
            .collect();
        let values = var.get_values::<f64, _>(..)?;

        Ok(ArrayD::from_shape_vec(IxDyn(&shape), values)?)
    }
}

/// Variables held in memory, keyed by name
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    fields: BTreeMap<String, (Vec<String>, ArrayD<f64>)>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a variable with the given dimension names
    pub fn with_field<D: Dimension>(
        mut self,
        name: &str,
        dimensions: &[&str],
        values: Array<f64, D>,
    ) -> Self {
        self.insert(name, dimensions, values);
        self
    }

    pub fn insert<D: Dimension>(&mut self, name: &str, dimensions: &[&str], values: Array<f64, D>) {
        let dimensions = dimensions.iter().map(|d| d.to_string()).collect();
        self.fields
            .insert(name.to_string(), (dimensions, values.into_dyn()));
    }

    pub fn remove(&mut self, name: &str) -> Option<ArrayD<f64>> {
        self.fields.remove(name).map(|(_, values)| values)
    }
}

impl StatsSource for MemorySource {
    fn describe(&self) -> Result<Vec<FieldInfo>> {
        Ok(self
            .fields
            .iter()
            .map(|(name, (dimensions, values))| {
                FieldInfo::new(name.clone(), dimensions.clone(), values.shape().to_vec())
            })
            .collect())
    }

    fn read(&self, name: &str) -> Result<ArrayD<f64>> {
        self.fields
            .get(name)
            .map(|(_, values)| values.clone())
            .ok_or_else(|| AblStatsError::schema(format!("variable '{name}' not found")))
    }
}
