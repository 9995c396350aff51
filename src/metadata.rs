//! Dataset inspection and variable description
//!
//! This module describes the variables of a statistics dataset (name, dimension
//! names, shape) and provides the diagnostic listing emitted when a file is
//! opened.

use netcdf::File;
use tracing::info;

/// Structured description of one dataset variable
#[derive(Debug, Clone, PartialEq)]
pub struct FieldInfo {
    pub name: String,
    pub dimensions: Vec<String>,
    pub shape: Vec<usize>,
}

impl FieldInfo {
    pub fn new(name: impl Into<String>, dimensions: Vec<String>, shape: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            dimensions,
            shape,
        }
    }

    /// Number of dimensions of the variable
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    /// Shape rendered the way the listing prints it, e.g. `(361, 20, 3)`
    pub fn shape_string(&self) -> String {
        let dims: Vec<String> = self.shape.iter().map(|s| s.to_string()).collect();
        format!("({})", dims.join(", "))
    }
}

/// Describes every variable in an open NetCDF file, sorted by name.
pub fn describe_variables(file: &File) -> Vec<FieldInfo> {
    let mut fields: Vec<FieldInfo> = file
        .variables()
        .map(|var| {
            let dimensions = var
                .dimensions()
                .iter()
                .map(|d| d.name().to_string())
                .collect();
            let shape = var.dimensions().iter().map(netcdf::Dimension::len).collect();
            FieldInfo::new(var.name(), dimensions, shape)
        })
        .collect();
    fields.sort_by(|a, b| a.name.cmp(&b.name));
    fields
}

/// Emits the variable listing as `info` events.
pub fn log_fields(fields: &[FieldInfo]) {
    info!(count = fields.len(), "statistics file variables");
    for field in fields {
        info!(
            "  {} {} [{}]",
            field.name,
            field.shape_string(),
            field.dimensions.join(", ")
        );
    }
}

/// Prints the variable listing to stdout, one variable per line.
pub fn print_fields(fields: &[FieldInfo]) {
    println!("\n Variables");
    println!("=============");

    if fields.is_empty() {
        println!("   (No variables found)");
        return;
    }

    for field in fields {
        println!(
            "    {} {} [{}]",
            field.name,
            field.shape_string(),
            field.dimensions.join(", ")
        );
    }
}
