//! Line plots and their rendering
//!
//! The analysis driver describes each figure as a [`LinePlot`] and hands it to
//! a [`PlotSink`]. [`SvgPlotter`] renders plots to SVG files with plotters;
//! other sinks can collect or export the same data.

use crate::errors::{AblStatsError, Result};
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// One labelled curve
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    /// Draw a marker at every point in addition to the line
    pub markers: bool,
}

impl Series {
    pub fn new(
        label: impl Into<String>,
        x: impl IntoIterator<Item = f64>,
        y: impl IntoIterator<Item = f64>,
    ) -> Self {
        Self {
            label: label.into(),
            points: x.into_iter().zip(y).collect(),
            markers: false,
        }
    }

    #[must_use]
    pub fn with_markers(mut self) -> Self {
        self.markers = true;
        self
    }
}

/// A figure with labelled axes and any number of series
#[derive(Debug, Clone, PartialEq)]
pub struct LinePlot {
    /// File stem of the rendered figure
    pub name: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
}

impl LinePlot {
    pub fn new(
        name: impl Into<String>,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            series: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    /// Smallest box holding every finite point, or `None` if there is none
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut finite = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().copied())
            .filter(|(x, y)| x.is_finite() && y.is_finite());

        let (x, y) = finite.next()?;
        Some(finite.fold(((x, x), (y, y)), |((x0, x1), (y0, y1)), (x, y)| {
            ((x0.min(x), x1.max(x)), (y0.min(y), y1.max(y)))
        }))
    }
}

/// Destination for rendered plots
pub trait PlotSink {
    /// Render `plot`, returning the path of the written file
    fn render(&mut self, plot: &LinePlot) -> Result<PathBuf>;
}

/// Renders plots to `<output_dir>/<name>.svg`
#[derive(Debug, Clone)]
pub struct SvgPlotter {
    output_dir: PathBuf,
    size: (u32, u32),
}

impl SvgPlotter {
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            size: (800, 600),
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width, height);
        self
    }
}

impl PlotSink for SvgPlotter {
    fn render(&mut self, plot: &LinePlot) -> Result<PathBuf> {
        let ((x0, x1), (y0, y1)) = plot.bounds().ok_or_else(|| {
            AblStatsError::Plot(format!("plot '{}' has no finite points", plot.name))
        })?;
        let (x0, x1) = padded(x0, x1);
        let (y0, y1) = padded(y0, y1);

        fs::create_dir_all(&self.output_dir)?;
        let path = self.output_dir.join(format!("{}.svg", plot.name));
        draw(plot, &path, self.size, (x0..x1, y0..y1))?;
        Ok(path)
    }
}

fn draw(
    plot: &LinePlot,
    path: &Path,
    size: (u32, u32),
    (x_range, y_range): (std::ops::Range<f64>, std::ops::Range<f64>),
) -> Result<()> {
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc(plot.x_label.as_str())
        .y_desc(plot.y_label.as_str())
        .draw()
        .map_err(plot_error)?;

    for (i, series) in plot.series.iter().enumerate() {
        let color = Palette99::pick(i).to_rgba();
        let style = color.stroke_width(2);

        chart
            .draw_series(LineSeries::new(series.points.iter().copied(), style))
            .map_err(plot_error)?
            .label(series.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));

        if series.markers {
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&p| Circle::new(p, 3, color.filled())),
                )
                .map_err(plot_error)?;
        }
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    Ok(())
}

/// Widen a range by 5% on each side; a zero-width range becomes one unit wide
fn padded(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    if span == 0.0 {
        (lo - 0.5, hi + 0.5)
    } else {
        (lo - 0.05 * span, hi + 0.05 * span)
    }
}

fn plot_error(e: impl std::fmt::Display) -> AblStatsError {
    AblStatsError::Plot(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_skip_non_finite() {
        let plot = LinePlot::new("p", "x", "y")
            .with_series(Series::new("a", [0.0, 1.0, 2.0], [3.0, f64::NAN, -1.0]))
            .with_series(Series::new("b", [5.0], [0.5]));
        assert_eq!(plot.bounds(), Some(((0.0, 5.0), (-1.0, 3.0))));
    }

    #[test]
    fn test_empty_plot_has_no_bounds() {
        assert_eq!(LinePlot::new("p", "x", "y").bounds(), None);
    }

    #[test]
    fn test_padded_degenerate_range() {
        assert_eq!(padded(2.0, 2.0), (1.5, 2.5));
    }
}
