//! Time-window selection and trapezoidal time averaging
//!
//! A time average of a `(time, height)` slab over an inclusive window
//! `[t0, t1]` is the trapezoidal integral along time of the samples inside the
//! window, divided by the elapsed time between the first and last of them.
//! Each height level is averaged independently.

use crate::errors::{AblStatsError, Result};
use ndarray::{Array1, ArrayView1, ArrayView2, Axis, Zip};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Inclusive time interval `[start, end]` in seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeWindow {
    pub start: f64,
    pub end: f64,
}

impl TimeWindow {
    #[must_use]
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, t: f64) -> bool {
        self.start <= t && t <= self.end
    }

    /// Indices of the samples in `times` that fall inside the window
    pub fn select(&self, times: ArrayView1<'_, f64>) -> Vec<usize> {
        times
            .iter()
            .enumerate()
            .filter_map(|(i, &t)| self.contains(t).then_some(i))
            .collect()
    }
}

impl fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

impl FromStr for TimeWindow {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        match parts.as_slice() {
            [start, end] => {
                let start = start
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid window start '{start}'"))?;
                let end = end
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| format!("Invalid window end '{end}'"))?;
                Ok(Self::new(start, end))
            }
            _ => Err("Invalid format: Expected '<start>:<end>'.".to_string()),
        }
    }
}

/// Trapezoidal integral along axis 0 of `values`, one result per column.
///
/// `times` holds the sample positions of the rows and may be unevenly spaced.
/// Fewer than two rows integrate to zero.
///
/// # Errors
///
/// [`AblStatsError::Schema`] when `times` and the rows of `values` differ in length
pub fn trapezoid(times: ArrayView1<'_, f64>, values: ArrayView2<'_, f64>) -> Result<Array1<f64>> {
    if times.len() != values.nrows() {
        return Err(AblStatsError::schema(format!(
            "time axis has {} samples but field has {} rows",
            times.len(),
            values.nrows()
        )));
    }

    let mut integral = Array1::<f64>::zeros(values.ncols());

    for k in 1..times.len() {
        let dt = times[k] - times[k - 1];
        Zip::from(&mut integral)
            .and(values.row(k - 1))
            .and(values.row(k))
            .for_each(|acc, &lo, &hi| *acc += 0.5 * dt * (lo + hi));
    }

    Ok(integral)
}

/// Time average of a `(time, height)` slab over `window`.
///
/// # Errors
///
/// - [`AblStatsError::EmptyWindow`] when no stored time falls inside the window
/// - [`AblStatsError::DegenerateWindow`] when the selected samples span zero time
/// - [`AblStatsError::Schema`] when `times` and the slab disagree in length
pub fn time_average(
    times: ArrayView1<'_, f64>,
    values: ArrayView2<'_, f64>,
    window: TimeWindow,
) -> Result<Array1<f64>> {
    if times.len() != values.nrows() {
        return Err(AblStatsError::schema(format!(
            "time axis has {} samples but field has {} rows",
            times.len(),
            values.nrows()
        )));
    }

    let selected = window.select(times);
    if selected.is_empty() {
        return Err(AblStatsError::EmptyWindow {
            start: window.start,
            end: window.end,
        });
    }

    let t = times.select(Axis(0), &selected);
    let t_min = t.iter().copied().fold(f64::INFINITY, f64::min);
    let t_max = t.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let dt = t_max - t_min;
    if dt == 0.0 {
        return Err(AblStatsError::DegenerateWindow {
            start: window.start,
            end: window.end,
        });
    }

    debug!(
        samples = selected.len(),
        t_min, t_max, "time window {window} selected"
    );

    let f = values.select(Axis(0), &selected);
    Ok(trapezoid(t.view(), f.view())? / dt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array2};

    #[test]
    fn test_trapezoid_uneven_spacing() {
        let t = array![0.0, 1.0, 3.0];
        let f = array![[0.0], [2.0], [2.0]];
        // 0.5 * 1 * (0 + 2) + 0.5 * 2 * (2 + 2)
        assert_eq!(trapezoid(t.view(), f.view()).unwrap(), array![5.0]);
    }

    #[test]
    fn test_trapezoid_rejects_mismatched_lengths() {
        let t = array![0.0, 1.0, 2.0];
        let f = Array2::<f64>::zeros((2, 4));
        assert!(matches!(
            trapezoid(t.view(), f.view()),
            Err(AblStatsError::Schema(_))
        ));
    }

    #[test]
    fn test_single_row_integrates_to_zero() {
        let t = array![4.0];
        let f = Array2::from_elem((1, 3), 7.0);
        assert_eq!(trapezoid(t.view(), f.view()).unwrap(), array![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let t = array![0.0, 10.0, 20.0, 30.0];
        let window = TimeWindow::new(10.0, 20.0);
        assert_eq!(window.select(t.view()), vec![1, 2]);
    }

    #[test]
    fn test_parse_window() {
        assert_eq!(
            "0:1500".parse::<TimeWindow>(),
            Ok(TimeWindow::new(0.0, 1500.0))
        );
        assert!("0-1500".parse::<TimeWindow>().is_err());
        assert!("a:1".parse::<TimeWindow>().is_err());
    }
}
