//! Height interpolation of time-series slabs
//!
//! An [`Interpolation`] builds an [`Interpolant`] from a height axis and a
//! `(time, height)` slab. Evaluating the interpolant at a height returns one
//! value per stored time step.

use crate::errors::{AblStatsError, Result};
use ndarray::{Array1, Array2, Zip};
use std::str::FromStr;

/// Behaviour when a query falls outside the stored height range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Extrapolation {
    /// Fail with [`AblStatsError::OutOfDomain`]
    #[default]
    Error,
    /// Return the nearest edge column
    Clamp,
    /// Extend the first or last segment linearly
    Linear,
}

impl Extrapolation {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Clamp => "clamp",
            Self::Linear => "linear",
        }
    }
}

impl FromStr for Extrapolation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "error" => Ok(Self::Error),
            "clamp" => Ok(Self::Clamp),
            "linear" => Ok(Self::Linear),
            other => Err(format!(
                "Invalid extrapolation '{other}': expected 'error', 'clamp' or 'linear'"
            )),
        }
    }
}

/// A function of height returning a value for every stored time
pub trait Interpolant {
    /// Evaluate at `height`, returning one value per time step
    fn evaluate(&self, height: f64) -> Result<Array1<f64>>;

    /// Inclusive range of heights covered by the stored nodes
    fn domain(&self) -> (f64, f64);
}

/// Factory for interpolants, injected into the accessor at construction
pub trait Interpolation {
    type Output: Interpolant;

    /// Build an interpolant over `axis` for a `(time, height)` slab
    fn build(&self, axis: &Array1<f64>, values: Array2<f64>) -> Result<Self::Output>;
}

/// Piecewise-linear interpolation between neighbouring height nodes
#[derive(Debug, Clone, Copy, Default)]
pub struct Linear {
    pub extrapolation: Extrapolation,
}

impl Linear {
    pub fn new(extrapolation: Extrapolation) -> Self {
        Self { extrapolation }
    }
}

impl Interpolation for Linear {
    type Output = LinearInterpolant;

    fn build(&self, axis: &Array1<f64>, values: Array2<f64>) -> Result<LinearInterpolant> {
        LinearInterpolant::new(axis.to_vec(), values, self.extrapolation)
    }
}

#[derive(Debug, Clone)]
pub struct LinearInterpolant {
    axis: Vec<f64>,
    // (time, height)
    values: Array2<f64>,
    extrapolation: Extrapolation,
}

impl LinearInterpolant {
    pub fn new(axis: Vec<f64>, values: Array2<f64>, extrapolation: Extrapolation) -> Result<Self> {
        if axis.is_empty() {
            return Err(AblStatsError::schema("interpolation axis is empty"));
        }
        if axis.len() != values.ncols() {
            return Err(AblStatsError::schema(format!(
                "interpolation axis has {} nodes but values have {} columns",
                axis.len(),
                values.ncols()
            )));
        }
        if axis.iter().any(|z| !z.is_finite()) {
            return Err(AblStatsError::schema(
                "interpolation axis contains non-finite values",
            ));
        }
        if axis.windows(2).any(|w| w[0] >= w[1]) {
            return Err(AblStatsError::schema(
                "interpolation axis must be strictly increasing",
            ));
        }

        Ok(Self {
            axis,
            values,
            extrapolation,
        })
    }

    fn column(&self, index: usize) -> Array1<f64> {
        self.values.column(index).to_owned()
    }

    /// Straight line through nodes `lower` and `upper`, evaluated at `height`
    fn blend(&self, lower: usize, upper: usize, height: f64) -> Array1<f64> {
        let (z0, z1) = (self.axis[lower], self.axis[upper]);
        let f = (height - z0) / (z1 - z0);
        Zip::from(self.values.column(lower))
            .and(self.values.column(upper))
            .map_collect(|&a, &b| a + f * (b - a))
    }

    fn extrapolate(&self, height: f64) -> Result<Array1<f64>> {
        let n = self.axis.len();
        let (min, max) = self.domain();
        let below = height.is_nan() || height < min;

        match self.extrapolation {
            Extrapolation::Error => Err(AblStatsError::OutOfDomain { height, min, max }),
            Extrapolation::Clamp => Ok(self.column(if below { 0 } else { n - 1 })),
            Extrapolation::Linear if n == 1 => Ok(self.column(0)),
            Extrapolation::Linear if below => Ok(self.blend(0, 1, height)),
            Extrapolation::Linear => Ok(self.blend(n - 2, n - 1, height)),
        }
    }
}

impl Interpolant for LinearInterpolant {
    fn evaluate(&self, height: f64) -> Result<Array1<f64>> {
        let (min, max) = self.domain();
        if !(min..=max).contains(&height) {
            return self.extrapolate(height);
        }

        let upper = self.axis.partition_point(|&z| z <= height);
        let lower = upper - 1;
        if self.axis[lower] == height || upper == self.axis.len() {
            return Ok(self.column(lower));
        }

        Ok(self.blend(lower, upper, height))
    }

    fn domain(&self) -> (f64, f64) {
        (self.axis[0], self.axis[self.axis.len() - 1])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn slab(extrapolation: Extrapolation) -> LinearInterpolant {
        // two time steps, three heights
        let values = array![[1.0, 3.0, 7.0], [2.0, 2.0, 2.0]];
        LinearInterpolant::new(vec![0.0, 10.0, 30.0], values, extrapolation).unwrap()
    }

    #[test]
    fn test_exact_at_nodes() {
        let interp = slab(Extrapolation::Error);
        assert_eq!(interp.evaluate(0.0).unwrap(), array![1.0, 2.0]);
        assert_eq!(interp.evaluate(10.0).unwrap(), array![3.0, 2.0]);
        assert_eq!(interp.evaluate(30.0).unwrap(), array![7.0, 2.0]);
    }

    #[test]
    fn test_between_nodes() {
        let interp = slab(Extrapolation::Error);
        let mid = interp.evaluate(20.0).unwrap();
        assert!((mid[0] - 5.0).abs() < 1e-12);
        assert!((mid[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_extrapolation_policies() {
        let err = slab(Extrapolation::Error).evaluate(40.0);
        assert!(matches!(err, Err(AblStatsError::OutOfDomain { .. })));

        let clamped = slab(Extrapolation::Clamp).evaluate(-5.0).unwrap();
        assert_eq!(clamped, array![1.0, 2.0]);

        let extended = slab(Extrapolation::Linear).evaluate(40.0).unwrap();
        assert!((extended[0] - 9.0).abs() < 1e-12);
        assert!((extended[1] - 2.0).abs() < 1e-12);

        // first segment slope is 0.2 per metre at t index 0
        let below = slab(Extrapolation::Linear).evaluate(-5.0).unwrap();
        assert!((below[0] - 0.0).abs() < 1e-12);
        assert!((below[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_rejects_unsorted_axis() {
        let values = array![[1.0, 2.0]];
        let result = LinearInterpolant::new(vec![5.0, 5.0], values, Extrapolation::Error);
        assert!(matches!(result, Err(AblStatsError::Schema(_))));
    }

    #[test]
    fn test_rejects_nan_axis() {
        let values = array![[1.0, 2.0, 3.0]];
        let result = LinearInterpolant::new(vec![0.0, f64::NAN, 30.0], values, Extrapolation::Error);
        assert!(matches!(result, Err(AblStatsError::Schema(_))));
    }

    #[test]
    fn test_parse_extrapolation() {
        assert_eq!("clamp".parse::<Extrapolation>(), Ok(Extrapolation::Clamp));
        assert!("nearest".parse::<Extrapolation>().is_err());
        for policy in [Extrapolation::Error, Extrapolation::Clamp, Extrapolation::Linear] {
            assert_eq!(policy.as_str().parse::<Extrapolation>(), Ok(policy));
        }
    }
}
