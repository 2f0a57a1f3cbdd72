//! Reference center and spread for the control charts.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use crate::error::{require_len, require_non_negative, EngineError, Result};

/// Reference mean and standard deviation a chart is drawn against.
///
/// [`Reference::from_series`] estimates both from the monitored series
/// itself (sample mean, n − 1 denominator). Callers that separate a Phase I
/// baseline from Phase II monitoring estimate the reference on the baseline
/// slice and pass it through [`Reference::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    /// Center (mu).
    pub mean: f64,
    /// Spread (sigma). Zero for a constant series.
    pub sigma: f64,
}

impl Reference {
    /// A caller-supplied (frozen) reference.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `mean` is not finite or `sigma` is negative or
    /// not finite.
    pub fn new(mean: f64, sigma: f64) -> Result<Self> {
        if !mean.is_finite() {
            return Err(EngineError::InvalidParameter {
                name: "mean",
                value: mean,
                reason: "must be finite",
            });
        }
        let sigma = require_non_negative("sigma", sigma)?;
        Ok(Self { mean, sigma })
    }

    /// Sample mean and (n − 1)-denominator standard deviation of `series`.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if `series` has fewer than 2 points.
    pub fn from_series(series: &[f64]) -> Result<Self> {
        require_len(2, series.len())?;
        Ok(Self {
            mean: Statistics::mean(series.iter()),
            sigma: Statistics::std_dev(series.iter()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_series() {
        let r = Reference::from_series(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .expect("enough data");
        assert!((r.mean - 5.0).abs() < 1e-12);
        // Sum of squares 32, n - 1 = 7
        assert!((r.sigma - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12, "sigma = {}", r.sigma);
    }

    #[test]
    fn test_from_series_constant() {
        let r = Reference::from_series(&[3.5; 10]).expect("enough data");
        assert!((r.mean - 3.5).abs() < 1e-15);
        assert!(r.sigma.abs() < 1e-12);
    }

    #[test]
    fn test_from_series_too_short() {
        assert_eq!(
            Reference::from_series(&[1.0]),
            Err(EngineError::InsufficientData {
                required: 2,
                actual: 1
            })
        );
        assert!(Reference::from_series(&[]).is_err());
    }

    #[test]
    fn test_new_validation() {
        assert!(Reference::new(10.0, 0.0).is_ok());
        assert!(Reference::new(10.0, -1.0).is_err());
        assert!(Reference::new(f64::NAN, 1.0).is_err());
        assert!(Reference::new(10.0, f64::INFINITY).is_err());
    }
}
