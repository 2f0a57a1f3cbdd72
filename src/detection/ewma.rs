//! Exponentially Weighted Moving Average (EWMA) chart for detecting small shifts.
//!
//! # Algorithm
//!
//! The statistic is seeded with the first observation and updated in index
//! order:
//!
//! ```text
//! Z_0 = x_0
//! Z_i = lambda * x_i + (1 - lambda) * Z_{i-1}
//! ```
//!
//! Control limits are the constant asymptotic limits around the reference
//! mean:
//!
//! ```text
//! UCL = mu + L * sigma * sqrt(lambda / (2 - lambda))
//! LCL = mu - L * sigma * sqrt(lambda / (2 - lambda))
//! ```
//!
//! By default mu and sigma are the sample mean and (n − 1) standard
//! deviation of the whole series passed in; see [`Ewma::analyze_with_reference`]
//! for a frozen baseline.
//!
//! # Reference
//!
//! Roberts, S.W. (1959). "Control Chart Tests Based on Geometric Moving Averages",
//! *Technometrics* 1(3), pp. 239-250.

use serde::{Deserialize, Serialize};

use super::reference::Reference;
use crate::config::EwmaParams;
use crate::error::{require_len, Result};

/// EWMA chart engine.
///
/// # Examples
///
/// ```
/// use u_monitor::config::EwmaParams;
/// use u_monitor::detection::Ewma;
///
/// let ewma = Ewma::new(EwmaParams::default()).unwrap();
/// let chart = ewma.analyze(&[10.1, 9.8, 10.2, 9.9, 10.0, 10.1]).unwrap();
/// assert_eq!(chart.values.len(), 6);
/// assert!(chart.lcl < chart.center && chart.center < chart.ucl);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Ewma {
    params: EwmaParams,
}

/// EWMA chart output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EwmaChart {
    /// Z_i for every input index.
    pub values: Vec<f64>,
    /// Center line (reference mean).
    pub center: f64,
    /// Upper control limit.
    pub ucl: f64,
    /// Lower control limit.
    pub lcl: f64,
    /// Indices where Z_i lies outside [LCL, UCL].
    pub signals: Vec<usize>,
}

impl Ewma {
    /// Creates an EWMA engine.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if lambda is outside (0, 1] or the limit width is
    /// not positive.
    pub fn new(params: EwmaParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the tuning parameters.
    pub fn params(&self) -> EwmaParams {
        self.params
    }

    /// Limit half-width L * sigma * sqrt(lambda / (2 - lambda)).
    pub fn half_width(&self, sigma: f64) -> f64 {
        let lambda = self.params.lambda;
        self.params.l_factor * sigma * (lambda / (2.0 - lambda)).sqrt()
    }

    /// Charts `series` against its own mean and sample standard deviation.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if `series` has fewer than 2 points.
    ///
    /// # Complexity
    ///
    /// Time: O(n), Space: O(n)
    pub fn analyze(&self, series: &[f64]) -> Result<EwmaChart> {
        let reference = Reference::from_series(series)?;
        Ok(self.chart(series, reference))
    }

    /// Charts `series` against a caller-supplied reference.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if `series` is empty.
    pub fn analyze_with_reference(&self, series: &[f64], reference: Reference) -> Result<EwmaChart> {
        require_len(1, series.len())?;
        Ok(self.chart(series, reference))
    }

    fn chart(&self, series: &[f64], reference: Reference) -> EwmaChart {
        let lambda = self.params.lambda;

        // Written as Z + lambda * (x - Z) so a constant run stays exactly constant.
        let values: Vec<f64> = series
            .iter()
            .scan(None, |prev: &mut Option<f64>, &x| {
                let z = match *prev {
                    None => x,
                    Some(p) => p + lambda * (x - p),
                };
                *prev = Some(z);
                Some(z)
            })
            .collect();

        let half_width = self.half_width(reference.sigma);
        let center = reference.mean;
        let ucl = center + half_width;
        let lcl = center - half_width;

        let signals: Vec<usize> = values
            .iter()
            .enumerate()
            .filter(|(_, z)| **z > ucl || **z < lcl)
            .map(|(i, _)| i)
            .collect();

        if let Some(&first) = signals.first() {
            tracing::debug!(count = signals.len(), first, ucl, lcl, "EWMA signals");
        }

        EwmaChart {
            values,
            center,
            ucl,
            lcl,
            signals,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn default_ewma() -> Ewma {
        Ewma::new(EwmaParams::default()).expect("valid params")
    }

    #[test]
    fn test_ewma_constant_series() {
        let v = 25.3;
        let chart = default_ewma().analyze(&[v; 40]).expect("enough data");

        assert_eq!(chart.values.len(), 40);
        for (i, z) in chart.values.iter().enumerate() {
            assert_eq!(*z, v, "EWMA should equal the constant at index {i}");
        }
        assert!((chart.center - v).abs() < 1e-12);
        assert!(
            ((chart.ucl - chart.center) - (chart.center - chart.lcl)).abs() < 1e-12,
            "limits should be symmetric around the center"
        );
        assert!(chart.signals.is_empty());
    }

    #[test]
    fn test_ewma_recurrence() {
        let ewma = Ewma::new(EwmaParams {
            lambda: 0.5,
            l_factor: 3.0,
        })
        .expect("valid params");
        let chart = ewma.analyze(&[0.0, 4.0, 8.0, 0.0]).expect("enough data");
        // Z = 0, 2, 5, 2.5
        let expected = [0.0, 2.0, 5.0, 2.5];
        for (z, e) in chart.values.iter().zip(expected) {
            assert!((z - e).abs() < 1e-12, "got {z}, expected {e}");
        }
    }

    #[test]
    fn test_ewma_seeded_with_first_observation() {
        let chart = default_ewma().analyze(&[7.0, 3.0]).expect("enough data");
        assert_eq!(chart.values[0], 7.0);
        assert!((chart.values[1] - (0.2 * 3.0 + 0.8 * 7.0)).abs() < 1e-12);
    }

    #[test]
    fn test_ewma_limits_from_whole_series() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let chart = default_ewma().analyze(&data).expect("enough data");
        let sigma = (32.0_f64 / 7.0).sqrt();
        let hw = 3.0 * sigma * (0.2_f64 / 1.8).sqrt();
        assert!((chart.center - 5.0).abs() < 1e-12);
        assert!((chart.ucl - (5.0 + hw)).abs() < 1e-12, "UCL = {}", chart.ucl);
        assert!((chart.lcl - (5.0 - hw)).abs() < 1e-12, "LCL = {}", chart.lcl);
    }

    #[test]
    fn test_ewma_lambda_1_tracks_data() {
        let ewma = Ewma::new(EwmaParams {
            lambda: 1.0,
            l_factor: 1.0,
        })
        .expect("valid params");
        let data = [50.0, 55.0, 45.0, 70.0, 30.0];
        let chart = ewma.analyze(&data).expect("enough data");
        for (z, x) in chart.values.iter().zip(data) {
            assert!((z - x).abs() < 1e-12);
        }
        // sqrt(1 / 1) = 1, so limits are mean ± sigma.
        assert!(chart.signals.contains(&3), "70 should exceed UCL");
        assert!(chart.signals.contains(&4), "30 should fall below LCL");
    }

    #[test]
    fn test_ewma_frozen_baseline_detects_shift() {
        let ewma = default_ewma();
        let mut data = vec![0.0; 20];
        data.extend(vec![2.0; 20]);
        let reference = Reference::new(0.0, 1.0).expect("valid reference");
        let chart = ewma
            .analyze_with_reference(&data, reference)
            .expect("non-empty");

        let first = *chart.signals.first().expect("2-sigma shift should signal");
        assert!(first >= 20, "no signal before the shift, got {first}");
        assert!(first <= 25, "signal soon after the shift, got {first}");
    }

    #[test]
    fn test_ewma_small_lambda_responds_slower() {
        let mut data = vec![0.0; 10];
        data.extend(vec![2.0; 20]);
        let slow = Ewma::new(EwmaParams {
            lambda: 0.05,
            l_factor: 3.0,
        })
        .expect("valid params")
        .analyze(&data)
        .expect("enough data");
        let fast = Ewma::new(EwmaParams {
            lambda: 0.25,
            l_factor: 3.0,
        })
        .expect("valid params")
        .analyze(&data)
        .expect("enough data");
        assert!(fast.values[15] > slow.values[15]);
    }

    #[test]
    fn test_ewma_invalid_params() {
        for lambda in [0.0, -0.1, 1.1, f64::NAN] {
            assert!(matches!(
                Ewma::new(EwmaParams {
                    lambda,
                    l_factor: 3.0
                }),
                Err(EngineError::InvalidParameter { name: "lambda", .. })
            ));
        }
        assert!(Ewma::new(EwmaParams {
            lambda: 0.2,
            l_factor: -1.0
        })
        .is_err());
    }

    #[test]
    fn test_ewma_short_series() {
        let ewma = default_ewma();
        assert!(matches!(
            ewma.analyze(&[1.0]),
            Err(EngineError::InsufficientData { required: 2, actual: 1 })
        ));
        let reference = Reference::new(0.0, 1.0).expect("valid reference");
        assert!(ewma.analyze_with_reference(&[], reference).is_err());
        let chart = ewma
            .analyze_with_reference(&[1.0], reference)
            .expect("one point is enough with a frozen reference");
        assert_eq!(chart.values, vec![1.0]);
    }
}
