//! Cumulative Sum (CUSUM) chart for detecting small persistent shifts in process mean.
//!
//! # Algorithm
//!
//! With reference mean mu and standard deviation sigma, and k, h expressed
//! in multiples of sigma, the tabular CUSUM keeps two running sums seeded
//! at zero:
//!
//! ```text
//! C+_i = max(0, x_i - (mu + k*sigma) + C+_{i-1})
//! C-_i = max(0, (mu - k*sigma) - x_i + C-_{i-1})
//! ```
//!
//! A signal is recorded at index i when `C+_i > h*sigma` or `C-_i > h*sigma`.
//! The returned sequences are aligned to the input; the seeded zero is not
//! included.
//!
//! # Parameters
//!
//! - **k**: reference value (allowance), typically 0.5 (designed to detect a 1-sigma shift)
//! - **h**: decision interval, typically 4 or 5
//!
//! # Reference
//!
//! Page, E.S. (1954). "Continuous inspection schemes", *Biometrika* 41(1-2), pp. 100-115.

use serde::{Deserialize, Serialize};

use super::reference::Reference;
use crate::config::CusumParams;
use crate::error::{require_len, Result};

/// Tabular (two-sided) CUSUM engine.
///
/// # Examples
///
/// ```
/// use u_monitor::config::CusumParams;
/// use u_monitor::detection::Cusum;
///
/// let cusum = Cusum::new(CusumParams::default()).unwrap();
/// let data = [10.1, 9.8, 10.2, 9.9, 10.0, 10.1, 9.7, 10.3];
/// let chart = cusum.analyze(&data).unwrap();
/// assert_eq!(chart.upper.len(), data.len());
/// assert!(chart.signals.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Cusum {
    params: CusumParams,
}

/// CUSUM chart output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CusumChart {
    /// Upper cumulative sum C+_i per input index.
    pub upper: Vec<f64>,
    /// Lower cumulative sum C-_i per input index.
    pub lower: Vec<f64>,
    /// Indices where either sum exceeded the threshold.
    pub signals: Vec<usize>,
    /// Decision threshold h * sigma in data units.
    pub threshold: f64,
}

impl Cusum {
    /// Creates a CUSUM engine.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `k` is negative or `h` is not positive.
    pub fn new(params: CusumParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Returns the tuning parameters.
    pub fn params(&self) -> CusumParams {
        self.params
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
    pub fn analyze(&self, series: &[f64]) -> Result<CusumChart> {
        let reference = Reference::from_series(series)?;
        Ok(self.chart(series, reference))
    }

    /// Charts `series` against a caller-supplied reference.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if `series` is empty.
    pub fn analyze_with_reference(&self, series: &[f64], reference: Reference) -> Result<CusumChart> {
        require_len(1, series.len())?;
        Ok(self.chart(series, reference))
    }

    fn chart(&self, series: &[f64], reference: Reference) -> CusumChart {
        let Reference { mean, sigma } = reference;
        let upper_ref = mean + self.params.k * sigma;
        let lower_ref = mean - self.params.k * sigma;
        let threshold = self.params.h * sigma;

        let mut upper = Vec::with_capacity(series.len());
        let mut lower = Vec::with_capacity(series.len());
        let mut signals = Vec::new();

        series
            .iter()
            .enumerate()
            .fold((0.0_f64, 0.0_f64), |(c_plus, c_minus), (i, &x)| {
                let c_plus = (x - upper_ref + c_plus).max(0.0);
                let c_minus = (lower_ref - x + c_minus).max(0.0);
                if c_plus > threshold || c_minus > threshold {
                    signals.push(i);
                }
                upper.push(c_plus);
                lower.push(c_minus);
                (c_plus, c_minus)
            });

        if let Some(&first) = signals.first() {
            tracing::debug!(count = signals.len(), first, threshold, "CUSUM signals");
        }

        CusumChart {
            upper,
            lower,
            signals,
            threshold,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;

    fn default_cusum() -> Cusum {
        Cusum::new(CusumParams::default()).expect("valid params")
    }

    #[test]
    fn test_cusum_in_control_no_signals() {
        let data: Vec<f64> = (0..100)
            .map(|i| if i % 2 == 0 { 50.6 } else { 49.4 })
            .collect();
        let chart = default_cusum().analyze(&data).expect("enough data");
        assert_eq!(chart.upper.len(), 100);
        assert_eq!(chart.lower.len(), 100);
        assert!(
            chart.signals.is_empty(),
            "alternating noise should not trigger CUSUM signals"
        );
    }

    #[test]
    fn test_cusum_constant_series() {
        let chart = default_cusum().analyze(&[4.2; 30]).expect("enough data");
        assert!(chart.upper.iter().all(|&c| c == 0.0));
        assert!(chart.lower.iter().all(|&c| c == 0.0));
        assert!(chart.signals.is_empty());
    }

    #[test]
    fn test_cusum_step_shift_detected() {
        // 30 points at the baseline, then a jump of 10.
        // Whole-series mean 2.5, sigma ≈ 4.385, threshold ≈ 21.9,
        // C+ grows by ≈ 5.31 per shifted point.
        let mut data = vec![0.0; 30];
        data.extend(vec![10.0; 10]);
        let chart = default_cusum().analyze(&data).expect("enough data");

        let first = *chart.signals.first().expect("shift should signal");
        assert!(first >= 30, "no signal before the shift, got {first}");
        assert!(first <= 35, "signal within a few points of the shift, got {first}");
        assert!(chart.upper[first] > chart.threshold);
        assert!(chart.upper[29].abs() < 1e-12, "C+ stays at zero before the shift");
    }

    #[test]
    fn test_cusum_ten_sigma_step_signals_immediately() {
        // 99 points at 0 then one at 1: whole-series mean 0.01, sigma 0.1,
        // so the last point sits 9.9 sigma above the reference mean.
        let mut data = vec![0.0; 99];
        data.push(1.0);
        let chart = default_cusum().analyze(&data).expect("enough data");

        assert!((chart.threshold - 0.5).abs() < 1e-12, "h * sigma = {}", chart.threshold);
        assert_eq!(chart.signals, vec![99]);
        assert!(chart.upper[..99].iter().all(|&c| c == 0.0));
        // C+ = 1 - (0.01 + 0.5 * 0.1)
        assert!((chart.upper[99] - 0.94).abs() < 1e-12, "C+ = {}", chart.upper[99]);
    }

    #[test]
    fn test_cusum_downward_shift_uses_lower_sum() {
        let mut data = vec![50.0; 30];
        data.extend(vec![40.0; 10]);
        let chart = default_cusum().analyze(&data).expect("enough data");

        let first = *chart.signals.first().expect("shift should signal");
        assert!(first >= 30);
        assert!(chart.lower[first] > chart.upper[first]);
    }

    #[test]
    fn test_cusum_hand_computed() {
        // Frozen reference mu = 0, sigma = 1, k = 0.5, h = 2.
        let cusum = Cusum::new(CusumParams { k: 0.5, h: 2.0 }).expect("valid params");
        let reference = Reference::new(0.0, 1.0).expect("valid reference");
        let chart = cusum
            .analyze_with_reference(&[1.0, 1.0, 1.0, 1.0, -3.0], reference)
            .expect("non-empty");
        let expected_upper = [0.5, 1.0, 1.5, 2.0, 0.0];
        let expected_lower = [0.0, 0.0, 0.0, 0.0, 2.5];
        for i in 0..5 {
            assert!((chart.upper[i] - expected_upper[i]).abs() < 1e-12, "C+[{i}]");
            assert!((chart.lower[i] - expected_lower[i]).abs() < 1e-12, "C-[{i}]");
        }
        // 2.0 is not strictly greater than h * sigma = 2.0.
        assert_eq!(chart.signals, vec![4]);
        assert!((chart.threshold - 2.0).abs() < 1e-15);
    }

    #[test]
    fn test_cusum_threshold_scales_with_sigma() {
        let data = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let chart = default_cusum().analyze(&data).expect("enough data");
        let sigma = (32.0_f64 / 7.0).sqrt();
        assert!((chart.threshold - 5.0 * sigma).abs() < 1e-12);
    }

    #[test]
    fn test_cusum_invalid_params() {
        assert!(matches!(
            Cusum::new(CusumParams { k: -0.1, h: 5.0 }),
            Err(EngineError::InvalidParameter { name: "k", .. })
        ));
        assert!(Cusum::new(CusumParams { k: 0.5, h: 0.0 }).is_err());
        assert!(Cusum::new(CusumParams { k: 0.5, h: -1.0 }).is_err());
    }

    #[test]
    fn test_cusum_short_series() {
        assert!(default_cusum().analyze(&[]).is_err());
        assert!(default_cusum().analyze(&[1.0]).is_err());
    }
}
