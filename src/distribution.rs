//! Distribution primitives.
//!
//! The standard normal CDF used by the risk calculator, the empirical CDF
//! used by the Kolmogorov-Smirnov drift statistic, and equal-width
//! histogram binning used to turn raw samples into PSI proportions.
//!
//! # Examples
//!
//! ```
//! use u_monitor::distribution::{ecdf, normal_cdf};
//!
//! assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
//! assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
//!
//! let (values, probs) = ecdf(&[3.0, 1.0, 2.0, 1.0]);
//! assert_eq!(values, vec![1.0, 2.0, 3.0]);
//! assert!((probs[0] - 0.5).abs() < 1e-12);
//! ```

use crate::error::{require_len, EngineError, Result};

// Abramowitz & Stegun 7.1.26 coefficients.
const ERF_P: f64 = 0.327_591_1;
const ERF_A1: f64 = 0.254_829_592;
const ERF_A2: f64 = -0.284_496_736;
const ERF_A3: f64 = 1.421_413_741;
const ERF_A4: f64 = -1.453_152_027;
const ERF_A5: f64 = 1.061_405_429;

/// Standard normal cumulative distribution function Φ(z).
///
/// # Algorithm
///
/// ```text
/// Φ(z) = 0.5 · (1 + sign(z) · erf(|z| / √2))
/// erf(x) ≈ 1 − (a1·t + a2·t² + a3·t³ + a4·t⁴ + a5·t⁵) · exp(−x²),  t = 1 / (1 + p·x)
/// ```
///
/// The polynomial is only ever evaluated at `|z|`, so Φ(−z) = 1 − Φ(z)
/// holds to floating rounding. Absolute error of the erf approximation is
/// at most 1.5e-7.
///
/// Behavior for infinite or NaN input is unspecified.
///
/// # Reference
///
/// Abramowitz & Stegun (1964), *Handbook of Mathematical Functions*, 7.1.26.
pub fn normal_cdf(z: f64) -> f64 {
    let sign = if z < 0.0 { -1.0 } else { 1.0 };
    let x = z.abs() / std::f64::consts::SQRT_2;

    let t = 1.0 / (1.0 + ERF_P * x);
    let poly = ((((ERF_A5 * t + ERF_A4) * t + ERF_A3) * t + ERF_A2) * t + ERF_A1) * t;
    let erf = 1.0 - poly * (-x * x).exp();

    0.5 * (1.0 + sign * erf)
}

/// Empirical CDF: F_n(x) = (number of observations ≤ x) / n.
///
/// Returns the sorted distinct values and the cumulative probability at
/// each. Empty input yields two empty vectors.
pub fn ecdf(data: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let sorted = sorted_copy(data);
    let n = sorted.len() as f64;

    let mut values = Vec::new();
    let mut probs = Vec::new();

    let mut i = 0;
    while i < sorted.len() {
        let val = sorted[i];
        let mut j = i;
        while j < sorted.len() && sorted[j] == val {
            j += 1;
        }
        values.push(val);
        probs.push(j as f64 / n);
        i = j;
    }

    (values, probs)
}

/// Fraction of an ascending-sorted sample that is ≤ `v`.
pub(crate) fn ecdf_at(sorted: &[f64], v: f64) -> f64 {
    sorted.partition_point(|&x| x <= v) as f64 / sorted.len() as f64
}

/// Ascending copy ordered with [`f64::total_cmp`].
pub(crate) fn sorted_copy(data: &[f64]) -> Vec<f64> {
    let mut sorted = data.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}

/// Equal-width histogram bin edges.
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    /// Left edge of the first bin.
    pub min: f64,
    /// Bin width.
    pub width: f64,
    /// Number of bins.
    pub n_bins: usize,
}

impl BinEdges {
    /// Builds `n_bins` equal-width bins spanning `[min, max]`.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `n_bins == 0` or the range is empty or non-finite.
    pub fn spanning(min: f64, max: f64, n_bins: usize) -> Result<Self> {
        if n_bins == 0 {
            return Err(EngineError::InvalidParameter {
                name: "n_bins",
                value: 0.0,
                reason: "must be at least 1",
            });
        }
        let range = max - min;
        if !(range > 0.0 && range.is_finite()) {
            return Err(EngineError::InvalidParameter {
                name: "range",
                value: range,
                reason: "sample range must be positive and finite",
            });
        }
        Ok(Self {
            min,
            width: range / n_bins as f64,
            n_bins,
        })
    }

    /// Sturges' rule: k = ⌈log₂(n)⌉ + 1, at least 2.
    pub fn sturges_count(n: usize) -> usize {
        let k = (n.max(1) as f64).log2().ceil() as usize + 1;
        k.max(2)
    }

    /// Bin index for `x`. Values outside the span are clamped into the
    /// first or last bin.
    pub fn bin_of(&self, x: f64) -> usize {
        let pos = ((x - self.min) / self.width).floor();
        if pos <= 0.0 {
            0
        } else {
            (pos as usize).min(self.n_bins - 1)
        }
    }

    /// Normalized bin proportions of `data`; the result sums to 1.
    ///
    /// # Errors
    ///
    /// `InsufficientData` if `data` is empty.
    pub fn proportions(&self, data: &[f64]) -> Result<Vec<f64>> {
        require_len(1, data.len())?;
        let mut counts = vec![0_usize; self.n_bins];
        for &x in data {
            counts[self.bin_of(x)] += 1;
        }
        let n = data.len() as f64;
        Ok(counts.into_iter().map(|c| c as f64 / n).collect())
    }
}
