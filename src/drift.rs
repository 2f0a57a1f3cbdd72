//! Distribution drift between a baseline and a current window.
//!
//! - [`psi`] — Population Stability Index over pre-binned proportions
//! - [`psi_from_samples`] — PSI after equal-width binning of raw samples
//! - [`ks_statistic`] — two-sample Kolmogorov-Smirnov statistic
//!
//! # Examples
//!
//! ```
//! use u_monitor::config::DriftThresholds;
//! use u_monitor::drift::{ks_statistic, psi, DriftSeverity};
//!
//! let baseline = [0.25, 0.25, 0.25, 0.25];
//! let current = [0.05, 0.15, 0.30, 0.50];
//! let value = psi(&baseline, &current).unwrap();
//! assert_eq!(DriftThresholds::default().classify(value), DriftSeverity::Significant);
//!
//! let d = ks_statistic(&[1.0, 2.0, 3.0], &[10.0, 11.0]).unwrap();
//! assert_eq!(d, 1.0);
//! ```
//!
//! # References
//!
//! - Yurdakul, B. (2018). "Statistical Properties of Population Stability
//!   Index", Western Michigan University dissertation.
//! - Massey, F.J. (1951). "The Kolmogorov-Smirnov Test for Goodness of Fit",
//!   *JASA* 46(253), pp. 68-78.

use serde::{Deserialize, Serialize};

use crate::config::DriftThresholds;
use crate::distribution::{ecdf_at, sorted_copy, BinEdges};
use crate::error::{require_len, require_same_len, Result};

/// Floor applied to every bin proportion before the logarithm.
pub const PSI_EPSILON: f64 = 1e-10;

/// Coarse reading of a PSI value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriftSeverity {
    /// Below the moderate threshold.
    Stable,
    /// Between the two thresholds.
    Moderate,
    /// Above the significant threshold; retraining warranted.
    Significant,
}

impl DriftThresholds {
    /// Classifies a PSI value. Informational only.
    pub fn classify(&self, psi: f64) -> DriftSeverity {
        if psi > self.significant {
            DriftSeverity::Significant
        } else if psi >= self.moderate {
            DriftSeverity::Moderate
        } else {
            DriftSeverity::Stable
        }
    }
}

/// Population Stability Index.
///
/// ```text
/// PSI = Σ (c_i - b_i) · ln(c_i / b_i),   b_i, c_i floored at 1e-10
/// ```
///
/// Inputs are normalized bin proportions over the same binning. Each term
/// is non-negative, so PSI ≥ 0, and identical inputs give exactly 0.
///
/// # Errors
///
/// `LengthMismatch` if the two vectors differ in length.
pub fn psi(baseline: &[f64], current: &[f64]) -> Result<f64> {
    require_same_len(baseline.len(), current.len())?;

    let value: f64 = baseline
        .iter()
        .zip(current)
        .map(|(&b, &c)| {
            let b = b.max(PSI_EPSILON);
            let c = c.max(PSI_EPSILON);
            (c - b) * (c / b).ln()
        })
        .sum();

    tracing::trace!(bins = baseline.len(), psi = value, "computed PSI");
    Ok(value)
}

/// PSI between two raw samples.
///
/// Both samples are binned into the same equal-width bins spanning their
/// combined range. `n_bins` defaults to Sturges' rule on the baseline size.
///
/// # Errors
///
/// - `InsufficientData` if the baseline has fewer than 2 points or the
///   current sample is empty
/// - `InvalidParameter` if the combined range is zero or `n_bins == Some(0)`
pub fn psi_from_samples(baseline: &[f64], current: &[f64], n_bins: Option<usize>) -> Result<f64> {
    require_len(2, baseline.len())?;
    require_len(1, current.len())?;

    let (min, max) = baseline
        .iter()
        .chain(current)
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    let n_bins = n_bins.unwrap_or_else(|| BinEdges::sturges_count(baseline.len()));
    let bins = BinEdges::spanning(min, max, n_bins)?;

    psi(&bins.proportions(baseline)?, &bins.proportions(current)?)
}

/// Two-sample Kolmogorov-Smirnov statistic.
///
/// Evaluates both empirical CDFs (fraction of the sample ≤ v) at every
/// distinct value v in either sample and returns the largest absolute gap.
/// The result lies in [0, 1].
///
/// # Errors
///
/// `InsufficientData` if either sample is empty.
///
/// # Complexity
///
/// Time: O((n + m) log(n + m)), Space: O(n + m)
pub fn ks_statistic(a: &[f64], b: &[f64]) -> Result<f64> {
    require_len(1, a.len())?;
    require_len(1, b.len())?;

    let sorted_a = sorted_copy(a);
    let sorted_b = sorted_copy(b);

    let mut points: Vec<f64> = sorted_a.iter().chain(&sorted_b).copied().collect();
    points.sort_by(f64::total_cmp);
    points.dedup();

    let d = points
        .iter()
        .map(|&v| (ecdf_at(&sorted_a, v) - ecdf_at(&sorted_b, v)).abs())
        .fold(0.0_f64, f64::max);

    tracing::trace!(n = a.len(), m = b.len(), ks = d, "computed KS statistic");
    Ok(d)
}
