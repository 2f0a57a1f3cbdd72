//! Specification-violation risk under a normal model.
//!
//! Converts a forecast mean and its uncertainty into tail probabilities
//! against the specification limits.
//!
//! # Algorithm
//!
//! ```text
//! z_LSL = (mu - LSL) / sigma
//! z_USL = (USL - mu) / sigma
//! P(below LSL) = Φ(-z_LSL)
//! P(above USL) = 1 - Φ(z_USL)
//! ```
//!
//! The two tails are summed without any overlap adjustment. With inverted
//! limits (LSL > USL) the total can exceed 1; limit ordering is the
//! caller's responsibility and is not checked here.

use serde::{Deserialize, Serialize};

use crate::distribution::normal_cdf;
use crate::error::{require_positive, Result};

/// Specification limits (LSL, Target, USL).
///
/// `lsl < target < usl` is expected but never verified by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecLimits {
    /// Lower specification limit.
    pub lsl: f64,
    /// Nominal target.
    pub target: f64,
    /// Upper specification limit.
    pub usl: f64,
}

impl SpecLimits {
    /// Creates a limit triple.
    pub fn new(lsl: f64, target: f64, usl: f64) -> Self {
        Self { lsl, target, usl }
    }

    /// Two-sided limits with the target at the midpoint.
    pub fn centered(lsl: f64, usl: f64) -> Self {
        Self {
            lsl,
            target: (lsl + usl) / 2.0,
            usl,
        }
    }
}

/// Out-of-spec risk for one (mean, sigma) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// P(X < LSL).
    pub prob_below_lsl: f64,
    /// P(X > USL).
    pub prob_above_usl: f64,
    /// Sum of both tails.
    pub prob_out_of_spec: f64,
    /// Expected defective parts per million.
    pub ppm: f64,
    /// Forecasted yield in percent.
    pub yield_pct: f64,
    /// Distance from the mean down to LSL in sigmas.
    pub z_lsl: f64,
    /// Distance from the mean up to USL in sigmas.
    pub z_usl: f64,
}

impl RiskAssessment {
    /// The smaller of the two z-scores (the nearer limit).
    pub fn min_z(&self) -> f64 {
        self.z_lsl.min(self.z_usl)
    }
}

/// Computes the specification-violation risk for a normal process.
///
/// All fields of the result are derived together from
/// `(mean, sigma, limits.lsl, limits.usl)`; `limits.target` is not used.
///
/// # Errors
///
/// `InvalidParameter` if `sigma` is not positive and finite.
///
/// # Examples
///
/// ```
/// use u_monitor::capability::{spec_risk, SpecLimits};
///
/// let limits = SpecLimits::new(45.0, 50.0, 55.0);
/// let risk = spec_risk(50.0, 1.0, &limits).unwrap();
/// assert!((risk.z_lsl - 5.0).abs() < 1e-12);
/// assert!(risk.ppm < 1.0);
/// assert!(risk.yield_pct > 99.9999);
/// ```
pub fn spec_risk(mean: f64, sigma: f64, limits: &SpecLimits) -> Result<RiskAssessment> {
    let sigma = require_positive("sigma", sigma)?;

    let z_lsl = (mean - limits.lsl) / sigma;
    let z_usl = (limits.usl - mean) / sigma;

    let prob_below_lsl = normal_cdf(-z_lsl);
    let prob_above_usl = 1.0 - normal_cdf(z_usl);
    let prob_out_of_spec = prob_below_lsl + prob_above_usl;

    Ok(RiskAssessment {
        prob_below_lsl,
        prob_above_usl,
        prob_out_of_spec,
        ppm: prob_out_of_spec * 1_000_000.0,
        yield_pct: (1.0 - prob_out_of_spec) * 100.0,
        z_lsl,
        z_usl,
    })
}
