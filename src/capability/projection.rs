//! Projected capability indices from a within-subgroup sigma.
//!
//! Capability here is informational: it relates the distance to the nearer
//! limit to three short-term standard deviations. It takes its own sigma
//! argument, separate from the one passed to [`spec_risk`](super::spec_risk),
//! so callers can use a within-subgroup estimate for capability and a
//! total forecast uncertainty for risk.
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 8.
//! - Chan, Cheng & Spiring (1988), "A New Measure of Process Capability: Cpm",
//!   *Journal of Quality Technology* 20(3), pp. 162--175.

use serde::{Deserialize, Serialize};

use super::risk::SpecLimits;
use crate::error::{require_positive, Result};

/// Capability indices projected from a mean and within-subgroup sigma.
///
/// | Index | Value | Interpretation |
/// |-------|-------|----------------|
/// | Cp | >= 1.33 | Spread fits the tolerance |
/// | Cpk | >= 1.33 | Capable and centered |
/// | Cpm | >= 1.33 | Meets the Taguchi loss criterion |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityProjection {
    /// Cp = (USL - LSL) / (6 * sigma_w).
    pub cp: f64,
    /// Cpu = (USL - mean) / (3 * sigma_w).
    pub cpu: f64,
    /// Cpl = (mean - LSL) / (3 * sigma_w).
    pub cpl: f64,
    /// Cpk = min(Cpu, Cpl).
    pub cpk: f64,
    /// Cpm = (USL - LSL) / (6 * sqrt(sigma_w² + (mean - target)²)).
    pub cpm: f64,
}

/// Projected Cpk = min((USL - mean) / 3σ_w, (mean - LSL) / 3σ_w).
///
/// # Errors
///
/// `InvalidParameter` if `sigma_within` is not positive and finite.
///
/// # Examples
///
/// ```
/// use u_monitor::capability::{projected_cpk, SpecLimits};
///
/// let limits = SpecLimits::new(9.0, 10.0, 11.0);
/// let cpk = projected_cpk(10.5, 0.1, &limits).unwrap();
/// assert!((cpk - 0.5 / 0.3).abs() < 1e-12);
/// ```
pub fn projected_cpk(mean: f64, sigma_within: f64, limits: &SpecLimits) -> Result<f64> {
    let sigma = require_positive("sigma_within", sigma_within)?;
    let cpu = (limits.usl - mean) / (3.0 * sigma);
    let cpl = (mean - limits.lsl) / (3.0 * sigma);
    Ok(cpu.min(cpl))
}

/// Computes the full projected index set. `cpk` equals [`projected_cpk`].
///
/// # Errors
///
/// `InvalidParameter` if `sigma_within` is not positive and finite.
pub fn project_capability(
    mean: f64,
    sigma_within: f64,
    limits: &SpecLimits,
) -> Result<CapabilityProjection> {
    let sigma = require_positive("sigma_within", sigma_within)?;
    let tolerance = limits.usl - limits.lsl;

    let cpu = (limits.usl - mean) / (3.0 * sigma);
    let cpl = (mean - limits.lsl) / (3.0 * sigma);
    let off_target = mean - limits.target;
    let tau = (sigma * sigma + off_target * off_target).sqrt();

    Ok(CapabilityProjection {
        cp: tolerance / (6.0 * sigma),
        cpu,
        cpl,
        cpk: cpu.min(cpl),
        cpm: tolerance / (6.0 * tau),
    })
}
