//! Sigma quality level conversions for the risk card.
//!
//! Uses the Motorola convention of a 1.5-sigma long-term shift:
//!
//! ```text
//! PPM   = 1,000,000 * (1 - Φ(sigma - 1.5))
//! sigma = Φ⁻¹(1 - PPM / 1,000,000) + 1.5
//! ```
//!
//! | Sigma | PPM |
//! |-------|-----|
//! | 6.0   | 3.4 |
//! | 5.0   | 233 |
//! | 4.0   | 6,210 |
//! | 3.0   | 66,807 |
//!
//! # References
//!
//! - Harry & Schroeder (2000), *Six Sigma: The Breakthrough Management
//!   Strategy Revolutionizing the World's Top Corporations*.

use statrs::function::erf::erfc_inv;

use super::risk::RiskAssessment;
use crate::distribution::normal_cdf;
use crate::error::{EngineError, Result};

const SHIFT: f64 = 1.5;
const MILLION: f64 = 1_000_000.0;

/// Converts a sigma quality level to a defect rate in PPM.
///
/// # Examples
///
/// ```
/// use u_monitor::capability::sigma_to_ppm;
///
/// assert!((sigma_to_ppm(6.0) - 3.4).abs() < 1.0);
/// ```
pub fn sigma_to_ppm(sigma: f64) -> f64 {
    MILLION * (1.0 - normal_cdf(sigma - SHIFT))
}

/// Converts a defect rate in PPM to a sigma quality level.
///
/// The inverse normal is evaluated on the tail probability q = ppm / 10⁶
/// as `Φ⁻¹(1 - q) = √2 · erfc⁻¹(2q)`, so tiny defect rates keep their
/// precision instead of rounding `1 - q` to 1. A round trip through
/// [`sigma_to_ppm`] differs only by the forward CDF approximation.
///
/// # Errors
///
/// `InvalidParameter` unless `0 < ppm < 1,000,000`.
pub fn ppm_to_sigma(ppm: f64) -> Result<f64> {
    if !(ppm > 0.0 && ppm < MILLION) {
        return Err(EngineError::InvalidParameter {
            name: "ppm",
            value: ppm,
            reason: "must be in (0, 1000000)",
        });
    }
    let tail = ppm / MILLION;
    let z = std::f64::consts::SQRT_2 * erfc_inv(2.0 * tail);
    Ok(z + SHIFT)
}

impl RiskAssessment {
    /// Sigma quality level equivalent to this assessment's ppm.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` when ppm is 0 (risk below floating resolution) or
    /// at least one million.
    pub fn sigma_level(&self) -> Result<f64> {
        ppm_to_sigma(self.ppm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{spec_risk, SpecLimits};

    #[test]
    fn test_sigma_to_ppm_table() {
        let cases = [
            (6.0, 3.4, 1.0),
            (5.0, 233.0, 20.0),
            (4.0, 6_210.0, 200.0),
            (3.0, 66_807.0, 500.0),
        ];
        for (sigma, expected, tol) in cases {
            let ppm = sigma_to_ppm(sigma);
            assert!(
                (ppm - expected).abs() < tol,
                "{sigma}-sigma should be ~{expected} PPM, got {ppm}"
            );
        }
    }

    #[test]
    fn test_sigma_to_ppm_decreasing() {
        let ppms: Vec<f64> = (1..=6).map(|s| sigma_to_ppm(s as f64)).collect();
        for w in ppms.windows(2) {
            assert!(w[0] > w[1], "PPM should fall as sigma rises: {} <= {}", w[0], w[1]);
        }
    }

    #[test]
    fn test_ppm_to_sigma_roundtrip() {
        for sigma in [2.0, 3.0, 4.5, 6.0] {
            let recovered = ppm_to_sigma(sigma_to_ppm(sigma)).expect("valid ppm");
            assert!(
                (recovered - sigma).abs() < 0.01,
                "sigma {sigma} recovered as {recovered}"
            );
        }
    }

    #[test]
    fn test_ppm_to_sigma_rejects_out_of_range() {
        for ppm in [0.0, -1.0, 1_000_000.0, 1_500_000.0, f64::NAN] {
            assert!(ppm_to_sigma(ppm).is_err(), "ppm {ppm} should be rejected");
        }
    }

    #[test]
    fn test_ppm_to_sigma_tiny_defect_rate() {
        // q = 1e-17 sits far below f64 resolution around 1.0.
        let sigma = ppm_to_sigma(1e-11).expect("valid ppm");
        assert!(sigma.is_finite(), "sigma level = {sigma}");
        assert!((sigma - 10.0).abs() < 0.05, "sigma level = {sigma}, expected ≈ 10");

        let deeper = ppm_to_sigma(1e-8).expect("valid ppm");
        assert!(deeper < sigma, "more defects means a lower sigma level");
    }

    #[test]
    fn test_ppm_to_sigma_median_is_shift() {
        // Half the output out of spec: z = 0.
        let sigma = ppm_to_sigma(500_000.0).expect("valid ppm");
        assert!((sigma - 1.5).abs() < 1e-9, "sigma level = {sigma}");
    }

    #[test]
    fn test_risk_assessment_sigma_level() {
        // Mean 1.5 sigma off-center with USL 6 sigma away from target.
        let limits = SpecLimits::new(-6.0, 0.0, 6.0);
        let risk = spec_risk(1.5, 1.0, &limits).expect("valid sigma");
        let level = risk.sigma_level().expect("ppm in range");
        assert!((level - 6.0).abs() < 0.05, "sigma level = {level}");
    }
}
