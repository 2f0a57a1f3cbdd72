//! Weibull reliability and remaining-useful-life estimates.
//!
//! Turns shape (beta) and scale (eta) parameters plus a unit's current age
//! into survival, hazard and remaining-life figures.

use serde::{Deserialize, Serialize};
use statrs::function::gamma::gamma;

use crate::config::RulParams;
use crate::error::{require_non_negative, require_positive, EngineError, Result};

/// Reliability model for a Weibull(beta, eta) life distribution.
///
/// # Mathematical Background
///
/// - Survival: S(t) = exp(-(t/eta)^beta)
/// - Hazard rate: h(t) = (beta/eta) * (t/eta)^(beta-1)
/// - Quantile life: t_p = eta * (-ln p)^(1/beta), where S(t_p) = p
/// - Mean life: eta * Gamma(1 + 1/beta)
///
/// # Examples
///
/// ```
/// use u_monitor::weibull::WeibullReliability;
///
/// let w = WeibullReliability::new(2.0, 100.0).unwrap();
/// assert!((w.survival(0.0) - 1.0).abs() < 1e-12);
/// assert!(w.hazard(50.0) > 0.0);
/// let b10 = w.b_life(0.10).unwrap();
/// assert!(b10 > 0.0 && b10 < 100.0);
/// ```
///
/// # Reference
/// Meeker & Escobar (1998), *Statistical Methods for Reliability Data*, Wiley.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeibullReliability {
    shape: f64,
    scale: f64,
}

/// Remaining useful life at a given age.
///
/// Every field is floored at zero: a unit already past a quantile life
/// reports zero remaining life, not a negative one. The estimate is not
/// conditioned on the unit having survived to its current age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemainingLife {
    /// Median life minus current age.
    pub median: f64,
    /// Lower bound at the requested confidence.
    pub lower: f64,
    /// Upper bound at the requested confidence.
    pub upper: f64,
    /// Two-sided confidence level used for the bounds.
    pub confidence: f64,
}

impl WeibullReliability {
    /// Creates a model from Weibull parameters.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `shape` or `scale` is not positive and finite.
    pub fn new(shape: f64, scale: f64) -> Result<Self> {
        let shape = require_positive("shape", shape)?;
        let scale = require_positive("scale", scale)?;
        Ok(Self { shape, scale })
    }

    /// Shape parameter (beta).
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale parameter (eta).
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Survival function S(t). Returns 1 for t <= 0.
    pub fn survival(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 1.0;
        }
        (-(t / self.scale).powf(self.shape)).exp()
    }

    /// Hazard rate h(t).
    ///
    /// - beta < 1: decreasing (infant mortality), unbounded at t = 0
    /// - beta = 1: constant 1/eta
    /// - beta > 1: increasing (wear-out), zero at t = 0
    ///
    /// Returns 0 for t < 0.
    pub fn hazard(&self, t: f64) -> f64 {
        if t < 0.0 {
            return 0.0;
        }
        (self.shape / self.scale) * (t / self.scale).powf(self.shape - 1.0)
    }

    /// Mean life, eta * Gamma(1 + 1/beta).
    pub fn mean_life(&self) -> f64 {
        self.scale * gamma(1.0 + 1.0 / self.shape)
    }

    /// Life at which survival drops to `p`: eta * (-ln p)^(1/beta).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `p` is outside (0, 1).
    pub fn time_to_reliability(&self, p: f64) -> Result<f64> {
        if !(p > 0.0 && p < 1.0) {
            return Err(EngineError::InvalidParameter {
                name: "p",
                value: p,
                reason: "must be in (0, 1)",
            });
        }
        Ok(self.quantile_life(p))
    }

    /// B-life: time by which `fraction_failed` of the population has failed.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `fraction_failed` is outside (0, 1).
    pub fn b_life(&self, fraction_failed: f64) -> Result<f64> {
        if !(fraction_failed > 0.0 && fraction_failed < 1.0) {
            return Err(EngineError::InvalidParameter {
                name: "fraction_failed",
                value: fraction_failed,
                reason: "must be in (0, 1)",
            });
        }
        Ok(self.quantile_life(1.0 - fraction_failed))
    }

    /// Probability of surviving a further `horizon` given survival to `age`:
    /// S(age + horizon) / S(age).
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `age` or `horizon` is negative.
    pub fn conditional_reliability(&self, age: f64, horizon: f64) -> Result<f64> {
        let age = require_non_negative("age", age)?;
        let horizon = require_non_negative("horizon", horizon)?;
        let at_age = self.survival(age);
        if at_age == 0.0 {
            return Ok(0.0);
        }
        Ok(self.survival(age + horizon) / at_age)
    }

    /// Remaining useful life for a unit of the given age.
    ///
    /// The median is the life where S = 0.5. For confidence c the bounds
    /// come from the lives where S = 1 - (1 - c)/2 (lower) and S = (1 - c)/2
    /// (upper). Current age is subtracted from each and the result floored
    /// at zero.
    ///
    /// # Errors
    ///
    /// `InvalidParameter` if `age` is negative or the confidence level is
    /// outside (0, 1).
    ///
    /// # Examples
    ///
    /// ```
    /// use u_monitor::config::RulParams;
    /// use u_monitor::weibull::WeibullReliability;
    ///
    /// let w = WeibullReliability::new(2.0, 1000.0).unwrap();
    /// let rul = w.remaining_life(200.0, &RulParams::default()).unwrap();
    /// assert!(rul.lower < rul.median && rul.median < rul.upper);
    /// ```
    pub fn remaining_life(&self, age: f64, params: &RulParams) -> Result<RemainingLife> {
        let age = require_non_negative("age", age)?;
        params.validate()?;

        let tail = (1.0 - params.confidence) / 2.0;
        let median_life = self.quantile_life(0.5);
        let early_life = self.quantile_life(1.0 - tail);
        let late_life = self.quantile_life(tail);

        Ok(RemainingLife {
            median: (median_life - age).max(0.0),
            lower: (early_life - age).max(0.0),
            upper: (late_life - age).max(0.0),
            confidence: params.confidence,
        })
    }

    fn quantile_life(&self, p: f64) -> f64 {
        self.scale * (-p.ln()).powf(1.0 / self.shape)
    }
}
