//! Tuning parameters with documented defaults.
//!
//! Every routine that takes a tuning constant receives it through one of
//! the structs below rather than through a literal default in its
//! signature, so a dashboard can override any field per view and the
//! override can be tested on its own.
//!
//! All structs deserialize with `#[serde(default)]`: a partial document
//! only overrides the fields it names.
//!
//! # Examples
//!
//! ```
//! use u_monitor::config::{EngineConfig, EwmaParams};
//!
//! let config = EngineConfig {
//!     ewma: EwmaParams { lambda: 0.1, ..EwmaParams::default() },
//!     ..EngineConfig::default()
//! };
//! assert!(config.validate().is_ok());
//! assert_eq!(config.cusum.k, 0.5);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, EngineError, Result};

/// Aggregate configuration for one dashboard view.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// EWMA chart tuning.
    pub ewma: EwmaParams,
    /// CUSUM chart tuning.
    pub cusum: CusumParams,
    /// Remaining-useful-life tuning.
    pub rul: RulParams,
    /// PSI interpretation thresholds.
    pub drift: DriftThresholds,
}

impl EngineConfig {
    /// Validates every section.
    pub fn validate(&self) -> Result<()> {
        self.ewma.validate()?;
        self.cusum.validate()?;
        self.rul.validate()?;
        self.drift.validate()
    }
}

/// EWMA chart parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EwmaParams {
    /// Smoothing constant in (0, 1]. Default 0.2.
    pub lambda: f64,
    /// Control limit width in multiples of sigma. Default 3.0.
    pub l_factor: f64,
}

impl Default for EwmaParams {
    fn default() -> Self {
        Self {
            lambda: 0.2,
            l_factor: 3.0,
        }
    }
}

impl EwmaParams {
    /// Checks `0 < lambda <= 1` and `l_factor > 0`.
    pub fn validate(&self) -> Result<()> {
        if !(self.lambda > 0.0 && self.lambda <= 1.0) {
            tracing::debug!(lambda = self.lambda, "rejected EWMA smoothing constant");
            return Err(EngineError::InvalidParameter {
                name: "lambda",
                value: self.lambda,
                reason: "must be in (0, 1]",
            });
        }
        require_positive("l_factor", self.l_factor)?;
        Ok(())
    }
}

/// CUSUM chart parameters, both in multiples of the reference sigma.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CusumParams {
    /// Reference value (allowance). Default 0.5.
    pub k: f64,
    /// Decision interval. Default 5.0.
    pub h: f64,
}

impl Default for CusumParams {
    fn default() -> Self {
        Self { k: 0.5, h: 5.0 }
    }
}

impl CusumParams {
    /// Checks `k >= 0` and `h > 0`.
    pub fn validate(&self) -> Result<()> {
        require_non_negative("k", self.k)?;
        require_positive("h", self.h)?;
        Ok(())
    }
}

/// Remaining-useful-life parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulParams {
    /// Two-sided confidence level in (0, 1). Default 0.90.
    pub confidence: f64,
}

impl Default for RulParams {
    fn default() -> Self {
        Self { confidence: 0.90 }
    }
}

impl RulParams {
    /// Checks `0 < confidence < 1`.
    pub fn validate(&self) -> Result<()> {
        if self.confidence > 0.0 && self.confidence < 1.0 {
            Ok(())
        } else {
            tracing::debug!(confidence = self.confidence, "rejected confidence level");
            Err(EngineError::InvalidParameter {
                name: "confidence",
                value: self.confidence,
                reason: "must be in (0, 1)",
            })
        }
    }
}

/// Population Stability Index interpretation thresholds.
///
/// | PSI | Reading |
/// |-----|---------|
/// | < `moderate` | no or small drift |
/// | `moderate` .. `significant` | moderate drift |
/// | > `significant` | large drift, retraining warranted |
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftThresholds {
    /// Lower threshold. Default 0.1.
    pub moderate: f64,
    /// Upper threshold. Default 0.25.
    pub significant: f64,
}

impl Default for DriftThresholds {
    fn default() -> Self {
        Self {
            moderate: 0.1,
            significant: 0.25,
        }
    }
}

impl DriftThresholds {
    /// Checks `0 <= moderate <= significant`.
    pub fn validate(&self) -> Result<()> {
        require_non_negative("moderate", self.moderate)?;
        require_non_negative("significant", self.significant)?;
        if self.significant < self.moderate {
            return Err(EngineError::InvalidParameter {
                name: "significant",
                value: self.significant,
                reason: "must not be below the moderate threshold",
            });
        }
        Ok(())
    }
}
