//! Error types for the monitoring engine.
//!
//! Parameter and shape errors are fatal and surface to the caller
//! immediately. Degenerate-but-defined inputs (zero denominators in
//! percentage errors, empty PSI bins, negative remaining life) are handled
//! inside the individual routines and never produce an error.

use thiserror::Error;

/// Errors returned by the engine's numeric routines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A scalar parameter is outside its valid domain.
    ///
    /// # When This Occurs
    ///
    /// - sigma <= 0 for the risk calculator or capability projector
    /// - Weibull shape or scale <= 0, negative age, confidence outside (0, 1)
    /// - EWMA lambda outside (0, 1], non-positive limit width
    /// - negative CUSUM reference value, non-positive decision interval
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as it appears in the public API.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// Two series that must be aligned have different lengths.
    #[error("length mismatch: {left} vs {right}")]
    LengthMismatch {
        /// Length of the first (baseline / actual) series.
        left: usize,
        /// Length of the second (current / forecast) series.
        right: usize,
    },

    /// A series is too short to compute the requested statistic.
    #[error("insufficient data: need at least {required} points, got {actual}")]
    InsufficientData {
        /// Minimum number of points.
        required: usize,
        /// Number of points supplied.
        actual: usize,
    },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Requires `value > 0`. NaN fails the comparison and is rejected.
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        tracing::debug!(param = name, value, "rejected non-positive parameter");
        Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must be positive and finite",
        })
    }
}

/// Requires `value >= 0`.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        tracing::debug!(param = name, value, "rejected negative parameter");
        Err(EngineError::InvalidParameter {
            name,
            value,
            reason: "must be non-negative and finite",
        })
    }
}

/// Requires two series to have the same length.
pub(crate) fn require_same_len(left: usize, right: usize) -> Result<()> {
    if left == right {
        Ok(())
    } else {
        tracing::debug!(left, right, "rejected misaligned series");
        Err(EngineError::LengthMismatch { left, right })
    }
}

/// Requires a series to hold at least `required` points.
pub(crate) fn require_len(required: usize, actual: usize) -> Result<()> {
    if actual >= required {
        Ok(())
    } else {
        tracing::debug!(required, actual, "rejected short series");
        Err(EngineError::InsufficientData { required, actual })
    }
}
