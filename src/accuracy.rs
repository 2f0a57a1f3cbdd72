//! Forecast accuracy metrics.
//!
//! All metrics are accumulated in a single pass over aligned
//! (actual, forecast) pairs with error e = actual − forecast:
//!
//! ```text
//! RMSE  = sqrt(Σ e² / n)
//! MAE   = Σ |e| / n
//! MAPE  = 100 · mean(|e / actual|)                      over pairs with actual ≠ 0
//! sMAPE = 100 · mean(|e| / ((|actual| + |forecast|) / 2)) over pairs with a non-zero denominator
//! MASE  = MAE / reference
//! ```
//!
//! Pairs with a zero percentage denominator are skipped rather than
//! producing NaN or infinity. When no pair qualifies the metric is 0.
//!
//! # References
//!
//! - Hyndman, R.J. & Koehler, A.B. (2006). "Another look at measures of
//!   forecast accuracy", *International Journal of Forecasting* 22(4),
//!   pp. 679-688.

use serde::{Deserialize, Serialize};

use crate::error::{require_len, require_positive, require_same_len, EngineError, Result};

/// Accuracy of one forecast against the observed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AccuracyMetrics {
    /// Root mean squared error.
    pub rmse: f64,
    /// Mean absolute error.
    pub mae: f64,
    /// Mean absolute percentage error, in percent.
    pub mape: f64,
    /// Symmetric mean absolute percentage error, in percent.
    pub smape: f64,
    /// Mean absolute scaled error. Equals `mae` when no reference is given.
    pub mase: f64,
}

#[derive(Default)]
struct Accumulator {
    sq: f64,
    abs: f64,
    pct: f64,
    pct_n: usize,
    sym: f64,
    sym_n: usize,
}

fn mean_or_zero(sum: f64, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Computes RMSE, MAE, MAPE, sMAPE and MASE for aligned series.
///
/// `reference` scales MASE, typically the in-sample MAE of a naive
/// forecast (see [`naive_mae`]). Without a reference MASE falls back to
/// MAE itself.
///
/// # Errors
///
/// - `LengthMismatch` if the series differ in length
/// - `InsufficientData` if the series are empty
/// - `InvalidParameter` if `reference` is given but not positive and finite
///
/// # Examples
///
/// ```
/// use u_monitor::accuracy::forecast_accuracy;
///
/// let actual = [100.0, 110.0, 120.0];
/// let forecast = [90.0, 110.0, 130.0];
/// let m = forecast_accuracy(&actual, &forecast, None).unwrap();
/// assert!((m.mae - 20.0 / 3.0).abs() < 1e-12);
/// assert_eq!(m.mase, m.mae);
/// ```
pub fn forecast_accuracy(
    actual: &[f64],
    forecast: &[f64],
    reference: Option<f64>,
) -> Result<AccuracyMetrics> {
    require_same_len(actual.len(), forecast.len())?;
    require_len(1, actual.len())?;
    let reference = reference
        .map(|r| require_positive("reference", r))
        .transpose()?;

    let acc = actual
        .iter()
        .zip(forecast)
        .fold(Accumulator::default(), |mut acc, (&a, &f)| {
            let e = a - f;
            acc.sq += e * e;
            acc.abs += e.abs();
            if a != 0.0 {
                acc.pct += (e / a).abs();
                acc.pct_n += 1;
            }
            let denom = (a.abs() + f.abs()) / 2.0;
            if denom != 0.0 {
                acc.sym += e.abs() / denom;
                acc.sym_n += 1;
            }
            acc
        });

    let n = actual.len();
    let mae = acc.abs / n as f64;

    Ok(AccuracyMetrics {
        rmse: (acc.sq / n as f64).sqrt(),
        mae,
        mape: 100.0 * mean_or_zero(acc.pct, acc.pct_n),
        smape: 100.0 * mean_or_zero(acc.sym, acc.sym_n),
        mase: reference.map_or(mae, |r| mae / r),
    })
}

/// In-sample MAE of the lag-`lag` naive forecast: mean |y_t − y_{t−lag}|.
///
/// `lag = 1` is the random-walk reference; a seasonal period gives the
/// seasonal-naive reference.
///
/// # Errors
///
/// - `InvalidParameter` if `lag == 0`
/// - `InsufficientData` if `actual.len() <= lag`
pub fn naive_mae(actual: &[f64], lag: usize) -> Result<f64> {
    if lag == 0 {
        return Err(EngineError::InvalidParameter {
            name: "lag",
            value: 0.0,
            reason: "must be at least 1",
        });
    }
    require_len(lag + 1, actual.len())?;

    let diffs = &actual[lag..];
    let sum: f64 = diffs
        .iter()
        .zip(actual)
        .map(|(now, before)| (now - before).abs())
        .sum();
    Ok(sum / diffs.len() as f64)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rejects_unequal_lengths(
            actual in proptest::collection::vec(-1e3_f64..1e3, 0..=30),
            forecast in proptest::collection::vec(-1e3_f64..1e3, 0..=30),
        ) {
            prop_assume!(actual.len() != forecast.len());
            prop_assert_eq!(
                forecast_accuracy(&actual, &forecast, None),
                Err(EngineError::LengthMismatch {
                    left: actual.len(),
                    right: forecast.len(),
                })
            );
        }

        #[test]
        fn rmse_bounds_mae(
            pairs in proptest::collection::vec((-1e3_f64..1e3, -1e3_f64..1e3), 1..=30)
        ) {
            let (actual, forecast): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();
            let m = forecast_accuracy(&actual, &forecast, None).expect("aligned");
            prop_assert!(m.rmse >= m.mae - 1e-9, "RMSE {} < MAE {}", m.rmse, m.mae);
            prop_assert!(m.mape >= 0.0 && m.smape >= 0.0);
        }
    }
}
