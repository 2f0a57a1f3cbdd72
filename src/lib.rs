//! # u-monitor
//!
//! Statistical process monitoring and forecast-risk estimation.
//!
//! Stateless numerical routines over raw `f64` data. Each call either
//! succeeds with a full result record or fails with an [`EngineError`];
//! nothing is cached or shared between calls, so every function is safe to
//! run concurrently on independent inputs.
//!
//! ## Modules
//!
//! - [`distribution`] — Normal CDF, empirical CDF, shared binning
//! - [`capability`] — Spec-limit risk, projected Cpk, sigma-level conversion
//! - [`drift`] — Population Stability Index and two-sample KS statistic
//! - [`detection`] — EWMA and CUSUM control charts
//! - [`accuracy`] — RMSE, MAE, MAPE, sMAPE, MASE
//! - [`weibull`] — Weibull survival, hazard, remaining useful life
//! - [`config`] — Tunable parameters with validated defaults
//! - [`error`] — Error type shared by every operation
//!
//! ## Example
//!
//! ```
//! use u_monitor::capability::{spec_risk, SpecLimits};
//!
//! let limits = SpecLimits::new(9.0, 10.0, 11.0);
//! let risk = spec_risk(10.0, 0.25, &limits).unwrap();
//! assert!(risk.ppm < 100.0);
//! ```

pub mod accuracy;
pub mod capability;
pub mod config;
pub mod detection;
pub mod distribution;
pub mod drift;
pub mod error;
pub mod weibull;

pub use config::EngineConfig;
pub use error::{EngineError, Result};
