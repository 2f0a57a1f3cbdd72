//! Control-chart shift detection.
//!
//! Both charts are strictly sequential: each step depends on the previous
//! one, so a series is processed in a single pass in index order.
//! Independent series share no state and may be charted concurrently.
//!
//! # Charts
//!
//! - [`Cusum`] — Cumulative Sum chart (Page, 1954) for detecting small persistent shifts
//! - [`Ewma`] — Exponentially Weighted Moving Average chart (Roberts, 1959)
//!
//! Each chart computes its [`Reference`] mean and sigma over the entire
//! series it receives. There is no built-in notion of a baseline window:
//! callers that want Phase I / Phase II separation slice the input, or
//! estimate a [`Reference`] on the baseline and use `analyze_with_reference`.
//!
//! # References
//!
//! - Page, E.S. (1954). "Continuous Inspection Schemes",
//!   *Biometrika* 41(1/2), pp. 100-115.
//! - Roberts, S.W. (1959). "Control Chart Tests Based on Geometric Moving Averages",
//!   *Technometrics* 1(3), pp. 239-250.

mod cusum;
mod ewma;
mod reference;

pub use cusum::{Cusum, CusumChart};
pub use ewma::{Ewma, EwmaChart};
pub use reference::Reference;
