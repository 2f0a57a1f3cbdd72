//! Weibull reliability and remaining useful life.
//!
//! Works from already-known shape and scale parameters; fitting them to
//! failure data happens upstream.
//!
//! - [`WeibullReliability`] — S(t), h(t), mean life, B-life, conditional reliability
//! - [`RemainingLife`] — median remaining life with confidence bounds
//!
//! # References
//!
//! - Abernethy, R.B. (2006). *The New Weibull Handbook*, 5th ed.
//! - Meeker, W.Q. & Escobar, L.A. (1998). *Statistical Methods for Reliability Data*.

mod reliability;

pub use reliability::{RemainingLife, WeibullReliability};
