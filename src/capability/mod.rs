//! Specification risk and projected process capability.
//!
//! The risk-card flow calls [`spec_risk`] with a forecast's mean and total
//! uncertainty, and [`projected_cpk`] with the same mean and a short-term
//! sigma. The two entry points are independent: nothing in
//! this module reconciles the two sigmas.
//!
//! # Risk
//!
//! - [`spec_risk`] — tail probabilities, ppm, yield and z-scores
//!
//! # Capability
//!
//! - [`projected_cpk`] — Cpk from a within-subgroup sigma
//! - [`project_capability`] — Cp, Cpu, Cpl, Cpk, Cpm
//!
//! # Sigma Level
//!
//! - [`sigma_to_ppm`] / [`ppm_to_sigma`] — 1.5-sigma shift convention
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.

mod projection;
mod risk;
mod sigma_level;

pub use projection::{project_capability, projected_cpk, CapabilityProjection};
pub use risk::{spec_risk, RiskAssessment, SpecLimits};
pub use sigma_level::{ppm_to_sigma, sigma_to_ppm};
