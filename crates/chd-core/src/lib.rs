//! chd-core — shared library for ten-year CHD risk assessment.
//!
//! Provides patient feature assembly, classifier artifact loading with
//! process-lifetime memoization, risk assessment, and result reporting
//! used by both the CLI and GUI frontends.

pub mod assess;
pub mod cache;
pub mod features;
pub mod model;
pub mod report;
