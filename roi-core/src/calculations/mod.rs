//! ROI calculation modules.
//!
//! This module provides the projection logic for switching from manual to
//! automated invoice processing, plus the shared rounding helpers.

pub mod common;
pub mod roi;

pub use roi::{RoiAssumptions, RoiCalculationError, RoiCalculator};
