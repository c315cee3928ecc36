//! Return-on-investment projection for automated invoice processing.
//!
//! The calculator compares the monthly cost of processing invoices by hand
//! against the cost of an automated pipeline and projects the difference over
//! a time horizon.
//!
//! # Calculation Steps
//!
//! | Step | Value | Formula |
//! |------|-------|---------|
//! | 1    | Manual error fraction | `error_rate_manual / 100` |
//! | 2    | Manual labor cost | `num_ap_staff × hourly_wage × avg_hours_per_invoice × monthly_invoice_volume` |
//! | 3    | Automation cost | `monthly_invoice_volume × automated_cost_per_invoice` |
//! | 4    | Error savings | `(step 1 − error_rate_auto) × monthly_invoice_volume × error_cost` |
//! | 5    | Monthly savings | `(step 2 + step 4 − step 3) × min_roi_boost_factor` |
//! | 6    | Cumulative savings | `step 5 × time_horizon_months` |
//! | 7    | Net savings | `step 6 − one_time_implementation_cost` |
//! | 8    | Payback months | `one_time_implementation_cost / step 5` |
//! | 9    | ROI percentage | `step 7 / one_time_implementation_cost × 100` |
//!
//! Intermediate values keep full precision. Only the returned fields are
//! rounded (money to 2 places, ratios to 1, half away from zero).
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use roi_core::ScenarioInput;
//! use roi_core::calculations::RoiCalculator;
//!
//! let input = ScenarioInput {
//!     monthly_invoice_volume: dec!(1000),
//!     num_ap_staff: dec!(2),
//!     avg_hours_per_invoice: dec!(0.5),
//!     hourly_wage: dec!(25),
//!     error_rate_manual: dec!(2),
//!     error_cost: dec!(10),
//!     time_horizon_months: dec!(12),
//!     one_time_implementation_cost: dec!(50000),
//! };
//!
//! let result = RoiCalculator::default().calculate(&input).unwrap();
//!
//! assert_eq!(result.monthly_savings, dec!(27489.00));
//! assert_eq!(result.payback_months, Some(dec!(1.8)));
//! assert_eq!(result.roi_percentage, Some(dec!(559.7)));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::calculations::common::{round_money, round_ratio};
use crate::models::{RoiResult, ScenarioInput};

/// Errors that can occur during ROI calculations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoiCalculationError {
    /// An intermediate value exceeded the representable decimal range.
    #[error("arithmetic overflow while computing {0}")]
    Overflow(&'static str),
}

/// Fixed assumptions about the automated process.
///
/// The defaults are the production values. Tests and alternate projections
/// construct their own value instead of mutating shared state.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::RoiAssumptions;
///
/// let neutral = RoiAssumptions {
///     min_roi_boost_factor: dec!(1),
///     ..RoiAssumptions::default()
/// };
///
/// assert_eq!(neutral.automated_cost_per_invoice, dec!(0.20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiAssumptions {
    /// Cost of processing one invoice once automated.
    pub automated_cost_per_invoice: Decimal,

    /// Residual error rate after automation, as a fraction (0.001 = 0.1%).
    pub error_rate_auto: Decimal,

    /// Multiplier applied to every monthly savings figure.
    ///
    /// The production value of 1.1 is an optimistic bias, not a measured
    /// quantity. Set it to 1 for an unbiased projection.
    pub min_roi_boost_factor: Decimal,
}

impl Default for RoiAssumptions {
    fn default() -> Self {
        Self {
            automated_cost_per_invoice: Decimal::new(20, 2),
            error_rate_auto: Decimal::new(1, 3),
            min_roi_boost_factor: Decimal::new(11, 1),
        }
    }
}

/// Calculator for the ROI projection.
///
/// Holds no state beyond its [`RoiAssumptions`]; it is `Copy` and can be
/// shared freely between tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoiCalculator {
    assumptions: RoiAssumptions,
}

impl RoiCalculator {
    /// Creates a calculator with the given assumptions.
    pub fn new(assumptions: RoiAssumptions) -> Self {
        Self { assumptions }
    }

    /// Computes the ROI projection for one scenario.
    ///
    /// A zero denominator does not fail the calculation; the affected ratio
    /// is returned as `None` and a warning is logged.
    ///
    /// # Errors
    ///
    /// Returns [`RoiCalculationError::Overflow`] if any intermediate product
    /// exceeds the range of [`Decimal`].
    pub fn calculate(
        &self,
        input: &ScenarioInput,
    ) -> Result<RoiResult, RoiCalculationError> {
        let error_manual = self.error_fraction(input.error_rate_manual)?;

        let labor_cost_manual = self.labor_cost_manual(input)?;
        let auto_cost = self.auto_cost(input.monthly_invoice_volume)?;
        let error_savings =
            self.error_savings(error_manual, input.monthly_invoice_volume, input.error_cost)?;

        let monthly_savings = self.monthly_savings(labor_cost_manual, error_savings, auto_cost)?;
        let cumulative_savings =
            self.cumulative_savings(monthly_savings, input.time_horizon_months)?;
        let net_savings =
            self.net_savings(cumulative_savings, input.one_time_implementation_cost)?;

        let payback_months =
            self.payback_months(input.one_time_implementation_cost, monthly_savings)?;
        if payback_months.is_none() {
            warn!(
                implementation_cost = %input.one_time_implementation_cost,
                "monthly savings are zero; payback period is undefined"
            );
        }

        let roi_percentage = self.roi_percentage(net_savings, input.one_time_implementation_cost)?;
        if roi_percentage.is_none() {
            warn!(
                net_savings = %net_savings,
                "implementation cost is zero; ROI percentage is undefined"
            );
        }

        Ok(RoiResult {
            monthly_savings: round_money(monthly_savings),
            cumulative_savings: round_money(cumulative_savings),
            net_savings: round_money(net_savings),
            payback_months: payback_months.map(round_ratio),
            roi_percentage: roi_percentage.map(round_ratio),
        })
    }

    /// Converts a percentage to a fraction.
    fn error_fraction(
        &self,
        error_rate_percent: Decimal,
    ) -> Result<Decimal, RoiCalculationError> {
        error_rate_percent
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or(RoiCalculationError::Overflow("error fraction"))
    }

    /// Total manual labor cost per month.
    fn labor_cost_manual(
        &self,
        input: &ScenarioInput,
    ) -> Result<Decimal, RoiCalculationError> {
        input
            .num_ap_staff
            .checked_mul(input.hourly_wage)
            .and_then(|v| v.checked_mul(input.avg_hours_per_invoice))
            .and_then(|v| v.checked_mul(input.monthly_invoice_volume))
            .ok_or(RoiCalculationError::Overflow("manual labor cost"))
    }

    /// Total automation cost per month.
    fn auto_cost(
        &self,
        monthly_invoice_volume: Decimal,
    ) -> Result<Decimal, RoiCalculationError> {
        monthly_invoice_volume
            .checked_mul(self.assumptions.automated_cost_per_invoice)
            .ok_or(RoiCalculationError::Overflow("automation cost"))
    }

    /// Monthly savings from the reduced error rate. Negative when the manual
    /// rate is already below the automated one.
    fn error_savings(
        &self,
        error_manual: Decimal,
        monthly_invoice_volume: Decimal,
        error_cost: Decimal,
    ) -> Result<Decimal, RoiCalculationError> {
        error_manual
            .checked_sub(self.assumptions.error_rate_auto)
            .and_then(|v| v.checked_mul(monthly_invoice_volume))
            .and_then(|v| v.checked_mul(error_cost))
            .ok_or(RoiCalculationError::Overflow("error savings"))
    }

    /// Boosted monthly savings.
    fn monthly_savings(
        &self,
        labor_cost_manual: Decimal,
        error_savings: Decimal,
        auto_cost: Decimal,
    ) -> Result<Decimal, RoiCalculationError> {
        labor_cost_manual
            .checked_add(error_savings)
            .and_then(|v| v.checked_sub(auto_cost))
            .and_then(|v| v.checked_mul(self.assumptions.min_roi_boost_factor))
            .ok_or(RoiCalculationError::Overflow("monthly savings"))
    }

    fn cumulative_savings(
        &self,
        monthly_savings: Decimal,
        time_horizon_months: Decimal,
    ) -> Result<Decimal, RoiCalculationError> {
        monthly_savings
            .checked_mul(time_horizon_months)
            .ok_or(RoiCalculationError::Overflow("cumulative savings"))
    }

    fn net_savings(
        &self,
        cumulative_savings: Decimal,
        implementation_cost: Decimal,
    ) -> Result<Decimal, RoiCalculationError> {
        cumulative_savings
            .checked_sub(implementation_cost)
            .ok_or(RoiCalculationError::Overflow("net savings"))
    }

    /// Months until cumulative savings cover the implementation cost.
    /// `None` when monthly savings are zero.
    fn payback_months(
        &self,
        implementation_cost: Decimal,
        monthly_savings: Decimal,
    ) -> Result<Option<Decimal>, RoiCalculationError> {
        if monthly_savings.is_zero() {
            return Ok(None);
        }
        implementation_cost
            .checked_div(monthly_savings)
            .map(Some)
            .ok_or(RoiCalculationError::Overflow("payback months"))
    }

    /// Net savings as a percentage of the implementation cost.
    /// `None` when the implementation cost is zero.
    fn roi_percentage(
        &self,
        net_savings: Decimal,
        implementation_cost: Decimal,
    ) -> Result<Option<Decimal>, RoiCalculationError> {
        if implementation_cost.is_zero() {
            return Ok(None);
        }
        net_savings
            .checked_div(implementation_cost)
            .and_then(|v| v.checked_mul(Decimal::ONE_HUNDRED))
            .map(Some)
            .ok_or(RoiCalculationError::Overflow("ROI percentage"))
    }
}
