use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upfront automation cost assumed when a request does not supply one.
pub const DEFAULT_IMPLEMENTATION_COST: Decimal = Decimal::from_parts(50000, 0, 0, false, 0);

/// Operating parameters of one invoice-processing scenario.
///
/// Every field is a plain number; coercion from loosely typed request bodies
/// happens in [`crate::normalize`] before a value of this type exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioInput {
    /// Invoices processed per month.
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_invoice_volume: Decimal,

    /// Accounts-payable staff involved in manual processing.
    #[serde(with = "rust_decimal::serde::float")]
    pub num_ap_staff: Decimal,

    /// Person-hours spent per invoice under manual processing.
    #[serde(with = "rust_decimal::serde::float")]
    pub avg_hours_per_invoice: Decimal,

    /// Labor cost per hour.
    #[serde(with = "rust_decimal::serde::float")]
    pub hourly_wage: Decimal,

    /// Manual error rate as a percentage (0-100).
    #[serde(with = "rust_decimal::serde::float")]
    pub error_rate_manual: Decimal,

    /// Cost incurred per erroneous invoice.
    #[serde(with = "rust_decimal::serde::float")]
    pub error_cost: Decimal,

    /// Projection horizon in months.
    #[serde(with = "rust_decimal::serde::float")]
    pub time_horizon_months: Decimal,

    /// Upfront automation cost.
    #[serde(with = "rust_decimal::serde::float")]
    pub one_time_implementation_cost: Decimal,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            monthly_invoice_volume: Decimal::ZERO,
            num_ap_staff: Decimal::ZERO,
            avg_hours_per_invoice: Decimal::ZERO,
            hourly_wage: Decimal::ZERO,
            error_rate_manual: Decimal::ZERO,
            error_cost: Decimal::ZERO,
            time_horizon_months: Decimal::ZERO,
            one_time_implementation_cost: DEFAULT_IMPLEMENTATION_COST,
        }
    }
}
