use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Financial metrics derived from a [`crate::ScenarioInput`].
///
/// Money fields carry two decimal places, ratio fields one. A ratio is `None`
/// when its denominator is zero: `payback_months` when there are no monthly
/// savings, `roi_percentage` when the implementation cost is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoiResult {
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_savings: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub cumulative_savings: Decimal,

    #[serde(with = "rust_decimal::serde::float")]
    pub net_savings: Decimal,

    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub payback_months: Option<Decimal>,

    #[serde(with = "rust_decimal::serde::float_option", default)]
    pub roi_percentage: Option<Decimal>,
}

impl RoiResult {
    /// True when at least one ratio could not be computed.
    pub fn is_degenerate(&self) -> bool {
        self.payback_months.is_none() || self.roi_percentage.is_none()
    }
}
