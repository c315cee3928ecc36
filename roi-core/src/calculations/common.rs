//! Common rounding helpers for ROI calculations.
//!
//! Every value the calculator returns passes through one of these functions.
//! Intermediate values are never rounded.

use rust_decimal::{Decimal, RoundingStrategy};

/// Decimal places used for monetary amounts.
pub const MONEY_DP: u32 = 2;

/// Decimal places used for ratios (months, percentages).
pub const RATIO_DP: u32 = 1;

/// Rounds a decimal value to `dp` places using half-away-from-zero rounding.
///
/// Values exactly at the midpoint are rounded away from zero, so `0.05`
/// becomes `0.1` and `-0.05` becomes `-0.1` at one decimal place.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(1234.565), 2), dec!(1234.57));
/// assert_eq!(round_half_up(dec!(1.8189), 1), dec!(1.8));
/// assert_eq!(round_half_up(dec!(-2.25), 1), dec!(-2.3)); // Away from zero
/// ```
pub fn round_half_up(
    value: Decimal,
    dp: u32,
) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds a monetary amount to two decimal places.
///
/// ```
/// use rust_decimal_macros::dec;
/// use roi_core::calculations::common::round_money;
///
/// assert_eq!(round_money(dec!(27489.004)), dec!(27489.00));
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    round_half_up(value, MONEY_DP)
}

/// Rounds a ratio (payback months, ROI percentage) to one decimal place.
pub fn round_ratio(value: Decimal) -> Decimal {
    round_half_up(value, RATIO_DP)
}
