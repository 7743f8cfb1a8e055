//! Payment-to-income ratio and sustainability classification.

use rust_decimal::Decimal;

use crate::models::{MoneyAmount, SustainabilityStatus, SustainabilityThresholds};

/// Ratio reported when household income is zero or negative.
pub const DEGENERATE_RATIO: Decimal = Decimal::ONE_HUNDRED;

/// Total payment as a percentage of household income.
///
/// Income of zero or below yields [`DEGENERATE_RATIO`] instead of an error.
///
/// # Examples
///
/// ```
/// use housing_plan_engine::calculation::payment_to_income_ratio;
/// use rust_decimal::Decimal;
///
/// assert_eq!(payment_to_income_ratio(300_000, 1_000_000), Decimal::new(30, 0));
/// assert_eq!(payment_to_income_ratio(300_000, 0), Decimal::ONE_HUNDRED);
/// ```
pub fn payment_to_income_ratio(payment: MoneyAmount, income: MoneyAmount) -> Decimal {
    if income <= 0 {
        return DEGENERATE_RATIO;
    }
    Decimal::from(payment) * Decimal::ONE_HUNDRED / Decimal::from(income)
}

/// Classifies a ratio against ascending thresholds.
///
/// Boundaries are inclusive: a ratio equal to a threshold falls in the safer
/// class.
pub fn classify_sustainability(
    ratio: Decimal,
    thresholds: &SustainabilityThresholds,
) -> SustainabilityStatus {
    if ratio <= thresholds.safe {
        SustainabilityStatus::Safe
    } else if ratio <= thresholds.warning {
        SustainabilityStatus::Warning
    } else {
        SustainabilityStatus::Critical
    }
}
