//! Shared primitive types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// A money amount in the smallest currency subdivision (e.g. cents).
///
/// Amounts are never stored as floating point values.
pub type MoneyAmount = i64;

/// The time unit of a period count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodUnit {
    /// One calendar month.
    #[default]
    Month,
    /// One calendar year (twelve monthly periods).
    Year,
}

impl PeriodUnit {
    /// Converts a count expressed in this unit into monthly periods.
    ///
    /// Returns `None` if the conversion overflows.
    ///
    /// # Example
    ///
    /// ```
    /// use housing_plan_engine::models::PeriodUnit;
    ///
    /// assert_eq!(PeriodUnit::Month.to_periods(6), Some(6));
    /// assert_eq!(PeriodUnit::Year.to_periods(2), Some(24));
    /// ```
    pub fn to_periods(self, count: u32) -> Option<u32> {
        match self {
            PeriodUnit::Month => Some(count),
            PeriodUnit::Year => count.checked_mul(12),
        }
    }
}

/// Rejects money amounts below zero.
pub(crate) fn ensure_non_negative(field: &str, amount: MoneyAmount) -> EngineResult<()> {
    if amount < 0 {
        return Err(EngineError::invalid(
            field,
            format!("must not be negative (got {})", amount),
        ));
    }
    Ok(())
}

/// Rejects percentages that would wipe out (or invert) the amount they apply to.
pub(crate) fn ensure_valid_percentage(field: &str, percentage: Decimal) -> EngineResult<()> {
    if percentage <= -Decimal::ONE_HUNDRED {
        return Err(EngineError::invalid(
            field,
            format!("must be greater than -100 (got {})", percentage),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_unit_is_identity() {
        assert_eq!(PeriodUnit::Month.to_periods(240), Some(240));
    }

    #[test]
    fn test_year_unit_multiplies_by_twelve() {
        assert_eq!(PeriodUnit::Year.to_periods(20), Some(240));
    }

    #[test]
    fn test_year_unit_overflow_returns_none() {
        assert_eq!(PeriodUnit::Year.to_periods(u32::MAX), None);
    }

    #[test]
    fn test_period_unit_serialization() {
        assert_eq!(serde_json::to_string(&PeriodUnit::Month).unwrap(), "\"month\"");
        let unit: PeriodUnit = serde_json::from_str("\"year\"").unwrap();
        assert_eq!(unit, PeriodUnit::Year);
    }

    #[test]
    fn test_negative_amount_is_rejected() {
        let result = ensure_non_negative("rent.monthly_rent", -1);
        match result {
            Err(EngineError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "rent.monthly_rent");
            }
            _ => panic!("Expected InvalidConfiguration error"),
        }
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        assert!(ensure_non_negative("rent.monthly_rent", 0).is_ok());
    }

    #[test]
    fn test_percentage_of_minus_100_is_rejected() {
        assert!(ensure_valid_percentage("pct", Decimal::new(-100, 0)).is_err());
        assert!(ensure_valid_percentage("pct", Decimal::new(-995, 1)).is_ok());
    }
}
