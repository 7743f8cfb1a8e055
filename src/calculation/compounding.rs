//! Periodic compounding primitives.
//!
//! Every stream in the engine grows the same way: at selected period
//! boundaries the running value is multiplied by `1 + pct / 100` and rounded
//! to a whole minor unit before it is carried forward. Rounding happens at
//! every step, so long horizons accumulate exactly the same rounding as a
//! period-by-period ledger would.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};
use crate::models::MoneyAmount;

/// Number of periods between annual increases of income and rent.
pub const ANNUAL_INCREASE_INTERVAL: u32 = 12;

/// Returns true if `period` starts a new increase interval.
///
/// The first period never increases; after that an increase happens every
/// `interval` periods, i.e. when `(period - 1) % interval == 0`.
///
/// # Examples
///
/// ```
/// use housing_plan_engine::calculation::is_increase_period;
///
/// assert!(!is_increase_period(1, 6));
/// assert!(!is_increase_period(6, 6));
/// assert!(is_increase_period(7, 6));
/// assert!(is_increase_period(13, 6));
/// ```
pub fn is_increase_period(period: u32, interval: u32) -> bool {
    interval > 0 && period > 1 && (period - 1) % interval == 0
}

/// Returns true if `period` is the first period of a new year.
pub fn is_annual_boundary(period: u32) -> bool {
    is_increase_period(period, ANNUAL_INCREASE_INTERVAL)
}

/// Grows `amount` by `percentage` percent, rounded to the nearest minor unit.
///
/// Midpoints round away from zero.
///
/// # Examples
///
/// ```
/// use housing_plan_engine::calculation::apply_increase;
/// use rust_decimal::Decimal;
///
/// assert_eq!(apply_increase(1_700_000, Decimal::new(15, 0))?, 1_955_000);
/// assert_eq!(apply_increase(15, Decimal::new(10, 0))?, 17); // 16.5 rounds up
/// # Ok::<(), housing_plan_engine::error::EngineError>(())
/// ```
pub fn apply_increase(amount: MoneyAmount, percentage: Decimal) -> EngineResult<MoneyAmount> {
    let factor = Decimal::ONE + percentage / Decimal::ONE_HUNDRED;

    Decimal::from(amount)
        .checked_mul(factor)
        .map(|grown| grown.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|rounded| rounded.to_i64())
        .ok_or_else(|| EngineError::overflow("a percentage increase"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_first_period_never_increases() {
        assert!(!is_increase_period(1, 1));
        assert!(!is_increase_period(1, 6));
    }

    #[test]
    fn test_interval_of_one_increases_every_later_period() {
        assert!(is_increase_period(2, 1));
        assert!(is_increase_period(3, 1));
        assert!(is_increase_period(240, 1));
    }

    #[test]
    fn test_six_month_interval_boundaries() {
        let increases: Vec<u32> = (1..=24).filter(|p| is_increase_period(*p, 6)).collect();
        assert_eq!(increases, vec![7, 13, 19]);
    }

    #[test]
    fn test_zero_interval_never_increases() {
        assert!(!is_increase_period(7, 0));
    }

    #[test]
    fn test_annual_boundaries() {
        let boundaries: Vec<u32> = (1..=48).filter(|p| is_annual_boundary(*p)).collect();
        assert_eq!(boundaries, vec![13, 25, 37]);
    }

    #[test]
    fn test_ten_percent_increase() {
        assert_eq!(apply_increase(100_000, dec("10")).unwrap(), 110_000);
        assert_eq!(apply_increase(110_000, dec("10")).unwrap(), 121_000);
        assert_eq!(apply_increase(121_000, dec("10")).unwrap(), 133_100);
    }

    #[test]
    fn test_fractional_percentage() {
        // 825000 * 1.075 = 886875
        assert_eq!(apply_increase(825_000, dec("7.5")).unwrap(), 886_875);
    }

    #[test]
    fn test_rounds_to_nearest_minor_unit() {
        // 1001 * 1.075 = 1076.075
        assert_eq!(apply_increase(1_001, dec("7.5")).unwrap(), 1_076);
        // 1007 * 1.075 = 1082.525
        assert_eq!(apply_increase(1_007, dec("7.5")).unwrap(), 1_083);
    }

    #[test]
    fn test_midpoint_rounds_up() {
        // 5 * 1.1 = 5.5
        assert_eq!(apply_increase(5, dec("10")).unwrap(), 6);
    }

    #[test]
    fn test_zero_percentage_keeps_amount() {
        assert_eq!(apply_increase(123_456, Decimal::ZERO).unwrap(), 123_456);
    }

    #[test]
    fn test_negative_percentage_decreases_amount() {
        assert_eq!(apply_increase(1_000, dec("-10")).unwrap(), 900);
    }

    #[test]
    fn test_overflow_is_reported() {
        let result = apply_increase(MoneyAmount::MAX, dec("50"));
        assert!(matches!(result, Err(EngineError::CalculationError { .. })));
    }

    #[test]
    fn test_consecutive_steps_round_each_time() {
        // 1001 -> 1076.075 -> 1076, then 1076 -> 1156.7 -> 1157
        let first = apply_increase(1_001, dec("7.5")).unwrap();
        let second = apply_increase(first, dec("7.5")).unwrap();
        assert_eq!(first, 1_076);
        assert_eq!(second, 1_157);
    }
}
