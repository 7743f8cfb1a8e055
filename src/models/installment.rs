//! Installment plan models.
//!
//! This module contains the [`InstallmentConfig`] input, its
//! [`IncreasePolicy`], and the [`InstallmentSchedule`] produced from them.

use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::common::{MoneyAmount, PeriodUnit, ensure_non_negative, ensure_valid_percentage};
use crate::error::{EngineError, EngineResult};

/// How an installment grows at each increase period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncreaseMethod {
    /// The same percentage at every increase period.
    FixedPercentage,
    /// Explicit per-period percentages from the custom schedule.
    Custom,
    /// Follows civil servant salary raises (external wage index).
    CivilServantSalary,
    /// Follows the producer price index.
    Ppi,
    /// Follows the consumer price index.
    Cpi,
}

impl IncreaseMethod {
    /// Returns true if the method tracks an external index the engine cannot resolve.
    pub fn requires_external_rate(self) -> bool {
        matches!(
            self,
            IncreaseMethod::CivilServantSalary | IncreaseMethod::Ppi | IncreaseMethod::Cpi
        )
    }

    /// Returns the serialized tag of the method.
    pub fn as_str(self) -> &'static str {
        match self {
            IncreaseMethod::FixedPercentage => "fixed_percentage",
            IncreaseMethod::Custom => "custom",
            IncreaseMethod::CivilServantSalary => "civil_servant_salary",
            IncreaseMethod::Ppi => "ppi",
            IncreaseMethod::Cpi => "cpi",
        }
    }
}

impl fmt::Display for IncreaseMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of an explicit increase schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomIncrease {
    /// The 1-based period at which the increase applies.
    pub period: u32,
    /// The increase percentage applied at that period.
    pub increase_percentage: Decimal,
}

/// The rule that grows an installment over time.
///
/// Increases happen at every period where `(period - 1)` is a multiple of the
/// interval, starting from the second interval. For index-based methods the
/// caller either supplies `index_rate` or explicitly opts into
/// `accept_flat_fallback`, which reuses `percentage_per_increase`.
///
/// # Example
///
/// ```
/// use housing_plan_engine::models::{IncreaseMethod, IncreasePolicy};
/// use rust_decimal::Decimal;
///
/// let policy = IncreasePolicy::indexed(IncreaseMethod::Cpi, 6)
///     .with_index_rate(Decimal::new(85, 1));
/// assert_eq!(policy.interval_in_periods(), Some(6));
/// assert_eq!(policy.index_rate, Some(Decimal::new(85, 1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncreasePolicy {
    /// The increase method.
    pub method: IncreaseMethod,
    /// Percentage applied at each increase period (fixed method, or flat fallback).
    #[serde(default)]
    pub percentage_per_increase: Decimal,
    /// Number of `interval_unit`s between increases.
    pub increase_interval: u32,
    /// Unit of `increase_interval`.
    #[serde(default)]
    pub interval_unit: PeriodUnit,
    /// Per-period overrides for the custom method.
    #[serde(default)]
    pub custom_schedule: Vec<CustomIncrease>,
    /// Caller-supplied rate for index-based methods.
    #[serde(default)]
    pub index_rate: Option<Decimal>,
    /// Allows index-based methods to fall back to `percentage_per_increase`.
    #[serde(default)]
    pub accept_flat_fallback: bool,
}

impl IncreasePolicy {
    /// A fixed percentage increase every `interval` months.
    pub fn fixed_percentage(percentage: Decimal, interval: u32) -> Self {
        Self {
            method: IncreaseMethod::FixedPercentage,
            percentage_per_increase: percentage,
            increase_interval: interval,
            interval_unit: PeriodUnit::Month,
            custom_schedule: Vec::new(),
            index_rate: None,
            accept_flat_fallback: false,
        }
    }

    /// An explicit schedule checked every `interval` months.
    pub fn custom(interval: u32, schedule: Vec<CustomIncrease>) -> Self {
        Self {
            method: IncreaseMethod::Custom,
            custom_schedule: schedule,
            ..Self::fixed_percentage(Decimal::ZERO, interval)
        }
    }

    /// An index-based method with no rate yet.
    pub fn indexed(method: IncreaseMethod, interval: u32) -> Self {
        Self {
            method,
            ..Self::fixed_percentage(Decimal::ZERO, interval)
        }
    }

    /// Supplies the concrete index rate.
    pub fn with_index_rate(mut self, rate: Decimal) -> Self {
        self.index_rate = Some(rate);
        self
    }

    /// Accepts `percentage` as a stand-in for an unresolved index.
    pub fn with_flat_fallback(mut self, percentage: Decimal) -> Self {
        self.percentage_per_increase = percentage;
        self.accept_flat_fallback = true;
        self
    }

    /// The increase interval expressed in monthly periods.
    pub fn interval_in_periods(&self) -> Option<u32> {
        self.interval_unit.to_periods(self.increase_interval)
    }

    /// Checks the policy for values the scheduler cannot work with.
    pub fn validate(&self) -> EngineResult<()> {
        match self.interval_in_periods() {
            Some(0) => {
                return Err(EngineError::invalid(
                    "installment.increase.increase_interval",
                    "must be at least 1",
                ));
            }
            None => {
                return Err(EngineError::invalid(
                    "installment.increase.increase_interval",
                    "is too large",
                ));
            }
            Some(_) => {}
        }

        ensure_valid_percentage(
            "installment.increase.percentage_per_increase",
            self.percentage_per_increase,
        )?;

        if let Some(rate) = self.index_rate {
            ensure_valid_percentage("installment.increase.index_rate", rate)?;
        }

        for item in &self.custom_schedule {
            ensure_valid_percentage(
                &format!("installment.increase.custom_schedule[{}]", item.period),
                item.increase_percentage,
            )?;
        }

        Ok(())
    }
}

/// Configuration of an installment plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentConfig {
    /// The first period's installment.
    pub initial_amount: MoneyAmount,
    /// Number of installments (periods).
    pub total_installments: u32,
    /// Amount paid up front, outside the schedule.
    pub down_payment: MoneyAmount,
    /// How the installment grows.
    pub increase: IncreasePolicy,
}

impl InstallmentConfig {
    /// Checks the configuration, failing on the first invalid field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.total_installments == 0 {
            return Err(EngineError::invalid(
                "installment.total_installments",
                "must be at least 1",
            ));
        }
        ensure_non_negative("installment.initial_amount", self.initial_amount)?;
        ensure_non_negative("installment.down_payment", self.down_payment)?;
        self.increase.validate()
    }
}

/// The installment due in one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedInstallment {
    /// The 1-based period.
    pub period: u32,
    /// The amount due this period.
    pub amount: MoneyAmount,
    /// Sum of all amounts up to and including this period.
    pub cumulative_total: MoneyAmount,
    /// The increase applied at this period, if any.
    pub increase_percentage: Option<Decimal>,
}

/// A complete installment schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentSchedule {
    /// The configuration the schedule was built from.
    pub config: InstallmentConfig,
    /// One entry per period, in period order.
    pub installments: Vec<CalculatedInstallment>,
    /// Sum of every installment.
    pub total_amount: MoneyAmount,
    /// `total_amount` minus what a flat schedule would have cost.
    pub total_increases: MoneyAmount,
}

impl InstallmentSchedule {
    /// Returns the installment for a 1-based period.
    ///
    /// # Example
    ///
    /// ```
    /// use housing_plan_engine::calculation::compute_installment_schedule;
    /// use housing_plan_engine::models::{IncreasePolicy, InstallmentConfig};
    /// use rust_decimal::Decimal;
    ///
    /// let config = InstallmentConfig {
    ///     initial_amount: 500_000,
    ///     total_installments: 24,
    ///     down_payment: 0,
    ///     increase: IncreasePolicy::fixed_percentage(Decimal::new(10, 0), 6),
    /// };
    /// let schedule = compute_installment_schedule(&config)?.resolved().unwrap();
    ///
    /// assert_eq!(schedule.installment_for_period(7).unwrap().amount, 550_000);
    /// assert!(schedule.installment_for_period(999).is_none());
    /// # Ok::<(), housing_plan_engine::error::EngineError>(())
    /// ```
    pub fn installment_for_period(&self, period: u32) -> Option<&CalculatedInstallment> {
        let index = (period as usize).checked_sub(1)?;
        self.installments.get(index)
    }

    /// The average installment, rounded to the nearest minor unit.
    pub fn average_payment(&self) -> MoneyAmount {
        if self.installments.is_empty() {
            return 0;
        }
        let average = Decimal::from(self.total_amount) / Decimal::from(self.installments.len());
        average
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(MoneyAmount::MAX)
    }

    /// Down payment plus every installment.
    pub fn total_out_of_pocket(&self) -> MoneyAmount {
        self.config.down_payment.saturating_add(self.total_amount)
    }
}
