//! Scenario models.
//!
//! A scenario combines an installment plan, a household income projection
//! and a rent obligation that overlaps the first periods of the plan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::common::{MoneyAmount, ensure_non_negative, ensure_valid_percentage};
use super::{IncomeProjection, IncomeProjectionConfig, InstallmentConfig, InstallmentSchedule};
use crate::error::{EngineError, EngineResult};

/// Rent paid while waiting for delivery of the home.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentConfig {
    /// Current monthly rent.
    pub monthly_rent: MoneyAmount,
    /// Expected annual rent increase.
    pub annual_increase_percentage: Decimal,
    /// Number of initial periods during which rent and installment overlap.
    pub delivery_delay_months: u32,
}

impl RentConfig {
    /// Returns true while the household is still renting in `period`.
    pub fn is_renting(&self, period: u32) -> bool {
        period <= self.delivery_delay_months
    }

    /// Checks the configuration, failing on the first invalid field.
    pub fn validate(&self) -> EngineResult<()> {
        ensure_non_negative("rent.monthly_rent", self.monthly_rent)?;
        ensure_valid_percentage(
            "rent.annual_increase_percentage",
            self.annual_increase_percentage,
        )
    }
}

/// Ascending payment-to-income boundaries, in percent.
///
/// # Example
///
/// ```
/// use housing_plan_engine::models::SustainabilityThresholds;
/// use rust_decimal::Decimal;
///
/// let thresholds = SustainabilityThresholds::default();
/// assert_eq!(thresholds.safe, Decimal::new(30, 0));
/// assert!(thresholds.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SustainabilityThresholds {
    /// Ratios up to and including this are safe.
    pub safe: Decimal,
    /// Ratios up to and including this are a warning.
    pub warning: Decimal,
    /// Upper reference boundary; everything above `warning` is critical.
    pub critical: Decimal,
}

impl Default for SustainabilityThresholds {
    fn default() -> Self {
        Self {
            safe: Decimal::new(30, 0),
            warning: Decimal::new(35, 0),
            critical: Decimal::new(40, 0),
        }
    }
}

impl SustainabilityThresholds {
    /// Requires `safe < warning < critical`.
    pub fn validate(&self) -> EngineResult<()> {
        if self.safe < self.warning && self.warning < self.critical {
            Ok(())
        } else {
            Err(EngineError::InvalidThresholds {
                safe: self.safe,
                warning: self.warning,
                critical: self.critical,
            })
        }
    }
}

/// Affordability class of a single period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SustainabilityStatus {
    /// At or below the safe threshold.
    Safe,
    /// Above safe, at or below warning.
    Warning,
    /// Above the warning threshold.
    Critical,
}

/// A complete scenario definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Optional caller-assigned identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Scenario name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// The installment plan.
    pub installment_config: InstallmentConfig,
    /// The household income projection.
    pub income_config: IncomeProjectionConfig,
    /// The rent overlap.
    pub rent_config: RentConfig,
    /// Custom thresholds; the defaults apply if absent.
    #[serde(default)]
    pub sustainability_thresholds: Option<SustainabilityThresholds>,
}

impl ScenarioConfig {
    /// The thresholds in effect for this scenario.
    pub fn thresholds(&self) -> SustainabilityThresholds {
        self.sustainability_thresholds.unwrap_or_default()
    }

    /// Validates every part of the scenario before anything is computed.
    pub fn validate(&self) -> EngineResult<()> {
        self.installment_config.validate()?;
        self.income_config.validate()?;
        self.rent_config.validate()?;
        self.thresholds().validate()?;

        if self.income_config.projection_periods < self.installment_config.total_installments {
            return Err(EngineError::invalid(
                "income.projection_periods",
                format!(
                    "projects {} periods but the plan has {} installments",
                    self.income_config.projection_periods,
                    self.installment_config.total_installments
                ),
            ));
        }
        Ok(())
    }
}

/// The combined payment picture for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioPeriodData {
    /// The 1-based period.
    pub period: u32,
    /// Installment due this period.
    pub installment_amount: MoneyAmount,
    /// Rent due this period, zero once delivered.
    pub rent_amount: MoneyAmount,
    /// Installment plus rent.
    pub total_payment: MoneyAmount,
    /// Household net income this period.
    pub household_income: MoneyAmount,
    /// `total_payment` as a percentage of `household_income`.
    pub payment_to_income_ratio: Decimal,
    /// Classification of the ratio.
    pub sustainability_status: SustainabilityStatus,
    /// Whether rent is still being paid.
    pub is_renting_period: bool,
    /// Installments paid up to and including this period.
    pub cumulative_installment_paid: MoneyAmount,
    /// Rent paid up to and including this period.
    pub cumulative_rent_paid: MoneyAmount,
}

/// Number of periods in each sustainability class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SustainabilityBreakdown {
    /// Safe periods.
    pub safe: u32,
    /// Warning periods.
    pub warning: u32,
    /// Critical periods.
    pub critical: u32,
}

impl SustainabilityBreakdown {
    /// Counts one more period of `status`.
    pub fn record(&mut self, status: SustainabilityStatus) {
        match status {
            SustainabilityStatus::Safe => self.safe += 1,
            SustainabilityStatus::Warning => self.warning += 1,
            SustainabilityStatus::Critical => self.critical += 1,
        }
    }

    /// Total periods counted.
    pub fn total(&self) -> u32 {
        self.safe + self.warning + self.critical
    }
}

/// Aggregate statistics over a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    /// Sum of all installments.
    pub total_installment_payment: MoneyAmount,
    /// Sum of all rent.
    pub total_rent_payment: MoneyAmount,
    /// Installments plus rent.
    pub total_payment: MoneyAmount,
    /// Mean of the per-period ratios.
    pub average_payment_to_income_ratio: Decimal,
    /// Highest per-period ratio.
    pub max_payment_to_income_ratio: Decimal,
    /// First period at which the highest ratio occurs.
    pub max_ratio_period: u32,
    /// Periods per sustainability class.
    pub sustainability_breakdown: SustainabilityBreakdown,
    /// Configured delivery delay.
    pub overlap_months: u32,
    /// Rent paid during the delivery delay.
    pub overlap_cost: MoneyAmount,
    /// Down payment of the plan.
    pub down_payment: MoneyAmount,
    /// Down payment plus every installment and rent payment.
    pub total_out_of_pocket: MoneyAmount,
}

/// Everything computed for one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// The configuration the result was built from.
    pub config: ScenarioConfig,
    /// The installment schedule.
    pub installment_schedule: InstallmentSchedule,
    /// The household income projection.
    pub income_projection: IncomeProjection,
    /// One entry per installment period, in period order.
    pub period_data: Vec<ScenarioPeriodData>,
    /// Aggregate statistics.
    pub summary: ScenarioSummary,
}

impl ScenarioResult {
    /// Returns the data for a 1-based period.
    pub fn period_data_for(&self, period: u32) -> Option<&ScenarioPeriodData> {
        let index = (period as usize).checked_sub(1)?;
        self.period_data.get(index)
    }

    /// Periods classified as critical, in order.
    pub fn critical_periods(&self) -> Vec<u32> {
        self.period_data
            .iter()
            .filter(|p| p.sustainability_status == SustainabilityStatus::Critical)
            .map(|p| p.period)
            .collect()
    }
}
