//! Household income models.
//!
//! This module contains the [`IncomeProjectionConfig`] input and the
//! [`IncomeProjection`] computed from it.

use std::collections::HashSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::common::{MoneyAmount, PeriodUnit, ensure_non_negative, ensure_valid_percentage};
use crate::error::{EngineError, EngineResult};

/// How a member's income is expected to grow.
///
/// The engine has no access to wage indices, so every method grows by the
/// annual percentage on the member (or the projection default). The tag is
/// kept so callers can tell an estimate from a contractual raise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeIncreaseMethod {
    /// A fixed annual percentage.
    #[default]
    FixedPercentage,
    /// Follows civil servant salary raises.
    CivilServantSalary,
    /// Follows minimum wage raises.
    MinimumWage,
    /// A caller-chosen rate.
    Custom,
}

/// Income of one household member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdMemberIncome {
    /// Member identifier, unique within the household.
    pub id: String,
    /// Starting monthly net income.
    pub monthly_net_income: MoneyAmount,
    /// How this member's income grows.
    #[serde(default)]
    pub increase_method: IncomeIncreaseMethod,
    /// Member-specific annual increase; the projection default applies if absent.
    #[serde(default)]
    pub annual_increase_percentage: Option<Decimal>,
}

impl HouseholdMemberIncome {
    /// A member on the fixed-percentage method using the projection default rate.
    pub fn new(id: impl Into<String>, monthly_net_income: MoneyAmount) -> Self {
        Self {
            id: id.into(),
            monthly_net_income,
            increase_method: IncomeIncreaseMethod::FixedPercentage,
            annual_increase_percentage: None,
        }
    }

    /// Sets a member-specific annual increase.
    pub fn with_annual_increase(mut self, percentage: Decimal) -> Self {
        self.annual_increase_percentage = Some(percentage);
        self
    }
}

/// Configuration of a household income projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProjectionConfig {
    /// The earning members of the household.
    pub household_members: Vec<HouseholdMemberIncome>,
    /// Method for members that do not set one.
    #[serde(default)]
    pub default_increase_method: IncomeIncreaseMethod,
    /// Annual increase for members without their own percentage.
    pub default_annual_increase_percentage: Decimal,
    /// Number of periods to project.
    pub projection_periods: u32,
    /// Unit of one projection period.
    #[serde(default)]
    pub projection_period_unit: PeriodUnit,
}

impl IncomeProjectionConfig {
    /// A monthly projection for a single-member household.
    pub fn single_member(
        member: HouseholdMemberIncome,
        default_annual_increase_percentage: Decimal,
        projection_periods: u32,
    ) -> Self {
        Self {
            household_members: vec![member],
            default_increase_method: IncomeIncreaseMethod::FixedPercentage,
            default_annual_increase_percentage,
            projection_periods,
            projection_period_unit: PeriodUnit::Month,
        }
    }

    /// The annual increase that applies to `member`.
    pub fn annual_increase_for(&self, member: &HouseholdMemberIncome) -> Decimal {
        member
            .annual_increase_percentage
            .unwrap_or(self.default_annual_increase_percentage)
    }

    /// Checks the configuration, failing on the first invalid field.
    pub fn validate(&self) -> EngineResult<()> {
        if self.projection_periods == 0 {
            return Err(EngineError::invalid(
                "income.projection_periods",
                "must be at least 1",
            ));
        }
        ensure_valid_percentage(
            "income.default_annual_increase_percentage",
            self.default_annual_increase_percentage,
        )?;

        let mut seen = HashSet::new();
        for member in &self.household_members {
            if !seen.insert(member.id.as_str()) {
                return Err(EngineError::invalid(
                    "income.household_members",
                    format!("duplicate member id '{}'", member.id),
                ));
            }
            ensure_non_negative(
                &format!("income.household_members[{}].monthly_net_income", member.id),
                member.monthly_net_income,
            )?;
            if let Some(percentage) = member.annual_increase_percentage {
                ensure_valid_percentage(
                    &format!(
                        "income.household_members[{}].annual_increase_percentage",
                        member.id
                    ),
                    percentage,
                )?;
            }
        }
        Ok(())
    }
}

/// One member's share of a period's income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberIncome {
    /// The member identifier.
    pub member_id: String,
    /// The member's net income this period.
    pub monthly_net_income: MoneyAmount,
}

/// Household income for one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatedIncome {
    /// The 1-based period.
    pub period: u32,
    /// Net income summed across members.
    pub total_net_income: MoneyAmount,
    /// Per-member incomes, in configuration order.
    pub member_breakdown: Vec<MemberIncome>,
    /// Percent change from the previous period's total.
    ///
    /// `None` for the first period and after a period with zero income.
    pub change_percentage: Option<Decimal>,
}

/// A complete household income projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeProjection {
    /// The configuration the projection was built from.
    pub config: IncomeProjectionConfig,
    /// One entry per period, in period order.
    pub incomes: Vec<CalculatedIncome>,
    /// Sum of every period's total.
    pub total_projected_income: MoneyAmount,
}

impl IncomeProjection {
    /// Returns the income for a 1-based period.
    pub fn income_for_period(&self, period: u32) -> Option<&CalculatedIncome> {
        let index = (period as usize).checked_sub(1)?;
        self.incomes.get(index)
    }

    /// The average monthly household income, rounded to the nearest minor unit.
    pub fn average_monthly_income(&self) -> MoneyAmount {
        if self.incomes.is_empty() {
            return 0;
        }
        let average =
            Decimal::from(self.total_projected_income) / Decimal::from(self.incomes.len());
        average
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(MoneyAmount::MAX)
    }

    /// Household income over the first twelve periods.
    pub fn first_year_income(&self) -> MoneyAmount {
        self.incomes
            .iter()
            .take(12)
            .fold(0, |sum: MoneyAmount, income| {
                sum.saturating_add(income.total_net_income)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_config() -> IncomeProjectionConfig {
        IncomeProjectionConfig {
            household_members: vec![
                HouseholdMemberIncome::new("member1", 1_700_000),
                HouseholdMemberIncome::new("member2", 900_000).with_annual_increase(dec("20")),
            ],
            default_increase_method: IncomeIncreaseMethod::FixedPercentage,
            default_annual_increase_percentage: dec("15"),
            projection_periods: 240,
            projection_period_unit: PeriodUnit::Month,
        }
    }

    fn create_projection(totals: &[MoneyAmount]) -> IncomeProjection {
        let incomes = totals
            .iter()
            .enumerate()
            .map(|(i, total)| CalculatedIncome {
                period: i as u32 + 1,
                total_net_income: *total,
                member_breakdown: vec![],
                change_percentage: None,
            })
            .collect();
        IncomeProjection {
            config: create_test_config(),
            incomes,
            total_projected_income: totals.iter().sum(),
        }
    }

    #[test]
    fn test_valid_config_passes_validation() {
        assert!(create_test_config().validate().is_ok());
    }

    #[test]
    fn test_zero_projection_periods_rejected() {
        let mut config = create_test_config();
        config.projection_periods = 0;

        match config.validate() {
            Err(EngineError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "income.projection_periods");
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_member_income_rejected() {
        let mut config = create_test_config();
        config.household_members[1].monthly_net_income = -10;

        match config.validate() {
            Err(EngineError::InvalidConfiguration { field, .. }) => {
                assert_eq!(field, "income.household_members[member2].monthly_net_income");
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_member_ids_rejected() {
        let mut config = create_test_config();
        config.household_members[1].id = "member1".to_string();

        match config.validate() {
            Err(EngineError::InvalidConfiguration { message, .. }) => {
                assert!(message.contains("member1"));
            }
            other => panic!("Expected InvalidConfiguration, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_household_is_valid() {
        let mut config = create_test_config();
        config.household_members.clear();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_member_percentage_overrides_default() {
        let config = create_test_config();
        assert_eq!(config.annual_increase_for(&config.household_members[0]), dec("15"));
        assert_eq!(config.annual_increase_for(&config.household_members[1]), dec("20"));
    }

    #[test]
    fn test_member_deserialization_uses_defaults() {
        let json = r#"{ "id": "member1", "monthly_net_income": 1700000 }"#;
        let member: HouseholdMemberIncome = serde_json::from_str(json).unwrap();

        assert_eq!(member.monthly_net_income, 1_700_000);
        assert_eq!(member.increase_method, IncomeIncreaseMethod::FixedPercentage);
        assert_eq!(member.annual_increase_percentage, None);
    }

    #[test]
    fn test_income_for_period_is_one_based() {
        let projection = create_projection(&[100, 200, 300]);
        assert_eq!(projection.income_for_period(2).unwrap().total_net_income, 200);
        assert!(projection.income_for_period(0).is_none());
        assert!(projection.income_for_period(4).is_none());
    }

    #[test]
    fn test_average_monthly_income_rounds() {
        let projection = create_projection(&[100, 100, 101]);
        // 301 / 3 = 100.33
        assert_eq!(projection.average_monthly_income(), 100);
    }

    #[test]
    fn test_first_year_income_sums_twelve_periods() {
        let totals: Vec<MoneyAmount> = (1..=24).map(|p| if p <= 12 { 10 } else { 20 }).collect();
        let projection = create_projection(&totals);
        assert_eq!(projection.first_year_income(), 120);
    }

    #[test]
    fn test_first_year_income_with_short_projection() {
        let projection = create_projection(&[10, 10, 10]);
        assert_eq!(projection.first_year_income(), 30);
    }
}
