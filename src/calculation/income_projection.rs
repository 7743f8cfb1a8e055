//! Household income projection.
//!
//! Each member's income grows independently once a year by its own annual
//! percentage (or the projection default). The household total for a period
//! is the sum of the members' running incomes.

use rust_decimal::Decimal;
use tracing::debug;

use super::compounding::{apply_increase, is_annual_boundary};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculatedIncome, IncomeIncreaseMethod, IncomeProjection, IncomeProjectionConfig, MemberIncome,
    MoneyAmount,
};

/// Projects household income over `projection_periods` periods.
///
/// # Arguments
///
/// * `config` - The household members and growth assumptions
///
/// # Returns
///
/// The projection with one [`CalculatedIncome`] per period, or
/// `EngineError::InvalidConfiguration` if the configuration is invalid.
///
/// # Example
///
/// ```
/// use housing_plan_engine::calculation::compute_income_projection;
/// use housing_plan_engine::models::{HouseholdMemberIncome, IncomeProjectionConfig};
/// use rust_decimal::Decimal;
///
/// let config = IncomeProjectionConfig::single_member(
///     HouseholdMemberIncome::new("member1", 1_700_000),
///     Decimal::new(15, 0),
///     36,
/// );
///
/// let projection = compute_income_projection(&config)?;
/// assert_eq!(projection.incomes[11].total_net_income, 1_700_000);
/// assert_eq!(projection.incomes[12].total_net_income, 1_955_000);
/// assert_eq!(projection.incomes[24].total_net_income, 2_248_250);
/// # Ok::<(), housing_plan_engine::error::EngineError>(())
/// ```
pub fn compute_income_projection(config: &IncomeProjectionConfig) -> EngineResult<IncomeProjection> {
    config.validate()?;

    let rates: Vec<Decimal> = config
        .household_members
        .iter()
        .map(|member| config.annual_increase_for(member))
        .collect();

    for member in &config.household_members {
        if member.increase_method != IncomeIncreaseMethod::FixedPercentage {
            debug!(
                member = %member.id,
                method = ?member.increase_method,
                "Projecting index-linked income with its annual percentage"
            );
        }
    }

    let mut running: Vec<MoneyAmount> = config
        .household_members
        .iter()
        .map(|member| member.monthly_net_income)
        .collect();

    let mut incomes = Vec::with_capacity(config.projection_periods as usize);
    let mut total_projected_income: MoneyAmount = 0;
    let mut previous_total: Option<MoneyAmount> = None;

    for period in 1..=config.projection_periods {
        if is_annual_boundary(period) {
            for (income, rate) in running.iter_mut().zip(&rates) {
                *income = apply_increase(*income, *rate)?;
            }
        }

        let total_net_income = running.iter().try_fold(0, |sum: MoneyAmount, income| {
            sum.checked_add(*income)
                .ok_or_else(|| EngineError::overflow("household income"))
        })?;

        total_projected_income = total_projected_income
            .checked_add(total_net_income)
            .ok_or_else(|| EngineError::overflow("the income projection"))?;

        let change_percentage = previous_total
            .filter(|previous| *previous > 0)
            .map(|previous| {
                Decimal::from(total_net_income - previous) * Decimal::ONE_HUNDRED
                    / Decimal::from(previous)
            });

        let member_breakdown = config
            .household_members
            .iter()
            .zip(&running)
            .map(|(member, income)| MemberIncome {
                member_id: member.id.clone(),
                monthly_net_income: *income,
            })
            .collect();

        incomes.push(CalculatedIncome {
            period,
            total_net_income,
            member_breakdown,
            change_percentage,
        });
        previous_total = Some(total_net_income);
    }

    debug!(
        members = config.household_members.len(),
        periods = config.projection_periods,
        total_projected_income,
        "Income projection computed"
    );

    Ok(IncomeProjection {
        config: config.clone(),
        incomes,
        total_projected_income,
    })
}
