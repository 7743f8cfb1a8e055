//! Scenario composition.
//!
//! A scenario merges the installment schedule, the income projection and the
//! rent that is paid until delivery into one per-period time series, then
//! aggregates it into a [`ScenarioSummary`].

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::compounding::{apply_increase, is_annual_boundary};
use super::income_projection::compute_income_projection;
use super::installment_schedule::compute_installment_schedule;
use super::sustainability::{classify_sustainability, payment_to_income_ratio};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    IncomeProjection, InstallmentSchedule, MoneyAmount, RentConfig, Resolution, ScenarioConfig,
    ScenarioPeriodData, ScenarioResult, ScenarioSummary, SustainabilityBreakdown,
    SustainabilityThresholds,
};

/// Computes a complete scenario.
///
/// The whole configuration is validated first; nothing partial is returned on
/// error. If the installment plan uses an index method with no supplied rate
/// the scenario short-circuits with [`Resolution::NeedsExternalRate`].
///
/// For each installment period, in order:
///
/// 1. the installment comes from the schedule
/// 2. rent is paid while `period <= delivery_delay_months`, growing by its
///    annual percentage at every annual boundary
/// 3. the payment is installment plus rent
/// 4. income comes from the projection
/// 5. the payment-to-income ratio is classified against the thresholds
pub fn compute_scenario(config: &ScenarioConfig) -> EngineResult<Resolution<ScenarioResult>> {
    config.validate()?;

    let installment_schedule = match compute_installment_schedule(&config.installment_config)? {
        Resolution::Resolved(schedule) => schedule,
        Resolution::NeedsExternalRate(method) => {
            warn!(
                scenario = %config.name,
                method = %method,
                "Scenario not computed, installment increase needs an external rate"
            );
            return Ok(Resolution::NeedsExternalRate(method));
        }
    };
    let income_projection = compute_income_projection(&config.income_config)?;

    let thresholds = config.thresholds();
    let period_data = compose_periods(
        &installment_schedule,
        &income_projection,
        &config.rent_config,
        &thresholds,
    )?;
    let summary = summarize(
        &period_data,
        &config.rent_config,
        installment_schedule.config.down_payment,
    )?;

    debug!(
        scenario = %config.name,
        periods = period_data.len(),
        total_payment = summary.total_payment,
        max_ratio = %summary.max_payment_to_income_ratio,
        max_ratio_period = summary.max_ratio_period,
        critical_periods = summary.sustainability_breakdown.critical,
        "Scenario computed"
    );

    Ok(Resolution::Resolved(ScenarioResult {
        config: config.clone(),
        installment_schedule,
        income_projection,
        period_data,
        summary,
    }))
}

fn compose_periods(
    schedule: &InstallmentSchedule,
    projection: &IncomeProjection,
    rent: &RentConfig,
    thresholds: &SustainabilityThresholds,
) -> EngineResult<Vec<ScenarioPeriodData>> {
    let mut period_data = Vec::with_capacity(schedule.installments.len());
    let mut current_rent = rent.monthly_rent;
    let mut cumulative_rent_paid: MoneyAmount = 0;

    for installment in &schedule.installments {
        let period = installment.period;
        let is_renting_period = rent.is_renting(period);

        let rent_amount = if is_renting_period {
            if is_annual_boundary(period) {
                current_rent = apply_increase(current_rent, rent.annual_increase_percentage)?;
            }
            current_rent
        } else {
            0
        };

        cumulative_rent_paid = cumulative_rent_paid
            .checked_add(rent_amount)
            .ok_or_else(|| EngineError::overflow("cumulative rent"))?;

        let total_payment = installment
            .amount
            .checked_add(rent_amount)
            .ok_or_else(|| EngineError::overflow("the period payment"))?;

        let household_income = projection
            .income_for_period(period)
            .map(|income| income.total_net_income)
            .ok_or_else(|| {
                EngineError::invalid(
                    "income.projection_periods",
                    format!("no projected income for period {}", period),
                )
            })?;

        let payment_to_income_ratio = payment_to_income_ratio(total_payment, household_income);

        period_data.push(ScenarioPeriodData {
            period,
            installment_amount: installment.amount,
            rent_amount,
            total_payment,
            household_income,
            payment_to_income_ratio,
            sustainability_status: classify_sustainability(payment_to_income_ratio, thresholds),
            is_renting_period,
            cumulative_installment_paid: installment.cumulative_total,
            cumulative_rent_paid,
        });
    }

    Ok(period_data)
}

fn summarize(
    period_data: &[ScenarioPeriodData],
    rent: &RentConfig,
    down_payment: MoneyAmount,
) -> EngineResult<ScenarioSummary> {
    let mut total_installment_payment: MoneyAmount = 0;
    let mut total_rent_payment: MoneyAmount = 0;
    let mut overlap_cost: MoneyAmount = 0;
    let mut ratio_sum = Decimal::ZERO;
    let mut max_ratio: Option<(Decimal, u32)> = None;
    let mut sustainability_breakdown = SustainabilityBreakdown::default();

    for data in period_data {
        total_installment_payment = total_installment_payment
            .checked_add(data.installment_amount)
            .ok_or_else(|| EngineError::overflow("the installment total"))?;
        total_rent_payment = total_rent_payment
            .checked_add(data.rent_amount)
            .ok_or_else(|| EngineError::overflow("the rent total"))?;
        if data.period <= rent.delivery_delay_months {
            overlap_cost = overlap_cost
                .checked_add(data.rent_amount)
                .ok_or_else(|| EngineError::overflow("the overlap cost"))?;
        }

        ratio_sum += data.payment_to_income_ratio;
        match max_ratio {
            Some((ratio, _)) if data.payment_to_income_ratio <= ratio => {}
            _ => max_ratio = Some((data.payment_to_income_ratio, data.period)),
        }
        sustainability_breakdown.record(data.sustainability_status);
    }

    let total_payment = total_installment_payment
        .checked_add(total_rent_payment)
        .ok_or_else(|| EngineError::overflow("the total payment"))?;
    let total_out_of_pocket = down_payment
        .checked_add(total_payment)
        .ok_or_else(|| EngineError::overflow("the total out of pocket"))?;

    let average_payment_to_income_ratio = if period_data.is_empty() {
        Decimal::ZERO
    } else {
        ratio_sum / Decimal::from(period_data.len())
    };
    let (max_payment_to_income_ratio, max_ratio_period) = max_ratio.unwrap_or((Decimal::ZERO, 0));

    Ok(ScenarioSummary {
        total_installment_payment,
        total_rent_payment,
        total_payment,
        average_payment_to_income_ratio,
        max_payment_to_income_ratio,
        max_ratio_period,
        sustainability_breakdown,
        overlap_months: rent.delivery_delay_months,
        overlap_cost,
        down_payment,
        total_out_of_pocket,
    })
}
