//! Installment schedule calculation.
//!
//! This module builds the period-by-period installment schedule of a plan,
//! applying periodic percentage increases with per-step rounding.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::compounding::{apply_increase, is_increase_period};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculatedInstallment, CustomIncrease, IncreaseMethod, IncreasePolicy, InstallmentConfig,
    InstallmentSchedule, MoneyAmount, Resolution,
};

/// Where the percentage for an increase period comes from.
enum IncreaseSource<'a> {
    /// The same percentage every increase period.
    Flat(Decimal),
    /// A lookup in the explicit schedule.
    Scheduled(&'a [CustomIncrease]),
}

impl IncreaseSource<'_> {
    fn percentage_for(&self, period: u32) -> Option<Decimal> {
        match self {
            IncreaseSource::Flat(percentage) => Some(*percentage),
            IncreaseSource::Scheduled(items) => items
                .iter()
                .find(|item| item.period == period)
                .map(|item| item.increase_percentage),
        }
    }
}

/// Picks the percentage source for a policy, or reports the unresolved index.
fn resolve_source(policy: &IncreasePolicy) -> Resolution<IncreaseSource<'_>> {
    match policy.method {
        IncreaseMethod::FixedPercentage => {
            Resolution::Resolved(IncreaseSource::Flat(policy.percentage_per_increase))
        }
        IncreaseMethod::Custom => {
            Resolution::Resolved(IncreaseSource::Scheduled(&policy.custom_schedule))
        }
        method => match policy.index_rate {
            Some(rate) => Resolution::Resolved(IncreaseSource::Flat(rate)),
            None if policy.accept_flat_fallback => {
                warn!(
                    method = %method,
                    percentage = %policy.percentage_per_increase,
                    "No index rate supplied, using the flat percentage as accepted fallback"
                );
                Resolution::Resolved(IncreaseSource::Flat(policy.percentage_per_increase))
            }
            None => Resolution::NeedsExternalRate(method),
        },
    }
}

/// Computes the installment schedule for a plan.
///
/// The running installment starts at `initial_amount`. At every increase
/// period (see [`is_increase_period`](super::is_increase_period)) the
/// increase is applied before the period's amount is recorded:
///
/// - `fixed_percentage`: grows by `percentage_per_increase`
/// - `custom`: grows by the schedule entry for exactly this period, if any;
///   entries that do not fall on an increase period are never consulted
/// - index-based methods: grow by `index_rate`, or by
///   `percentage_per_increase` when `accept_flat_fallback` is set
///
/// # Returns
///
/// - `Ok(Resolution::Resolved(schedule))` on success
/// - `Ok(Resolution::NeedsExternalRate(method))` if an index-based method has
///   neither a supplied rate nor an accepted fallback
/// - `Err(EngineError::InvalidConfiguration)` if the configuration is invalid
///
/// # Examples
///
/// ```
/// use housing_plan_engine::calculation::compute_installment_schedule;
/// use housing_plan_engine::models::{IncreasePolicy, InstallmentConfig};
/// use rust_decimal::Decimal;
///
/// let config = InstallmentConfig {
///     initial_amount: 100_000,
///     total_installments: 20,
///     down_payment: 0,
///     increase: IncreasePolicy::fixed_percentage(Decimal::new(10, 0), 6),
/// };
///
/// let schedule = compute_installment_schedule(&config)?.resolved().unwrap();
/// assert_eq!(schedule.installments[0].amount, 100_000);
/// assert_eq!(schedule.installments[6].amount, 110_000);
/// assert_eq!(schedule.installments[12].amount, 121_000);
/// assert_eq!(schedule.installments[18].amount, 133_100);
/// # Ok::<(), housing_plan_engine::error::EngineError>(())
/// ```
pub fn compute_installment_schedule(
    config: &InstallmentConfig,
) -> EngineResult<Resolution<InstallmentSchedule>> {
    config.validate()?;

    let interval = config
        .increase
        .interval_in_periods()
        .ok_or_else(|| EngineError::invalid("installment.increase.increase_interval", "is too large"))?;

    let source = match resolve_source(&config.increase) {
        Resolution::Resolved(source) => source,
        Resolution::NeedsExternalRate(method) => {
            debug!(method = %method, "Installment schedule needs an external index rate");
            return Ok(Resolution::NeedsExternalRate(method));
        }
    };

    let mut installments = Vec::with_capacity(config.total_installments as usize);
    let mut current_amount = config.initial_amount;
    let mut cumulative_total: MoneyAmount = 0;

    for period in 1..=config.total_installments {
        let mut applied = None;

        if is_increase_period(period, interval) {
            if let Some(percentage) = source.percentage_for(period).filter(|p| !p.is_zero()) {
                current_amount = apply_increase(current_amount, percentage)?;
                applied = Some(percentage);
            }
        }

        cumulative_total = cumulative_total
            .checked_add(current_amount)
            .ok_or_else(|| EngineError::overflow("the installment schedule"))?;

        installments.push(CalculatedInstallment {
            period,
            amount: current_amount,
            cumulative_total,
            increase_percentage: applied,
        });
    }

    let flat_total = config
        .initial_amount
        .checked_mul(MoneyAmount::from(config.total_installments))
        .ok_or_else(|| EngineError::overflow("the installment schedule"))?;
    let total_increases = cumulative_total - flat_total;

    debug!(
        method = %config.increase.method,
        periods = config.total_installments,
        total_amount = cumulative_total,
        total_increases,
        "Installment schedule computed"
    );

    Ok(Resolution::Resolved(InstallmentSchedule {
        config: config.clone(),
        installments,
        total_amount: cumulative_total,
        total_increases,
    }))
}
