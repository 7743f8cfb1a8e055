//! Property tests for the calculators.

use proptest::prelude::{prop_assert, prop_assert_eq, proptest};
use rust_decimal::Decimal;

use housing_plan_engine::calculation::{
    compute_installment_schedule, compute_scenario, is_increase_period,
};
use housing_plan_engine::models::{
    HouseholdMemberIncome, IncomeProjectionConfig, IncreasePolicy, InstallmentConfig,
    MoneyAmount, RentConfig, ScenarioConfig,
};

fn installment_config(
    initial_amount: MoneyAmount,
    periods: u32,
    percentage_bp: i64,
    interval: u32,
) -> InstallmentConfig {
    InstallmentConfig {
        initial_amount,
        total_installments: periods,
        down_payment: 1_000_000,
        increase: IncreasePolicy::fixed_percentage(Decimal::new(percentage_bp, 2), interval),
    }
}

fn scenario_config(
    installment: InstallmentConfig,
    income: MoneyAmount,
    rent: MoneyAmount,
    delay: u32,
) -> ScenarioConfig {
    let periods = installment.total_installments;
    ScenarioConfig {
        id: None,
        name: "Property".to_string(),
        description: None,
        installment_config: installment,
        income_config: IncomeProjectionConfig::single_member(
            HouseholdMemberIncome::new("member1", income),
            Decimal::new(15, 0),
            periods,
        ),
        rent_config: RentConfig {
            monthly_rent: rent,
            annual_increase_percentage: Decimal::new(25, 0),
            delivery_delay_months: delay,
        },
        sustainability_thresholds: None,
    }
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(64))]

    #[test]
    fn prop_cumulative_total_is_running_sum(
        initial in 0i64..5_000_000,
        periods in 1u32..241,
        percentage_bp in -2_000i64..1_000,
        interval in 1u32..13,
    ) {
        let config = installment_config(initial, periods, percentage_bp, interval);
        let schedule = compute_installment_schedule(&config).unwrap().resolved().unwrap();

        prop_assert_eq!(schedule.installments.len(), periods as usize);
        let mut running = 0;
        for installment in &schedule.installments {
            running += installment.amount;
            prop_assert_eq!(installment.cumulative_total, running);
        }
        prop_assert_eq!(schedule.total_amount, running);
        prop_assert_eq!(
            schedule.total_increases,
            running - initial * MoneyAmount::from(periods)
        );
    }

    #[test]
    fn prop_non_negative_percentage_never_decreases(
        initial in 0i64..5_000_000,
        periods in 1u32..241,
        percentage_bp in 0i64..1_000,
        interval in 1u32..13,
    ) {
        let config = installment_config(initial, periods, percentage_bp, interval);
        let schedule = compute_installment_schedule(&config).unwrap().resolved().unwrap();

        for pair in schedule.installments.windows(2) {
            prop_assert!(pair[1].amount >= pair[0].amount);
        }
    }

    #[test]
    fn prop_amount_changes_only_at_increase_periods(
        initial in 1_000i64..5_000_000,
        periods in 2u32..241,
        percentage_bp in 100i64..1_000,
        interval in 1u32..13,
    ) {
        let config = installment_config(initial, periods, percentage_bp, interval);
        let schedule = compute_installment_schedule(&config).unwrap().resolved().unwrap();

        for pair in schedule.installments.windows(2) {
            if is_increase_period(pair[1].period, interval) {
                prop_assert!(pair[1].amount > pair[0].amount);
                prop_assert!(pair[1].increase_percentage.is_some());
            } else {
                prop_assert_eq!(pair[1].amount, pair[0].amount);
                prop_assert!(pair[1].increase_percentage.is_none());
            }
        }
    }

    #[test]
    fn prop_out_of_pocket_identity(
        initial in 0i64..2_000_000,
        periods in 1u32..121,
        income in 0i64..10_000_000,
        rent in 0i64..3_000_000,
        delay in 0u32..60,
    ) {
        let config = scenario_config(installment_config(initial, periods, 750, 6), income, rent, delay);
        let result = compute_scenario(&config).unwrap().resolved().unwrap();
        let summary = &result.summary;

        prop_assert_eq!(
            summary.total_out_of_pocket,
            summary.down_payment + summary.total_installment_payment + summary.total_rent_payment
        );
        prop_assert_eq!(summary.sustainability_breakdown.total(), periods);
        prop_assert_eq!(summary.overlap_months, delay);
        prop_assert!(summary.overlap_cost <= summary.total_rent_payment);

        let max = result.period_data.iter().map(|p| p.payment_to_income_ratio).max().unwrap();
        prop_assert_eq!(summary.max_payment_to_income_ratio, max);
        let first = result.period_data.iter().find(|p| p.payment_to_income_ratio == max).unwrap();
        prop_assert_eq!(summary.max_ratio_period, first.period);
    }

    #[test]
    fn prop_scenario_is_idempotent(
        initial in 0i64..2_000_000,
        periods in 1u32..121,
        income in 0i64..10_000_000,
        rent in 0i64..3_000_000,
        delay in 0u32..60,
    ) {
        let config = scenario_config(installment_config(initial, periods, 1_000, 6), income, rent, delay);

        let first = compute_scenario(&config).unwrap();
        let second = compute_scenario(&config).unwrap();
        prop_assert_eq!(first, second);
    }
}
