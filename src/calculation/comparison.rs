//! What-if comparison of one household across scenario presets.

use serde::Serialize;
use tracing::debug;

use super::scenario::compute_scenario;
use crate::config::{PresetScenario, PresetScenarioType};
use crate::error::EngineResult;
use crate::models::{Resolution, ScenarioConfig, ScenarioSummary};

/// Outcome of one preset applied to the base scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresetComparison {
    /// Which preset was applied.
    pub preset: PresetScenarioType,
    /// Display name of the preset.
    pub name: String,
    /// The scenario summary, or the index method that blocked it.
    pub outcome: Resolution<ScenarioSummary>,
}

/// Evaluates `base` once per preset, in the order given.
///
/// Each evaluation is independent. The first invalid configuration aborts
/// the whole comparison.
pub fn compare_presets(
    base: &ScenarioConfig,
    presets: &[PresetScenario],
) -> EngineResult<Vec<PresetComparison>> {
    let comparisons = presets
        .iter()
        .map(|preset| -> EngineResult<PresetComparison> {
            let scenario = preset.apply_to(base);
            let outcome = compute_scenario(&scenario)?.map(|result| result.summary);
            Ok(PresetComparison {
                preset: preset.kind,
                name: preset.name.clone(),
                outcome,
            })
        })
        .collect::<EngineResult<Vec<_>>>()?;

    debug!(
        scenario = %base.name,
        presets = comparisons.len(),
        "Preset comparison computed"
    );
    Ok(comparisons)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{
        HouseholdMemberIncome, IncomeProjectionConfig, IncreasePolicy, InstallmentConfig,
        RentConfig,
    };
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_preset(
        kind: PresetScenarioType,
        installment: &str,
        rent: &str,
        delay: u32,
    ) -> PresetScenario {
        PresetScenario {
            kind,
            name: kind.to_string(),
            description: String::new(),
            installment_increase_percentage: dec(installment),
            income_increase_percentage: dec("15"),
            rent_increase_percentage: dec(rent),
            delivery_delay_months: delay,
        }
    }

    fn create_presets() -> Vec<PresetScenario> {
        vec![
            create_preset(PresetScenarioType::Optimistic, "6", "20", 18),
            create_preset(PresetScenarioType::Moderate, "7.5", "25", 24),
            create_preset(PresetScenarioType::Pessimistic, "10", "30", 36),
        ]
    }

    fn create_base() -> ScenarioConfig {
        ScenarioConfig {
            id: None,
            name: "Base".to_string(),
            description: None,
            installment_config: InstallmentConfig {
                initial_amount: 825_000,
                total_installments: 240,
                down_payment: 22_000_000,
                increase: IncreasePolicy::fixed_percentage(dec("7.5"), 6),
            },
            income_config: IncomeProjectionConfig::single_member(
                HouseholdMemberIncome::new("member1", 5_000_000),
                dec("15"),
                240,
            ),
            rent_config: RentConfig {
                monthly_rent: 1_500_000,
                annual_increase_percentage: dec("25"),
                delivery_delay_months: 24,
            },
            sustainability_thresholds: None,
        }
    }

    #[test]
    fn test_one_comparison_per_preset_in_order() {
        let comparisons = compare_presets(&create_base(), &create_presets()).unwrap();

        let kinds: Vec<PresetScenarioType> = comparisons.iter().map(|c| c.preset).collect();
        assert_eq!(kinds, PresetScenarioType::ALL.to_vec());
        assert!(comparisons.iter().all(|c| c.outcome.is_resolved()));
    }

    #[test]
    fn test_pessimistic_costs_more_than_optimistic() {
        let comparisons = compare_presets(&create_base(), &create_presets()).unwrap();
        let summaries: Vec<&ScenarioSummary> = comparisons
            .iter()
            .map(|c| c.outcome.as_resolved().unwrap())
            .collect();

        assert!(summaries[0].total_out_of_pocket < summaries[1].total_out_of_pocket);
        assert!(summaries[1].total_out_of_pocket < summaries[2].total_out_of_pocket);
        assert_eq!(summaries[0].overlap_months, 18);
        assert_eq!(summaries[2].overlap_months, 36);
    }

    #[test]
    fn test_matches_individual_scenario() {
        let base = create_base();
        let presets = create_presets();
        let comparisons = compare_presets(&base, &presets).unwrap();

        let direct = compute_scenario(&presets[1].apply_to(&base))
            .unwrap()
            .resolved()
            .unwrap();
        assert_eq!(comparisons[1].outcome.as_resolved(), Some(&direct.summary));
    }

    #[test]
    fn test_empty_preset_list() {
        assert!(compare_presets(&create_base(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_base_fails() {
        let mut base = create_base();
        base.rent_config.monthly_rent = -1;

        assert!(matches!(
            compare_presets(&base, &create_presets()),
            Err(EngineError::InvalidConfiguration { .. })
        ));
    }
}
