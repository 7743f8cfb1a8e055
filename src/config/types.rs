//! Configuration types for scenario presets and the housing price catalogue.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::models::{
    IncreasePolicy, InstallmentConfig, MoneyAmount, ScenarioConfig, SustainabilityThresholds,
};

/// Number of monthly installments in a standard catalogue plan.
pub const STANDARD_TOTAL_INSTALLMENTS: u32 = 240;

/// Periods between installment increases in a standard catalogue plan.
pub const STANDARD_INCREASE_INTERVAL: u32 = 6;

/// The named what-if assumptions shipped with the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetScenarioType {
    /// Low increases and a short delivery delay.
    Optimistic,
    /// Middle-of-the-road assumptions.
    Moderate,
    /// High increases and a long delivery delay.
    Pessimistic,
}

impl PresetScenarioType {
    /// Every preset type, from most to least favourable.
    pub const ALL: [PresetScenarioType; 3] = [
        PresetScenarioType::Optimistic,
        PresetScenarioType::Moderate,
        PresetScenarioType::Pessimistic,
    ];

    /// The configuration name of this preset type.
    pub fn as_str(&self) -> &'static str {
        match self {
            PresetScenarioType::Optimistic => "optimistic",
            PresetScenarioType::Moderate => "moderate",
            PresetScenarioType::Pessimistic => "pessimistic",
        }
    }
}

impl fmt::Display for PresetScenarioType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetScenarioType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "optimistic" => Ok(PresetScenarioType::Optimistic),
            "moderate" => Ok(PresetScenarioType::Moderate),
            "pessimistic" => Ok(PresetScenarioType::Pessimistic),
            _ => Err(EngineError::PresetNotFound {
                name: s.to_string(),
            }),
        }
    }
}

/// A named set of growth and delay assumptions.
///
/// Applying a preset to a scenario replaces its increase percentages and
/// delivery delay while keeping the amounts, plan length and household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresetScenario {
    /// Which preset this is.
    #[serde(rename = "type")]
    pub kind: PresetScenarioType,
    /// Display name.
    pub name: String,
    /// Short description of the assumptions.
    pub description: String,
    /// Installment increase applied every increase interval.
    pub installment_increase_percentage: Decimal,
    /// Annual household income increase.
    pub income_increase_percentage: Decimal,
    /// Annual rent increase.
    pub rent_increase_percentage: Decimal,
    /// Periods until delivery, during which rent is paid.
    pub delivery_delay_months: u32,
}

impl PresetScenario {
    /// Builds a scenario from `base` with this preset's assumptions.
    ///
    /// - the installment plan becomes a fixed percentage increase, keeping
    ///   the base interval and unit
    /// - the income default percentage is replaced and member overrides are
    ///   cleared
    /// - the rent percentage and delivery delay are replaced
    ///
    /// # Example
    ///
    /// ```no_run
    /// use housing_plan_engine::config::{ConfigLoader, PresetScenarioType};
    ///
    /// let loader = ConfigLoader::load("./config/social_housing")?;
    /// let base = ConfigLoader::load_scenario("./config/scenarios/household.yaml")?;
    /// let pessimistic = loader.preset(PresetScenarioType::Pessimistic)?.apply_to(&base);
    /// assert_eq!(pessimistic.rent_config.delivery_delay_months, 36);
    /// # Ok::<(), housing_plan_engine::error::EngineError>(())
    /// ```
    pub fn apply_to(&self, base: &ScenarioConfig) -> ScenarioConfig {
        let mut scenario = base.clone();
        scenario.name = self.name.clone();
        scenario.description = Some(self.description.clone());

        let increase = &mut scenario.installment_config.increase;
        *increase = IncreasePolicy {
            interval_unit: increase.interval_unit,
            ..IncreasePolicy::fixed_percentage(
                self.installment_increase_percentage,
                increase.increase_interval,
            )
        };

        scenario.income_config.default_annual_increase_percentage =
            self.income_increase_percentage;
        for member in &mut scenario.income_config.household_members {
            member.annual_increase_percentage = None;
        }

        scenario.rent_config.annual_increase_percentage = self.rent_increase_percentage;
        scenario.rent_config.delivery_delay_months = self.delivery_delay_months;
        scenario
    }
}

/// A region with its own price list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HousingRegion {
    /// Istanbul.
    #[serde(rename = "istanbul")]
    Istanbul,
    /// Every other province.
    #[serde(rename = "anadolu")]
    Anatolia,
}

impl fmt::Display for HousingRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HousingRegion::Istanbul => f.write_str("istanbul"),
            HousingRegion::Anatolia => f.write_str("anadolu"),
        }
    }
}

/// Room layout and floor area of a home.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HousingType {
    /// One bedroom plus living room, 55 m².
    #[serde(rename = "1+1_55")]
    OneBedroom55,
    /// Two bedrooms plus living room, 65 m².
    #[serde(rename = "2+1_65")]
    TwoBedroom65,
    /// Two bedrooms plus living room, 80 m².
    #[serde(rename = "2+1_80")]
    TwoBedroom80,
}

impl fmt::Display for HousingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            HousingType::OneBedroom55 => "1+1_55",
            HousingType::TwoBedroom65 => "2+1_65",
            HousingType::TwoBedroom80 => "2+1_80",
        };
        f.write_str(code)
    }
}

/// Catalogue price of one home type in one region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingPrice {
    /// The region.
    pub region: HousingRegion,
    /// The home type.
    pub housing_type: HousingType,
    /// Floor area in square metres.
    pub square_meters: u32,
    /// Down payment due before the first installment.
    pub down_payment: MoneyAmount,
    /// First monthly installment.
    pub monthly_installment: MoneyAmount,
    /// Total catalogue price.
    pub total_price: MoneyAmount,
}

impl HousingPrice {
    /// Key of this entry in the catalogue, e.g. `istanbul_2+1_80`.
    pub fn catalog_key(&self) -> String {
        format!("{}_{}", self.region, self.housing_type)
    }

    /// A standard plan for this home: 240 monthly installments starting at
    /// the catalogue installment, increasing every 6 periods per `increase`.
    ///
    /// The interval of `increase` is replaced with the standard one.
    pub fn installment_config(&self, increase: IncreasePolicy) -> InstallmentConfig {
        InstallmentConfig {
            initial_amount: self.monthly_installment,
            total_installments: STANDARD_TOTAL_INSTALLMENTS,
            down_payment: self.down_payment,
            increase: IncreasePolicy {
                increase_interval: STANDARD_INCREASE_INTERVAL,
                interval_unit: Default::default(),
                ..increase
            },
        }
    }
}

/// Engine settings file structure (`engine.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Thresholds for scenarios that do not set their own.
    #[serde(default)]
    pub default_thresholds: SustainabilityThresholds,
    /// The available presets.
    pub presets: Vec<PresetScenario>,
}

/// Housing catalogue file structure (`housing.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct HousingCatalog {
    /// Every catalogue entry.
    pub prices: Vec<HousingPrice>,
}

/// Complete engine configuration.
///
/// This struct aggregates all configuration loaded from the configuration
/// directory.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    settings: EngineSettings,
    housing: HousingCatalog,
}

impl EngineConfig {
    /// Creates a new engine configuration.
    pub fn new(settings: EngineSettings, housing: HousingCatalog) -> Self {
        Self { settings, housing }
    }

    /// Returns the default sustainability thresholds.
    pub fn thresholds(&self) -> SustainabilityThresholds {
        self.settings.default_thresholds
    }

    /// Returns all presets.
    pub fn presets(&self) -> &[PresetScenario] {
        &self.settings.presets
    }

    /// Returns the housing price catalogue.
    pub fn housing_prices(&self) -> &[HousingPrice] {
        &self.housing.prices
    }
}
