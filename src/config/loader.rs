//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine settings
//! and the housing catalogue from YAML files, and for reading individual
//! scenario definitions.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{ScenarioConfig, SustainabilityThresholds};

use super::types::{
    EngineConfig, EngineSettings, HousingCatalog, HousingPrice, HousingRegion, HousingType,
    PresetScenario, PresetScenarioType,
};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/social_housing/
/// ├── engine.yaml   # Default thresholds and scenario presets
/// └── housing.yaml  # Housing price catalogue
/// ```
///
/// # Example
///
/// ```no_run
/// use housing_plan_engine::config::{ConfigLoader, HousingRegion, HousingType};
///
/// let loader = ConfigLoader::load("./config/social_housing")?;
/// let price = loader.housing_price(HousingRegion::Istanbul, HousingType::TwoBedroom65)?;
/// println!("Down payment: {}", price.down_payment);
/// # Ok::<(), housing_plan_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/social_housing")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The default thresholds are not strictly ascending
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let settings = load_yaml::<EngineSettings>(&path.join("engine.yaml"))?;
        settings.default_thresholds.validate()?;

        let housing = load_yaml::<HousingCatalog>(&path.join("housing.yaml"))?;

        info!(
            path = %path.display(),
            presets = settings.presets.len(),
            housing_prices = housing.prices.len(),
            "Engine configuration loaded"
        );

        Ok(Self {
            config: EngineConfig::new(settings, housing),
        })
    }

    /// Reads a single scenario definition.
    ///
    /// Files ending in `.json` are parsed as JSON, everything else as YAML.
    /// The scenario is only parsed here; it is validated when computed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use housing_plan_engine::calculation::compute_scenario;
    /// use housing_plan_engine::config::ConfigLoader;
    ///
    /// let scenario = ConfigLoader::load_scenario("./config/scenarios/household.yaml")?;
    /// let result = compute_scenario(&scenario)?;
    /// # Ok::<(), housing_plan_engine::error::EngineError>(())
    /// ```
    pub fn load_scenario<P: AsRef<Path>>(path: P) -> EngineResult<ScenarioConfig> {
        let path = path.as_ref();
        let is_json = path.extension().is_some_and(|ext| ext == "json");

        let scenario = if is_json {
            let content = read_file(path)?;
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?
        } else {
            load_yaml::<ScenarioConfig>(path)?
        };

        info!(path = %path.display(), "Scenario loaded");
        Ok(scenario)
    }

    /// Returns the underlying engine configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Returns the default sustainability thresholds.
    pub fn thresholds(&self) -> SustainabilityThresholds {
        self.config.thresholds()
    }

    /// Returns every configured preset.
    pub fn presets(&self) -> &[PresetScenario] {
        self.config.presets()
    }

    /// Gets a preset by type.
    ///
    /// Returns `PresetNotFound` if the configuration does not define it.
    pub fn preset(&self, kind: PresetScenarioType) -> EngineResult<&PresetScenario> {
        self.presets()
            .iter()
            .find(|preset| preset.kind == kind)
            .ok_or_else(|| EngineError::PresetNotFound {
                name: kind.to_string(),
            })
    }

    /// Gets a preset by its configuration name (e.g., "moderate").
    pub fn preset_by_name(&self, name: &str) -> EngineResult<&PresetScenario> {
        self.preset(PresetScenarioType::from_str(name)?)
    }

    /// Gets the catalogue price for a region and housing type.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use housing_plan_engine::config::{ConfigLoader, HousingRegion, HousingType};
    /// use housing_plan_engine::models::IncreasePolicy;
    /// use rust_decimal::Decimal;
    ///
    /// let loader = ConfigLoader::load("./config/social_housing")?;
    /// let plan = loader
    ///     .housing_price(HousingRegion::Anatolia, HousingType::OneBedroom55)?
    ///     .installment_config(IncreasePolicy::fixed_percentage(Decimal::new(75, 1), 6));
    /// assert_eq!(plan.total_installments, 240);
    /// # Ok::<(), housing_plan_engine::error::EngineError>(())
    /// ```
    pub fn housing_price(
        &self,
        region: HousingRegion,
        housing_type: HousingType,
    ) -> EngineResult<&HousingPrice> {
        self.config
            .housing_prices()
            .iter()
            .find(|price| price.region == region && price.housing_type == housing_type)
            .ok_or_else(|| EngineError::HousingPriceNotFound {
                region: region.to_string(),
                housing_type: housing_type.to_string(),
            })
    }
}

fn read_file(path: &Path) -> EngineResult<String> {
    fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path.display().to_string(),
    })
}

/// Loads and parses a YAML file.
fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
    let content = read_file(path)?;

    serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
