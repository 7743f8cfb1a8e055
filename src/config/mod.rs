//! Configuration loading and management for the Housing Plan Engine.
//!
//! This module loads the default sustainability thresholds, the scenario
//! presets and the housing price catalogue from YAML files, and reads
//! individual scenario definitions from YAML or JSON.
//!
//! # Example
//!
//! ```no_run
//! use housing_plan_engine::config::{ConfigLoader, PresetScenarioType};
//!
//! let loader = ConfigLoader::load("./config/social_housing").unwrap();
//! let moderate = loader.preset(PresetScenarioType::Moderate).unwrap();
//! println!("Loaded preset: {}", moderate.name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    EngineConfig, EngineSettings, HousingCatalog, HousingPrice, HousingRegion, HousingType,
    PresetScenario, PresetScenarioType, STANDARD_INCREASE_INTERVAL, STANDARD_TOTAL_INSTALLMENTS,
};
