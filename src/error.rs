//! Error types for the Housing Plan Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while projecting a plan.

use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Housing Plan Engine.
///
/// Every calculation fails fast with one of these before producing any
/// output, so a caller never sees a partially computed result.
///
/// # Example
///
/// ```
/// use housing_plan_engine::error::EngineError;
///
/// let error = EngineError::InvalidConfiguration {
///     field: "installment.total_installments".to_string(),
///     message: "must be at least 1".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Invalid configuration field 'installment.total_installments': must be at least 1"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was out of its allowed range.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfiguration {
        /// Dotted path of the offending field.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// Sustainability thresholds were not strictly ascending.
    #[error(
        "Sustainability thresholds must be strictly ascending (safe {safe} < warning {warning} < critical {critical})"
    )]
    InvalidThresholds {
        /// The safe boundary.
        safe: Decimal,
        /// The warning boundary.
        warning: Decimal,
        /// The critical boundary.
        critical: Decimal,
    },

    /// No preset with the given name exists in the loaded configuration.
    #[error("Scenario preset not found: {name}")]
    PresetNotFound {
        /// The preset that was requested.
        name: String,
    },

    /// No housing price exists for the given region and housing type.
    #[error("Housing price not found for region '{region}' and type '{housing_type}'")]
    HousingPriceNotFound {
        /// The region that was requested.
        region: String,
        /// The housing type that was requested.
        housing_type: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

impl EngineError {
    /// Shorthand for an [`EngineError::InvalidConfiguration`].
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Shorthand for a money overflow reported as [`EngineError::CalculationError`].
    pub(crate) fn overflow(context: &str) -> Self {
        EngineError::CalculationError {
            message: format!("monetary overflow while computing {}", context),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
