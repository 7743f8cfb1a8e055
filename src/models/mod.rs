//! Core data models for the Housing Plan Engine.
//!
//! This module contains all the domain models used throughout the engine:
//! the configuration inputs, the per-period outputs and the aggregated
//! results of each calculator.

mod common;
mod income;
mod installment;
mod resolution;
mod scenario;

pub use common::{MoneyAmount, PeriodUnit};
pub use income::{
    CalculatedIncome, HouseholdMemberIncome, IncomeIncreaseMethod, IncomeProjection,
    IncomeProjectionConfig, MemberIncome,
};
pub use installment::{
    CalculatedInstallment, CustomIncrease, IncreaseMethod, IncreasePolicy, InstallmentConfig,
    InstallmentSchedule,
};
pub use resolution::Resolution;
pub use scenario::{
    RentConfig, ScenarioConfig, ScenarioPeriodData, ScenarioResult, ScenarioSummary,
    SustainabilityBreakdown, SustainabilityStatus, SustainabilityThresholds,
};
