//! Calculation logic for installment plans, income and affordability.
//!
//! This module contains the three calculators and the helpers they share:
//!
//! - [`compute_installment_schedule`] builds the periodically increasing
//!   installment schedule
//! - [`compute_income_projection`] projects household income with annual raises
//! - [`compute_scenario`] merges both with the rent overlap and classifies
//!   every period
//!
//! [`compare_presets`] runs one scenario per preset for what-if comparisons.

mod comparison;
mod compounding;
mod income_projection;
mod installment_schedule;
mod scenario;
mod sustainability;

pub use comparison::{PresetComparison, compare_presets};
pub use compounding::{
    ANNUAL_INCREASE_INTERVAL, apply_increase, is_annual_boundary, is_increase_period,
};
pub use income_projection::compute_income_projection;
pub use installment_schedule::compute_installment_schedule;
pub use scenario::compute_scenario;
pub use sustainability::{DEGENERATE_RATIO, classify_sustainability, payment_to_income_ratio};
