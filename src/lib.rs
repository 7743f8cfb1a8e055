//! Housing Plan Engine
//!
//! This crate projects a long-horizon housing installment plan against a
//! projected household income and an overlapping rent obligation, and
//! classifies the affordability of every period.
//!
//! # Example
//!
//! ```
//! use housing_plan_engine::calculation::compute_scenario;
//! use housing_plan_engine::models::{
//!     HouseholdMemberIncome, IncomeProjectionConfig, IncreasePolicy, InstallmentConfig,
//!     RentConfig, ScenarioConfig,
//! };
//! use rust_decimal::Decimal;
//!
//! let config = ScenarioConfig {
//!     id: None,
//!     name: "Two-year plan".to_string(),
//!     description: None,
//!     installment_config: InstallmentConfig {
//!         initial_amount: 500_000,
//!         total_installments: 24,
//!         down_payment: 5_000_000,
//!         increase: IncreasePolicy::fixed_percentage(Decimal::new(10, 0), 6),
//!     },
//!     income_config: IncomeProjectionConfig::single_member(
//!         HouseholdMemberIncome::new("member1", 2_000_000),
//!         Decimal::new(15, 0),
//!         24,
//!     ),
//!     rent_config: RentConfig {
//!         monthly_rent: 800_000,
//!         annual_increase_percentage: Decimal::new(25, 0),
//!         delivery_delay_months: 12,
//!     },
//!     sustainability_thresholds: None,
//! };
//!
//! let result = compute_scenario(&config)?.resolved().unwrap();
//! assert_eq!(result.period_data.len(), 24);
//! assert_eq!(result.summary.overlap_months, 12);
//! # Ok::<(), housing_plan_engine::error::EngineError>(())
//! ```

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
