//! Configuration loading and management for the payroll engine.
//!
//! This module provides the flat withholding rates and pay constants used
//! by the calculator, with defaults matching the reference model and an
//! optional YAML override.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Overtime multiplier: {}", config.rates().overtime_multiplier);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{PayrollConfig, PayrollRates};
