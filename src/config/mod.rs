//! Configuration loading and management for the payroll engine.
//!
//! This module provides the payroll rules (day window, overtime threshold and
//! multiplier, premium schedule) and loads them from a YAML file.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Day window starts at {}", config.config().day_window.start);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{DayWindow, OvertimeConfig, PayrollConfig, PremiumScheduleConfig};
