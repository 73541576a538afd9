//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from a YAML file.

use rust_decimal::Decimal;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::PayrollConfig;

/// Loads, validates and provides access to payroll configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
/// println!("Overtime after {}h", loader.config().overtime.weekly_threshold_hours);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file contains invalid YAML (`ConfigParseError`)
    /// - A value is out of range (`InvalidConfig`)
    ///
    /// # Example
    ///
    /// ```no_run
    /// use payroll_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/payroll.yaml")?;
    /// # Ok::<(), payroll_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::from_yaml_str(&content).map_err(|err| match err {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str,
                message,
            },
            other => other,
        })
    }

    /// Parses and validates configuration from a YAML string.
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        let config: PayrollConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;

        Self::from_config(config)
    }

    /// Validates an already-built configuration.
    pub fn from_config(config: PayrollConfig) -> EngineResult<Self> {
        Self::validate(&config)?;
        Ok(Self { config })
    }

    fn validate(config: &PayrollConfig) -> EngineResult<()> {
        if config.day_window.start == config.day_window.end {
            return Err(EngineError::InvalidConfig {
                field: "day_window".to_string(),
                message: "start and end must differ".to_string(),
            });
        }

        if config.overtime.weekly_threshold_hours == 0 {
            return Err(EngineError::InvalidConfig {
                field: "overtime.weekly_threshold_hours".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        if config.overtime.multiplier < Decimal::ONE {
            return Err(EngineError::InvalidConfig {
                field: "overtime.multiplier".to_string(),
                message: format!("must be at least 1, got {}", config.overtime.multiplier),
            });
        }

        if config.overtime.regular_hours_tolerance < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "overtime.regular_hours_tolerance".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        if config.premium_schedule.hourly_premium < Decimal::ZERO {
            return Err(EngineError::InvalidConfig {
                field: "premium_schedule.hourly_premium".to_string(),
                message: "must not be negative".to_string(),
            });
        }

        Ok(())
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}
