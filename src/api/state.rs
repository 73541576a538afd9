//! Application state for the payroll API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollConfig};

/// Shared application state.
///
/// Contains resources that are shared across all request handlers,
/// such as the loaded payroll configuration.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the payroll configuration requests are calculated with.
    pub fn payroll_config(&self) -> &PayrollConfig {
        self.config.config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_clones_share_configuration() {
        let mut config = PayrollConfig::default();
        config.overtime.weekly_threshold_hours = 38;
        let state = AppState::new(ConfigLoader::from_config(config).unwrap());
        let clone = state.clone();

        assert_eq!(clone.payroll_config().overtime.weekly_threshold_hours, 38);
        assert!(std::ptr::eq(state.config(), clone.config()));
    }
}
