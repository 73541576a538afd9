//! Configuration types for payroll runs.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The daily window whose minutes count as "day" time.
///
/// The window is half-open: `start` is inside, `end` is not. When `start` is
/// later than `end` the window wraps past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// First minute of the day window (inclusive).
    pub start: NaiveTime,
    /// End of the day window (exclusive).
    pub end: NaiveTime,
}

impl DayWindow {
    /// Returns true if the given time of day falls in the day window.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::config::DayWindow;
    /// use chrono::NaiveTime;
    ///
    /// let window = DayWindow::default();
    /// assert!(window.contains(NaiveTime::from_hms_opt(6, 0, 0).unwrap()));
    /// assert!(window.contains(NaiveTime::from_hms_opt(21, 59, 0).unwrap()));
    /// assert!(!window.contains(NaiveTime::from_hms_opt(22, 0, 0).unwrap()));
    /// assert!(!window.contains(NaiveTime::from_hms_opt(5, 59, 0).unwrap()));
    /// ```
    pub fn contains(&self, time: NaiveTime) -> bool {
        if self.start <= self.end {
            time >= self.start && time < self.end
        } else {
            time >= self.start || time < self.end
        }
    }
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            start: NaiveTime::from_hms_opt(6, 0, 0).unwrap_or_default(),
            end: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
        }
    }
}

/// Weekly overtime settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeConfig {
    /// Worked hours per payroll week after which minutes become overtime.
    pub weekly_threshold_hours: u32,
    /// Multiplier applied to the hourly rate for overtime minutes.
    pub multiplier: Decimal,
    /// Rounding tolerance (in hours) for the post-split regular-hours check.
    #[serde(default = "default_regular_hours_tolerance")]
    pub regular_hours_tolerance: Decimal,
}

impl OvertimeConfig {
    /// The weekly threshold expressed in minutes.
    pub fn weekly_threshold_minutes(&self) -> i64 {
        i64::from(self.weekly_threshold_hours) * 60
    }
}

impl Default for OvertimeConfig {
    fn default() -> Self {
        Self {
            weekly_threshold_hours: 40,
            multiplier: Decimal::new(15, 1),
            regular_hours_tolerance: default_regular_hours_tolerance(),
        }
    }
}

fn default_regular_hours_tolerance() -> Decimal {
    Decimal::new(1, 1)
}

/// The premium (Paddington) schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PremiumScheduleConfig {
    /// Flat amount added to the day or night rate for premium minutes.
    pub hourly_premium: Decimal,
    /// Schedule labels that earn the premium. Compared after trimming.
    pub labels: Vec<String>,
}

impl PremiumScheduleConfig {
    /// Returns true if the schedule label names a premium schedule.
    pub fn is_premium(&self, schedule: &str) -> bool {
        let schedule = schedule.trim();
        self.labels.iter().any(|label| label.trim() == schedule)
    }
}

impl Default for PremiumScheduleConfig {
    fn default() -> Self {
        Self {
            hourly_premium: Decimal::new(2, 0),
            labels: vec!["Paddington".to_string()],
        }
    }
}

/// The complete payroll configuration.
///
/// `PayrollConfig::default()` carries the standard rules: a 06:00-22:00 day
/// window, 40 hours per week before overtime at 1.5x, and a $2/hour premium
/// for the `Paddington` schedule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PayrollConfig {
    /// The day/night classification window.
    #[serde(default)]
    pub day_window: DayWindow,
    /// Weekly overtime rules.
    #[serde(default)]
    pub overtime: OvertimeConfig,
    /// The premium schedule.
    #[serde(default)]
    pub premium_schedule: PremiumScheduleConfig,
}
