//! Shift expansion.
//!
//! Turns punches into [`ShiftHours`]: the punch is classified minute by minute
//! and the day/night counts are routed into the standard or Paddington buckets
//! according to its schedule label.

use tracing::debug;

use crate::config::{PayrollConfig, PremiumScheduleConfig};
use crate::error::EngineResult;
use crate::models::{MinuteBuckets, Punch, ScheduleKind, ShiftHours, floor_to_minute};

use super::classify;

/// Resolves a timesheet schedule label to the schedule it is paid under.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::schedule_kind;
/// use payroll_engine::config::PremiumScheduleConfig;
/// use payroll_engine::models::ScheduleKind;
///
/// let premium = PremiumScheduleConfig::default();
/// assert_eq!(schedule_kind("Paddington", &premium), ScheduleKind::Paddington);
/// assert_eq!(schedule_kind("Day Shift", &premium), ScheduleKind::Standard);
/// ```
pub fn schedule_kind(label: &str, premium: &PremiumScheduleConfig) -> ScheduleKind {
    if premium.is_premium(label) {
        ScheduleKind::Paddington
    } else {
        ScheduleKind::Standard
    }
}

/// Expands a single punch into its shift hour totals.
///
/// No rounding happens here; minutes are kept whole until presentation.
///
/// # Errors
///
/// Returns [`crate::error::EngineError::InvalidPunch`] when the punch has a
/// zero or negative duration.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::expand;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::Punch;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = Punch {
///     first_name: "Corrina".to_string(),
///     last_name: "Smith".to_string(),
///     date: at("2023-04-06 00:00:00").date(),
///     start_time: at("2023-04-06 22:00:00"),
///     end_time: at("2023-04-07 03:31:00"),
///     regular: Decimal::ZERO,
///     schedule: "Paddington".to_string(),
///     ot: Decimal::ZERO,
/// };
///
/// let shift = expand(&punch, 0, &PayrollConfig::default()).unwrap();
/// assert_eq!(shift.minutes.paddington_night, 331);
/// assert_eq!(shift.minutes.night, 0);
/// ```
pub fn expand(punch: &Punch, shift_index: usize, config: &PayrollConfig) -> EngineResult<ShiftHours> {
    punch.validate()?;

    let classification = classify(punch.start_time, punch.end_time, &config.day_window)?;
    let schedule = schedule_kind(&punch.schedule, &config.premium_schedule);
    let minutes = MinuteBuckets::for_schedule(
        schedule,
        classification.day_minutes,
        classification.night_minutes(),
    );

    debug!(
        employee = %punch.employee(),
        shift_index,
        %schedule,
        day_minutes = classification.day_minutes,
        night_minutes = classification.night_minutes(),
        "Expanded punch"
    );

    Ok(ShiftHours {
        shift_index,
        employee: punch.employee(),
        start_time: floor_to_minute(punch.start_time),
        end_time: punch.end_time,
        schedule,
        minutes,
    })
}

/// Expands one employee's punches in chronological order.
///
/// Punches are stably sorted by start time, so punches starting at the same
/// instant keep their input order. The returned shifts are indexed by their
/// position in that order.
pub fn expand_employee_shifts<'a, I>(punches: I, config: &PayrollConfig) -> EngineResult<Vec<ShiftHours>>
where
    I: IntoIterator<Item = &'a Punch>,
{
    let mut ordered: Vec<&Punch> = punches.into_iter().collect();
    ordered.sort_by_key(|punch| punch.start_time);

    ordered
        .into_iter()
        .enumerate()
        .map(|(index, punch)| expand(punch, index, config))
        .collect()
}
