//! Day/night minute classification.
//!
//! Every whole minute in `[floor_to_minute(start), end)` is sampled once and
//! counted as "day" when its time of day falls inside the configured day
//! window. The day window is expressed as ranges of minute-of-day indices and
//! the samples are counted against them arithmetically, so the cost does not
//! grow with the length of the span.

use chrono::{Duration, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::config::DayWindow;
use crate::error::{EngineError, EngineResult};
use crate::models::floor_to_minute;

/// Day and total minute counts for one interval.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::MinuteClassification;
///
/// let classification = MinuteClassification { day_minutes: 10, total_minutes: 25 };
/// assert_eq!(classification.night_minutes(), 15);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteClassification {
    /// Minutes whose time of day is inside the day window.
    pub day_minutes: i64,
    /// All minutes sampled.
    pub total_minutes: i64,
}

impl MinuteClassification {
    /// Minutes outside the day window.
    pub fn night_minutes(&self) -> i64 {
        self.total_minutes - self.day_minutes
    }
}

/// Classifies each minute of `[floor_to_minute(start), end)` as day or night.
///
/// # Errors
///
/// Returns [`EngineError::InvalidPunch`] when `end` is not after `start`.
///
/// # Examples
///
/// ## Entirely inside the day window
///
/// ```
/// use payroll_engine::calculation::classify;
/// use payroll_engine::config::DayWindow;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let result = classify(at("2023-04-04 11:52:00"), at("2023-04-04 17:12:00"), &DayWindow::default()).unwrap();
///
/// assert_eq!(result.total_minutes, 320);
/// assert_eq!(result.day_minutes, 320);
/// assert_eq!(result.night_minutes(), 0);
/// ```
///
/// ## Crossing the 22:00 boundary
///
/// ```
/// use payroll_engine::calculation::classify;
/// use payroll_engine::config::DayWindow;
/// use chrono::NaiveDateTime;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let result = classify(at("2023-04-04 21:50:00"), at("2023-04-04 22:10:00"), &DayWindow::default()).unwrap();
///
/// assert_eq!(result.day_minutes, 10);
/// assert_eq!(result.night_minutes(), 10);
/// ```
pub fn classify(
    start: NaiveDateTime,
    end: NaiveDateTime,
    window: &DayWindow,
) -> EngineResult<MinuteClassification> {
    if end <= start {
        return Err(EngineError::InvalidPunch {
            punch: format!("{} - {}", start, end),
            message: "end time is not after start time".to_string(),
        });
    }

    let first = floor_to_minute(start);
    let whole_minutes = (end - first).num_minutes();
    let total_minutes = if first + Duration::minutes(whole_minutes) < end {
        whole_minutes + 1
    } else {
        whole_minutes
    };

    let first_sample = minute_of_day(first.time());
    let last_sample = first_sample + total_minutes;
    let day_minutes = day_ranges(window)
        .into_iter()
        .flatten()
        .map(|range| samples_before(last_sample, range) - samples_before(first_sample, range))
        .sum();

    Ok(MinuteClassification {
        day_minutes,
        total_minutes,
    })
}

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Half-open range of minute-of-day indices.
type MinuteRange = (i64, i64);

fn minute_of_day(time: NaiveTime) -> i64 {
    i64::from(time.num_seconds_from_midnight()) / 60
}

/// First minute-of-day index whose start is at or after `time`.
fn first_minute_at_or_after(time: NaiveTime) -> i64 {
    let seconds = i64::from(time.num_seconds_from_midnight())
        + i64::from(time.nanosecond() > 0);
    (seconds + 59) / 60
}

/// Minute-of-day indices whose start falls inside the window.
fn day_ranges(window: &DayWindow) -> [Option<MinuteRange>; 2] {
    let start = first_minute_at_or_after(window.start);
    let end = first_minute_at_or_after(window.end);

    if window.start <= window.end {
        [Some((start, end)), None]
    } else {
        [Some((0, end)), Some((start, MINUTES_PER_DAY))]
    }
}

/// Counts sample offsets in `[0, offset)` whose minute of day is in `range`.
fn samples_before(offset: i64, (low, high): MinuteRange) -> i64 {
    let width = (high - low).max(0);
    let full_days = offset / MINUTES_PER_DAY;
    let remainder = offset % MINUTES_PER_DAY;
    full_days * width + (remainder - low).clamp(0, width)
}
