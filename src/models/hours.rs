//! Hour bucket models.
//!
//! All aggregation happens in whole minutes ([`MinuteBuckets`]) so that the
//! weekly threshold comparison never suffers floating-point drift. Minutes are
//! converted to decimal hours ([`HourBuckets`]) only for pay and presentation.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::{EmployeeName, ScheduleKind};

/// Minutes per hour as a Decimal.
pub const MINUTES_PER_HOUR: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

/// Converts whole minutes to unrounded decimal hours.
pub fn minutes_to_hours(minutes: i64) -> Decimal {
    Decimal::from(minutes) / MINUTES_PER_HOUR
}

/// Rounds a value to two decimal places, halves away from zero.
///
/// The result always carries two decimal places, and negative zero results
/// are reported as plain zero.
pub fn round_2dp(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return Decimal::new(0, 2);
    }
    rounded.rescale(2);
    rounded
}

/// Minute counts for the four day/night x standard/Paddington categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinuteBuckets {
    /// Standard-schedule minutes inside the day window.
    pub day: i64,
    /// Standard-schedule minutes outside the day window.
    pub night: i64,
    /// Paddington minutes inside the day window.
    pub paddington_day: i64,
    /// Paddington minutes outside the day window.
    pub paddington_night: i64,
}

impl MinuteBuckets {
    /// Routes classified minutes into the buckets for the given schedule.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{MinuteBuckets, ScheduleKind};
    ///
    /// let buckets = MinuteBuckets::for_schedule(ScheduleKind::Paddington, 120, 30);
    /// assert_eq!(buckets.paddington_day, 120);
    /// assert_eq!(buckets.paddington_night, 30);
    /// assert_eq!(buckets.day + buckets.night, 0);
    /// ```
    pub fn for_schedule(schedule: ScheduleKind, day_minutes: i64, night_minutes: i64) -> Self {
        match schedule {
            ScheduleKind::Standard => Self {
                day: day_minutes,
                night: night_minutes,
                ..Self::default()
            },
            ScheduleKind::Paddington => Self {
                paddington_day: day_minutes,
                paddington_night: night_minutes,
                ..Self::default()
            },
        }
    }

    /// Total minutes across all four buckets.
    pub fn total(&self) -> i64 {
        self.day + self.night + self.paddington_day + self.paddington_night
    }

    /// Converts to unrounded decimal hours.
    pub fn to_hours(&self) -> HourBuckets {
        HourBuckets {
            day: minutes_to_hours(self.day),
            night: minutes_to_hours(self.night),
            paddington_day: minutes_to_hours(self.paddington_day),
            paddington_night: minutes_to_hours(self.paddington_night),
        }
    }
}

impl Add for MinuteBuckets {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            day: self.day + rhs.day,
            night: self.night + rhs.night,
            paddington_day: self.paddington_day + rhs.paddington_day,
            paddington_night: self.paddington_night + rhs.paddington_night,
        }
    }
}

impl AddAssign for MinuteBuckets {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for MinuteBuckets {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// Decimal hours for the four categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourBuckets {
    /// Standard day hours.
    pub day: Decimal,
    /// Standard night hours.
    pub night: Decimal,
    /// Paddington day hours.
    pub paddington_day: Decimal,
    /// Paddington night hours.
    pub paddington_night: Decimal,
}

impl HourBuckets {
    /// Total hours across all four buckets.
    pub fn total(&self) -> Decimal {
        self.day + self.night + self.paddington_day + self.paddington_night
    }
}

/// The hour totals of a single punch.
///
/// `start_time` is the punch start truncated to the minute; the punch spans
/// `minutes.total()` one-minute samples from there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftHours {
    /// Position of the shift in its employee's chronological sequence.
    pub shift_index: usize,
    /// The employee who worked the shift.
    pub employee: EmployeeName,
    /// Start of the first classified minute.
    pub start_time: NaiveDateTime,
    /// Clock-out time (exclusive).
    pub end_time: NaiveDateTime,
    /// Schedule the shift is paid under.
    pub schedule: ScheduleKind,
    /// Classified minutes. Only the pair matching `schedule` is non-zero.
    pub minutes: MinuteBuckets,
}

impl ShiftHours {
    /// Total classified minutes in the shift.
    pub fn total_minutes(&self) -> i64 {
        self.minutes.total()
    }

    /// The payroll week this shift is counted in, from its start date.
    pub fn week(&self) -> PayrollWeek {
        PayrollWeek::containing(self.start_time.date())
    }
}

/// A Sunday-to-Saturday payroll week.
///
/// Weeks are keyed by the Sunday that starts them so that a pay period
/// crossing New Year never merges two different weeks. `number` is the
/// `%U` week-of-year of that Sunday, kept for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PayrollWeek {
    /// The Sunday the week starts on.
    pub starts_on: NaiveDate,
    /// Week of year of `starts_on`, Sunday as first day of the week (`%U`, 1-53).
    pub number: u32,
}

impl PayrollWeek {
    /// Returns the payroll week containing the given date.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::PayrollWeek;
    /// use chrono::NaiveDate;
    ///
    /// // Tuesday 4 April 2023
    /// let week = PayrollWeek::containing(NaiveDate::from_ymd_opt(2023, 4, 4).unwrap());
    /// assert_eq!(week.starts_on, NaiveDate::from_ymd_opt(2023, 4, 2).unwrap());
    /// assert_eq!(week.number, 14);
    /// ```
    pub fn containing(date: NaiveDate) -> Self {
        let days_since_sunday = date.weekday().num_days_from_sunday();
        let starts_on = date - Duration::days(i64::from(days_since_sunday));
        let number = (starts_on.ordinal0() + 7) / 7;
        Self { starts_on, number }
    }
}

impl fmt::Display for PayrollWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "week {} (from {})", self.number, self.starts_on)
    }
}

/// Regular and overtime minutes for one employee in one payroll week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBucket {
    /// The employee.
    pub employee: EmployeeName,
    /// The payroll week.
    pub week: PayrollWeek,
    /// Minutes worked before the weekly threshold was reached.
    pub regular: MinuteBuckets,
    /// Minutes worked from the weekly threshold onward.
    pub overtime: MinuteBuckets,
}

impl WeeklyBucket {
    /// Total minutes worked in the week.
    pub fn total_minutes(&self) -> i64 {
        self.regular.total() + self.overtime.total()
    }
}
