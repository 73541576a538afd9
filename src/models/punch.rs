//! Punch model and employee identity.
//!
//! A [`Punch`] is one raw start/end record from the timesheet. Employees are
//! matched across the timesheet and the rate table by [`EmployeeName`], which
//! is case-normalized to uppercase.

use std::fmt;

use chrono::{Duration, NaiveDate, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Case-normalized employee identity, ordered by last name then first name.
///
/// # Example
///
/// ```
/// use payroll_engine::models::EmployeeName;
///
/// let name = EmployeeName::new(" Jane ", "doe");
/// assert_eq!(name.first_name, "JANE");
/// assert_eq!(name.last_name, "DOE");
/// assert_eq!(name.to_string(), "JANE DOE");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EmployeeName {
    /// Uppercased last name.
    pub last_name: String,
    /// Uppercased first name.
    pub first_name: String,
}

impl EmployeeName {
    /// Builds a normalized name: trimmed and uppercased.
    pub fn new(first_name: &str, last_name: &str) -> Self {
        Self {
            last_name: last_name.trim().to_uppercase(),
            first_name: first_name.trim().to_uppercase(),
        }
    }
}

impl fmt::Display for EmployeeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}

/// The schedule category a punch is paid under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Any schedule without a premium.
    Standard,
    /// The Paddington schedule: day/night rate plus a flat hourly premium.
    Paddington,
}

impl fmt::Display for ScheduleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleKind::Standard => write!(f, "Standard"),
            ScheduleKind::Paddington => write!(f, "Paddington"),
        }
    }
}

/// One raw timesheet record.
///
/// Field names follow the timesheet export columns; snake_case aliases are
/// accepted so the same type serves JSON requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Punch {
    /// Employee first name as written in the timesheet.
    #[serde(rename = "First Name", alias = "first_name")]
    pub first_name: String,
    /// Employee last name as written in the timesheet.
    #[serde(rename = "Last Name", alias = "last_name")]
    pub last_name: String,
    /// The calendar date the timesheet files the punch under.
    #[serde(rename = "Date", alias = "date", with = "timestamp_format::date")]
    pub date: NaiveDate,
    /// Clock-in time.
    #[serde(
        rename = "Start Time",
        alias = "start_time",
        with = "timestamp_format::datetime"
    )]
    pub start_time: NaiveDateTime,
    /// Clock-out time.
    #[serde(
        rename = "End Time",
        alias = "end_time",
        with = "timestamp_format::datetime"
    )]
    pub end_time: NaiveDateTime,
    /// Regular hours reported by the timesheet software (reconciliation only).
    #[serde(rename = "Regular", alias = "regular", default, with = "blank_decimal")]
    pub regular: Decimal,
    /// Schedule label. Premium labels are configured in `PremiumScheduleConfig`.
    #[serde(rename = "Schedule", alias = "schedule", default)]
    pub schedule: String,
    /// Overtime hours reported by the timesheet software (reconciliation only).
    #[serde(rename = "OT", alias = "ot", default, with = "blank_decimal")]
    pub ot: Decimal,
}

impl Punch {
    /// Returns the normalized employee identity for this punch.
    pub fn employee(&self) -> EmployeeName {
        EmployeeName::new(&self.first_name, &self.last_name)
    }

    /// Returns a short human-readable description used in errors and logs.
    pub fn describe(&self) -> String {
        format!("{} {} - {}", self.employee(), self.start_time, self.end_time)
    }

    /// Checks that the punch has a positive duration.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Punch;
    /// use chrono::NaiveDateTime;
    /// use rust_decimal::Decimal;
    ///
    /// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
    /// let punch = Punch {
    ///     first_name: "Jane".to_string(),
    ///     last_name: "Doe".to_string(),
    ///     date: at("2023-04-04 00:00:00").date(),
    ///     start_time: at("2023-04-04 17:00:00"),
    ///     end_time: at("2023-04-04 09:00:00"),
    ///     regular: Decimal::ZERO,
    ///     schedule: "Standard".to_string(),
    ///     ot: Decimal::ZERO,
    /// };
    /// assert!(punch.validate().is_err());
    /// ```
    pub fn validate(&self) -> EngineResult<()> {
        if self.end_time <= self.start_time {
            return Err(EngineError::InvalidPunch {
                punch: self.describe(),
                message: "end time is not after start time".to_string(),
            });
        }
        Ok(())
    }
}

/// Truncates a timestamp to the start of its minute.
///
/// # Example
///
/// ```
/// use payroll_engine::models::floor_to_minute;
/// use chrono::NaiveDateTime;
///
/// let t = NaiveDateTime::parse_from_str("2023-04-04 11:52:37", "%Y-%m-%d %H:%M:%S").unwrap();
/// assert_eq!(floor_to_minute(t).to_string(), "2023-04-04 11:52:00");
/// ```
pub fn floor_to_minute(t: NaiveDateTime) -> NaiveDateTime {
    t - Duration::seconds(i64::from(t.second()))
        - Duration::nanoseconds(i64::from(t.nanosecond()))
}

/// Lenient timestamp parsing for timesheet exports.
///
/// Serialization always writes ISO 8601; deserialization also accepts the
/// space-separated form and the US `4/4/2023 11:52:00 AM` form.
mod timestamp_format {
    use chrono::{NaiveDate, NaiveDateTime};

    const DATETIME_FORMATS: &[&str] = &[
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
        "%m/%d/%Y %I:%M:%S %p",
        "%m/%d/%Y %I:%M %p",
        "%m/%d/%Y %H:%M:%S",
        "%m/%d/%Y %H:%M",
    ];

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y"];

    pub fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
        let value = value.trim();
        DATETIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    }

    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        DATE_FORMATS
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
            // Some exports write the date column as a midnight timestamp.
            .or_else(|| parse_datetime(value).map(|dt| dt.date()))
    }

    pub mod datetime {
        use chrono::NaiveDateTime;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(
            value: &NaiveDateTime,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            serializer.collect_str(&value.format("%Y-%m-%dT%H:%M:%S"))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<NaiveDateTime, D::Error> {
            let raw = String::deserialize(deserializer)?;
            super::parse_datetime(&raw)
                .ok_or_else(|| D::Error::custom(format!("unrecognized timestamp: '{}'", raw)))
        }
    }

    pub mod date {
        use chrono::NaiveDate;
        use serde::{Deserialize, Deserializer, Serializer, de::Error};

        pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(&value.format("%Y-%m-%d"))
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
            let raw = String::deserialize(deserializer)?;
            super::parse_date(&raw)
                .ok_or_else(|| D::Error::custom(format!("unrecognized date: '{}'", raw)))
        }
    }
}

/// Reported hour cells may be blank in timesheet exports; blanks read as zero.
mod blank_decimal {
    use std::str::FromStr;

    use rust_decimal::Decimal;
    use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Cell {
        Number(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error> {
        Serialize::serialize(value, serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Decimal, D::Error> {
        match Option::<Cell>::deserialize(deserializer)? {
            None => Ok(Decimal::ZERO),
            Some(Cell::Number(n)) => Decimal::from_str(&n.to_string())
                .map_err(|e| D::Error::custom(format!("invalid hours '{}': {}", n, e))),
            Some(Cell::Text(s)) if s.trim().is_empty() => Ok(Decimal::ZERO),
            Some(Cell::Text(s)) => Decimal::from_str(s.trim())
                .map_err(|e| D::Error::custom(format!("invalid hours '{}': {}", s, e))),
        }
    }
}
