//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod hours;
mod pay_summary;
mod punch;
mod rate;
mod report;

pub use audit::AuditStep;
pub use hours::{
    HourBuckets, MINUTES_PER_HOUR, MinuteBuckets, PayrollWeek, ShiftHours, WeeklyBucket,
    minutes_to_hours, round_2dp,
};
pub use pay_summary::PaySummary;
pub use punch::{EmployeeName, Punch, ScheduleKind, floor_to_minute};
pub use rate::{RateEntry, RateTable};
pub use report::{
    EmployeePayroll, HoursRow, PayRow, PayrollReport, Reconciliation, ReportedHours, RosterWarning,
};
