//! Calculation logic for the payroll engine.
//!
//! This module contains the stages of a payroll run, leaf first: minute
//! classification into day and night, shift expansion, the weekly overtime
//! split, pay calculation, reconciliation against the timesheet, and the
//! orchestrating [`run_payroll`].

mod overtime_splitter;
mod pay_calculator;
mod payroll_run;
mod reconciliation;
mod shift_expander;
mod time_classifier;

pub use overtime_splitter::{OvertimeSplitResult, split_overtime};
pub use pay_calculator::{WeeklyPayResult, calculate_pay, pay_for_minutes};
pub use payroll_run::{audit_roster, group_by_employee, group_by_week, run_payroll};
pub use reconciliation::{reconcile, reported_hours};
pub use shift_expander::{expand, expand_employee_shifts, schedule_kind};
pub use time_classifier::{MinuteClassification, classify};
