//! Payroll run orchestration.
//!
//! Validates the inputs up front, then for each employee: expands punches into
//! shifts, groups them by payroll week, splits overtime, prices each week and
//! reconciles the totals against the timesheet. Any input error or broken
//! invariant aborts the whole run so no partial payroll is produced.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{
    EmployeeName, EmployeePayroll, MinuteBuckets, PaySummary, PayrollReport, PayrollWeek, Punch,
    RateEntry, RateTable, RosterWarning, ShiftHours,
};

use super::{calculate_pay, expand_employee_shifts, reconcile, reported_hours, split_overtime};

/// Groups punches by employee, ordered by last then first name.
pub fn group_by_employee(punches: &[Punch]) -> BTreeMap<EmployeeName, Vec<&Punch>> {
    let mut groups: BTreeMap<EmployeeName, Vec<&Punch>> = BTreeMap::new();
    for punch in punches {
        groups.entry(punch.employee()).or_default().push(punch);
    }
    groups
}

/// Groups chronologically ordered shifts by payroll week, keeping their order.
pub fn group_by_week(shifts: Vec<ShiftHours>) -> BTreeMap<PayrollWeek, Vec<ShiftHours>> {
    let mut weeks: BTreeMap<PayrollWeek, Vec<ShiftHours>> = BTreeMap::new();
    for shift in shifts {
        weeks.entry(shift.week()).or_default().push(shift);
    }
    weeks
}

/// Cross-checks the timesheet roster against the rate table.
///
/// Reports employees with punches but no rate, and rates with no punches.
/// Each warning is also logged.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::audit_roster;
/// use payroll_engine::models::{RateEntry, RateTable, RosterWarning};
/// use rust_decimal::Decimal;
///
/// let rates = RateTable::from_entries(vec![RateEntry {
///     last_name: "Doe".to_string(),
///     first_name: "Jane".to_string(),
///     day_rate: Decimal::new(20, 0),
///     night_rate: Decimal::new(22, 0),
/// }]);
///
/// let warnings = audit_roster(&[], &rates);
/// assert!(matches!(warnings[0], RosterWarning::NoPunches { .. }));
/// ```
pub fn audit_roster(punches: &[Punch], rates: &RateTable) -> Vec<RosterWarning> {
    let roster = group_by_employee(punches);
    let mut warnings = Vec::new();

    for employee in roster.keys() {
        if !rates.contains(employee) {
            warnings.push(RosterWarning::MissingRate {
                employee: employee.clone(),
            });
        }
    }
    for employee in rates.employees() {
        if !roster.contains_key(employee) {
            warnings.push(RosterWarning::NoPunches {
                employee: employee.clone(),
            });
        }
    }

    for warning in &warnings {
        warn!(%warning, "Roster mismatch");
    }

    warnings
}

/// Runs payroll for every employee in the timesheet.
///
/// # Errors
///
/// - [`crate::error::EngineError::InvalidPunch`] if any punch has a
///   non-positive duration.
/// - [`crate::error::EngineError::MissingRate`] if any employee with punches
///   has no rate entry.
/// - [`crate::error::EngineError::AssertionViolation`] if an internal
///   invariant breaks.
///
/// All punches and rates are checked before any employee is calculated.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::run_payroll;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{Punch, RateEntry, RateTable};
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punches = vec![Punch {
///     first_name: "Jane".to_string(),
///     last_name: "Doe".to_string(),
///     date: at("2023-04-04 00:00:00").date(),
///     start_time: at("2023-04-04 09:00:00"),
///     end_time: at("2023-04-04 19:00:00"),
///     regular: Decimal::new(10, 0),
///     schedule: "Standard".to_string(),
///     ot: Decimal::ZERO,
/// }];
/// let rates = RateTable::from_entries(vec![RateEntry {
///     last_name: "DOE".to_string(),
///     first_name: "JANE".to_string(),
///     day_rate: Decimal::new(20, 0),
///     night_rate: Decimal::new(22, 0),
/// }]);
///
/// let report = run_payroll(&punches, &rates, &PayrollConfig::default()).unwrap();
/// assert_eq!(report.employees.len(), 1);
/// assert_eq!(report.employees[0].pay.total_pay, Decimal::new(200, 0));
/// assert!(report.employees[0].reconciliation.is_balanced());
/// ```
pub fn run_payroll(
    punches: &[Punch],
    rates: &RateTable,
    config: &PayrollConfig,
) -> EngineResult<PayrollReport> {
    info!(punches = punches.len(), rates = rates.len(), "Starting payroll run");

    for punch in punches {
        punch.validate()?;
    }

    let roster = group_by_employee(punches);
    let mut resolved: Vec<(EmployeeName, Vec<&Punch>, &RateEntry)> = Vec::with_capacity(roster.len());
    for (employee, employee_punches) in roster {
        let rate = rates.get(&employee)?;
        resolved.push((employee, employee_punches, rate));
    }

    let mut employees = Vec::with_capacity(resolved.len());
    for (employee, employee_punches, rate) in resolved {
        employees.push(calculate_employee(employee, &employee_punches, rate, config)?);
    }

    let report = PayrollReport { employees };
    info!(
        employees = report.employees.len(),
        total_pay = %report.total_pay(),
        "Payroll run complete"
    );

    Ok(report)
}

fn calculate_employee(
    employee: EmployeeName,
    punches: &[&Punch],
    rate: &RateEntry,
    config: &PayrollConfig,
) -> EngineResult<EmployeePayroll> {
    let shifts = expand_employee_shifts(punches.iter().copied(), config)?;

    let mut weeks = Vec::new();
    let mut audit_steps = Vec::new();
    let mut pay = PaySummary::default();
    let mut step_number = 1;

    for (week, week_shifts) in group_by_week(shifts) {
        let split = split_overtime(&week_shifts, config, step_number)?;
        audit_steps.push(split.audit_step);
        step_number += 1;

        let priced = calculate_pay(&split.bucket, rate, config, step_number);
        audit_steps.push(priced.audit_step);
        step_number += 1;

        info!(
            employee = %employee,
            week = %week,
            shifts = week_shifts.len(),
            regular_minutes = split.bucket.regular.total(),
            overtime_minutes = split.bucket.overtime.total(),
            total_pay = %priced.pay.total_pay,
            "Processed payroll week"
        );

        pay = pay + priced.pay;
        weeks.push(split.bucket);
    }

    let regular_minutes: MinuteBuckets = weeks.iter().map(|week| week.regular).sum();
    let overtime_minutes: MinuteBuckets = weeks.iter().map(|week| week.overtime).sum();
    let reported = reported_hours(punches.iter().copied());
    let reconciliation = reconcile(&employee, &regular_minutes, &overtime_minutes, &reported);

    Ok(EmployeePayroll {
        employee,
        day_rate: rate.day_rate,
        night_rate: rate.night_rate,
        weeks,
        regular_minutes,
        overtime_minutes,
        pay,
        reported,
        reconciliation,
        audit_steps,
    })
}
