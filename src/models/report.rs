//! Payroll report models.
//!
//! An [`EmployeePayroll`] is the complete result for one employee: weekly
//! buckets, hour totals, pay, reconciliation against the timesheet and the
//! audit trail. A [`PayrollReport`] collects them and renders the two output
//! tables ([`HoursRow`], [`PayRow`]).

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditStep, EmployeeName, HourBuckets, MinuteBuckets, PaySummary, WeeklyBucket, round_2dp};

/// Hour totals the timesheet software reported for an employee.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedHours {
    /// Sum of the `Regular` column.
    pub regular: Decimal,
    /// Sum of the `OT` column.
    pub ot: Decimal,
}

impl ReportedHours {
    /// Reported regular plus overtime hours.
    pub fn total(&self) -> Decimal {
        self.regular + self.ot
    }
}

/// Computed minus reported hours, rounded to two decimals.
///
/// Positive values mean the engine found more hours than the timesheet
/// reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    /// Regular hours difference.
    pub diff_regular: Decimal,
    /// Overtime hours difference.
    pub diff_ot: Decimal,
    /// Total hours difference.
    pub diff_total: Decimal,
}

impl Reconciliation {
    /// Returns true when all three differences are zero.
    pub fn is_balanced(&self) -> bool {
        self.diff_regular.is_zero() && self.diff_ot.is_zero() && self.diff_total.is_zero()
    }
}

/// The full payroll result for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayroll {
    /// The employee.
    pub employee: EmployeeName,
    /// Day rate applied.
    pub day_rate: Decimal,
    /// Night rate applied.
    pub night_rate: Decimal,
    /// One bucket per payroll week worked, in week order.
    pub weeks: Vec<WeeklyBucket>,
    /// Regular minutes summed across weeks.
    pub regular_minutes: MinuteBuckets,
    /// Overtime minutes summed across weeks.
    pub overtime_minutes: MinuteBuckets,
    /// Pay summed across weeks.
    pub pay: PaySummary,
    /// Totals the timesheet reported.
    pub reported: ReportedHours,
    /// Computed versus reported hours.
    pub reconciliation: Reconciliation,
    /// Ordered record of every overtime split and pay calculation.
    pub audit_steps: Vec<AuditStep>,
}

impl EmployeePayroll {
    /// Unrounded regular hours per category.
    pub fn regular_hours(&self) -> HourBuckets {
        self.regular_minutes.to_hours()
    }

    /// Unrounded overtime hours per category.
    pub fn overtime_hours(&self) -> HourBuckets {
        self.overtime_minutes.to_hours()
    }

    /// Unrounded total regular hours.
    pub fn total_regular_hours(&self) -> Decimal {
        self.regular_hours().total()
    }

    /// Unrounded total overtime hours.
    pub fn total_overtime_hours(&self) -> Decimal {
        self.overtime_hours().total()
    }

    /// Unrounded total hours worked.
    pub fn total_hours(&self) -> Decimal {
        (self.regular_minutes + self.overtime_minutes).to_hours().total()
    }
}

/// Non-fatal mismatch between the timesheet and the rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RosterWarning {
    /// The employee has punches but no rate entry.
    MissingRate {
        /// The employee.
        employee: EmployeeName,
    },
    /// The employee has a rate entry but no punches.
    NoPunches {
        /// The employee.
        employee: EmployeeName,
    },
}

impl fmt::Display for RosterWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterWarning::MissingRate { employee } => {
                write!(f, "{} has punches but no pay rate", employee)
            }
            RosterWarning::NoPunches { employee } => {
                write!(f, "{} has a pay rate but no punches", employee)
            }
        }
    }
}

/// The result of a payroll run, one entry per employee in name order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayrollReport {
    /// Per-employee results ordered by last then first name.
    pub employees: Vec<EmployeePayroll>,
}

impl PayrollReport {
    /// Renders the hours table.
    pub fn hours_table(&self) -> Vec<HoursRow> {
        self.employees.iter().map(HoursRow::from).collect()
    }

    /// Renders the pay table.
    pub fn pay_table(&self) -> Vec<PayRow> {
        self.employees.iter().map(PayRow::from).collect()
    }

    /// Grand total pay across all employees.
    pub fn total_pay(&self) -> Decimal {
        self.employees.iter().map(|e| e.pay.total_pay).sum()
    }
}

/// One row of the hours table. Hour values are rounded to two decimals.
///
/// Fields serialize under the output column headers, in column order.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoursRow {
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Day")]
    pub day: Decimal,
    #[serde(rename = "Night")]
    pub night: Decimal,
    #[serde(rename = "Paddington Night")]
    pub paddington_night: Decimal,
    #[serde(rename = "Night_OT")]
    pub night_ot: Decimal,
    #[serde(rename = "Paddington Night_OT")]
    pub paddington_night_ot: Decimal,
    #[serde(rename = "Day_OT")]
    pub day_ot: Decimal,
    #[serde(rename = "Paddington Day_OT")]
    pub paddington_day_ot: Decimal,
    #[serde(rename = "Paddington Day")]
    pub paddington_day: Decimal,
    #[serde(rename = "Total OT")]
    pub total_ot: Decimal,
    #[serde(rename = "Total Hours")]
    pub total_hours: Decimal,
    #[serde(rename = "Diff Regular")]
    pub diff_regular: Decimal,
    #[serde(rename = "Diff OT")]
    pub diff_ot: Decimal,
    #[serde(rename = "Diff Total")]
    pub diff_total: Decimal,
}

impl From<&EmployeePayroll> for HoursRow {
    fn from(payroll: &EmployeePayroll) -> Self {
        let regular = payroll.regular_hours();
        let overtime = payroll.overtime_hours();

        Self {
            last_name: payroll.employee.last_name.clone(),
            first_name: payroll.employee.first_name.clone(),
            day: round_2dp(regular.day),
            night: round_2dp(regular.night),
            paddington_night: round_2dp(regular.paddington_night),
            night_ot: round_2dp(overtime.night),
            paddington_night_ot: round_2dp(overtime.paddington_night),
            day_ot: round_2dp(overtime.day),
            paddington_day_ot: round_2dp(overtime.paddington_day),
            paddington_day: round_2dp(regular.paddington_day),
            total_ot: round_2dp(overtime.total()),
            total_hours: round_2dp(payroll.total_hours()),
            diff_regular: payroll.reconciliation.diff_regular,
            diff_ot: payroll.reconciliation.diff_ot,
            diff_total: payroll.reconciliation.diff_total,
        }
    }
}

/// One row of the pay table. Dollar values are rounded to cents.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRow {
    #[serde(rename = "Last Name")]
    pub last_name: String,
    #[serde(rename = "First Name")]
    pub first_name: String,
    #[serde(rename = "Day Pay")]
    pub day_pay: Decimal,
    #[serde(rename = "Night Pay")]
    pub night_pay: Decimal,
    #[serde(rename = "Paddington Night Pay")]
    pub paddington_night_pay: Decimal,
    #[serde(rename = "Night_OT Pay")]
    pub night_ot_pay: Decimal,
    #[serde(rename = "Paddington Night_OT Pay")]
    pub paddington_night_ot_pay: Decimal,
    #[serde(rename = "Day_OT Pay")]
    pub day_ot_pay: Decimal,
    #[serde(rename = "Paddington Day_OT Pay")]
    pub paddington_day_ot_pay: Decimal,
    #[serde(rename = "Paddington Day Pay")]
    pub paddington_day_pay: Decimal,
    #[serde(rename = "Pay")]
    pub pay: Decimal,
    #[serde(rename = "Pay_OT")]
    pub pay_ot: Decimal,
    #[serde(rename = "Total Pay")]
    pub total_pay: Decimal,
}

impl From<&EmployeePayroll> for PayRow {
    fn from(payroll: &EmployeePayroll) -> Self {
        let pay = &payroll.pay;

        Self {
            last_name: payroll.employee.last_name.clone(),
            first_name: payroll.employee.first_name.clone(),
            day_pay: round_2dp(pay.day_pay),
            night_pay: round_2dp(pay.night_pay),
            paddington_night_pay: round_2dp(pay.paddington_night_pay),
            night_ot_pay: round_2dp(pay.night_ot_pay),
            paddington_night_ot_pay: round_2dp(pay.paddington_night_ot_pay),
            day_ot_pay: round_2dp(pay.day_ot_pay),
            paddington_day_ot_pay: round_2dp(pay.paddington_day_ot_pay),
            paddington_day_pay: round_2dp(pay.paddington_day_pay),
            pay: round_2dp(pay.regular_pay),
            pay_ot: round_2dp(pay.overtime_pay),
            total_pay: round_2dp(pay.total_pay),
        }
    }
}
