//! Reconciliation against the timesheet's own totals.
//!
//! The timesheet software reports `Regular` and `OT` hours per punch. Summed
//! per employee they are compared with the computed hours; differences are
//! reported for review and never stop a run.

use tracing::{debug, info};

use crate::models::{
    EmployeeName, MinuteBuckets, Punch, Reconciliation, ReportedHours, minutes_to_hours, round_2dp,
};

/// Sums the reported `Regular` and `OT` columns over an employee's punches.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::reported_hours;
/// use payroll_engine::models::Punch;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = |regular: i64, ot: i64| Punch {
///     first_name: "Jane".to_string(),
///     last_name: "Doe".to_string(),
///     date: at("2023-04-04 00:00:00").date(),
///     start_time: at("2023-04-04 09:00:00"),
///     end_time: at("2023-04-04 17:00:00"),
///     regular: Decimal::new(regular, 1),
///     schedule: "Standard".to_string(),
///     ot: Decimal::new(ot, 1),
/// };
///
/// let reported = reported_hours(&[punch(80, 0), punch(75, 5)]);
/// assert_eq!(reported.regular, Decimal::new(155, 1));
/// assert_eq!(reported.ot, Decimal::new(5, 1));
/// ```
pub fn reported_hours<'a, I>(punches: I) -> ReportedHours
where
    I: IntoIterator<Item = &'a Punch>,
{
    punches
        .into_iter()
        .fold(ReportedHours::default(), |acc, punch| ReportedHours {
            regular: acc.regular + punch.regular,
            ot: acc.ot + punch.ot,
        })
}

/// Compares computed hours with the timesheet's reported hours.
///
/// Each difference is computed minus reported on unrounded hours, then
/// rounded to two decimals.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::reconcile;
/// use payroll_engine::models::{EmployeeName, MinuteBuckets, ReportedHours, ScheduleKind};
/// use rust_decimal::Decimal;
///
/// let regular = MinuteBuckets::for_schedule(ScheduleKind::Standard, 320, 0);
/// let reported = ReportedHours { regular: Decimal::new(533, 2), ot: Decimal::ZERO };
/// let result = reconcile(
///     &EmployeeName::new("Jane", "Doe"),
///     &regular,
///     &MinuteBuckets::default(),
///     &reported,
/// );
///
/// assert!(result.diff_regular.is_zero());
/// assert!(result.diff_total.is_zero());
/// ```
pub fn reconcile(
    employee: &EmployeeName,
    regular: &MinuteBuckets,
    overtime: &MinuteBuckets,
    reported: &ReportedHours,
) -> Reconciliation {
    let computed_regular = minutes_to_hours(regular.total());
    let computed_ot = minutes_to_hours(overtime.total());
    let computed_total = minutes_to_hours(regular.total() + overtime.total());

    let reconciliation = Reconciliation {
        diff_regular: round_2dp(computed_regular - reported.regular),
        diff_ot: round_2dp(computed_ot - reported.ot),
        diff_total: round_2dp(computed_total - reported.total()),
    };

    if reconciliation.is_balanced() {
        debug!(employee = %employee, "Hours reconcile with timesheet");
    } else {
        info!(
            employee = %employee,
            diff_regular = %reconciliation.diff_regular,
            diff_ot = %reconciliation.diff_ot,
            diff_total = %reconciliation.diff_total,
            "Hours differ from timesheet"
        );
    }

    reconciliation
}
