//! Weekly overtime splitting.
//!
//! Shifts for one employee-week are walked in chronological order while the
//! cumulative minute count is tracked. Minutes before the weekly threshold are
//! regular; minutes from the threshold onward are overtime. A shift that
//! straddles the threshold is cut at the exact boundary minute and both parts
//! are reclassified through the time classifier, so the day/night mix of each
//! part is exact rather than pro-rated.

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, MinuteBuckets, ShiftHours, WeeklyBucket, minutes_to_hours};

use super::classify;

/// The result of splitting one employee-week into regular and overtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OvertimeSplitResult {
    /// The regular / overtime buckets for the week.
    pub bucket: WeeklyBucket,
    /// Index of the shift that crossed the threshold, if one did.
    pub straddling_shift: Option<usize>,
    /// The audit step recording this split.
    pub audit_step: AuditStep,
}

/// Splits one employee-week's shifts into regular and overtime buckets.
///
/// `shifts` must belong to a single employee and payroll week and be sorted
/// chronologically, as produced by
/// [`expand_employee_shifts`](super::expand_employee_shifts).
///
/// # Errors
///
/// Returns [`EngineError::AssertionViolation`] if the shifts are empty, mix
/// employees or weeks, or if the resulting regular hours exceed the weekly
/// threshold by more than the configured tolerance.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::{expand_employee_shifts, split_overtime};
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::Punch;
/// use chrono::NaiveDateTime;
/// use rust_decimal::Decimal;
///
/// let at = |s: &str| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap();
/// let punch = |start: &str, end: &str| Punch {
///     first_name: "Jane".to_string(),
///     last_name: "Doe".to_string(),
///     date: at(start).date(),
///     start_time: at(start),
///     end_time: at(end),
///     regular: Decimal::ZERO,
///     schedule: "Standard".to_string(),
///     ot: Decimal::ZERO,
/// };
///
/// // 40 hours straight, then one more hour later in the week
/// let punches = vec![
///     punch("2023-04-03 00:00:00", "2023-04-04 16:00:00"),
///     punch("2023-04-06 09:00:00", "2023-04-06 10:00:00"),
/// ];
/// let config = PayrollConfig::default();
/// let shifts = expand_employee_shifts(&punches, &config).unwrap();
/// let result = split_overtime(&shifts, &config, 1).unwrap();
///
/// assert_eq!(result.bucket.regular.total(), 2400);
/// assert_eq!(result.bucket.overtime.total(), 60);
/// ```
pub fn split_overtime(
    shifts: &[ShiftHours],
    config: &PayrollConfig,
    step_number: u32,
) -> EngineResult<OvertimeSplitResult> {
    let first = shifts.first().ok_or_else(|| EngineError::AssertionViolation {
        message: "overtime split requested for a week with no shifts".to_string(),
    })?;
    let employee = first.employee.clone();
    let week = first.week();

    if let Some(stray) = shifts
        .iter()
        .find(|shift| shift.employee != employee || shift.week() != week)
    {
        return Err(EngineError::AssertionViolation {
            message: format!(
                "shift {} of {} ({}) does not belong to {} {}",
                stray.shift_index,
                stray.employee,
                stray.week(),
                employee,
                week
            ),
        });
    }

    let threshold = config.overtime.weekly_threshold_minutes();
    let mut regular = MinuteBuckets::default();
    let mut overtime = MinuteBuckets::default();
    let mut cumulative: i64 = 0;
    let mut straddling_shift = None;

    for shift in shifts {
        let total = shift.total_minutes();
        let remaining = (threshold - cumulative).max(0);

        if remaining >= total {
            regular += shift.minutes;
        } else if remaining == 0 {
            overtime += shift.minutes;
        } else {
            // The threshold falls inside this shift.
            let boundary = shift.start_time + Duration::minutes(remaining);
            let before = classify(shift.start_time, boundary, &config.day_window)?;
            let after = classify(boundary, shift.end_time, &config.day_window)?;

            if before.total_minutes + after.total_minutes != total {
                return Err(EngineError::AssertionViolation {
                    message: format!(
                        "shift {} of {} split into {} + {} minutes but spans {}",
                        shift.shift_index,
                        employee,
                        before.total_minutes,
                        after.total_minutes,
                        total
                    ),
                });
            }

            regular += MinuteBuckets::for_schedule(
                shift.schedule,
                before.day_minutes,
                before.night_minutes(),
            );
            overtime += MinuteBuckets::for_schedule(
                shift.schedule,
                after.day_minutes,
                after.night_minutes(),
            );
            straddling_shift = Some(shift.shift_index);

            debug!(
                employee = %employee,
                week = %week,
                shift_index = shift.shift_index,
                %boundary,
                regular_minutes = before.total_minutes,
                overtime_minutes = after.total_minutes,
                "Shift straddles weekly overtime threshold"
            );
        }

        cumulative += total;
    }

    let regular_hours = minutes_to_hours(regular.total());
    let limit = minutes_to_hours(threshold) + config.overtime.regular_hours_tolerance;
    if regular_hours > limit {
        return Err(EngineError::AssertionViolation {
            message: format!(
                "{} has {} regular hours in {}, above the {} hour limit",
                employee, regular_hours, week, limit
            ),
        });
    }
    if regular.total() + overtime.total() != cumulative {
        return Err(EngineError::AssertionViolation {
            message: format!(
                "{} in {}: {} regular + {} overtime minutes does not equal {} worked",
                employee,
                week,
                regular.total(),
                overtime.total(),
                cumulative
            ),
        });
    }

    let overtime_hours = minutes_to_hours(overtime.total());
    let reasoning = match straddling_shift {
        Some(index) => format!(
            "{} minutes worked exceeds the {} minute threshold; shift {} crosses the threshold \
             and was reclassified on each side; {} minutes are overtime",
            cumulative,
            threshold,
            index,
            overtime.total()
        ),
        None if overtime.total() > 0 => format!(
            "{} minutes worked exceeds the {} minute threshold; the threshold falls between \
             shifts; {} minutes are overtime",
            cumulative,
            threshold,
            overtime.total()
        ),
        None => format!(
            "{} minutes worked is within the {} minute threshold; no overtime",
            cumulative, threshold
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_overtime_split".to_string(),
        rule_name: "Weekly Overtime Split".to_string(),
        input: serde_json::json!({
            "employee": employee.to_string(),
            "week_starting": week.starts_on.to_string(),
            "week_number": week.number,
            "shift_count": shifts.len(),
            "worked_minutes": cumulative,
            "threshold_minutes": threshold,
        }),
        output: serde_json::json!({
            "regular": regular,
            "overtime": overtime,
            "regular_hours": regular_hours.to_string(),
            "overtime_hours": overtime_hours.to_string(),
            "straddling_shift": straddling_shift,
        }),
        reasoning,
    };

    Ok(OvertimeSplitResult {
        bucket: WeeklyBucket {
            employee,
            week,
            regular,
            overtime,
        },
        straddling_shift,
        audit_step,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::expand_employee_shifts;
    use crate::models::Punch;
    use chrono::NaiveDateTime;
    use proptest::prelude::*;
    use rust_decimal::Decimal;

    fn make_datetime(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn make_punch(start: NaiveDateTime, end: NaiveDateTime, schedule: &str) -> Punch {
        Punch {
            first_name: "Janell".to_string(),
            last_name: "Brown".to_string(),
            date: start.date(),
            start_time: start,
            end_time: end,
            regular: Decimal::ZERO,
            schedule: schedule.to_string(),
            ot: Decimal::ZERO,
        }
    }

    fn punch(start: &str, end: &str, schedule: &str) -> Punch {
        make_punch(make_datetime(start), make_datetime(end), schedule)
    }

    fn split(punches: &[Punch]) -> OvertimeSplitResult {
        let config = PayrollConfig::default();
        let shifts = expand_employee_shifts(punches, &config).unwrap();
        split_overtime(&shifts, &config, 1).unwrap()
    }

    /// Monday to Thursday 09:00-17:00, 1920 day minutes in the week of 2 April 2023.
    fn four_day_shifts() -> Vec<Punch> {
        (3..=6)
            .map(|day| {
                punch(
                    &format!("2023-04-0{} 09:00:00", day),
                    &format!("2023-04-0{} 17:00:00", day),
                    "Standard",
                )
            })
            .collect()
    }

    // ==========================================================================
    // Scenario: 2460 minutes in two shifts, the last 60 minutes are overtime
    // ==========================================================================
    #[test]
    fn test_two_shifts_2460_minutes_last_hour_is_overtime() {
        let result = split(&[
            punch("2023-04-03 00:00:00", "2023-04-04 16:00:00", "Standard"),
            punch("2023-04-06 09:00:00", "2023-04-06 10:00:00", "Standard"),
        ]);

        assert_eq!(result.bucket.regular.total(), 2400);
        assert_eq!(result.bucket.overtime.total(), 60);
        assert_eq!(result.bucket.overtime.day, 60);
        assert_eq!(minutes_to_hours(result.bucket.regular.total()), Decimal::new(40, 0));
        assert_eq!(minutes_to_hours(result.bucket.overtime.total()), Decimal::new(1, 0));
        assert_eq!(result.straddling_shift, None);
    }

    #[test]
    fn test_under_threshold_has_no_overtime() {
        let result = split(&four_day_shifts());

        assert_eq!(result.bucket.regular.day, 1920);
        assert_eq!(result.bucket.overtime, MinuteBuckets::default());
        assert!(result.audit_step.reasoning.contains("no overtime"));
    }

    #[test]
    fn test_exactly_at_threshold_has_no_overtime() {
        let mut punches = four_day_shifts();
        punches.push(punch("2023-04-07 09:00:00", "2023-04-07 17:00:00", "Standard"));
        let result = split(&punches);

        assert_eq!(result.bucket.regular.total(), 2400);
        assert_eq!(result.bucket.overtime.total(), 0);
    }

    #[test]
    fn test_straddling_shift_reclassified_not_prorated() {
        // Friday 14:00-23:00: the threshold falls at 22:00, so the 480 regular
        // minutes are all day and the 60 overtime minutes are all night.
        let mut punches = four_day_shifts();
        punches.push(punch("2023-04-07 14:00:00", "2023-04-07 23:00:00", "Standard"));
        let result = split(&punches);

        assert_eq!(result.bucket.regular.day, 2400);
        assert_eq!(result.bucket.regular.night, 0);
        assert_eq!(result.bucket.overtime.day, 0);
        assert_eq!(result.bucket.overtime.night, 60);
        assert_eq!(result.straddling_shift, Some(4));
    }

    #[test]
    fn test_straddling_shift_boundary_inside_day_window() {
        // Friday 12:00-23:00: threshold at 20:00, overtime is 120 day + 60 night.
        let mut punches = four_day_shifts();
        punches.push(punch("2023-04-07 12:00:00", "2023-04-07 23:00:00", "Standard"));
        let result = split(&punches);

        assert_eq!(result.bucket.regular.day, 2400);
        assert_eq!(result.bucket.overtime.day, 120);
        assert_eq!(result.bucket.overtime.night, 60);
    }

    #[test]
    fn test_straddling_paddington_shift_stays_paddington() {
        let mut punches = four_day_shifts();
        punches.push(punch("2023-04-07 14:00:00", "2023-04-08 01:00:00", "Paddington"));
        let result = split(&punches);

        assert_eq!(result.bucket.regular.day, 1920);
        assert_eq!(result.bucket.regular.paddington_day, 480);
        assert_eq!(result.bucket.overtime.paddington_night, 180);
        assert_eq!(result.bucket.overtime.night, 0);
        assert_eq!(result.bucket.overtime.day, 0);
    }

    #[test]
    fn test_shifts_after_threshold_are_all_overtime() {
        let mut punches = four_day_shifts();
        punches.push(punch("2023-04-07 09:00:00", "2023-04-07 17:00:00", "Standard"));
        punches.push(punch("2023-04-08 22:00:00", "2023-04-08 23:30:00", "Paddington"));
        let result = split(&punches);

        assert_eq!(result.bucket.regular.total(), 2400);
        assert_eq!(result.bucket.overtime.paddington_night, 90);
        assert_eq!(result.straddling_shift, None);
    }

    #[test]
    fn test_overtime_follows_chronological_order_not_input_order() {
        // The late night shift is listed first but worked last.
        let mut punches = vec![punch("2023-04-08 22:00:00", "2023-04-08 23:00:00", "Standard")];
        punches.extend(four_day_shifts());
        punches.push(punch("2023-04-07 09:00:00", "2023-04-07 17:00:00", "Standard"));
        let result = split(&punches);

        assert_eq!(result.bucket.regular.day, 2400);
        assert_eq!(result.bucket.overtime.night, 60);
    }

    #[test]
    fn test_audit_step_records_split() {
        let mut punches = four_day_shifts();
        punches.push(punch("2023-04-07 14:00:00", "2023-04-07 23:00:00", "Standard"));
        let result = split(&punches);
        let step = &result.audit_step;

        assert_eq!(step.step_number, 1);
        assert_eq!(step.rule_id, "weekly_overtime_split");
        assert_eq!(step.input["worked_minutes"], 2460);
        assert_eq!(step.input["threshold_minutes"], 2400);
        assert_eq!(step.input["week_starting"], "2023-04-02");
        assert_eq!(step.output["overtime"]["night"], 60);
        assert_eq!(step.output["straddling_shift"], 4);
        assert!(step.reasoning.contains("crosses the threshold"));
    }

    #[test]
    fn test_custom_threshold() {
        let mut config = PayrollConfig::default();
        config.overtime.weekly_threshold_hours = 30;
        let shifts = expand_employee_shifts(&four_day_shifts(), &config).unwrap();
        let result = split_overtime(&shifts, &config, 1).unwrap();

        assert_eq!(result.bucket.regular.total(), 1800);
        assert_eq!(result.bucket.overtime.total(), 120);
    }

    #[test]
    fn test_empty_week_is_assertion_violation() {
        match split_overtime(&[], &PayrollConfig::default(), 1) {
            Err(EngineError::AssertionViolation { .. }) => {}
            other => panic!("Expected AssertionViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_mixed_weeks_are_assertion_violation() {
        let config = PayrollConfig::default();
        let shifts = expand_employee_shifts(
            &[
                punch("2023-04-03 09:00:00", "2023-04-03 17:00:00", "Standard"),
                punch("2023-04-10 09:00:00", "2023-04-10 17:00:00", "Standard"),
            ],
            &config,
        )
        .unwrap();

        assert!(matches!(
            split_overtime(&shifts, &config, 1),
            Err(EngineError::AssertionViolation { .. })
        ));
    }

    fn week_of_shifts() -> impl Strategy<Value = Vec<(i64, i64, bool)>> {
        // (gap before shift, shift length, paddington); at most 8 * 1200
        // minutes so every shift starts inside one Sunday-Saturday week.
        prop::collection::vec((0i64..240, 1i64..960, any::<bool>()), 1..8)
    }

    fn build_punches(layout: &[(i64, i64, bool)]) -> Vec<Punch> {
        let mut cursor = make_datetime("2023-04-02 00:00:00");
        layout
            .iter()
            .map(|&(gap, length, paddington)| {
                let start = cursor + Duration::minutes(gap);
                let end = start + Duration::minutes(length);
                cursor = end;
                let schedule = if paddington { "Paddington" } else { "Standard" };
                make_punch(start, end, schedule)
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_regular_never_exceeds_threshold(layout in week_of_shifts()) {
            let result = split(&build_punches(&layout));
            prop_assert!(result.bucket.regular.total() <= 2400);
        }

        #[test]
        fn prop_regular_plus_overtime_is_total(layout in week_of_shifts()) {
            let worked: i64 = layout.iter().map(|&(_, length, _)| length).sum();
            let result = split(&build_punches(&layout));
            prop_assert_eq!(result.bucket.total_minutes(), worked);

            if worked <= 2400 {
                prop_assert_eq!(result.bucket.overtime.total(), 0);
            } else {
                prop_assert_eq!(result.bucket.regular.total(), 2400);
                prop_assert_eq!(result.bucket.overtime.total(), worked - 2400);
            }
        }
    }
}
