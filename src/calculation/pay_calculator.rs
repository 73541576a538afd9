//! Weekly pay calculation.
//!
//! Converts a [`WeeklyBucket`] into dollars using the employee's day and night
//! rates. Overtime minutes are paid at the overtime multiplier; Paddington
//! minutes add the hourly premium to the base rate before any multiplier, so
//! the premium stacks with overtime.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::PayrollConfig;
use crate::models::{AuditStep, MINUTES_PER_HOUR, PaySummary, RateEntry, WeeklyBucket};

/// The result of pricing one employee-week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyPayResult {
    /// Dollar amounts for the week.
    pub pay: PaySummary,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Pays `minutes` at `hourly_rate`, unrounded.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::pay_for_minutes;
/// use rust_decimal::Decimal;
///
/// assert_eq!(pay_for_minutes(Decimal::new(22, 0), 90), Decimal::new(33, 0));
/// ```
pub fn pay_for_minutes(hourly_rate: Decimal, minutes: i64) -> Decimal {
    hourly_rate * Decimal::from(minutes) / MINUTES_PER_HOUR
}

/// Calculates the pay for one employee-week.
///
/// ```text
/// day pay                = day rate                      * regular day hours
/// night pay              = night rate                    * regular night hours
/// day OT pay             = day rate * multiplier         * overtime day hours
/// night OT pay           = night rate * multiplier       * overtime night hours
/// Paddington day pay     = (day rate + premium)          * regular Paddington day hours
/// Paddington night pay   = (night rate + premium)        * regular Paddington night hours
/// Paddington day OT pay  = (day rate + premium) * mult.  * overtime Paddington day hours
/// Paddington night OT    = (night rate + premium) * mult.* overtime Paddington night hours
/// ```
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_pay;
/// use payroll_engine::config::PayrollConfig;
/// use payroll_engine::models::{
///     EmployeeName, MinuteBuckets, PayrollWeek, RateEntry, ScheduleKind, WeeklyBucket,
/// };
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let bucket = WeeklyBucket {
///     employee: EmployeeName::new("Jane", "Doe"),
///     week: PayrollWeek::containing(NaiveDate::from_ymd_opt(2023, 4, 4).unwrap()),
///     regular: MinuteBuckets::for_schedule(ScheduleKind::Standard, 600, 0),
///     overtime: MinuteBuckets::for_schedule(ScheduleKind::Standard, 0, 120),
/// };
/// let rate = RateEntry {
///     last_name: "DOE".to_string(),
///     first_name: "JANE".to_string(),
///     day_rate: Decimal::new(20, 0),
///     night_rate: Decimal::new(22, 0),
/// };
///
/// let result = calculate_pay(&bucket, &rate, &PayrollConfig::default(), 2);
/// assert_eq!(result.pay.day_pay, Decimal::new(200, 0));
/// assert_eq!(result.pay.night_ot_pay, Decimal::new(66, 0));
/// assert_eq!(result.pay.total_pay, Decimal::new(266, 0));
/// ```
pub fn calculate_pay(
    bucket: &WeeklyBucket,
    rate: &RateEntry,
    config: &PayrollConfig,
    step_number: u32,
) -> WeeklyPayResult {
    let multiplier = config.overtime.multiplier;
    let premium = config.premium_schedule.hourly_premium;

    let day_rate = rate.day_rate;
    let night_rate = rate.night_rate;
    let paddington_day_rate = day_rate + premium;
    let paddington_night_rate = night_rate + premium;

    let regular = &bucket.regular;
    let overtime = &bucket.overtime;

    let pay = PaySummary::new(
        pay_for_minutes(day_rate, regular.day),
        pay_for_minutes(night_rate, regular.night),
        pay_for_minutes(day_rate * multiplier, overtime.day),
        pay_for_minutes(night_rate * multiplier, overtime.night),
        pay_for_minutes(paddington_day_rate, regular.paddington_day),
        pay_for_minutes(paddington_night_rate, regular.paddington_night),
        pay_for_minutes(paddington_day_rate * multiplier, overtime.paddington_day),
        pay_for_minutes(paddington_night_rate * multiplier, overtime.paddington_night),
    );

    debug!(
        employee = %bucket.employee,
        week = %bucket.week,
        regular_pay = %pay.regular_pay,
        overtime_pay = %pay.overtime_pay,
        total_pay = %pay.total_pay,
        "Calculated weekly pay"
    );

    let audit_step = AuditStep {
        step_number,
        rule_id: "weekly_pay".to_string(),
        rule_name: "Weekly Pay Calculation".to_string(),
        input: serde_json::json!({
            "employee": bucket.employee.to_string(),
            "week_starting": bucket.week.starts_on.to_string(),
            "day_rate": day_rate.to_string(),
            "night_rate": night_rate.to_string(),
            "overtime_multiplier": multiplier.to_string(),
            "paddington_premium": premium.to_string(),
            "regular_hours": bucket.regular.to_hours(),
            "overtime_hours": bucket.overtime.to_hours(),
        }),
        output: serde_json::json!({
            "regular_pay": pay.regular_pay.to_string(),
            "overtime_pay": pay.overtime_pay.to_string(),
            "total_pay": pay.total_pay.to_string(),
        }),
        reasoning: format!(
            "{} regular and {} overtime minutes at day ${} / night ${}, overtime x{}, \
             Paddington +${} per hour",
            bucket.regular.total(),
            bucket.overtime.total(),
            day_rate,
            night_rate,
            multiplier,
            premium
        ),
    };

    WeeklyPayResult { pay, audit_step }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EmployeeName, MinuteBuckets, PayrollWeek, ScheduleKind, round_2dp};
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_rate(day: &str, night: &str) -> RateEntry {
        RateEntry {
            last_name: "SMITH".to_string(),
            first_name: "CORRINA".to_string(),
            day_rate: dec(day),
            night_rate: dec(night),
        }
    }

    fn make_bucket(regular: MinuteBuckets, overtime: MinuteBuckets) -> WeeklyBucket {
        WeeklyBucket {
            employee: EmployeeName::new("Corrina", "Smith"),
            week: PayrollWeek::containing(NaiveDate::from_ymd_opt(2023, 4, 4).unwrap()),
            regular,
            overtime,
        }
    }

    // ==========================================================================
    // Scenario: 10 regular day hours and 2 overtime night hours at 20 / 22
    // ==========================================================================
    #[test]
    fn test_day_regular_and_night_overtime_totals_266() {
        let bucket = make_bucket(
            MinuteBuckets::for_schedule(ScheduleKind::Standard, 600, 0),
            MinuteBuckets::for_schedule(ScheduleKind::Standard, 0, 120),
        );
        let result = calculate_pay(&bucket, &make_rate("20", "22"), &PayrollConfig::default(), 1);
        let pay = result.pay;

        assert_eq!(pay.day_pay, dec("200"));
        assert_eq!(pay.night_ot_pay, dec("66"));
        assert_eq!(pay.total_pay, dec("266"));
        assert!(pay.night_pay.is_zero());
        assert!(pay.day_ot_pay.is_zero());
        assert!(pay.paddington_day_pay.is_zero());
        assert!(pay.paddington_night_pay.is_zero());
        assert!(pay.paddington_day_ot_pay.is_zero());
        assert!(pay.paddington_night_ot_pay.is_zero());
    }

    #[test]
    fn test_paddington_premium_stacks_with_overtime() {
        // 1h Paddington day regular, 1h Paddington night overtime
        let bucket = make_bucket(
            MinuteBuckets::for_schedule(ScheduleKind::Paddington, 60, 0),
            MinuteBuckets::for_schedule(ScheduleKind::Paddington, 0, 60),
        );
        let result = calculate_pay(&bucket, &make_rate("20", "22"), &PayrollConfig::default(), 1);

        assert_eq!(result.pay.paddington_day_pay, dec("22"));
        // (22 + 2) * 1.5
        assert_eq!(result.pay.paddington_night_ot_pay, dec("36"));
        assert_eq!(result.pay.regular_pay, dec("22"));
        assert_eq!(result.pay.overtime_pay, dec("36"));
    }

    #[test]
    fn test_all_eight_buckets() {
        let regular = MinuteBuckets {
            day: 60,
            night: 60,
            paddington_day: 60,
            paddington_night: 60,
        };
        let bucket = make_bucket(regular, regular);
        let pay = calculate_pay(&bucket, &make_rate("20", "30"), &PayrollConfig::default(), 1).pay;

        assert_eq!(pay.day_pay, dec("20"));
        assert_eq!(pay.night_pay, dec("30"));
        assert_eq!(pay.day_ot_pay, dec("30"));
        assert_eq!(pay.night_ot_pay, dec("45"));
        assert_eq!(pay.paddington_day_pay, dec("22"));
        assert_eq!(pay.paddington_night_pay, dec("32"));
        assert_eq!(pay.paddington_day_ot_pay, dec("33"));
        assert_eq!(pay.paddington_night_ot_pay, dec("48"));
        assert_eq!(pay.total_pay, dec("260"));
    }

    #[test]
    fn test_fractional_hours_are_not_rounded() {
        // 320 minutes at $20 = 106.666...
        let bucket = make_bucket(
            MinuteBuckets::for_schedule(ScheduleKind::Standard, 320, 0),
            MinuteBuckets::default(),
        );
        let pay = calculate_pay(&bucket, &make_rate("20", "22"), &PayrollConfig::default(), 1).pay;

        assert_eq!(round_2dp(pay.day_pay), dec("106.67"));
        assert_ne!(pay.day_pay, dec("106.67"));
    }

    #[test]
    fn test_configured_multiplier_and_premium() {
        let mut config = PayrollConfig::default();
        config.overtime.multiplier = dec("2");
        config.premium_schedule.hourly_premium = dec("3.50");
        let bucket = make_bucket(
            MinuteBuckets::default(),
            MinuteBuckets::for_schedule(ScheduleKind::Paddington, 120, 0),
        );
        let pay = calculate_pay(&bucket, &make_rate("20", "22"), &config, 1).pay;

        // (20 + 3.50) * 2 * 2h
        assert_eq!(pay.paddington_day_ot_pay, dec("94"));
    }

    #[test]
    fn test_audit_step_records_rates() {
        let bucket = make_bucket(
            MinuteBuckets::for_schedule(ScheduleKind::Standard, 600, 0),
            MinuteBuckets::for_schedule(ScheduleKind::Standard, 0, 120),
        );
        let step = calculate_pay(&bucket, &make_rate("20", "22"), &PayrollConfig::default(), 7)
            .audit_step;

        assert_eq!(step.step_number, 7);
        assert_eq!(step.rule_id, "weekly_pay");
        assert_eq!(step.input["day_rate"], "20");
        assert_eq!(step.input["overtime_multiplier"], "1.5");
        assert_eq!(dec(step.output["total_pay"].as_str().unwrap()), dec("266"));
    }
}
