//! Pay summary model.
//!
//! A [`PaySummary`] holds the dollar amount for each of the eight hour
//! buckets plus the regular, overtime and grand totals. Totals are always
//! derived from the eight bucket amounts, never accumulated separately.

use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Dollar amounts for one employee-week, or summed across weeks.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PaySummary;
/// use rust_decimal::Decimal;
///
/// let summary = PaySummary::new(
///     Decimal::new(200, 0), // day
///     Decimal::ZERO,        // night
///     Decimal::ZERO,        // day OT
///     Decimal::new(66, 0),  // night OT
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::ZERO,
///     Decimal::ZERO,
/// );
/// assert_eq!(summary.regular_pay, Decimal::new(200, 0));
/// assert_eq!(summary.overtime_pay, Decimal::new(66, 0));
/// assert_eq!(summary.total_pay, Decimal::new(266, 0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaySummary {
    /// Regular standard day pay.
    pub day_pay: Decimal,
    /// Regular standard night pay.
    pub night_pay: Decimal,
    /// Overtime standard day pay.
    pub day_ot_pay: Decimal,
    /// Overtime standard night pay.
    pub night_ot_pay: Decimal,
    /// Regular Paddington day pay.
    pub paddington_day_pay: Decimal,
    /// Regular Paddington night pay.
    pub paddington_night_pay: Decimal,
    /// Overtime Paddington day pay.
    pub paddington_day_ot_pay: Decimal,
    /// Overtime Paddington night pay.
    pub paddington_night_ot_pay: Decimal,
    /// Sum of the four regular amounts.
    pub regular_pay: Decimal,
    /// Sum of the four overtime amounts.
    pub overtime_pay: Decimal,
    /// Sum of all eight amounts.
    pub total_pay: Decimal,
}

impl PaySummary {
    /// Builds a summary from the eight bucket amounts, deriving the totals.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        day_pay: Decimal,
        night_pay: Decimal,
        day_ot_pay: Decimal,
        night_ot_pay: Decimal,
        paddington_day_pay: Decimal,
        paddington_night_pay: Decimal,
        paddington_day_ot_pay: Decimal,
        paddington_night_ot_pay: Decimal,
    ) -> Self {
        let regular_pay = day_pay + night_pay + paddington_day_pay + paddington_night_pay;
        let overtime_pay = day_ot_pay + night_ot_pay + paddington_day_ot_pay + paddington_night_ot_pay;
        let total_pay = day_pay
            + night_pay
            + day_ot_pay
            + night_ot_pay
            + paddington_day_pay
            + paddington_night_pay
            + paddington_day_ot_pay
            + paddington_night_ot_pay;

        Self {
            day_pay,
            night_pay,
            day_ot_pay,
            night_ot_pay,
            paddington_day_pay,
            paddington_night_pay,
            paddington_day_ot_pay,
            paddington_night_ot_pay,
            regular_pay,
            overtime_pay,
            total_pay,
        }
    }
}

impl Add for PaySummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.day_pay + rhs.day_pay,
            self.night_pay + rhs.night_pay,
            self.day_ot_pay + rhs.day_ot_pay,
            self.night_ot_pay + rhs.night_ot_pay,
            self.paddington_day_pay + rhs.paddington_day_pay,
            self.paddington_night_pay + rhs.paddington_night_pay,
            self.paddington_day_ot_pay + rhs.paddington_day_ot_pay,
            self.paddington_night_ot_pay + rhs.paddington_night_ot_pay,
        )
    }
}

impl Sum for PaySummary {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample(scale: &str) -> PaySummary {
        let k = dec(scale);
        PaySummary::new(
            dec("1.10") * k,
            dec("2.20") * k,
            dec("3.30") * k,
            dec("4.40") * k,
            dec("5.50") * k,
            dec("6.60") * k,
            dec("7.70") * k,
            dec("8.80") * k,
        )
    }

    #[test]
    fn test_totals_derived_from_buckets() {
        let summary = sample("1");
        assert_eq!(summary.regular_pay, dec("15.40"));
        assert_eq!(summary.overtime_pay, dec("24.20"));
        assert_eq!(summary.total_pay, dec("39.60"));
    }

    #[test]
    fn test_default_is_all_zero() {
        let summary = PaySummary::default();
        assert!(summary.total_pay.is_zero());
        assert!(summary.regular_pay.is_zero());
        assert!(summary.overtime_pay.is_zero());
    }

    #[test]
    fn test_sum_across_weeks() {
        let total: PaySummary = vec![sample("1"), sample("2")].into_iter().sum();
        assert_eq!(total.day_pay, dec("3.30"));
        assert_eq!(total.paddington_night_ot_pay, dec("26.40"));
        assert_eq!(total.total_pay, dec("118.80"));
    }

    #[test]
    fn test_total_equals_sum_of_eight_after_summing_inexact_amounts() {
        let third = dec("20") / dec("3");
        let week = PaySummary::new(
            third,
            third * dec("7"),
            Decimal::ZERO,
            third / dec("11"),
            Decimal::ZERO,
            Decimal::ZERO,
            third * dec("13"),
            Decimal::ZERO,
        );
        let total: PaySummary = vec![week, week, week].into_iter().sum();
        let eight = total.day_pay
            + total.night_pay
            + total.day_ot_pay
            + total.night_ot_pay
            + total.paddington_day_pay
            + total.paddington_night_pay
            + total.paddington_day_ot_pay
            + total.paddington_night_ot_pay;
        assert_eq!(total.total_pay, eight);
    }
}
