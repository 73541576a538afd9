//! Pay rate models.
//!
//! This module defines [`RateEntry`], one row of the pay rate table, and
//! [`RateTable`], the per-employee lookup built from those rows.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::EmployeeName;

/// One row of the pay rate table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Employee last name.
    #[serde(rename = "LAST", alias = "last_name")]
    pub last_name: String,
    /// Employee first name.
    #[serde(rename = "FIRST", alias = "first_name")]
    pub first_name: String,
    /// Hourly rate for minutes inside the day window.
    #[serde(rename = "Day Rate", alias = "day_rate")]
    pub day_rate: Decimal,
    /// Hourly rate for minutes outside the day window.
    #[serde(rename = "Night Rate", alias = "night_rate")]
    pub night_rate: Decimal,
}

impl RateEntry {
    /// Returns the normalized employee identity for this entry.
    pub fn employee(&self) -> EmployeeName {
        EmployeeName::new(&self.first_name, &self.last_name)
    }
}

/// Per-employee rate lookup.
///
/// Duplicate rows for the same employee are resolved by taking the maximum
/// day rate and the maximum night rate independently, so the result never
/// depends on row order.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{EmployeeName, RateEntry, RateTable};
/// use rust_decimal::Decimal;
///
/// let table = RateTable::from_entries(vec![
///     RateEntry {
///         last_name: "Doe".to_string(),
///         first_name: "Jane".to_string(),
///         day_rate: Decimal::new(20, 0),
///         night_rate: Decimal::new(25, 0),
///     },
///     RateEntry {
///         last_name: "DOE".to_string(),
///         first_name: "JANE".to_string(),
///         day_rate: Decimal::new(21, 0),
///         night_rate: Decimal::new(22, 0),
///     },
/// ]);
///
/// let rate = table.get(&EmployeeName::new("jane", "doe")).unwrap();
/// assert_eq!(rate.day_rate, Decimal::new(21, 0));
/// assert_eq!(rate.night_rate, Decimal::new(25, 0));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable {
    rates: BTreeMap<EmployeeName, RateEntry>,
}

impl RateTable {
    /// Builds the lookup from raw rate rows, resolving duplicates by max.
    pub fn from_entries(entries: impl IntoIterator<Item = RateEntry>) -> Self {
        let mut rates: BTreeMap<EmployeeName, RateEntry> = BTreeMap::new();

        for entry in entries {
            let key = entry.employee();
            rates
                .entry(key.clone())
                .and_modify(|existing| {
                    existing.day_rate = existing.day_rate.max(entry.day_rate);
                    existing.night_rate = existing.night_rate.max(entry.night_rate);
                })
                .or_insert_with(|| RateEntry {
                    last_name: key.last_name,
                    first_name: key.first_name,
                    day_rate: entry.day_rate,
                    night_rate: entry.night_rate,
                });
        }

        Self { rates }
    }

    /// Looks up the rate for an employee.
    ///
    /// Fails with [`EngineError::MissingRate`] rather than defaulting to zero.
    pub fn get(&self, employee: &EmployeeName) -> EngineResult<&RateEntry> {
        self.rates
            .get(employee)
            .ok_or_else(|| EngineError::MissingRate {
                employee: employee.to_string(),
            })
    }

    /// Returns true if the table has a rate for the employee.
    pub fn contains(&self, employee: &EmployeeName) -> bool {
        self.rates.contains_key(employee)
    }

    /// Iterates over the resolved entries, ordered by last then first name.
    pub fn entries(&self) -> impl Iterator<Item = &RateEntry> {
        self.rates.values()
    }

    /// Iterates over the employees in the table.
    pub fn employees(&self) -> impl Iterator<Item = &EmployeeName> {
        self.rates.keys()
    }

    /// Number of distinct employees.
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    /// Returns true if the table holds no rates.
    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn entry(first: &str, last: &str, day: &str, night: &str) -> RateEntry {
        RateEntry {
            last_name: last.to_string(),
            first_name: first.to_string(),
            day_rate: dec(day),
            night_rate: dec(night),
        }
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let table = RateTable::from_entries(vec![entry("Jane", "Doe", "20", "22")]);
        let rate = table.get(&EmployeeName::new("JANE", "doe")).unwrap();
        assert_eq!(rate.day_rate, dec("20"));
        assert_eq!(rate.night_rate, dec("22"));
        assert_eq!(rate.first_name, "JANE");
    }

    #[test]
    fn test_duplicates_resolved_by_max_per_column() {
        let table = RateTable::from_entries(vec![
            entry("Jane", "Doe", "18.50", "23.00"),
            entry("jane", "doe", "19.25", "21.00"),
            entry("JANE", "DOE", "17.00", "22.50"),
        ]);

        assert_eq!(table.len(), 1);
        let rate = table.get(&EmployeeName::new("Jane", "Doe")).unwrap();
        assert_eq!(rate.day_rate, dec("19.25"));
        assert_eq!(rate.night_rate, dec("23.00"));
    }

    #[test]
    fn test_duplicate_resolution_ignores_row_order() {
        let rows = vec![
            entry("Jane", "Doe", "18.50", "23.00"),
            entry("Jane", "Doe", "19.25", "21.00"),
        ];
        let forward = RateTable::from_entries(rows.clone());
        let backward = RateTable::from_entries(rows.into_iter().rev());
        assert_eq!(forward, backward);
    }

    #[test]
    fn test_missing_rate_names_employee() {
        let table = RateTable::from_entries(vec![entry("Jane", "Doe", "20", "22")]);
        match table.get(&EmployeeName::new("John", "Smith")) {
            Err(EngineError::MissingRate { employee }) => assert_eq!(employee, "JOHN SMITH"),
            other => panic!("Expected MissingRate, got {:?}", other),
        }
    }

    #[test]
    fn test_deserialize_rate_table_columns() {
        let json = r#"{"LAST": "Doe", "FIRST": "Jane", "Day Rate": 20.5, "Night Rate": "22.75"}"#;
        let rate: RateEntry = serde_json::from_str(json).unwrap();
        assert_eq!(rate.day_rate, dec("20.5"));
        assert_eq!(rate.night_rate, dec("22.75"));
    }

    #[test]
    fn test_entries_are_sorted_by_last_name() {
        let table = RateTable::from_entries(vec![
            entry("Amy", "Young", "20", "22"),
            entry("Bob", "Adams", "20", "22"),
        ]);
        let names: Vec<String> = table.entries().map(|e| e.last_name.clone()).collect();
        assert_eq!(names, vec!["ADAMS".to_string(), "YOUNG".to_string()]);
    }
}
