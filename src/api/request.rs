//! Request types for the payroll API.
//!
//! This module defines the JSON request structure for the `/payroll` endpoint.

use serde::{Deserialize, Serialize};

use crate::models::{Punch, RateEntry, RateTable};

/// Request body for the `/payroll` endpoint.
///
/// Punches and rates accept either the timesheet column names
/// (`"First Name"`, `"Day Rate"`, ...) or snake_case field names.
///
/// # Example
///
/// ```
/// use payroll_engine::api::PayrollRequest;
///
/// let json = r#"{
///     "punches": [{
///         "first_name": "Jane",
///         "last_name": "Doe",
///         "date": "2023-04-04",
///         "start_time": "2023-04-04T09:00:00",
///         "end_time": "2023-04-04T17:00:00",
///         "schedule": "Standard"
///     }],
///     "rates": [{"last_name": "Doe", "first_name": "Jane", "day_rate": "20", "night_rate": "22"}]
/// }"#;
///
/// let request: PayrollRequest = serde_json::from_str(json).unwrap();
/// assert_eq!(request.punches.len(), 1);
/// assert_eq!(request.rate_table().len(), 1);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayrollRequest {
    /// Timesheet rows.
    pub punches: Vec<Punch>,
    /// Rate table rows; duplicates are resolved by max.
    pub rates: Vec<RateEntry>,
}

impl PayrollRequest {
    /// Builds the deduplicated rate lookup from the request rows.
    pub fn rate_table(&self) -> RateTable {
        RateTable::from_entries(self.rates.iter().cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_timesheet_column_names() {
        let json = r#"{
            "punches": [{
                "First Name": "Corrina",
                "Last Name": "Smith",
                "Date": "4/6/2023",
                "Start Time": "4/6/2023 10:00:00 PM",
                "End Time": "4/7/2023 3:31:00 AM",
                "Regular": 5.52,
                "Schedule": "Paddington",
                "OT": null
            }],
            "rates": [{"LAST": "Smith", "FIRST": "Corrina", "Day Rate": 20, "Night Rate": 22}]
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.punches[0].schedule, "Paddington");
        assert!(request.punches[0].ot.is_zero());
        assert_eq!(request.rates[0].last_name, "Smith");
    }

    #[test]
    fn test_rate_table_resolves_duplicates() {
        let json = r#"{
            "punches": [],
            "rates": [
                {"last_name": "Doe", "first_name": "Jane", "day_rate": "20", "night_rate": "25"},
                {"last_name": "DOE", "first_name": "JANE", "day_rate": "21", "night_rate": "22"}
            ]
        }"#;

        let request: PayrollRequest = serde_json::from_str(json).unwrap();
        let table = request.rate_table();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_missing_rates_field_is_rejected() {
        let result: Result<PayrollRequest, _> = serde_json::from_str(r#"{"punches": []}"#);
        assert!(result.is_err());
    }
}
