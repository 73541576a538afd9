//! Audit trail records.
//!
//! Each calculation stage records what it consumed and produced so a payroll
//! clerk can trace any number in the output tables back to its inputs.

use serde::{Deserialize, Serialize};

/// A single step in the audit trail recording a calculation decision.
///
/// # Example
///
/// ```
/// use payroll_engine::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "weekly_overtime_split".to_string(),
///     rule_name: "Weekly Overtime Split".to_string(),
///     input: serde_json::json!({ "total_minutes": 2460 }),
///     output: serde_json::json!({ "overtime_minutes": 60 }),
///     reasoning: "60 minutes past the 40 hour threshold".to_string(),
/// };
/// assert_eq!(step.rule_id, "weekly_overtime_split");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number within one employee's trail.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
