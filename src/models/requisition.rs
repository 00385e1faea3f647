//! Bulk overtime requisitions and the claims generated from them.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One employee listed on an overtime requisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequisitionEntry {
    /// Employee display name.
    pub employee_name: String,
    /// Payroll number.
    #[serde(default)]
    pub payroll_no: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Greenhouse or work area.
    #[serde(default)]
    pub greenhouse: Option<String>,
}

/// A request for overtime covering a batch of employees.
///
/// `workflow_state` is the approval-chain string driving notification
/// dispatch; `total_employees` and `estimated_cost` are recomputed on
/// every save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeRequisition {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Requesting supervisor's name.
    #[serde(default)]
    pub supervisor: Option<String>,
    /// Unit or division.
    #[serde(default)]
    pub unit_division: Option<String>,
    /// Business unit.
    #[serde(default)]
    pub business_unit: Option<String>,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Overtime hours requested per employee.
    pub hours: Decimal,
    /// Hourly overtime rate.
    pub hourly_rate: Decimal,
    /// Start of the overtime window.
    #[serde(default)]
    pub from_time: Option<NaiveTime>,
    /// End of the overtime window.
    #[serde(default)]
    pub to_time: Option<NaiveTime>,
    /// Overtime type label.
    #[serde(default)]
    pub overtime_type: Option<String>,
    /// Why the overtime is needed.
    #[serde(default)]
    pub reason: Option<String>,
    /// Employees covered.
    #[serde(default)]
    pub entries: Vec<RequisitionEntry>,
    /// Derived: number of entry rows.
    pub total_employees: usize,
    /// Derived: `total_employees * hours * hourly_rate`.
    pub estimated_cost: Decimal,
    /// Approval-chain state string.
    pub workflow_state: String,
    /// Document owner (the requester).
    pub owner: String,
}

/// One employee line on an overtime claim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClaimEntry {
    /// Employee display name.
    pub employee_name: String,
    /// Payroll number.
    #[serde(default)]
    pub payroll_no: Option<String>,
    /// Department.
    #[serde(default)]
    pub department: Option<String>,
    /// Greenhouse or work area.
    #[serde(default)]
    pub greenhouse: Option<String>,
    /// Hours requested for this employee.
    pub requested_hours: Decimal,
    /// Hours actually worked; initialized to the requested hours.
    pub worked_hours: Decimal,
}

/// An overtime claim generated from an approved requisition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OvertimeClaim {
    /// Unique identifier.
    pub id: String,
    /// The requisition this claim was created from.
    pub requisition: String,
    /// Display title.
    pub title: String,
    /// Supervisor carried over from the requisition.
    #[serde(default)]
    pub supervisor: Option<String>,
    /// Unit or division.
    #[serde(default)]
    pub unit_division: Option<String>,
    /// Business unit.
    #[serde(default)]
    pub business_unit: Option<String>,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Reason carried over from the requisition.
    #[serde(default)]
    pub reason: Option<String>,
    /// Overtime hours.
    pub hours: Decimal,
    /// Start of the overtime window.
    #[serde(default)]
    pub from_time: Option<NaiveTime>,
    /// End of the overtime window.
    #[serde(default)]
    pub to_time: Option<NaiveTime>,
    /// Overtime type label.
    #[serde(default)]
    pub overtime_type: Option<String>,
    /// Per-employee claim lines.
    #[serde(default)]
    pub entries: Vec<ClaimEntry>,
}
