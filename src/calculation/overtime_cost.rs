//! Overtime requisition cost estimation.

use rust_decimal::Decimal;

use crate::models::OvertimeRequisition;

/// Recomputes the derived fields of an overtime requisition.
///
/// `total_employees` is the entry row count and the estimated cost is
/// `employees * hours * hourly_rate`.
pub fn refresh_requisition_totals(requisition: &mut OvertimeRequisition) {
    requisition.total_employees = requisition.entries.len();
    requisition.estimated_cost = Decimal::from(requisition.total_employees as u64)
        * requisition.hours
        * requisition.hourly_rate;
}
