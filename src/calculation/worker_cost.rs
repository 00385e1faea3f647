//! Per-row achievement and cost calculation.

use rust_decimal::Decimal;

use crate::models::WorkAssignment;

/// Recomputes achievement percentage and actual cost for every worker row.
///
/// Achievement is `actual / assigned * 100` rounded to one decimal place,
/// and is left unset when nothing was assigned. Cost is `actual * rate`
/// rounded to two decimal places.
///
/// Individual over-performance (achievement above 100%) is allowed; the
/// task-wide bound is enforced separately by
/// [`validate_task_totals`](super::validate_task_totals).
///
/// # Examples
///
/// ```
/// use taskwork_engine::calculation::calculate_worker_costs;
/// # use taskwork_engine::models::{WorkAssignment, WorkerRow, AssignmentStage, DocStatus};
/// # use rust_decimal::Decimal;
/// # use std::str::FromStr;
/// # let mut assignment = WorkAssignment {
/// #     id: "TWA-0001".to_string(), title: String::new(), request: None, plan: None,
/// #     business_unit: None, cost_center: None, unit_division: None,
/// #     expected_start_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
/// #     expected_end_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 6).unwrap(),
/// #     start_date: None, completion_date: None, stage: AssignmentStage::Pending,
/// #     doc_status: DocStatus::Draft, task_details: vec![],
/// #     worker_rows: vec![WorkerRow {
/// #         worker: "TW-0001".to_string(), task: None, uom: None,
/// #         rate: Decimal::from_str("2.50").unwrap(), daily_target: None,
/// #         quantity_assigned: Decimal::from_str("40").unwrap(),
/// #         actual_quantity: Decimal::from_str("30").unwrap(),
/// #         days: None, location: None, assignment_date: None,
/// #         achievement: None, actual_cost: Decimal::ZERO,
/// #     }],
/// # };
/// calculate_worker_costs(&mut assignment);
/// assert_eq!(assignment.worker_rows[0].achievement, Some(Decimal::from_str("75.0").unwrap()));
/// assert_eq!(assignment.worker_rows[0].actual_cost, Decimal::from_str("75.00").unwrap());
/// ```
pub fn calculate_worker_costs(assignment: &mut WorkAssignment) {
    for row in &mut assignment.worker_rows {
        if row.quantity_assigned > Decimal::ZERO {
            row.achievement = Some(
                (row.actual_quantity / row.quantity_assigned * Decimal::ONE_HUNDRED).round_dp(1),
            );
        } else {
            row.achievement = None;
        }

        row.actual_cost = (row.actual_quantity * row.rate).round_dp(2);
    }
}
