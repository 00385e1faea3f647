//! Task-wide over-allocation validation.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::{HrError, HrResult};
use crate::models::WorkAssignment;

/// Checks that no task's summed actual quantity exceeds its total work.
///
/// Individual workers may exceed their own allocation; only the sum
/// across all workers on a task is bounded. If one worker did extra,
/// others must have done less. Tasks with no declared total (zero) are
/// not bounded.
///
/// The returned error names every offending task in one message.
pub fn validate_task_totals(assignment: &WorkAssignment) -> HrResult<()> {
    if assignment.worker_rows.is_empty() || assignment.task_details.is_empty() {
        return Ok(());
    }

    let total_work: BTreeMap<&str, Decimal> = assignment
        .task_details
        .iter()
        .map(|t| (t.task.as_str(), t.total_work))
        .collect();

    let mut actual_by_task: BTreeMap<&str, Decimal> = BTreeMap::new();
    for row in &assignment.worker_rows {
        if let Some(task) = row.task.as_deref()
            && row.actual_quantity > Decimal::ZERO
        {
            *actual_by_task.entry(task).or_insert(Decimal::ZERO) += row.actual_quantity;
        }
    }

    let mut clauses = Vec::new();
    for (task, actual) in &actual_by_task {
        let total = total_work.get(task).copied().unwrap_or(Decimal::ZERO);
        if total > Decimal::ZERO && *actual > total {
            let name = assignment
                .task_details
                .iter()
                .find(|t| t.task == *task)
                .and_then(|t| t.subject.as_deref())
                .unwrap_or(task);
            clauses.push(format!(
                "task {}: total actual quantity {:.2} exceeds total work {:.2}",
                name, actual, total
            ));
        }
    }

    if clauses.is_empty() {
        Ok(())
    } else {
        Err(HrError::TotalWorkExceeded { summary: clauses.join("; ") })
    }
}
