//! Work assignment records: task allocations and per-worker rows.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document::DocStatus;
use super::period::DateRange;

/// Progress stage of a work assignment, derived from its dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStage {
    /// Neither started nor completed.
    Pending,
    /// Work has started.
    InProgress,
    /// Completion date recorded.
    Completed,
}

impl std::fmt::Display for AssignmentStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStage::Pending => write!(f, "Pending"),
            AssignmentStage::InProgress => write!(f, "In Progress"),
            AssignmentStage::Completed => write!(f, "Completed"),
        }
    }
}

/// One task covered by an assignment, with its total allowed work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    /// Task identifier.
    pub task: String,
    /// Human-readable task subject, when known.
    #[serde(default)]
    pub subject: Option<String>,
    /// Total quantity of work allowed across all workers on this task.
    pub total_work: Decimal,
}

/// One worker's allocation within an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRow {
    /// Worker identifier (task worker or legacy employee).
    pub worker: String,
    /// The task this row contributes to.
    #[serde(default)]
    pub task: Option<String>,
    /// Unit of measure for the quantities.
    #[serde(default)]
    pub uom: Option<String>,
    /// Piece rate per unit.
    pub rate: Decimal,
    /// Daily target quantity, informational.
    #[serde(default)]
    pub daily_target: Option<Decimal>,
    /// Quantity allocated to this worker.
    pub quantity_assigned: Decimal,
    /// Quantity actually produced.
    pub actual_quantity: Decimal,
    /// Working days covered by the row.
    #[serde(default)]
    pub days: Option<Decimal>,
    /// Work location.
    #[serde(default)]
    pub location: Option<String>,
    /// Date the row was assigned.
    #[serde(default)]
    pub assignment_date: Option<NaiveDate>,
    /// Achievement percentage; unset until `quantity_assigned > 0`.
    #[serde(default)]
    pub achievement: Option<Decimal>,
    /// Monetary cost of the actual output, `actual_quantity * rate`.
    pub actual_cost: Decimal,
}

/// A scheduled block of piece-work with per-worker targets and actuals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkAssignment {
    /// Unique identifier.
    pub id: String,
    /// Display title; mirrors the linked request when present.
    #[serde(default)]
    pub title: String,
    /// Linked work request.
    #[serde(default)]
    pub request: Option<String>,
    /// Linked work plan.
    #[serde(default)]
    pub plan: Option<String>,
    /// Business unit, inherited from the plan when unset.
    #[serde(default)]
    pub business_unit: Option<String>,
    /// Cost center, inherited from the plan when unset.
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Unit or division where the work happens.
    #[serde(default)]
    pub unit_division: Option<String>,
    /// Planned first day of work.
    pub expected_start_date: NaiveDate,
    /// Planned last day of work.
    pub expected_end_date: NaiveDate,
    /// Actual first day of work, once started.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Actual completion date, once finished.
    #[serde(default)]
    pub completion_date: Option<NaiveDate>,
    /// Derived progress stage.
    pub stage: AssignmentStage,
    /// Submission status.
    pub doc_status: DocStatus,
    /// Tasks covered, with their total allowed work.
    #[serde(default)]
    pub task_details: Vec<TaskDetail>,
    /// Per-worker allocation rows.
    #[serde(default)]
    pub worker_rows: Vec<WorkerRow>,
}

impl WorkAssignment {
    /// Returns the interval the assignment effectively occupies.
    ///
    /// When work has started, the actual dates win; an open completion
    /// date extends to `fallback_end` (the scan range's last day).
    /// Otherwise the expected dates apply.
    pub fn effective_interval(&self, fallback_end: NaiveDate) -> DateRange {
        match self.start_date {
            Some(start) => DateRange::new(start, self.completion_date.unwrap_or(fallback_end)),
            None => DateRange::new(self.expected_start_date, self.expected_end_date),
        }
    }

    /// Stage implied by the recorded dates: completed when a completion
    /// date exists, in progress once started, otherwise pending.
    pub fn derived_stage(&self) -> AssignmentStage {
        if self.completion_date.is_some() {
            AssignmentStage::Completed
        } else if self.start_date.is_some() {
            AssignmentStage::InProgress
        } else {
            AssignmentStage::Pending
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn assignment() -> WorkAssignment {
        WorkAssignment {
            id: "TWA-0001".to_string(),
            title: String::new(),
            request: None,
            plan: None,
            business_unit: None,
            cost_center: None,
            unit_division: None,
            expected_start_date: date("2025-06-02"),
            expected_end_date: date("2025-06-06"),
            start_date: None,
            completion_date: None,
            stage: AssignmentStage::Pending,
            doc_status: DocStatus::Draft,
            task_details: vec![],
            worker_rows: vec![],
        }
    }

    #[test]
    fn test_effective_interval_uses_expected_dates_before_start() {
        let a = assignment();
        let interval = a.effective_interval(date("2025-06-08"));
        assert_eq!(interval.start, date("2025-06-02"));
        assert_eq!(interval.end, date("2025-06-06"));
    }

    #[test]
    fn test_effective_interval_open_completion_extends_to_fallback() {
        let mut a = assignment();
        a.start_date = Some(date("2025-06-03"));
        let interval = a.effective_interval(date("2025-06-08"));
        assert_eq!(interval.start, date("2025-06-03"));
        assert_eq!(interval.end, date("2025-06-08"));
    }

    #[test]
    fn test_effective_interval_uses_completion_date_when_set() {
        let mut a = assignment();
        a.start_date = Some(date("2025-06-03"));
        a.completion_date = Some(date("2025-06-05"));
        let interval = a.effective_interval(date("2025-06-08"));
        assert_eq!(interval.end, date("2025-06-05"));
    }

    #[test]
    fn test_derived_stage() {
        let mut a = assignment();
        assert_eq!(a.derived_stage(), AssignmentStage::Pending);

        a.start_date = Some(date("2025-06-03"));
        assert_eq!(a.derived_stage(), AssignmentStage::InProgress);

        a.completion_date = Some(date("2025-06-05"));
        assert_eq!(a.derived_stage(), AssignmentStage::Completed);
    }

    #[test]
    fn test_stage_display_matches_workflow_strings() {
        assert_eq!(AssignmentStage::InProgress.to_string(), "In Progress");
    }
}
