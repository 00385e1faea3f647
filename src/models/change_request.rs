//! Employee change requests against a work assignment.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// What kind of change is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Add a new worker row to the assignment.
    AddWorker,
    /// Replace a worker on rows with no actual work recorded.
    ReplaceWorker,
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeType::AddWorker => write!(f, "Add Worker"),
            ChangeType::ReplaceWorker => write!(f, "Replace Worker"),
        }
    }
}

/// Approval status of a change request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    /// Being prepared by the requester.
    Draft,
    /// Submitted, awaiting HR approval.
    PendingApproval,
    /// Approved and applied to the assignment.
    Approved,
    /// Rejected.
    Rejected,
}

impl std::fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChangeStatus::Draft => write!(f, "Draft"),
            ChangeStatus::PendingApproval => write!(f, "Pending HR Approval"),
            ChangeStatus::Approved => write!(f, "Approved"),
            ChangeStatus::Rejected => write!(f, "Rejected"),
        }
    }
}

/// A request to add or replace a worker on an assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangeRequest {
    /// Unique identifier.
    pub id: String,
    /// Display title, derived on creation.
    #[serde(default)]
    pub title: String,
    /// The assignment to change.
    pub assignment: String,
    /// Restrict the change to one task, when set.
    #[serde(default)]
    pub task: Option<String>,
    /// The worker to replace; required for [`ChangeType::ReplaceWorker`].
    #[serde(default)]
    pub old_worker: Option<String>,
    /// The worker to add or substitute in.
    pub new_worker: String,
    /// The kind of change.
    pub change_type: ChangeType,
    /// Approval status.
    pub status: ChangeStatus,
    /// User who raised the request.
    pub requested_by: String,
    /// Date the request was raised.
    pub request_date: NaiveDate,
    /// User who resolved the request.
    #[serde(default)]
    pub approved_by: Option<String>,
    /// Date the request was resolved.
    #[serde(default)]
    pub approval_date: Option<NaiveDate>,
    /// Free-text notes recorded on approval or rejection.
    #[serde(default)]
    pub approval_notes: Option<String>,
}
