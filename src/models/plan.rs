//! Work request and work plan documents.
//!
//! Both are data-only apart from their stage and workflow state; state
//! transitions drive notification dispatch.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An upstream request for task work to be planned and assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkRequest {
    /// Unique identifier.
    pub id: String,
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Lifecycle stage ("Requested", "Planned", "Assigned").
    #[serde(default)]
    pub stage: String,
    /// Approval-chain state string.
    pub workflow_state: String,
    /// Document owner.
    pub owner: String,
    /// Posting date.
    #[serde(default)]
    pub posting_date: Option<NaiveDate>,
    /// Farm manager (legacy employee id) to notify on final approval.
    #[serde(default)]
    pub farm_manager: Option<String>,
}

/// A plan turning an approved request into scheduled work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkPlan {
    /// Unique identifier.
    pub id: String,
    /// Display title; mirrors the linked request when present.
    #[serde(default)]
    pub title: String,
    /// Linked work request.
    #[serde(default)]
    pub request: Option<String>,
    /// Planning manager (legacy employee id).
    #[serde(default)]
    pub manager: Option<String>,
    /// Business unit, inferred from the manager when unset.
    #[serde(default)]
    pub business_unit: Option<String>,
    /// Cost center, inferred from the manager when unset.
    #[serde(default)]
    pub cost_center: Option<String>,
    /// Lifecycle stage.
    #[serde(default)]
    pub stage: String,
    /// Approval-chain state string.
    pub workflow_state: String,
    /// Document owner.
    pub owner: String,
    /// Posting date.
    #[serde(default)]
    pub posting_date: Option<NaiveDate>,
}
