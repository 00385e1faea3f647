//! Document lifecycle status shared across record types.

use serde::{Deserialize, Serialize};

/// Submission status of a document.
///
/// Mirrors the Draft / Submitted / Cancelled lifecycle of the host
/// framework: drafts are editable, submitted documents are frozen and can
/// only be acted on through explicit operations, cancelled documents are
/// excluded from all aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocStatus {
    /// Editable draft.
    Draft,
    /// Submitted and frozen.
    Submitted,
    /// Cancelled; ignored by aggregation.
    Cancelled,
}

impl DocStatus {
    /// Returns true if the document has been submitted.
    pub fn is_submitted(self) -> bool {
        self == DocStatus::Submitted
    }

    /// Returns true if the document has been cancelled.
    pub fn is_cancelled(self) -> bool {
        self == DocStatus::Cancelled
    }
}
