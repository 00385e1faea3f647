//! Request types for the HTTP API.

use serde::{Deserialize, Serialize};

/// Body of a user-invoked action.
///
/// Every action carries the caller's identity explicitly; approval and
/// rejection actions may add free-text notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    /// The user performing the action.
    pub caller: String,
    /// Optional notes recorded on the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
