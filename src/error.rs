//! Error types for the piece-work payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every condition that blocks a save or a user-invoked operation.
//! Best-effort side effects (notification delivery) have their own error
//! type in [`crate::workflow`] and are never surfaced through [`HrError`].

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// Validation errors block the triggering save or action and carry a
/// user-facing message; nothing in this enum is retried.
///
/// # Example
///
/// ```
/// use taskwork_engine::error::HrError;
///
/// let error = HrError::AlreadyPaid { name: "TWD-0001".to_string() };
/// assert_eq!(error.to_string(), "Disbursement TWD-0001 has already been paid");
/// ```
#[derive(Debug, Error)]
pub enum HrError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A referenced document does not exist in the store.
    #[error("{doctype} not found: {name}")]
    DocumentNotFound {
        /// The document type, e.g. "Work Assignment".
        doctype: &'static str,
        /// The identifier that was looked up.
        name: String,
    },

    /// The summed actual quantity for one or more tasks exceeds the task's
    /// total allowed work.
    #[error("Total work exceeded: {summary}")]
    TotalWorkExceeded {
        /// One clause per offending task, naming the task and both figures.
        summary: String,
    },

    /// A worker record is missing the channel details its payment method
    /// requires.
    #[error("Worker {worker}: {message}")]
    MissingPaymentDetails {
        /// The worker identifier.
        worker: String,
        /// What is missing, e.g. "Bank Name is required for Bank Transfer".
        message: String,
    },

    /// A Paid disbursement already exists for the same week.
    #[error(
        "A paid disbursement already exists for this week: {existing}. \
         It can be viewed as a historical record but not paid again"
    )]
    DuplicatePaidDisbursement {
        /// The identifier of the existing Paid disbursement.
        existing: String,
    },

    /// The disbursement has already been marked Paid.
    #[error("Disbursement {name} has already been paid")]
    AlreadyPaid {
        /// The disbursement identifier.
        name: String,
    },

    /// The document must be submitted before the attempted action.
    #[error("{doctype} {name} must be submitted before this action")]
    NotSubmitted {
        /// The document type.
        doctype: &'static str,
        /// The document identifier.
        name: String,
    },

    /// The document is not in the status the action requires.
    #[error("{doctype} {name} is {found}; expected {expected}")]
    InvalidStatus {
        /// The document type.
        doctype: &'static str,
        /// The document identifier.
        name: String,
        /// The status the action requires.
        expected: &'static str,
        /// The status actually found.
        found: String,
    },

    /// A ledger account required for posting could not be resolved.
    #[error("Please set the {label} before marking as paid")]
    AccountNotResolved {
        /// Which account is missing, e.g. "Wages Expense Account".
        label: &'static str,
    },

    /// A resolved ledger account is a group account and cannot be posted to.
    #[error("{label} ({account}) is a group account; select a ledger account")]
    GroupAccount {
        /// Which account is misconfigured.
        label: &'static str,
        /// The account identifier.
        account: String,
    },

    /// A replace-worker change found no rows that can be replaced.
    #[error("No replaceable rows found for {worker} (rows with actual work cannot be replaced)")]
    NoReplaceableRows {
        /// The worker whose rows were searched.
        worker: String,
    },

    /// A required field was not provided.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The field name.
        field: &'static str,
    },
}

/// A type alias for Results that return [`HrError`].
pub type HrResult<T> = Result<T, HrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_not_found_displays_doctype_and_name() {
        let error = HrError::DocumentNotFound {
            doctype: "Work Assignment",
            name: "TWA-0042".to_string(),
        };
        assert_eq!(error.to_string(), "Work Assignment not found: TWA-0042");
    }

    #[test]
    fn test_total_work_exceeded_carries_summary() {
        let error = HrError::TotalWorkExceeded {
            summary: "task TASK-001: 12.00 exceeds 10.00".to_string(),
        };
        assert!(error.to_string().contains("TASK-001"));
    }

    #[test]
    fn test_duplicate_paid_names_existing_document() {
        let error = HrError::DuplicatePaidDisbursement {
            existing: "TWD-0007".to_string(),
        };
        assert!(error.to_string().contains("TWD-0007"));
    }

    #[test]
    fn test_invalid_status_displays_both_statuses() {
        let error = HrError::InvalidStatus {
            doctype: "Disbursement",
            name: "TWD-0001".to_string(),
            expected: "Pending",
            found: "Draft".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Disbursement TWD-0001 is Draft; expected Pending"
        );
    }

    #[test]
    fn test_group_account_displays_label_and_account() {
        let error = HrError::GroupAccount {
            label: "Payment Bank Account",
            account: "Bank Accounts - KR".to_string(),
        };
        assert!(error.to_string().contains("Payment Bank Account"));
        assert!(error.to_string().contains("Bank Accounts - KR"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<HrError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_field() -> HrResult<()> {
            Err(HrError::MissingField { field: "week_start_date" })
        }

        fn propagates_error() -> HrResult<()> {
            returns_missing_field()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
