//! Weekly wage disbursement records.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::document::DocStatus;
use super::period::DateRange;
use super::worker::PaymentMethod;
use crate::error::{HrError, HrResult};

/// Approval status of a disbursement.
///
/// Draft on creation, Pending once submitted, Approved by an explicit
/// action, Paid once the wages journal has been posted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementStatus {
    /// Being prepared.
    Draft,
    /// Submitted, awaiting approval.
    Pending,
    /// Approved, awaiting payment.
    Approved,
    /// Paid; a journal entry exists.
    Paid,
}

impl std::fmt::Display for DisbursementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DisbursementStatus::Draft => write!(f, "Draft"),
            DisbursementStatus::Pending => write!(f, "Pending"),
            DisbursementStatus::Approved => write!(f, "Approved"),
            DisbursementStatus::Paid => write!(f, "Paid"),
        }
    }
}

/// One worker's pay line within a disbursement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisbursementEntry {
    /// Worker identifier.
    pub worker: String,
    /// Resolved display name.
    pub worker_name: String,
    /// Resolved payment method, when known.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    /// Bank details or mobile-money number.
    #[serde(default)]
    pub channel: String,
    /// Total earned across overlapping assignments.
    pub gross_amount: Decimal,
    /// Deductions applied to this worker for the week.
    pub deductions: Decimal,
    /// `gross_amount - deductions`, recomputed on save.
    pub net_amount: Decimal,
    /// Set once the disbursement is paid.
    #[serde(default)]
    pub paid: bool,
}

/// One assignment's contribution to the week, used to split ledger debits
/// by cost center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentBreakdown {
    /// The contributing assignment.
    pub assignment: String,
    /// Task name shown on the row (request ref or the assignment id).
    pub task_name: String,
    /// First overlapping day of the assignment within the week.
    pub work_date: NaiveDate,
    /// Work location.
    #[serde(default)]
    pub location: String,
    /// Cost center the amount belongs to; may be empty.
    #[serde(default)]
    pub cost_center: String,
    /// Amount earned under this assignment during the week.
    pub amount: Decimal,
}

/// A weekly payroll batch aggregating worker pay for approval and payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disbursement {
    /// Unique identifier.
    pub id: String,
    /// Paying company, when set explicitly.
    #[serde(default)]
    pub company: Option<String>,
    /// Calendar year of the week.
    pub year: i32,
    /// ISO week number.
    pub week_number: u32,
    /// First day of the covered week.
    #[serde(default)]
    pub week_start_date: Option<NaiveDate>,
    /// Last day of the covered week.
    #[serde(default)]
    pub week_end_date: Option<NaiveDate>,
    /// Approval status.
    pub status: DisbursementStatus,
    /// Submission status.
    pub doc_status: DocStatus,
    /// Explicit wages expense account override.
    #[serde(default)]
    pub wages_account: Option<String>,
    /// Explicit payment bank account override.
    #[serde(default)]
    pub payment_account: Option<String>,
    /// Per-worker pay lines.
    #[serde(default)]
    pub entries: Vec<DisbursementEntry>,
    /// Per-assignment amounts, keyed by cost center for the ledger split.
    #[serde(default)]
    pub breakdown: Vec<AssignmentBreakdown>,
    /// Sum of entry gross amounts.
    pub total_gross: Decimal,
    /// Sum of entry deductions.
    pub total_deductions: Decimal,
    /// Sum of entry net amounts.
    pub total_net: Decimal,
    /// Number of workers paid.
    pub total_workers: usize,
    /// Date payment was recorded.
    #[serde(default)]
    pub paid_on: Option<NaiveDate>,
    /// User who recorded the payment.
    #[serde(default)]
    pub paid_by: Option<String>,
    /// The wages journal entry posted on payment.
    #[serde(default)]
    pub journal_entry: Option<String>,
}

impl Disbursement {
    /// The week this disbursement covers, or an error when the dates are
    /// not yet set.
    pub fn week_range(&self) -> HrResult<DateRange> {
        let start = self
            .week_start_date
            .ok_or(HrError::MissingField { field: "week_start_date" })?;
        let end = self
            .week_end_date
            .ok_or(HrError::MissingField { field: "week_end_date" })?;
        Ok(DateRange::new(start, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn disbursement() -> Disbursement {
        Disbursement {
            id: "TWD-0001".to_string(),
            company: None,
            year: 2025,
            week_number: 23,
            week_start_date: Some(date("2025-06-02")),
            week_end_date: Some(date("2025-06-08")),
            status: DisbursementStatus::Draft,
            doc_status: DocStatus::Draft,
            wages_account: None,
            payment_account: None,
            entries: vec![],
            breakdown: vec![],
            total_gross: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_net: Decimal::ZERO,
            total_workers: 0,
            paid_on: None,
            paid_by: None,
            journal_entry: None,
        }
    }

    #[test]
    fn test_week_range_when_dates_set() {
        let d = disbursement();
        let range = d.week_range().unwrap();
        assert_eq!(range.days(), 7);
    }

    #[test]
    fn test_week_range_missing_dates_is_an_error() {
        let mut d = disbursement();
        d.week_start_date = None;
        let err = d.week_range().unwrap_err();
        assert!(err.to_string().contains("week_start_date"));
    }

    #[test]
    fn test_status_display() {
        assert_eq!(DisbursementStatus::Paid.to_string(), "Paid");
    }
}
