//! Journal entry records posted when a disbursement is paid.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One debit or credit line of a journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Ledger account posted to.
    pub account: String,
    /// Debit amount; zero on credit lines.
    pub debit: Decimal,
    /// Credit amount; zero on debit lines.
    pub credit: Decimal,
    /// Cost center dimension for debit splitting, when present.
    #[serde(default)]
    pub cost_center: Option<String>,
}

/// A balanced accounting entry.
///
/// The ledger poster guarantees that the sum of debits equals the sum of
/// credits before the entry is appended to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Unique identifier.
    pub id: String,
    /// Company the entry belongs to.
    pub company: String,
    /// Posting date.
    pub posting_date: NaiveDate,
    /// Source document reference (the disbursement id).
    pub reference: String,
    /// Human-readable remark.
    pub remark: String,
    /// Debit and credit lines.
    pub lines: Vec<JournalLine>,
    /// Set once the entry has been finalized.
    pub submitted: bool,
}

impl JournalEntry {
    /// Sum of all debit amounts.
    pub fn total_debit(&self) -> Decimal {
        self.lines.iter().map(|l| l.debit).sum()
    }

    /// Sum of all credit amounts.
    pub fn total_credit(&self) -> Decimal {
        self.lines.iter().map(|l| l.credit).sum()
    }

    /// True when total debits equal total credits.
    pub fn is_balanced(&self) -> bool {
        self.total_debit() == self.total_credit()
    }
}
