//! Core data models for the piece-work payroll engine.
//!
//! All records are plain typed structs; the host framework's dynamic
//! documents are not reproduced here.

mod assignment;
mod change_request;
mod disbursement;
mod document;
mod journal;
mod period;
mod plan;
mod requisition;
mod worker;

pub use assignment::{AssignmentStage, TaskDetail, WorkAssignment, WorkerRow};
pub use change_request::{ChangeRequest, ChangeStatus, ChangeType};
pub use disbursement::{
    AssignmentBreakdown, Disbursement, DisbursementEntry, DisbursementStatus,
};
pub use document::DocStatus;
pub use journal::{JournalEntry, JournalLine};
pub use period::DateRange;
pub use plan::{WorkPlan, WorkRequest};
pub use requisition::{ClaimEntry, OvertimeClaim, OvertimeRequisition, RequisitionEntry};
pub use worker::{BankAccount, LegacyEmployee, PaymentMethod, TaskWorker, WorkerProfile};
