//! In-memory document store standing in for the host framework's ORM.
//!
//! Every record type gets a typed repository with explicit accessors; the
//! query methods mirror the filtered lookups the business logic needs
//! (assignments overlapping a week, paid disbursement per week, enabled
//! users holding a role). Iteration order is deterministic.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};
use crate::models::{
    BankAccount, ChangeRequest, DateRange, Disbursement, DisbursementStatus, JournalEntry,
    LegacyEmployee, OvertimeClaim, OvertimeRequisition, TaskWorker, WorkAssignment, WorkPlan,
    WorkRequest,
};

/// A login user with roles, targeted by notifications.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAccount {
    /// User identifier.
    pub id: String,
    /// Delivery address.
    pub email: String,
    /// Roles held by the user.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Disabled users are never notified.
    pub enabled: bool,
}

/// A chart-of-accounts entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerAccount {
    /// Full account identifier, e.g. "Daily Rate Wages - KR".
    pub name: String,
    /// Owning company.
    pub company: String,
    /// Bare account name, e.g. "Daily Rate Wages".
    pub account_name: String,
    /// Bank account number, for payment accounts.
    #[serde(default)]
    pub account_number: Option<String>,
    /// Group accounts cannot be posted to.
    pub is_group: bool,
}

/// Typed in-memory repositories for every record the engine touches.
#[derive(Debug, Default)]
pub struct HrStore {
    workers: BTreeMap<String, TaskWorker>,
    employees: BTreeMap<String, LegacyEmployee>,
    bank_accounts: Vec<BankAccount>,
    assignments: BTreeMap<String, WorkAssignment>,
    disbursements: BTreeMap<String, Disbursement>,
    change_requests: BTreeMap<String, ChangeRequest>,
    requisitions: BTreeMap<String, OvertimeRequisition>,
    claims: BTreeMap<String, OvertimeClaim>,
    work_requests: BTreeMap<String, WorkRequest>,
    work_plans: BTreeMap<String, WorkPlan>,
    users: BTreeMap<String, UserAccount>,
    accounts: BTreeMap<String, LedgerAccount>,
    companies: BTreeMap<String, String>,
    cost_centers: BTreeSet<String>,
    journal_entries: BTreeMap<String, JournalEntry>,
    sequences: BTreeMap<&'static str, u64>,
}

impl HrStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the next identifier for a document series, e.g.
    /// `next_id("JE")` yields "JE-0001", "JE-0002", ...
    pub fn next_id(&mut self, prefix: &'static str) -> String {
        let counter = self.sequences.entry(prefix).or_insert(0);
        *counter += 1;
        format!("{}-{:04}", prefix, counter)
    }

    // --- workers & employees ---

    /// Inserts or replaces a task worker.
    pub fn put_worker(&mut self, worker: TaskWorker) {
        self.workers.insert(worker.id.clone(), worker);
    }

    /// Looks up a task worker by id.
    pub fn worker(&self, id: &str) -> Option<&TaskWorker> {
        self.workers.get(id)
    }

    /// Inserts or replaces a legacy employee.
    pub fn put_employee(&mut self, employee: LegacyEmployee) {
        self.employees.insert(employee.id.clone(), employee);
    }

    /// Looks up a legacy employee by id.
    pub fn employee(&self, id: &str) -> Option<&LegacyEmployee> {
        self.employees.get(id)
    }

    /// Registers a bank account association for a legacy employee.
    pub fn put_bank_account(&mut self, account: BankAccount) {
        self.bank_accounts.push(account);
    }

    /// The bank account associated with a legacy employee, when one exists.
    pub fn bank_account_for(&self, party: &str) -> Option<&BankAccount> {
        self.bank_accounts.iter().find(|a| a.party == party)
    }

    // --- assignments ---

    /// Inserts or replaces a work assignment.
    pub fn put_assignment(&mut self, assignment: WorkAssignment) {
        self.assignments.insert(assignment.id.clone(), assignment);
    }

    /// Fetches an assignment or fails with `DocumentNotFound`.
    pub fn assignment(&self, id: &str) -> HrResult<&WorkAssignment> {
        self.assignments.get(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Work Assignment",
            name: id.to_string(),
        })
    }

    /// Mutable variant of [`HrStore::assignment`].
    pub fn assignment_mut(&mut self, id: &str) -> HrResult<&mut WorkAssignment> {
        self.assignments.get_mut(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Work Assignment",
            name: id.to_string(),
        })
    }

    /// All non-cancelled assignments whose effective interval shares at
    /// least one day with `range`.
    pub fn assignments_overlapping(&self, range: DateRange) -> Vec<&WorkAssignment> {
        self.assignments
            .values()
            .filter(|a| !a.doc_status.is_cancelled())
            .filter(|a| a.effective_interval(range.end).overlap(&range).is_some())
            .collect()
    }

    // --- disbursements ---

    /// Inserts or replaces a disbursement.
    pub fn put_disbursement(&mut self, disbursement: Disbursement) {
        self.disbursements.insert(disbursement.id.clone(), disbursement);
    }

    /// Fetches a disbursement or fails with `DocumentNotFound`.
    pub fn disbursement(&self, id: &str) -> HrResult<&Disbursement> {
        self.disbursements.get(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Weekly Disbursement",
            name: id.to_string(),
        })
    }

    /// Mutable variant of [`HrStore::disbursement`].
    pub fn disbursement_mut(&mut self, id: &str) -> HrResult<&mut Disbursement> {
        self.disbursements.get_mut(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Weekly Disbursement",
            name: id.to_string(),
        })
    }

    /// An existing Paid disbursement covering exactly the same week,
    /// excluding `exclude` (the document being saved).
    pub fn paid_disbursement_for_week(
        &self,
        week_start: chrono::NaiveDate,
        week_end: chrono::NaiveDate,
        exclude: &str,
    ) -> Option<&Disbursement> {
        self.disbursements.values().find(|d| {
            d.id != exclude
                && d.status == DisbursementStatus::Paid
                && d.week_start_date == Some(week_start)
                && d.week_end_date == Some(week_end)
        })
    }

    // --- change requests ---

    /// Inserts or replaces a change request.
    pub fn put_change_request(&mut self, request: ChangeRequest) {
        self.change_requests.insert(request.id.clone(), request);
    }

    /// Fetches a change request or fails with `DocumentNotFound`.
    pub fn change_request(&self, id: &str) -> HrResult<&ChangeRequest> {
        self.change_requests.get(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Employee Change Request",
            name: id.to_string(),
        })
    }

    /// Mutable variant of [`HrStore::change_request`].
    pub fn change_request_mut(&mut self, id: &str) -> HrResult<&mut ChangeRequest> {
        self.change_requests.get_mut(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Employee Change Request",
            name: id.to_string(),
        })
    }

    // --- requisitions & claims ---

    /// Inserts or replaces an overtime requisition.
    pub fn put_requisition(&mut self, requisition: OvertimeRequisition) {
        self.requisitions.insert(requisition.id.clone(), requisition);
    }

    /// Fetches a requisition or fails with `DocumentNotFound`.
    pub fn requisition(&self, id: &str) -> HrResult<&OvertimeRequisition> {
        self.requisitions.get(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Overtime Requisition",
            name: id.to_string(),
        })
    }

    /// Inserts or replaces an overtime claim.
    pub fn put_claim(&mut self, claim: OvertimeClaim) {
        self.claims.insert(claim.id.clone(), claim);
    }

    /// Fetches a claim by id.
    pub fn claim(&self, id: &str) -> Option<&OvertimeClaim> {
        self.claims.get(id)
    }

    /// The claim already created from a requisition, when one exists.
    pub fn claim_for_requisition(&self, requisition: &str) -> Option<&OvertimeClaim> {
        self.claims.values().find(|c| c.requisition == requisition)
    }

    // --- work requests & plans ---

    /// Inserts or replaces a work request.
    pub fn put_work_request(&mut self, request: WorkRequest) {
        self.work_requests.insert(request.id.clone(), request);
    }

    /// Fetches a work request or fails with `DocumentNotFound`.
    pub fn work_request(&self, id: &str) -> HrResult<&WorkRequest> {
        self.work_requests.get(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Work Request",
            name: id.to_string(),
        })
    }

    /// Mutable variant of [`HrStore::work_request`].
    pub fn work_request_mut(&mut self, id: &str) -> HrResult<&mut WorkRequest> {
        self.work_requests.get_mut(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Work Request",
            name: id.to_string(),
        })
    }

    /// Inserts or replaces a work plan.
    pub fn put_work_plan(&mut self, plan: WorkPlan) {
        self.work_plans.insert(plan.id.clone(), plan);
    }

    /// Fetches a work plan or fails with `DocumentNotFound`.
    pub fn work_plan(&self, id: &str) -> HrResult<&WorkPlan> {
        self.work_plans.get(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Work Plan",
            name: id.to_string(),
        })
    }

    /// Mutable variant of [`HrStore::work_plan`].
    pub fn work_plan_mut(&mut self, id: &str) -> HrResult<&mut WorkPlan> {
        self.work_plans.get_mut(id).ok_or_else(|| HrError::DocumentNotFound {
            doctype: "Work Plan",
            name: id.to_string(),
        })
    }

    // --- users ---

    /// Inserts or replaces a user account.
    pub fn put_user(&mut self, user: UserAccount) {
        self.users.insert(user.id.clone(), user);
    }

    /// Enabled users holding `role`, in id order.
    pub fn enabled_users_with_role(&self, role: &str) -> Vec<&UserAccount> {
        self.users
            .values()
            .filter(|u| u.enabled && u.roles.iter().any(|r| r == role))
            .collect()
    }

    /// Delivery address for a user; falls back to the id itself when the
    /// user record is missing.
    pub fn user_email(&self, user: &str) -> String {
        self.users
            .get(user)
            .map(|u| u.email.clone())
            .unwrap_or_else(|| user.to_string())
    }

    // --- accounts, companies, cost centers ---

    /// Inserts or replaces a ledger account.
    pub fn put_account(&mut self, account: LedgerAccount) {
        self.accounts.insert(account.name.clone(), account);
    }

    /// Fetches a ledger account by its full name.
    pub fn account(&self, name: &str) -> Option<&LedgerAccount> {
        self.accounts.get(name)
    }

    /// Finds a leaf account by company and bare account name.
    pub fn leaf_account_by_name(&self, company: &str, account_name: &str) -> Option<&LedgerAccount> {
        self.accounts
            .values()
            .find(|a| !a.is_group && a.company == company && a.account_name == account_name)
    }

    /// Finds a leaf account by company and bank account number.
    pub fn leaf_account_by_number(&self, company: &str, number: &str) -> Option<&LedgerAccount> {
        self.accounts.values().find(|a| {
            !a.is_group && a.company == company && a.account_number.as_deref() == Some(number)
        })
    }

    /// Registers a company and its abbreviation.
    pub fn put_company(&mut self, name: impl Into<String>, abbr: impl Into<String>) {
        self.companies.insert(name.into(), abbr.into());
    }

    /// The abbreviation registered for a company.
    pub fn company_abbr(&self, name: &str) -> Option<&str> {
        self.companies.get(name).map(String::as_str)
    }

    /// Registers a cost center.
    pub fn put_cost_center(&mut self, name: impl Into<String>) {
        self.cost_centers.insert(name.into());
    }

    /// True when the cost center exists.
    pub fn has_cost_center(&self, name: &str) -> bool {
        self.cost_centers.contains(name)
    }

    // --- journal entries ---

    /// Appends a posted journal entry.
    pub fn put_journal_entry(&mut self, entry: JournalEntry) {
        self.journal_entries.insert(entry.id.clone(), entry);
    }

    /// Fetches a journal entry by id.
    pub fn journal_entry(&self, id: &str) -> Option<&JournalEntry> {
        self.journal_entries.get(id)
    }
}
