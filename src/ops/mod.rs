//! User-invoked operations and save hooks.
//!
//! Everything a user triggers from a form or button lands here: saves run
//! the derivation and validation hooks, button actions carry status guards
//! and return an [`OperationOutcome`] for the caller to display. Caller
//! identity and the current date are explicit parameters throughout.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::calculation::{
    aggregate_worker_payments, calculate_disbursement_totals, calculate_worker_costs,
    refresh_requisition_totals, validate_task_totals,
};
use crate::config::AppConfig;
use crate::directory::cost_center_for_manager;
use crate::error::{HrError, HrResult};
use crate::ledger::post_wages_journal;
use crate::models::{
    ChangeStatus, ChangeType, ClaimEntry, DisbursementStatus, DocStatus, OvertimeClaim,
    OvertimeRequisition, TaskWorker, WorkAssignment, WorkPlan, WorkRequest, WorkerRow,
};
use crate::store::HrStore;
use crate::workflow::{DocKind, WorkflowDoc, WorkflowNotifier};

/// The result of a user-invoked action, shaped for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationOutcome {
    /// Whether the action took effect.
    pub success: bool,
    /// User-facing message describing what happened.
    pub message: String,
    /// Identifier of the document the action produced, when one was.
    #[serde(default)]
    pub name: Option<String>,
}

impl OperationOutcome {
    fn ok(message: impl Into<String>, name: Option<String>) -> Self {
        Self { success: true, message: message.into(), name }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), name: None }
    }
}

// --- workers ---

/// Save hook for a task worker: recomposes the display name and enforces
/// the channel details the chosen payment method requires.
pub fn save_worker(store: &mut HrStore, mut worker: TaskWorker) -> HrResult<()> {
    worker.compose_full_name();
    worker.validate_payment_details()?;
    store.put_worker(worker);
    Ok(())
}

// --- assignments ---

/// Save hook for a work assignment.
///
/// Inherits business unit and cost center from the linked plan when unset,
/// derives the stage from the recorded dates, recomputes per-row
/// achievement and cost, and rejects the save when any task's actual
/// output exceeds its total allowed work.
pub fn save_assignment(store: &mut HrStore, mut assignment: WorkAssignment) -> HrResult<()> {
    if let Some(plan_id) = assignment.plan.clone()
        && let Ok(plan) = store.work_plan(&plan_id)
    {
        if assignment.business_unit.is_none() {
            assignment.business_unit = plan.business_unit.clone();
        }
        if assignment.cost_center.is_none() {
            assignment.cost_center = plan.cost_center.clone();
        }
    }
    if assignment.title.is_empty()
        && let Some(request) = &assignment.request
    {
        assignment.title = request.clone();
    }

    assignment.stage = assignment.derived_stage();
    calculate_worker_costs(&mut assignment);
    validate_task_totals(&assignment)?;

    store.put_assignment(assignment);
    Ok(())
}

/// Submits an assignment and stamps the linked request and plan as
/// "Assigned".
pub fn submit_assignment(store: &mut HrStore, id: &str) -> HrResult<()> {
    let assignment = store.assignment_mut(id)?;
    assignment.doc_status = DocStatus::Submitted;
    let request = assignment.request.clone();
    let plan = assignment.plan.clone();

    if let Some(request_id) = request
        && let Ok(request) = store.work_request_mut(&request_id)
    {
        request.stage = "Assigned".to_string();
    }
    if let Some(plan_id) = plan
        && let Ok(plan) = store.work_plan_mut(&plan_id)
    {
        plan.stage = "Assigned".to_string();
    }
    Ok(())
}

// --- overtime requisitions & claims ---

/// Save hook for an overtime requisition: recomputes the derived totals
/// and fires workflow notifications for any state change.
pub fn save_requisition(
    store: &mut HrStore,
    mut requisition: OvertimeRequisition,
    notifier: &WorkflowNotifier,
) -> HrResult<()> {
    let previous_state = store
        .requisition(&requisition.id)
        .map(|r| r.workflow_state.clone())
        .unwrap_or_default();

    refresh_requisition_totals(&mut requisition);
    let id = requisition.id.clone();
    store.put_requisition(requisition);

    let saved = store.requisition(&id)?;
    notifier.dispatch(
        store,
        &WorkflowDoc {
            kind: DocKind::OvertimeRequisition,
            id: &saved.id,
            title: &saved.title,
            state: &saved.workflow_state,
            date: Some(saved.posting_date),
            owner: &saved.owner,
            manager: None,
        },
        &previous_state,
    );
    Ok(())
}

/// Creates the overtime claim for an approved requisition.
///
/// One claim per requisition: a second invocation returns a failure
/// outcome naming the existing claim. Header fields carry over and each
/// requisition entry becomes a claim line with worked hours initialized
/// to the requested hours.
pub fn create_claim_from_requisition(
    store: &mut HrStore,
    requisition_id: &str,
) -> HrResult<OperationOutcome> {
    let requisition = store.requisition(requisition_id)?.clone();

    if let Some(existing) = store.claim_for_requisition(requisition_id) {
        return Ok(OperationOutcome::failed(format!(
            "An overtime claim already exists for this requisition: {}",
            existing.id
        )));
    }

    let id = store.next_id("OTC");
    let entries = requisition
        .entries
        .iter()
        .map(|e| ClaimEntry {
            employee_name: e.employee_name.clone(),
            payroll_no: e.payroll_no.clone(),
            department: e.department.clone(),
            greenhouse: e.greenhouse.clone(),
            requested_hours: requisition.hours,
            worked_hours: requisition.hours,
        })
        .collect();

    let claim = OvertimeClaim {
        id: id.clone(),
        requisition: requisition.id.clone(),
        title: format!("OT Claim - {}", requisition.title),
        supervisor: requisition.supervisor.clone(),
        unit_division: requisition.unit_division.clone(),
        business_unit: requisition.business_unit.clone(),
        posting_date: requisition.posting_date,
        reason: requisition.reason.clone(),
        hours: requisition.hours,
        from_time: requisition.from_time,
        to_time: requisition.to_time,
        overtime_type: requisition.overtime_type.clone(),
        entries,
    };

    info!(claim = %id, requisition = %requisition.id, "created overtime claim");
    store.put_claim(claim);
    Ok(OperationOutcome::ok(
        format!("Overtime Claim {} created", id),
        Some(id),
    ))
}

// --- work requests & plans ---

/// Save hook for a work request: fires workflow notifications for any
/// state change.
pub fn save_work_request(
    store: &mut HrStore,
    request: WorkRequest,
    notifier: &WorkflowNotifier,
) -> HrResult<()> {
    let previous_state = store
        .work_request(&request.id)
        .map(|r| r.workflow_state.clone())
        .unwrap_or_default();

    let id = request.id.clone();
    store.put_work_request(request);

    let saved = store.work_request(&id)?;
    notifier.dispatch(
        store,
        &WorkflowDoc {
            kind: DocKind::WorkRequest,
            id: &saved.id,
            title: &saved.title,
            state: &saved.workflow_state,
            date: saved.posting_date,
            owner: &saved.owner,
            manager: saved.farm_manager.as_deref(),
        },
        &previous_state,
    );
    Ok(())
}

/// Submits a work request, stamping its stage.
pub fn submit_work_request(store: &mut HrStore, id: &str) -> HrResult<()> {
    store.work_request_mut(id)?.stage = "Requested".to_string();
    Ok(())
}

/// Save hook for a work plan.
///
/// Inherits the manager's business unit and best-matching cost center
/// when unset, mirrors the linked request into the title, and fires
/// workflow notifications for any state change.
pub fn save_work_plan(
    store: &mut HrStore,
    mut plan: WorkPlan,
    notifier: &WorkflowNotifier,
) -> HrResult<()> {
    let previous_state = store
        .work_plan(&plan.id)
        .map(|p| p.workflow_state.clone())
        .unwrap_or_default();

    if let Some(manager) = plan.manager.clone() {
        if plan.business_unit.is_none() {
            plan.business_unit = store.employee(&manager).and_then(|e| e.business_unit.clone());
        }
        if plan.cost_center.is_none() {
            plan.cost_center = cost_center_for_manager(store, &manager);
        }
    }
    if plan.title.is_empty()
        && let Some(request) = &plan.request
    {
        plan.title = request.clone();
    }

    let id = plan.id.clone();
    store.put_work_plan(plan);

    let saved = store.work_plan(&id)?;
    notifier.dispatch(
        store,
        &WorkflowDoc {
            kind: DocKind::WorkPlan,
            id: &saved.id,
            title: &saved.title,
            state: &saved.workflow_state,
            date: saved.posting_date,
            owner: &saved.owner,
            manager: saved.manager.as_deref(),
        },
        &previous_state,
    );
    Ok(())
}

/// Submits a work plan, stamping it and the linked request as "Planned".
pub fn submit_work_plan(store: &mut HrStore, id: &str) -> HrResult<()> {
    let plan = store.work_plan_mut(id)?;
    plan.stage = "Planned".to_string();
    let request = plan.request.clone();

    if let Some(request_id) = request
        && let Ok(request) = store.work_request_mut(&request_id)
    {
        request.stage = "Planned".to_string();
    }
    Ok(())
}

// --- change requests ---

/// Submits a change request for HR approval. Only Draft requests can be
/// submitted.
pub fn submit_change_request(
    store: &mut HrStore,
    id: &str,
    notifier: &WorkflowNotifier,
) -> HrResult<OperationOutcome> {
    let request = store.change_request_mut(id)?;
    if request.status != ChangeStatus::Draft {
        return Err(HrError::InvalidStatus {
            doctype: "Employee Change Request",
            name: id.to_string(),
            expected: "Draft",
            found: request.status.to_string(),
        });
    }

    if request.title.is_empty() {
        request.title = format!("{} - {}", request.change_type, request.assignment);
    }
    request.status = ChangeStatus::PendingApproval;

    dispatch_change_request(store, id, notifier, &ChangeStatus::Draft.to_string())?;
    Ok(OperationOutcome::ok(
        format!("Change request {} submitted for HR approval", id),
        Some(id.to_string()),
    ))
}

/// Approves a change request and applies the change to the assignment.
///
/// AddWorker appends a fresh row; ReplaceWorker substitutes the new worker
/// into every row of the old worker that has no actual work recorded,
/// restricted to the request's task when set. Rows with actual output are
/// never touched; no eligible row fails the approval.
pub fn approve_change_request(
    store: &mut HrStore,
    id: &str,
    caller: &str,
    today: NaiveDate,
    notes: Option<String>,
    notifier: &WorkflowNotifier,
) -> HrResult<OperationOutcome> {
    let request = store.change_request(id)?.clone();
    if request.status != ChangeStatus::PendingApproval {
        return Err(HrError::InvalidStatus {
            doctype: "Employee Change Request",
            name: id.to_string(),
            expected: "Pending HR Approval",
            found: request.status.to_string(),
        });
    }

    let message = apply_change(store, &request, today)?;

    let record = store.change_request_mut(id)?;
    record.status = ChangeStatus::Approved;
    record.approved_by = Some(caller.to_string());
    record.approval_date = Some(today);
    record.approval_notes = notes;

    info!(request = %id, assignment = %request.assignment, "change request approved");
    dispatch_change_request(store, id, notifier, &ChangeStatus::PendingApproval.to_string())?;
    Ok(OperationOutcome::ok(message, Some(id.to_string())))
}

/// Rejects a change request; the assignment is left untouched.
pub fn reject_change_request(
    store: &mut HrStore,
    id: &str,
    caller: &str,
    today: NaiveDate,
    notes: Option<String>,
    notifier: &WorkflowNotifier,
) -> HrResult<OperationOutcome> {
    let request = store.change_request_mut(id)?;
    if request.status != ChangeStatus::PendingApproval {
        return Err(HrError::InvalidStatus {
            doctype: "Employee Change Request",
            name: id.to_string(),
            expected: "Pending HR Approval",
            found: request.status.to_string(),
        });
    }

    request.status = ChangeStatus::Rejected;
    request.approved_by = Some(caller.to_string());
    request.approval_date = Some(today);
    request.approval_notes = notes;

    dispatch_change_request(store, id, notifier, &ChangeStatus::PendingApproval.to_string())?;
    Ok(OperationOutcome::ok(
        format!("Change request {} rejected", id),
        Some(id.to_string()),
    ))
}

/// Applies an approved change to its assignment, returning the outcome
/// message.
fn apply_change(
    store: &mut HrStore,
    request: &crate::models::ChangeRequest,
    today: NaiveDate,
) -> HrResult<String> {
    let assignment = store.assignment_mut(&request.assignment)?;

    match request.change_type {
        ChangeType::AddWorker => {
            assignment.worker_rows.push(WorkerRow {
                worker: request.new_worker.clone(),
                task: request.task.clone(),
                uom: None,
                rate: Decimal::ZERO,
                daily_target: None,
                quantity_assigned: Decimal::ZERO,
                actual_quantity: Decimal::ZERO,
                days: None,
                location: None,
                assignment_date: Some(today),
                achievement: None,
                actual_cost: Decimal::ZERO,
            });
            Ok(format!(
                "Worker {} added to {}",
                request.new_worker, request.assignment
            ))
        }
        ChangeType::ReplaceWorker => {
            let old_worker = request
                .old_worker
                .as_deref()
                .ok_or(HrError::MissingField { field: "old_worker" })?;

            let mut replaced = 0usize;
            for row in assignment.worker_rows.iter_mut().filter(|row| {
                row.worker == old_worker
                    && row.actual_quantity == Decimal::ZERO
                    && request.task.as_ref().is_none_or(|t| row.task.as_ref() == Some(t))
            }) {
                row.worker = request.new_worker.clone();
                row.assignment_date = Some(today);
                replaced += 1;
            }

            if replaced == 0 {
                return Err(HrError::NoReplaceableRows { worker: old_worker.to_string() });
            }
            Ok(format!(
                "Replaced {} with {} on {} row(s)",
                old_worker, request.new_worker, replaced
            ))
        }
    }
}

fn dispatch_change_request(
    store: &mut HrStore,
    id: &str,
    notifier: &WorkflowNotifier,
    previous_state: &str,
) -> HrResult<()> {
    let request = store.change_request(id)?;
    let state = request.status.to_string();
    notifier.dispatch(
        store,
        &WorkflowDoc {
            kind: DocKind::ChangeRequest,
            id: &request.id,
            title: &request.title,
            state: &state,
            date: Some(request.request_date),
            owner: &request.requested_by,
            manager: None,
        },
        previous_state,
    );
    Ok(())
}

// --- disbursements ---

/// Save hook for a disbursement: recomputes the totals and rejects the
/// save when another Paid disbursement already covers the same week.
pub fn save_disbursement(
    store: &mut HrStore,
    mut disbursement: crate::models::Disbursement,
) -> HrResult<()> {
    calculate_disbursement_totals(&mut disbursement);

    if let (Some(start), Some(end)) = (disbursement.week_start_date, disbursement.week_end_date)
        && let Some(existing) = store.paid_disbursement_for_week(start, end, &disbursement.id)
    {
        return Err(HrError::DuplicatePaidDisbursement { existing: existing.id.clone() });
    }

    store.put_disbursement(disbursement);
    Ok(())
}

/// Loads the week's worker payments into a disbursement.
///
/// Runs the aggregator over the disbursement's week and replaces the entry
/// and breakdown rows wholesale, so re-running never duplicates. An empty
/// week is reported as an unsuccessful outcome and leaves the document
/// untouched.
pub fn load_worker_payments(store: &mut HrStore, id: &str) -> HrResult<OperationOutcome> {
    let range = store.disbursement(id)?.week_range()?;
    let result = aggregate_worker_payments(store, range);

    if result.entries.is_empty() {
        return Ok(OperationOutcome::failed(
            "No work assignments found for the selected week",
        ));
    }

    let workers = result.entries.len();
    let assignments = result.assignment_count;

    let disbursement = store.disbursement_mut(id)?;
    disbursement.entries = result.entries;
    disbursement.breakdown = result.breakdown;
    calculate_disbursement_totals(disbursement);

    info!(disbursement = %id, workers, assignments, "loaded worker payments");
    Ok(OperationOutcome::ok(
        format!("Loaded {} worker payment(s) from {} assignment(s)", workers, assignments),
        Some(id.to_string()),
    ))
}

/// Submits a disbursement: Draft becomes Pending.
pub fn submit_disbursement(store: &mut HrStore, id: &str) -> HrResult<()> {
    let disbursement = store.disbursement_mut(id)?;
    if disbursement.status != DisbursementStatus::Draft {
        return Err(HrError::InvalidStatus {
            doctype: "Weekly Disbursement",
            name: id.to_string(),
            expected: "Draft",
            found: disbursement.status.to_string(),
        });
    }
    disbursement.doc_status = DocStatus::Submitted;
    disbursement.status = DisbursementStatus::Pending;
    Ok(())
}

/// Approves a submitted, Pending disbursement.
pub fn approve_disbursement(store: &mut HrStore, id: &str) -> HrResult<OperationOutcome> {
    let disbursement = store.disbursement_mut(id)?;
    if !disbursement.doc_status.is_submitted() {
        return Err(HrError::NotSubmitted { doctype: "Weekly Disbursement", name: id.to_string() });
    }
    if disbursement.status != DisbursementStatus::Pending {
        return Err(HrError::InvalidStatus {
            doctype: "Weekly Disbursement",
            name: id.to_string(),
            expected: "Pending",
            found: disbursement.status.to_string(),
        });
    }
    disbursement.status = DisbursementStatus::Approved;
    Ok(OperationOutcome::ok(
        format!("Disbursement {} approved", id),
        Some(id.to_string()),
    ))
}

/// Marks a disbursement paid: posts the wages journal and stamps the
/// document.
///
/// Guards: the disbursement must be submitted, not already Paid, and no
/// other Paid disbursement may cover the same week. Account resolution
/// failures abort before anything is created.
pub fn mark_disbursement_paid(
    store: &mut HrStore,
    config: &AppConfig,
    id: &str,
    caller: &str,
    today: NaiveDate,
) -> HrResult<OperationOutcome> {
    let disbursement = store.disbursement(id)?.clone();
    if !disbursement.doc_status.is_submitted() {
        return Err(HrError::NotSubmitted { doctype: "Weekly Disbursement", name: id.to_string() });
    }
    if disbursement.status == DisbursementStatus::Paid {
        return Err(HrError::AlreadyPaid { name: id.to_string() });
    }
    let range = disbursement.week_range()?;
    if let Some(existing) = store.paid_disbursement_for_week(range.start, range.end, id) {
        return Err(HrError::DuplicatePaidDisbursement { existing: existing.id.clone() });
    }

    let journal = post_wages_journal(store, config, &disbursement, today)?;

    let record = store.disbursement_mut(id)?;
    record.status = DisbursementStatus::Paid;
    record.paid_on = Some(today);
    record.paid_by = Some(caller.to_string());
    record.journal_entry = Some(journal.clone());
    for entry in &mut record.entries {
        entry.paid = true;
    }

    Ok(OperationOutcome::ok(
        format!("Disbursement {} marked as paid. Journal Entry: {}", id, journal),
        Some(journal),
    ))
}
