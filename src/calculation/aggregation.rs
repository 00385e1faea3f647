//! Aggregation of assignment output into weekly worker payments.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::directory::lookup_worker;
use crate::models::{AssignmentBreakdown, DateRange, DisbursementEntry};
use crate::store::HrStore;

/// The result of aggregating assignments over a week.
///
/// `entries` holds one row per worker with their summed gross; `breakdown`
/// one row per contributing assignment, carrying the cost center used to
/// split ledger debits. Both are ordered by key for determinism.
#[derive(Debug, Clone)]
pub struct AggregationResult {
    /// Per-worker pay rows, gross accumulated across assignments.
    pub entries: Vec<DisbursementEntry>,
    /// Per-assignment subtotals.
    pub breakdown: Vec<AssignmentBreakdown>,
    /// Number of assignments that contributed at least one day of overlap.
    pub assignment_count: usize,
}

/// Aggregates all assignment output overlapping `range` into per-worker
/// and per-assignment totals.
///
/// Non-cancelled assignments whose effective interval (actual dates when
/// started, expected dates otherwise) shares at least one day with the
/// range contribute every worker row to the totals. A row's cost is its
/// precomputed `actual_cost` when nonzero, else `actual_quantity * rate`.
/// Worker identities are resolved through the directory lookup, so both
/// record shapes land in the same entry.
///
/// The function is pure over `(store, range)`: re-running it for the same
/// inputs yields the same result, and callers replace prior rows
/// wholesale rather than merging.
pub fn aggregate_worker_payments(store: &HrStore, range: DateRange) -> AggregationResult {
    let mut worker_totals: BTreeMap<String, DisbursementEntry> = BTreeMap::new();
    let mut assignment_index: BTreeMap<String, AssignmentBreakdown> = BTreeMap::new();
    let mut assignment_count = 0usize;

    for assignment in store.assignments_overlapping(range) {
        let interval = assignment.effective_interval(range.end);
        let Some(overlap) = interval.overlap(&range) else {
            continue;
        };
        if overlap.days() < 1 {
            continue;
        }
        assignment_count += 1;

        let mut assignment_amount = Decimal::ZERO;

        for row in &assignment.worker_rows {
            let cost = if row.actual_cost > Decimal::ZERO {
                row.actual_cost
            } else {
                row.actual_quantity * row.rate
            };

            let entry = worker_totals.entry(row.worker.clone()).or_insert_with(|| {
                let profile = lookup_worker(store, &row.worker);
                DisbursementEntry {
                    worker: row.worker.clone(),
                    worker_name: profile.name,
                    payment_method: profile.payment_method,
                    channel: profile.channel,
                    gross_amount: Decimal::ZERO,
                    deductions: Decimal::ZERO,
                    net_amount: Decimal::ZERO,
                    paid: false,
                }
            });
            entry.gross_amount += cost;
            assignment_amount += cost;
        }

        assignment_index
            .entry(assignment.id.clone())
            .or_insert_with(|| AssignmentBreakdown {
                assignment: assignment.id.clone(),
                task_name: assignment
                    .request
                    .clone()
                    .unwrap_or_else(|| assignment.id.clone()),
                work_date: overlap.start,
                location: assignment.unit_division.clone().unwrap_or_default(),
                cost_center: assignment.cost_center.clone().unwrap_or_default(),
                amount: Decimal::ZERO,
            })
            .amount += assignment_amount;
    }

    let mut entries: Vec<DisbursementEntry> = worker_totals.into_values().collect();
    for entry in &mut entries {
        entry.net_amount = entry.gross_amount - entry.deductions;
    }

    AggregationResult {
        entries,
        breakdown: assignment_index.into_values().collect(),
        assignment_count,
    }
}
