//! Calculation logic for the piece-work payroll engine.
//!
//! This module contains the pure calculation functions: per-row worker
//! achievement and cost, task over-allocation validation, disbursement
//! totals, overtime requisition cost estimation, and the aggregation of
//! assignment output into weekly worker payments.

mod aggregation;
mod overtime_cost;
mod task_totals;
mod totals;
mod worker_cost;

pub use aggregation::{AggregationResult, aggregate_worker_payments};
pub use overtime_cost::refresh_requisition_totals;
pub use task_totals::validate_task_totals;
pub use totals::calculate_disbursement_totals;
pub use worker_cost::calculate_worker_costs;
