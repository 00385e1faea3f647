//! Disbursement document totals.

use rust_decimal::Decimal;

use crate::models::Disbursement;

/// Recomputes per-entry net amounts and the document totals.
///
/// Net per entry is gross minus deductions; the totals are straight sums
/// over the entries and the worker count is the row count.
pub fn calculate_disbursement_totals(disbursement: &mut Disbursement) {
    let mut total_gross = Decimal::ZERO;
    let mut total_deductions = Decimal::ZERO;
    let mut total_net = Decimal::ZERO;

    for entry in &mut disbursement.entries {
        entry.net_amount = entry.gross_amount - entry.deductions;
        total_gross += entry.gross_amount;
        total_deductions += entry.deductions;
        total_net += entry.net_amount;
    }

    disbursement.total_gross = total_gross;
    disbursement.total_deductions = total_deductions;
    disbursement.total_net = total_net;
    disbursement.total_workers = disbursement.entries.len();
}
