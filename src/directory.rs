//! Worker directory lookup.
//!
//! Unifies the two historical worker record shapes into a normalized
//! payment profile, and infers cost centers from manager records.

use crate::models::{PaymentMethod, WorkerProfile};
use crate::store::HrStore;

/// Resolves a worker identifier to a display name and payment channel.
///
/// The current task-worker register is consulted first; bank transfer
/// workers get a "Bank - Account" channel string, everyone else their
/// M-Pesa number (the method defaults to M-Pesa when unrecorded, matching
/// how the register was migrated). Identifiers not in the register fall
/// back to the legacy employee record, where an explicit bank-account
/// association wins over a phone number. Unknown identifiers resolve to
/// themselves with an empty channel; this lookup never fails.
pub fn lookup_worker(store: &HrStore, id: &str) -> WorkerProfile {
    if let Some(worker) = store.worker(id) {
        let (method, channel) = match worker.payment_method {
            Some(PaymentMethod::BankTransfer) => (
                PaymentMethod::BankTransfer,
                join_channel(worker.bank_name.as_deref(), worker.account_number.as_deref()),
            ),
            _ => (
                PaymentMethod::Mpesa,
                worker.mpesa_phone.clone().unwrap_or_default(),
            ),
        };
        return WorkerProfile {
            name: worker.full_name.clone(),
            payment_method: Some(method),
            channel,
        };
    }

    if let Some(employee) = store.employee(id) {
        if let Some(account) = store.bank_account_for(id)
            && account.account_number.as_deref().is_some_and(|n| !n.is_empty())
        {
            return WorkerProfile {
                name: employee.employee_name.clone(),
                payment_method: Some(PaymentMethod::BankTransfer),
                channel: join_channel(account.bank.as_deref(), account.account_number.as_deref()),
            };
        }

        let phone = employee
            .mpesa_phone
            .clone()
            .or_else(|| employee.cell_number.clone())
            .unwrap_or_default();
        return WorkerProfile {
            name: employee.employee_name.clone(),
            payment_method: if phone.is_empty() { None } else { Some(PaymentMethod::Mpesa) },
            channel: phone,
        };
    }

    WorkerProfile {
        name: id.to_string(),
        payment_method: None,
        channel: String::new(),
    }
}

/// Best-matching cost center for a manager's employee record.
///
/// Tries "<farm> - <company abbr>" first, then "<business unit> - <abbr>"
/// when the business unit is not just the company itself. Returns `None`
/// when the employee, the company abbreviation, or a matching cost center
/// is missing.
pub fn cost_center_for_manager(store: &HrStore, employee_id: &str) -> Option<String> {
    let employee = store.employee(employee_id)?;
    let company = employee.company.as_deref()?;
    let abbr = store.company_abbr(company)?;

    if let Some(farm) = employee.farm.as_deref() {
        let candidate = format!("{} - {}", farm, abbr);
        if store.has_cost_center(&candidate) {
            return Some(candidate);
        }
    }

    if let Some(unit) = employee.business_unit.as_deref()
        && unit != company
    {
        let candidate = format!("{} - {}", unit, abbr);
        if store.has_cost_center(&candidate) {
            return Some(candidate);
        }
    }

    None
}

fn join_channel(bank: Option<&str>, account: Option<&str>) -> String {
    [bank, account]
        .into_iter()
        .flatten()
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" - ")
}
