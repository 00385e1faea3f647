//! Wages journal construction and posting.
//!
//! Triggered only when a disbursement is marked paid: builds one balanced
//! entry debiting the wages expense account (split by cost center where a
//! breakdown exists) and crediting the payment bank account for the total
//! net amount.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::AppConfig;
use crate::error::{HrError, HrResult};
use crate::models::{Disbursement, JournalEntry, JournalLine};
use crate::store::HrStore;

/// The ledger accounts a disbursement posts against.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAccounts {
    /// Wages expense account (debited).
    pub wages: String,
    /// Payment bank account (credited).
    pub payment: String,
    /// Company the entry posts under, derived from the wages account.
    pub company: String,
}

/// Resolves the expense and payment accounts for a disbursement.
///
/// Explicit overrides on the document win; otherwise the company defaults
/// from configuration are looked up by bare account name (wages) and bank
/// account number (payment). Unresolvable accounts and group accounts are
/// configuration errors and abort before anything is created.
pub fn resolve_accounts(
    store: &HrStore,
    config: &AppConfig,
    disbursement: &Disbursement,
) -> HrResult<ResolvedAccounts> {
    let company_for_lookup = disbursement
        .company
        .clone()
        .unwrap_or_else(|| config.company.name.clone());

    let wages = match &disbursement.wages_account {
        Some(name) => name.clone(),
        None => store
            .leaf_account_by_name(&company_for_lookup, &config.accounts.wages_account_name)
            .map(|a| a.name.clone())
            .ok_or(HrError::AccountNotResolved { label: "Wages Expense Account" })?,
    };
    let payment = match &disbursement.payment_account {
        Some(name) => name.clone(),
        None => store
            .leaf_account_by_number(&company_for_lookup, &config.accounts.payment_account_number)
            .map(|a| a.name.clone())
            .ok_or(HrError::AccountNotResolved { label: "Payment Bank Account" })?,
    };

    let wages_record = store
        .account(&wages)
        .ok_or(HrError::AccountNotResolved { label: "Wages Expense Account" })?;
    if wages_record.is_group {
        return Err(HrError::GroupAccount { label: "Wages Expense Account", account: wages });
    }
    let payment_record = store
        .account(&payment)
        .ok_or(HrError::AccountNotResolved { label: "Payment Bank Account" })?;
    if payment_record.is_group {
        return Err(HrError::GroupAccount { label: "Payment Bank Account", account: payment });
    }

    Ok(ResolvedAccounts {
        company: wages_record.company.clone(),
        wages,
        payment,
    })
}

/// Builds the balanced wages journal entry for a disbursement.
///
/// Debits are split by cost-center subtotal from the breakdown when those
/// subtotals add up to the total net amount; otherwise a single debit for
/// the total keeps the entry balanced (deductions make the breakdown
/// gross-based subtotals exceed the net). The credit is always one line
/// for the total net against the payment account.
pub fn build_wages_journal(
    id: String,
    disbursement: &Disbursement,
    accounts: &ResolvedAccounts,
    posting_date: NaiveDate,
) -> JournalEntry {
    let mut cost_center_amounts: BTreeMap<String, Decimal> = BTreeMap::new();
    for row in &disbursement.breakdown {
        *cost_center_amounts
            .entry(row.cost_center.clone())
            .or_insert(Decimal::ZERO) += row.amount;
    }
    let split_total: Decimal = cost_center_amounts.values().copied().sum();

    let mut lines = Vec::new();
    if !cost_center_amounts.is_empty() && split_total == disbursement.total_net {
        for (cost_center, amount) in cost_center_amounts {
            if amount <= Decimal::ZERO {
                continue;
            }
            lines.push(JournalLine {
                account: accounts.wages.clone(),
                debit: amount,
                credit: Decimal::ZERO,
                cost_center: if cost_center.is_empty() { None } else { Some(cost_center) },
            });
        }
    } else {
        lines.push(JournalLine {
            account: accounts.wages.clone(),
            debit: disbursement.total_net,
            credit: Decimal::ZERO,
            cost_center: None,
        });
    }

    lines.push(JournalLine {
        account: accounts.payment.clone(),
        debit: Decimal::ZERO,
        credit: disbursement.total_net,
        cost_center: None,
    });

    JournalEntry {
        id,
        company: accounts.company.clone(),
        posting_date,
        reference: disbursement.id.clone(),
        remark: format!(
            "Task Work Wages - {} (Week {}/{})",
            disbursement.id, disbursement.week_number, disbursement.year
        ),
        lines,
        submitted: true,
    }
}

/// Resolves accounts, builds the entry, and posts it to the store.
///
/// Returns the id of the posted journal entry. The caller stamps the
/// disbursement afterwards; precondition checks (submitted, not already
/// paid, week uniqueness) also live with the caller in
/// [`crate::ops::mark_disbursement_paid`].
pub fn post_wages_journal(
    store: &mut HrStore,
    config: &AppConfig,
    disbursement: &Disbursement,
    posting_date: NaiveDate,
) -> HrResult<String> {
    let accounts = resolve_accounts(store, config, disbursement)?;
    let id = store.next_id("JE");
    let entry = build_wages_journal(id.clone(), disbursement, &accounts, posting_date);
    debug_assert!(entry.is_balanced());

    info!(
        journal = %id,
        disbursement = %disbursement.id,
        total_net = %disbursement.total_net,
        "posted wages journal entry"
    );
    store.put_journal_entry(entry);
    Ok(id)
}
