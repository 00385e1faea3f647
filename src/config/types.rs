//! Configuration types.

use serde::{Deserialize, Serialize};

/// The paying company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanySettings {
    /// Company name as registered in the chart of accounts.
    pub name: String,
}

/// Default ledger accounts used when a disbursement carries no explicit
/// overrides.
///
/// The wages account is matched by bare account name, the payment account
/// by bank account number, both restricted to leaf accounts of the
/// configured company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultAccounts {
    /// Bare name of the wages expense account, e.g. "Daily Rate Wages".
    pub wages_account_name: String,
    /// Bank account number of the payment account.
    pub payment_account_number: String,
}

/// Notification composition settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// Root URL used to build document links in notification bodies.
    pub base_url: String,
    /// From-address recorded on outbound mail.
    pub sender: String,
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// The paying company.
    pub company: CompanySettings,
    /// Default ledger accounts.
    pub accounts: DefaultAccounts,
    /// Notification settings.
    pub notifications: NotificationSettings,
}
