//! Company configuration: default ledger accounts and notification
//! settings, loaded from YAML.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AppConfig, CompanySettings, DefaultAccounts, NotificationSettings};
