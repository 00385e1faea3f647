//! Worker records and the normalized payment profile.
//!
//! Two historical record shapes exist: the current [`TaskWorker`] register
//! and [`LegacyEmployee`] records from the ERP's HR module. The directory
//! lookup resolves either into a [`WorkerProfile`].

use serde::{Deserialize, Serialize};

use crate::error::{HrError, HrResult};

/// How a worker is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Payment into a bank account.
    BankTransfer,
    /// Payment to a mobile-money (M-Pesa) phone number.
    Mpesa,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::BankTransfer => write!(f, "Bank Transfer"),
            PaymentMethod::Mpesa => write!(f, "M-Pesa"),
        }
    }
}

/// A worker in the current task-worker register.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskWorker {
    /// Unique identifier.
    pub id: String,
    /// First name.
    pub first_name: String,
    /// Optional middle name.
    #[serde(default)]
    pub second_name: Option<String>,
    /// Optional last name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Derived display name; recomputed on save.
    #[serde(default)]
    pub full_name: String,
    /// The worker's payment method, when recorded.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    /// Bank name, required for bank transfer.
    #[serde(default)]
    pub bank_name: Option<String>,
    /// Bank account number, required for bank transfer.
    #[serde(default)]
    pub account_number: Option<String>,
    /// M-Pesa phone number, required for mobile money.
    #[serde(default)]
    pub mpesa_phone: Option<String>,
}

impl TaskWorker {
    /// Recomputes `full_name` from the name parts, skipping empty ones.
    pub fn compose_full_name(&mut self) {
        let parts = [
            Some(self.first_name.as_str()),
            self.second_name.as_deref(),
            self.last_name.as_deref(),
        ];
        self.full_name = parts
            .into_iter()
            .flatten()
            .filter(|p| !p.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
    }

    /// Checks that the channel details required by the payment method are
    /// present.
    pub fn validate_payment_details(&self) -> HrResult<()> {
        match self.payment_method {
            Some(PaymentMethod::BankTransfer) => {
                if self.bank_name.as_deref().is_none_or(str::is_empty) {
                    return Err(HrError::MissingPaymentDetails {
                        worker: self.id.clone(),
                        message: "Bank Name is required for Bank Transfer".to_string(),
                    });
                }
                if self.account_number.as_deref().is_none_or(str::is_empty) {
                    return Err(HrError::MissingPaymentDetails {
                        worker: self.id.clone(),
                        message: "Account Number is required for Bank Transfer".to_string(),
                    });
                }
                Ok(())
            }
            Some(PaymentMethod::Mpesa) => {
                if self.mpesa_phone.as_deref().is_none_or(str::is_empty) {
                    return Err(HrError::MissingPaymentDetails {
                        worker: self.id.clone(),
                        message: "M-Pesa Phone Number is required".to_string(),
                    });
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

/// A historical employee record from the ERP's HR module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyEmployee {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub employee_name: String,
    /// Mobile-money phone, when captured on the employee.
    #[serde(default)]
    pub mpesa_phone: Option<String>,
    /// General cell number, fallback payment channel.
    #[serde(default)]
    pub cell_number: Option<String>,
    /// Linked login user, used for manager notifications.
    #[serde(default)]
    pub user_id: Option<String>,
    /// Business unit, used for cost-center inference.
    #[serde(default)]
    pub business_unit: Option<String>,
    /// Farm, used for cost-center inference.
    #[serde(default)]
    pub farm: Option<String>,
    /// Employing company.
    #[serde(default)]
    pub company: Option<String>,
}

/// A bank account associated with a legacy employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    /// The employee the account belongs to.
    pub party: String,
    /// Bank name.
    #[serde(default)]
    pub bank: Option<String>,
    /// Account number.
    #[serde(default)]
    pub account_number: Option<String>,
}

/// Normalized payment details for a worker, whichever record shape the
/// worker was found in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    /// Display name; falls back to the looked-up identifier.
    pub name: String,
    /// Payment method, when one could be derived.
    pub payment_method: Option<PaymentMethod>,
    /// Bank "name - account" string or mobile-money number; may be empty.
    pub channel: String,
}
