//! Bank account domain model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A bank account owned by the signed-in user
///
/// Snapshot of the server's copy; the account list is replaced wholesale on
/// every fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankAccount {
    pub id: i64,
    pub bank_name: String,
    pub bank_code: String,
    pub agency_number: String,
    #[serde(default)]
    pub agency_digit: String,
    pub account_number: String,
    #[serde(default)]
    pub account_digit: String,
    /// Freeform type label ("checking", "savings", ...)
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub document: String,
    pub holder_name: String,
    /// Current balance
    #[serde(with = "super::amount")]
    pub amount: Decimal,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

impl BankAccount {
    /// Agency as printed on statements, e.g. `0001-9`
    pub fn agency(&self) -> String {
        join_digit(&self.agency_number, &self.agency_digit)
    }

    /// Account number as printed on statements, e.g. `12345-6`
    pub fn number(&self) -> String {
        join_digit(&self.account_number, &self.account_digit)
    }
}

/// Point-in-time copy of account details embedded in a transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSnapshot {
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub bank_code: String,
    #[serde(default)]
    pub agency_number: String,
    #[serde(default)]
    pub agency_digit: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub account_digit: String,
    #[serde(default)]
    pub account_type: String,
    #[serde(default)]
    pub document: String,
    #[serde(default)]
    pub holder_name: String,
}

impl AccountSnapshot {
    /// Short label: holder, bank and account number
    pub fn label(&self) -> String {
        format!(
            "{} ({} {})",
            self.holder_name,
            self.bank_name,
            join_digit(&self.account_number, &self.account_digit)
        )
    }
}

fn join_digit(number: &str, digit: &str) -> String {
    if digit.trim().is_empty() {
        number.to_string()
    } else {
        format!("{}-{}", number, digit)
    }
}
