//! Transfer domain model

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::AccountSnapshot;

/// Page size used when the caller does not ask for one
pub const DEFAULT_PER_PAGE: u32 = 3;

/// Page requested when the caller does not ask for one
pub const DEFAULT_PAGE: u32 = 1;

/// A money movement between two accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transfer {
    pub id: i64,
    #[serde(default)]
    pub was_success: bool,
    /// Human label of the transfer type, as rendered by the server
    #[serde(default)]
    pub transfer_type_text: String,
    #[serde(with = "super::amount")]
    pub amount_to_transfer: Decimal,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub to_bank_account: AccountSnapshot,
    #[serde(default)]
    pub from_user_bank_account: AccountSnapshot,
}

/// One page of the transfer statement
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransferPage {
    #[serde(default)]
    pub bank_account_transfers: Vec<Transfer>,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub per_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_records: u64,
}

impl TransferPage {
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}

/// Direction of a transfer relative to the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Sent,
    Received,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Sent => "sent",
            Direction::Received => "received",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sent" => Ok(Direction::Sent),
            "received" => Ok(Direction::Received),
            other => Err(format!(
                "unknown direction '{}', expected 'sent' or 'received'",
                other
            )),
        }
    }
}

/// Filters for the transfer statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferFilters {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub min_value: Option<Decimal>,
    pub max_value: Option<Decimal>,
    pub transfer_type: Option<Direction>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

impl TransferFilters {
    /// First page with the given page size
    pub fn recent(per_page: u32) -> Self {
        Self {
            per_page: Some(per_page),
            page: Some(DEFAULT_PAGE),
            ..Self::default()
        }
    }

    /// Query parameters sent to the statements endpoint
    ///
    /// `per_page` and `page` are always sent. The optional filters are sent
    /// only when set and non-zero, so a value bound of exactly zero is
    /// indistinguishable from no bound at all.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("per_page", self.per_page.unwrap_or(DEFAULT_PER_PAGE).to_string()),
            ("page", self.page.unwrap_or(DEFAULT_PAGE).to_string()),
        ];
        if let Some(date) = self.start_date {
            params.push(("start_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(date) = self.end_date {
            params.push(("end_date", date.format("%Y-%m-%d").to_string()));
        }
        if let Some(value) = self.min_value.filter(|v| !v.is_zero()) {
            params.push(("min_value", value.normalize().to_string()));
        }
        if let Some(value) = self.max_value.filter(|v| !v.is_zero()) {
            params.push(("max_value", value.normalize().to_string()));
        }
        if let Some(direction) = self.transfer_type {
            params.push(("transfer_type", direction.as_str().to_string()));
        }
        params
    }
}

/// Request to move money between two of the user's accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransfer {
    pub to_user_bank_account_id: i64,
    pub from_user_bank_account_id: i64,
    /// Numeric transfer type code understood by the server
    pub transfer_type: i32,
    #[serde(with = "super::amount")]
    pub amount_to_transfer: Decimal,
}

impl NewTransfer {
    pub fn new(from: i64, to: i64, transfer_type: i32, amount: Decimal) -> Self {
        Self {
            to_user_bank_account_id: to,
            from_user_bank_account_id: from,
            transfer_type,
            amount_to_transfer: amount,
        }
    }

    /// Validate transfer data
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.amount_to_transfer <= Decimal::ZERO {
            return Err("amount must be greater than zero");
        }
        if self.to_user_bank_account_id == self.from_user_bank_account_id {
            return Err("source and destination accounts must differ");
        }
        Ok(())
    }
}

/// Server acknowledgement of a created transfer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    #[serde(default)]
    pub message: String,
}
