// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Kind of a ledger row. Serialized lowercase, matching the persisted blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
    Loan,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
            TxKind::Loan => "loan",
        }
    }
}

fn default_category() -> String {
    "General".to_string()
}

/// One ledger row. Field names in JSON match the legacy on-disk blobs:
/// `source` is set on income rows, `name` on expense and loan-credit rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: u64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Transaction {
    /// Label shown in tables: income source, or expense/loan name.
    pub fn label(&self) -> &str {
        self.source
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoanStatus {
    Active,
    Completed,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "Active",
            LoanStatus::Completed => "Completed",
        }
    }
}

/// A loan under repayment. `remaining` only ever decreases and is floored at
/// zero; `paid_emis` only ever increases and is bounded by `tenure`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    #[serde(default)]
    pub id: u64,
    pub lender: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub tenure: u32,
    pub start_date: NaiveDate,
    pub emi: Decimal,
    pub remaining: Decimal,
    #[serde(rename = "paidEMIs")]
    pub paid_emis: u32,
    #[serde(rename = "lastEMIPaidDate")]
    pub last_emi_paid: Option<String>,
    pub status: LoanStatus,
}

/// Fields the user supplies when creating or editing a loan.
#[derive(Debug, Clone)]
pub struct LoanForm {
    pub lender: String,
    pub amount: Decimal,
    pub rate: Decimal,
    pub tenure: u32,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
}

impl User {
    /// Greeting name: the part before '@' for an email, else the first word.
    pub fn display_name(&self) -> &str {
        let head = self.name.split('@').next().unwrap_or(&self.name);
        head.split_whitespace().next().unwrap_or(head)
    }
}
