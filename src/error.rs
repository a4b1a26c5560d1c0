// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failure writing to or reading from the key-value persistence adapter.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Corrupt data under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Structured result of a store mutation. Every guard lives in the store
/// itself and comes back as a value; the command layer only renders it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error("Insufficient balance: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },

    #[error("Transfer limit is {cap} per transaction (requested {requested})")]
    LimitExceeded { requested: Decimal, cap: Decimal },

    #[error("Date {date} is in the future")]
    FutureDate { date: NaiveDate },

    #[error("No {what} with id {id}")]
    NotFound { what: &'static str, id: u64 },

    #[error("Persistence failure: {0}")]
    Persistence(#[from] PersistenceError),
}

impl StoreError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        StoreError::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Persistence failures leave the in-memory state intact and are reported
    /// as warnings rather than command failures.
    pub fn is_persistence(&self) -> bool {
        matches!(self, StoreError::Persistence(_))
    }
}
