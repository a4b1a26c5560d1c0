// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{Transaction, TxKind};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

/// Per-transaction transfer cap, in the display currency.
pub static TRANSFER_CAP: Lazy<Decimal> = Lazy::new(|| Decimal::from(100_000));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMethod {
    Bank,
    Upi,
    Mobile,
}

impl TransferMethod {
    /// Category recorded on the resulting expense row.
    pub fn category(&self) -> &'static str {
        match self {
            TransferMethod::Bank => "Bank Transfer",
            TransferMethod::Upi => "UPI",
            TransferMethod::Mobile => "Mobile Transfer",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferMethod::Bank => "bank",
            TransferMethod::Upi => "upi",
            TransferMethod::Mobile => "mobile",
        }
    }
}

impl FromStr for TransferMethod {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, StoreError> {
        match s.to_lowercase().as_str() {
            "bank" => Ok(TransferMethod::Bank),
            "upi" => Ok(TransferMethod::Upi),
            "mobile" => Ok(TransferMethod::Mobile),
            other => Err(StoreError::validation(
                "method",
                format!("'{}' is not one of bank, upi, mobile", other),
            )),
        }
    }
}

/// The transaction list plus derived totals. Insertion order is preserved;
/// ids come from a monotonic counter and are unique but not a sort key.
#[derive(Debug, Default)]
pub struct Ledger {
    transactions: Vec<Transaction>,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Ledger {
            transactions: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild from a persisted list, seeding the id counter past every
    /// existing id.
    pub fn from_list(transactions: Vec<Transaction>) -> Self {
        let next_id = transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Ledger {
            transactions,
            next_id,
        }
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn get(&self, id: u64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn check_amount(amount: Decimal) -> Result<(), StoreError> {
        if amount <= Decimal::ZERO {
            return Err(StoreError::validation(
                "amount",
                format!("{} is not greater than 0", amount),
            ));
        }
        Ok(())
    }

    pub fn add_income(
        &mut self,
        date: NaiveDate,
        amount: Decimal,
        source: &str,
        category: Option<&str>,
    ) -> Result<&Transaction, StoreError> {
        Self::check_amount(amount)?;
        let id = self.alloc_id();
        self.transactions.push(Transaction {
            id,
            kind: TxKind::Income,
            amount,
            date,
            source: Some(source.to_string()),
            name: None,
            category: category.unwrap_or("Income").to_string(),
            note: None,
        });
        Ok(self.transactions.last().unwrap())
    }

    /// Append an expense. Rejects future dates and amounts above the
    /// available balance.
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        amount: Decimal,
        name: &str,
        category: Option<&str>,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Result<&Transaction, StoreError> {
        Self::check_amount(amount)?;
        if date > today {
            return Err(StoreError::FutureDate { date });
        }
        let available = self.balance();
        if amount > available {
            return Err(StoreError::InsufficientFunds {
                requested: amount,
                available,
            });
        }
        let id = self.alloc_id();
        self.transactions.push(Transaction {
            id,
            kind: TxKind::Expense,
            amount,
            date,
            source: None,
            name: Some(name.to_string()),
            category: category.unwrap_or("General").to_string(),
            note: note.map(|s| s.to_string()),
        });
        Ok(self.transactions.last().unwrap())
    }

    /// Credit entry recorded when a loan is taken.
    pub fn add_loan_credit(
        &mut self,
        date: NaiveDate,
        amount: Decimal,
        lender: &str,
    ) -> Result<&Transaction, StoreError> {
        Self::check_amount(amount)?;
        let id = self.alloc_id();
        self.transactions.push(Transaction {
            id,
            kind: TxKind::Loan,
            amount,
            date,
            source: None,
            name: Some(format!("Loan from {}", lender)),
            category: "Loan Credit".to_string(),
            note: None,
        });
        Ok(self.transactions.last().unwrap())
    }

    /// EMI payments bypass the balance guard: an installment falls due
    /// whether or not the ledger can cover it.
    pub(crate) fn record_emi(&mut self, lender: &str, emi: Decimal, today: NaiveDate) -> u64 {
        let id = self.alloc_id();
        self.transactions.push(Transaction {
            id,
            kind: TxKind::Expense,
            amount: emi,
            date: today,
            source: None,
            name: Some(format!("EMI for {}", lender)),
            category: "Loan EMI".to_string(),
            note: None,
        });
        id
    }

    /// Convenience append of an expense dated today, with all of
    /// `add_expense`'s guards.
    pub fn deduct_balance(
        &mut self,
        amount: Decimal,
        name: &str,
        category: &str,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Result<&Transaction, StoreError> {
        self.add_expense(today, amount, name, Some(category), note, today)
    }

    /// Transfer out: validates the per-transaction cap before the balance
    /// guard, then deducts an expense dated today.
    pub fn transfer(
        &mut self,
        amount: Decimal,
        recipient: &str,
        method: TransferMethod,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Result<&Transaction, StoreError> {
        if recipient.trim().is_empty() {
            return Err(StoreError::validation("recipient", "must not be empty"));
        }
        Self::check_amount(amount)?;
        if amount > *TRANSFER_CAP {
            return Err(StoreError::LimitExceeded {
                requested: amount,
                cap: *TRANSFER_CAP,
            });
        }
        self.deduct_balance(amount, recipient, method.category(), note, today)
    }

    /// Edit an expense row in place. Only expenses are editable; income and
    /// loan-credit rows are append-only.
    pub fn edit_expense(
        &mut self,
        id: u64,
        date: NaiveDate,
        amount: Decimal,
        name: Option<&str>,
        category: Option<&str>,
        today: NaiveDate,
    ) -> Result<&Transaction, StoreError> {
        Self::check_amount(amount)?;
        if date > today {
            return Err(StoreError::FutureDate { date });
        }
        let tx = self
            .transactions
            .iter_mut()
            .find(|t| t.id == id && t.kind == TxKind::Expense)
            .ok_or(StoreError::NotFound {
                what: "expense",
                id,
            })?;
        tx.date = date;
        tx.amount = amount;
        if let Some(n) = name {
            tx.name = Some(n.to_string());
        }
        if let Some(c) = category {
            tx.category = c.to_string();
        }
        Ok(tx)
    }

    pub fn delete(&mut self, id: u64) -> Result<Transaction, StoreError> {
        let pos = self
            .transactions
            .iter()
            .position(|t| t.id == id)
            .ok_or(StoreError::NotFound {
                what: "transaction",
                id,
            })?;
        Ok(self.transactions.remove(pos))
    }

    /// Wholesale replacement, used by bulk edit flows. Ids must stay unique;
    /// the counter is re-seeded past the highest id.
    pub fn replace_all(&mut self, transactions: Vec<Transaction>) -> Result<(), StoreError> {
        let mut seen = std::collections::HashSet::new();
        for t in &transactions {
            if !seen.insert(t.id) {
                return Err(StoreError::validation(
                    "id",
                    format!("duplicate transaction id {}", t.id),
                ));
            }
        }
        self.next_id = transactions.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        self.transactions = transactions;
        Ok(())
    }

    fn sum_kind(&self, kind: TxKind) -> Decimal {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    pub fn total_income(&self) -> Decimal {
        self.sum_kind(TxKind::Income)
    }

    pub fn total_expense(&self) -> Decimal {
        self.sum_kind(TxKind::Expense)
    }

    pub fn total_loan(&self) -> Decimal {
        self.sum_kind(TxKind::Loan)
    }

    /// Income minus expenses, ignoring loan credits.
    pub fn net_income(&self) -> Decimal {
        self.total_income() - self.total_expense()
    }

    /// The authoritative balance: loan credits count as inflows, since every
    /// EMI repayment is recorded as an expense.
    pub fn balance(&self) -> Decimal {
        self.total_income() + self.total_loan() - self.total_expense()
    }

    fn breakdown<F>(&self, kind: TxKind, key: F) -> Vec<(String, Decimal)>
    where
        F: Fn(&Transaction) -> String,
    {
        let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
        for t in self.transactions.iter().filter(|t| t.kind == kind) {
            *agg.entry(key(t)).or_insert(Decimal::ZERO) += t.amount;
        }
        let mut items: Vec<_> = agg.into_iter().collect();
        items.sort_by(|a, b| b.1.cmp(&a.1));
        items
    }

    pub fn expense_by_category(&self) -> Vec<(String, Decimal)> {
        self.breakdown(TxKind::Expense, |t| t.category.clone())
    }

    pub fn income_by_source(&self) -> Vec<(String, Decimal)> {
        self.breakdown(TxKind::Income, |t| {
            t.source
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "(unknown)".to_string())
        })
    }

    pub fn loan_by_lender(&self) -> Vec<(String, Decimal)> {
        self.breakdown(TxKind::Loan, |t| {
            t.name
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "(unknown)".to_string())
        })
    }
}
