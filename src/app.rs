// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{PersistenceError, StoreError};
use crate::ledger::{Ledger, TransferMethod};
use crate::loans::{EditPolicy, LoanBook, PaymentOutcome};
use crate::models::{Loan, LoanForm, Transaction, User};
use crate::session::Session;
use crate::storage::{self, KEY_LOANS, KEY_SESSION, KEY_TRANSACTIONS, KeyValueStore};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The whole application state: the three stores plus the injected
/// persistence adapter. Every mutation applies in memory first, then writes
/// through; a failed write comes back as `StoreError::Persistence` with the
/// in-memory change kept.
pub struct App {
    store: Box<dyn KeyValueStore>,
    ledger: Ledger,
    loans: LoanBook,
    session: Session,
}

impl App {
    pub fn load(store: Box<dyn KeyValueStore>) -> Result<Self, StoreError> {
        let transactions: Vec<Transaction> = storage::load_list(store.as_ref(), KEY_TRANSACTIONS)?;
        let loans: Vec<Loan> = storage::load_list(store.as_ref(), KEY_LOANS)?;
        let user = load_session(store.as_ref())?;
        Ok(App {
            ledger: Ledger::from_list(transactions),
            loans: LoanBook::from_list(loans),
            session: Session::from_user(user),
            store,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn loans(&self) -> &LoanBook {
        &self.loans
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn persist_transactions(&mut self) -> Result<(), StoreError> {
        storage::save_list(
            self.store.as_mut(),
            KEY_TRANSACTIONS,
            self.ledger.transactions(),
        )?;
        Ok(())
    }

    fn persist_loans(&mut self) -> Result<(), StoreError> {
        storage::save_list(self.store.as_mut(), KEY_LOANS, self.loans.loans())?;
        Ok(())
    }

    fn persist_session(&mut self) -> Result<(), StoreError> {
        let text =
            serde_json::to_string(&self.session.current()).map_err(|e| PersistenceError::Corrupt {
                key: KEY_SESSION.to_string(),
                source: e,
            })?;
        self.store.set(KEY_SESSION, &text)?;
        Ok(())
    }

    // Ledger operations

    pub fn add_income(
        &mut self,
        date: NaiveDate,
        amount: Decimal,
        source: &str,
        category: Option<&str>,
    ) -> Result<Transaction, StoreError> {
        let tx = self.ledger.add_income(date, amount, source, category)?.clone();
        self.persist_transactions()?;
        Ok(tx)
    }

    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        amount: Decimal,
        name: &str,
        category: Option<&str>,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Result<Transaction, StoreError> {
        let tx = self
            .ledger
            .add_expense(date, amount, name, category, note, today)?
            .clone();
        self.persist_transactions()?;
        Ok(tx)
    }

    pub fn edit_expense(
        &mut self,
        id: u64,
        date: NaiveDate,
        amount: Decimal,
        name: Option<&str>,
        category: Option<&str>,
        today: NaiveDate,
    ) -> Result<Transaction, StoreError> {
        let tx = self
            .ledger
            .edit_expense(id, date, amount, name, category, today)?
            .clone();
        self.persist_transactions()?;
        Ok(tx)
    }

    pub fn delete_transaction(&mut self, id: u64) -> Result<Transaction, StoreError> {
        let tx = self.ledger.delete(id)?;
        self.persist_transactions()?;
        Ok(tx)
    }

    pub fn replace_transactions(
        &mut self,
        transactions: Vec<Transaction>,
    ) -> Result<(), StoreError> {
        self.ledger.replace_all(transactions)?;
        self.persist_transactions()
    }

    pub fn transfer(
        &mut self,
        amount: Decimal,
        recipient: &str,
        method: TransferMethod,
        note: Option<&str>,
        today: NaiveDate,
    ) -> Result<Transaction, StoreError> {
        let tx = self
            .ledger
            .transfer(amount, recipient, method, note, today)?
            .clone();
        self.persist_transactions()?;
        Ok(tx)
    }

    // Loan operations

    /// Record a new loan and credit its principal to the ledger.
    pub fn add_loan(&mut self, form: LoanForm) -> Result<Loan, StoreError> {
        let loan = self.loans.add(form)?.clone();
        self.ledger
            .add_loan_credit(loan.start_date, loan.amount, &loan.lender)?;
        self.persist_loans()?;
        self.persist_transactions()?;
        Ok(loan)
    }

    pub fn edit_loan(
        &mut self,
        id: u64,
        form: LoanForm,
        policy: EditPolicy,
    ) -> Result<Loan, StoreError> {
        let loan = self.loans.edit(id, form, policy)?.clone();
        self.persist_loans()?;
        Ok(loan)
    }

    /// Delete a loan. Its loan-credit and EMI rows stay in the ledger.
    pub fn delete_loan(&mut self, id: u64) -> Result<Loan, StoreError> {
        let loan = self.loans.delete(id)?;
        self.persist_loans()?;
        Ok(loan)
    }

    /// Pay one installment and, if anything was actually paid, record the
    /// matching expense row. The no-op outcomes change nothing and write
    /// nothing.
    pub fn pay_emi(&mut self, id: u64, today: NaiveDate) -> Result<PaymentOutcome, StoreError> {
        let lender = self
            .loans
            .get(id)
            .ok_or(StoreError::NotFound { what: "loan", id })?
            .lender
            .clone();
        let outcome = self.loans.pay_emi(id, today)?;
        if let PaymentOutcome::Paid { emi, .. } = &outcome {
            self.ledger.record_emi(&lender, *emi, today);
            self.persist_loans()?;
            self.persist_transactions()?;
        }
        Ok(outcome)
    }

    // Session operations

    pub fn login(&mut self, identifier: &str) -> Result<User, StoreError> {
        let user = self.session.login(identifier)?.clone();
        self.persist_session()?;
        Ok(user)
    }

    pub fn signup(&mut self, identifier: &str) -> Result<User, StoreError> {
        let user = self.session.signup(identifier)?.clone();
        self.persist_session()?;
        Ok(user)
    }

    pub fn logout(&mut self) -> Result<Option<User>, StoreError> {
        let user = self.session.logout();
        self.persist_session()?;
        Ok(user)
    }
}

fn load_session(store: &dyn KeyValueStore) -> Result<Option<User>, StoreError> {
    let Some(text) = store.get(KEY_SESSION)? else {
        return Ok(None);
    };
    let user = serde_json::from_str(&text).map_err(|e| PersistenceError::Corrupt {
        key: KEY_SESSION.to_string(),
        source: e,
    })?;
    Ok(user)
}
