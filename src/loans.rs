// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::StoreError;
use crate::models::{Loan, LoanForm, LoanStatus};
use chrono::NaiveDate;
use rust_decimal::{Decimal, MathematicalOps};

/// Reducing-balance annuity installment, rounded to 2 decimal places.
/// A zero rate degenerates to straight-line principal repayment; the annuity
/// formula itself would divide by zero there.
pub fn calculate_emi(principal: Decimal, annual_rate_pct: Decimal, tenure_months: u32) -> Decimal {
    if tenure_months == 0 {
        return Decimal::ZERO;
    }
    let n = Decimal::from(tenure_months);
    let monthly_rate = annual_rate_pct / Decimal::from(1200);
    if monthly_rate.is_zero() {
        return (principal / n).round_dp(2);
    }
    let factor = (Decimal::ONE + monthly_rate).powi(tenure_months as i64);
    (principal * monthly_rate * factor / (factor - Decimal::ONE)).round_dp(2)
}

/// One month of a level-pay schedule.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub principal: Decimal,
    pub interest: Decimal,
    pub balance: Decimal,
}

/// Month-by-month principal/interest split. The final row closes the balance
/// exactly, so the principal column sums to the original principal.
pub fn amortization_schedule(
    principal: Decimal,
    annual_rate_pct: Decimal,
    tenure_months: u32,
) -> Vec<ScheduleRow> {
    let emi = calculate_emi(principal, annual_rate_pct, tenure_months);
    let monthly_rate = annual_rate_pct / Decimal::from(1200);
    let mut rows = Vec::with_capacity(tenure_months as usize);
    let mut balance = principal;
    for month in 1..=tenure_months {
        let interest = (balance * monthly_rate).round_dp(2);
        let principal_part = if month == tenure_months {
            balance
        } else {
            (emi - interest).min(balance)
        };
        balance -= principal_part;
        rows.push(ScheduleRow {
            month,
            principal: principal_part,
            interest,
            balance,
        });
    }
    rows
}

/// What `pay_emi` did. The two no-op cases are reported, not errors: asking
/// to pay a settled or already-serviced loan is a valid question.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    Paid {
        emi: Decimal,
        remaining: Decimal,
        status: LoanStatus,
    },
    AlreadyPaidThisMonth,
    AlreadyCompleted,
}

/// How a loan edit treats `remaining` when the principal changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditPolicy {
    /// Legacy behavior: `remaining` is untouched by edits.
    #[default]
    KeepRemaining,
    /// Reset `remaining` to the new principal.
    ResyncRemaining,
}

pub fn month_key(date: NaiveDate) -> String {
    date.format("%Y-%m").to_string()
}

/// The loan list. Loans carry stable ids; list order is insertion order.
#[derive(Debug, Default)]
pub struct LoanBook {
    loans: Vec<Loan>,
    next_id: u64,
}

impl LoanBook {
    pub fn new() -> Self {
        LoanBook {
            loans: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild from a persisted list. Legacy rows (deserialized with id 0)
    /// are assigned fresh ids in list order.
    pub fn from_list(mut loans: Vec<Loan>) -> Self {
        let mut next_id = loans.iter().map(|l| l.id).max().unwrap_or(0) + 1;
        for loan in loans.iter_mut().filter(|l| l.id == 0) {
            loan.id = next_id;
            next_id += 1;
        }
        LoanBook { loans, next_id }
    }

    pub fn loans(&self) -> &[Loan] {
        &self.loans
    }

    pub fn get(&self, id: u64) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut Loan, StoreError> {
        self.loans
            .iter_mut()
            .find(|l| l.id == id)
            .ok_or(StoreError::NotFound { what: "loan", id })
    }

    fn validate(form: &LoanForm) -> Result<(), StoreError> {
        if form.lender.trim().is_empty() {
            return Err(StoreError::validation("lender", "must not be empty"));
        }
        if form.amount <= Decimal::ZERO {
            return Err(StoreError::validation(
                "amount",
                format!("{} is not greater than 0", form.amount),
            ));
        }
        if form.rate < Decimal::ZERO {
            return Err(StoreError::validation(
                "rate",
                format!("{} is negative", form.rate),
            ));
        }
        if form.tenure == 0 {
            return Err(StoreError::validation("tenure", "must be at least 1 month"));
        }
        Ok(())
    }

    pub fn add(&mut self, form: LoanForm) -> Result<&Loan, StoreError> {
        Self::validate(&form)?;
        let emi = calculate_emi(form.amount, form.rate, form.tenure);
        let id = self.next_id;
        self.next_id += 1;
        self.loans.push(Loan {
            id,
            lender: form.lender,
            amount: form.amount,
            rate: form.rate,
            tenure: form.tenure,
            start_date: form.start_date,
            emi,
            remaining: form.amount,
            paid_emis: 0,
            last_emi_paid: None,
            status: LoanStatus::Active,
        });
        Ok(self.loans.last().unwrap())
    }

    /// Overwrite the editable fields and recompute the installment.
    /// `remaining` and `paid_emis` are never recomputed from history; the
    /// policy only decides whether `remaining` follows a changed principal.
    pub fn edit(
        &mut self,
        id: u64,
        form: LoanForm,
        policy: EditPolicy,
    ) -> Result<&Loan, StoreError> {
        Self::validate(&form)?;
        let loan = self.get_mut(id)?;
        let principal_changed = loan.amount != form.amount;
        loan.lender = form.lender;
        loan.amount = form.amount;
        loan.rate = form.rate;
        loan.tenure = form.tenure;
        loan.start_date = form.start_date;
        loan.emi = calculate_emi(loan.amount, loan.rate, loan.tenure);
        if policy == EditPolicy::ResyncRemaining && principal_changed {
            loan.remaining = loan.amount;
            loan.status = if loan.remaining <= Decimal::ZERO || loan.paid_emis >= loan.tenure {
                LoanStatus::Completed
            } else {
                LoanStatus::Active
            };
        }
        Ok(&*loan)
    }

    /// Remove a loan. Its ledger entries are history and stay behind.
    pub fn delete(&mut self, id: u64) -> Result<Loan, StoreError> {
        let pos = self
            .loans
            .iter()
            .position(|l| l.id == id)
            .ok_or(StoreError::NotFound { what: "loan", id })?;
        Ok(self.loans.remove(pos))
    }

    /// Apply one installment. Idempotent within a calendar month, and a
    /// completed loan never transitions again.
    pub fn pay_emi(&mut self, id: u64, today: NaiveDate) -> Result<PaymentOutcome, StoreError> {
        let month = month_key(today);
        let loan = self.get_mut(id)?;
        if loan.status == LoanStatus::Completed {
            return Ok(PaymentOutcome::AlreadyCompleted);
        }
        if loan.last_emi_paid.as_deref() == Some(month.as_str()) {
            return Ok(PaymentOutcome::AlreadyPaidThisMonth);
        }
        loan.remaining = (loan.remaining - loan.emi).max(Decimal::ZERO);
        loan.paid_emis += 1;
        loan.last_emi_paid = Some(month);
        loan.status = if loan.remaining <= Decimal::ZERO || loan.paid_emis >= loan.tenure {
            LoanStatus::Completed
        } else {
            LoanStatus::Active
        };
        Ok(PaymentOutcome::Paid {
            emi: loan.emi,
            remaining: loan.remaining,
            status: loan.status,
        })
    }
}
