// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::app::App;
use fintrack::error::StoreError;
use fintrack::loans::{EditPolicy, PaymentOutcome, amortization_schedule, calculate_emi};
use fintrack::models::{LoanForm, LoanStatus, TxKind};
use fintrack::storage::MemoryStore;
use rust_decimal::Decimal;

fn setup() -> App {
    App::load(Box::new(MemoryStore::new())).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn form(lender: &str, amount: i64, rate: &str, tenure: u32) -> LoanForm {
    LoanForm {
        lender: lender.to_string(),
        amount: Decimal::from(amount),
        rate: rate.parse().unwrap(),
        tenure,
        start_date: date(2025, 1, 1),
    }
}

#[test]
fn emi_matches_the_standard_annuity_check() {
    let emi = calculate_emi(Decimal::from(100_000), Decimal::from(12), 12);
    assert_eq!(emi, "8884.88".parse::<Decimal>().unwrap());
}

#[test]
fn zero_rate_falls_back_to_straight_line() {
    let emi = calculate_emi(Decimal::from(120_000), Decimal::ZERO, 12);
    assert_eq!(emi, Decimal::from(10_000));
}

#[test]
fn add_loan_credits_the_ledger() {
    let mut app = setup();
    let loan = app.add_loan(form("HDFC", 50_000, "10", 24)).unwrap();
    assert_eq!(loan.remaining, Decimal::from(50_000));
    assert_eq!(loan.paid_emis, 0);
    assert_eq!(loan.status, LoanStatus::Active);

    let txs = app.ledger().transactions();
    assert_eq!(txs.len(), 1);
    assert_eq!(txs[0].kind, TxKind::Loan);
    assert_eq!(txs[0].name.as_deref(), Some("Loan from HDFC"));
    assert_eq!(txs[0].category, "Loan Credit");
    assert_eq!(txs[0].date, date(2025, 1, 1));
    assert_eq!(app.ledger().balance(), Decimal::from(50_000));
}

#[test]
fn add_loan_validates_every_field() {
    let mut app = setup();
    let mut f = form("", 50_000, "10", 24);
    assert!(matches!(
        app.add_loan(f.clone()).unwrap_err(),
        StoreError::Validation { field: "lender", .. }
    ));
    f.lender = "HDFC".to_string();
    f.amount = Decimal::ZERO;
    assert!(matches!(
        app.add_loan(f.clone()).unwrap_err(),
        StoreError::Validation { field: "amount", .. }
    ));
    f.amount = Decimal::from(50_000);
    f.tenure = 0;
    assert!(matches!(
        app.add_loan(f).unwrap_err(),
        StoreError::Validation { field: "tenure", .. }
    ));
    assert!(app.loans().loans().is_empty());
    assert!(app.ledger().transactions().is_empty());
}

#[test]
fn pay_emi_is_idempotent_within_a_month() {
    let mut app = setup();
    let loan = app.add_loan(form("HDFC", 100_000, "12", 12)).unwrap();

    let first = app.pay_emi(loan.id, date(2025, 2, 5)).unwrap();
    assert!(matches!(first, PaymentOutcome::Paid { .. }));
    let after_first = app.loans().get(loan.id).unwrap().clone();
    assert_eq!(after_first.paid_emis, 1);

    // Later the same month: a no-op, no new expense row.
    let second = app.pay_emi(loan.id, date(2025, 2, 26)).unwrap();
    assert_eq!(second, PaymentOutcome::AlreadyPaidThisMonth);
    let after_second = app.loans().get(loan.id).unwrap();
    assert_eq!(after_second.paid_emis, 1);
    assert_eq!(after_second.remaining, after_first.remaining);
    assert_eq!(after_second.last_emi_paid.as_deref(), Some("2025-02"));
    assert_eq!(app.ledger().transactions().len(), 2);
}

#[test]
fn pay_emi_records_a_loan_emi_expense() {
    let mut app = setup();
    let loan = app.add_loan(form("HDFC", 100_000, "12", 12)).unwrap();
    app.pay_emi(loan.id, date(2025, 2, 5)).unwrap();

    let txs = app.ledger().transactions();
    let emi_tx = txs.last().unwrap();
    assert_eq!(emi_tx.kind, TxKind::Expense);
    assert_eq!(emi_tx.category, "Loan EMI");
    assert_eq!(emi_tx.name.as_deref(), Some("EMI for HDFC"));
    assert_eq!(emi_tx.amount, "8884.88".parse::<Decimal>().unwrap());
    assert_eq!(emi_tx.date, date(2025, 2, 5));
}

#[test]
fn completed_loans_are_terminal() {
    let mut app = setup();
    // Zero rate, two installments of 500 each.
    let loan = app.add_loan(form("Cousin", 1000, "0", 2)).unwrap();

    app.pay_emi(loan.id, date(2025, 1, 10)).unwrap();
    let outcome = app.pay_emi(loan.id, date(2025, 2, 10)).unwrap();
    assert!(matches!(
        outcome,
        PaymentOutcome::Paid {
            status: LoanStatus::Completed,
            ..
        }
    ));
    let done = app.loans().get(loan.id).unwrap().clone();
    assert_eq!(done.remaining, Decimal::ZERO);
    assert_eq!(done.paid_emis, 2);

    // No sequence of further payments changes anything.
    for month in 3..=6 {
        let res = app.pay_emi(loan.id, date(2025, month, 10)).unwrap();
        assert_eq!(res, PaymentOutcome::AlreadyCompleted);
    }
    let still = app.loans().get(loan.id).unwrap();
    assert_eq!(still.remaining, Decimal::ZERO);
    assert_eq!(still.paid_emis, 2);
    assert_eq!(still.status, LoanStatus::Completed);
    // One credit plus exactly two EMI expenses.
    assert_eq!(app.ledger().transactions().len(), 3);
}

#[test]
fn remaining_is_floored_at_zero() {
    let mut app = setup();
    // EMI rounds to 166.67, so the last installment overshoots the balance.
    let loan = app.add_loan(form("Cousin", 1000, "0", 6)).unwrap();
    for month in 1..=6 {
        app.pay_emi(loan.id, date(2025, month, 10)).unwrap();
    }
    let done = app.loans().get(loan.id).unwrap();
    assert_eq!(done.remaining, Decimal::ZERO);
    assert_eq!(done.status, LoanStatus::Completed);
}

#[test]
fn edit_recomputes_emi_but_keeps_remaining_by_default() {
    let mut app = setup();
    let loan = app.add_loan(form("HDFC", 100_000, "12", 12)).unwrap();
    app.pay_emi(loan.id, date(2025, 2, 5)).unwrap();
    let before = app.loans().get(loan.id).unwrap().remaining;

    let edited = app
        .edit_loan(loan.id, form("HDFC", 80_000, "12", 12), EditPolicy::KeepRemaining)
        .unwrap();
    assert_eq!(edited.amount, Decimal::from(80_000));
    assert_eq!(edited.emi, calculate_emi(Decimal::from(80_000), Decimal::from(12), 12));
    // Known desynchronization, preserved deliberately.
    assert_eq!(edited.remaining, before);
    assert_eq!(edited.paid_emis, 1);
}

#[test]
fn edit_with_resync_rebases_remaining_on_the_new_principal() {
    let mut app = setup();
    let loan = app.add_loan(form("HDFC", 100_000, "12", 12)).unwrap();
    app.pay_emi(loan.id, date(2025, 2, 5)).unwrap();

    let edited = app
        .edit_loan(loan.id, form("HDFC", 80_000, "12", 12), EditPolicy::ResyncRemaining)
        .unwrap();
    assert_eq!(edited.remaining, Decimal::from(80_000));
}

#[test]
fn delete_keeps_ledger_history() {
    let mut app = setup();
    let loan = app.add_loan(form("HDFC", 100_000, "12", 12)).unwrap();
    app.pay_emi(loan.id, date(2025, 2, 5)).unwrap();

    app.delete_loan(loan.id).unwrap();
    assert!(app.loans().loans().is_empty());
    // Credit and EMI rows survive the loan itself.
    assert_eq!(app.ledger().transactions().len(), 2);
    assert!(matches!(
        app.pay_emi(loan.id, date(2025, 3, 5)).unwrap_err(),
        StoreError::NotFound { .. }
    ));
}

#[test]
fn deleting_one_loan_does_not_shift_another() {
    let mut app = setup();
    let first = app.add_loan(form("HDFC", 100_000, "12", 12)).unwrap();
    let second = app.add_loan(form("SBI", 50_000, "9", 6)).unwrap();

    app.delete_loan(first.id).unwrap();
    let survivor = app.loans().get(second.id).unwrap();
    assert_eq!(survivor.lender, "SBI");
}

#[test]
fn schedule_principal_sums_to_the_loan_amount() {
    let principal = Decimal::from(100_000);
    let rows = amortization_schedule(principal, Decimal::from(12), 12);
    assert_eq!(rows.len(), 12);
    let total: Decimal = rows.iter().map(|r| r.principal).sum();
    assert_eq!(total, principal);
    assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
    // Interest shrinks as the balance amortizes.
    assert!(rows.first().unwrap().interest > rows.last().unwrap().interest);
}
