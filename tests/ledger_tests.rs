// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::app::App;
use fintrack::error::StoreError;
use fintrack::ledger::Ledger;
use fintrack::models::{Transaction, TxKind};
use fintrack::storage::MemoryStore;
use rust_decimal::Decimal;

fn setup() -> App {
    App::load(Box::new(MemoryStore::new())).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn balance_is_income_plus_loans_minus_expenses() {
    let today = date(2025, 6, 30);
    let mut app = setup();
    app.add_income(date(2025, 6, 1), Decimal::from(5000), "Salary", None)
        .unwrap();
    app.add_expense(date(2025, 6, 2), Decimal::from(2000), "Groceries", Some("Food"), None, today)
        .unwrap();
    assert_eq!(app.ledger().total_income(), Decimal::from(5000));
    assert_eq!(app.ledger().total_expense(), Decimal::from(2000));
    // No loan rows: the balance degenerates to income minus expense.
    assert_eq!(app.ledger().balance(), Decimal::from(3000));
    assert_eq!(app.ledger().net_income(), Decimal::from(3000));
}

#[test]
fn insufficient_balance_rejects_expense_and_leaves_ledger_unchanged() {
    let today = date(2025, 6, 30);
    let mut app = setup();
    app.add_income(date(2025, 6, 1), Decimal::from(5000), "Salary", None)
        .unwrap();
    app.add_expense(date(2025, 6, 2), Decimal::from(2000), "Groceries", Some("Food"), None, today)
        .unwrap();

    let err = app
        .add_expense(date(2025, 6, 3), Decimal::from(4000), "TV", None, None, today)
        .unwrap_err();
    assert!(matches!(err, StoreError::InsufficientFunds { .. }));
    assert_eq!(app.ledger().transactions().len(), 2);
    assert_eq!(app.ledger().balance(), Decimal::from(3000));
}

#[test]
fn future_dated_expense_is_rejected() {
    let today = date(2025, 6, 30);
    let mut app = setup();
    app.add_income(date(2025, 6, 1), Decimal::from(1000), "Salary", None)
        .unwrap();
    let err = app
        .add_expense(date(2025, 7, 1), Decimal::from(100), "Rent", None, None, today)
        .unwrap_err();
    assert!(matches!(err, StoreError::FutureDate { .. }));
    assert_eq!(app.ledger().transactions().len(), 1);
}

#[test]
fn ids_are_unique_and_monotonic() {
    let mut app = setup();
    let mut last = 0;
    for i in 1..=5 {
        let tx = app
            .add_income(date(2025, 1, i), Decimal::from(10), "Salary", None)
            .unwrap();
        assert!(tx.id > last);
        last = tx.id;
    }
    let ids: Vec<u64> = app.ledger().transactions().iter().map(|t| t.id).collect();
    let mut dedup = ids.clone();
    dedup.dedup();
    assert_eq!(ids, dedup);
}

#[test]
fn totals_are_order_independent() {
    let rows = vec![
        (TxKind::Income, 100),
        (TxKind::Expense, 30),
        (TxKind::Income, 50),
        (TxKind::Loan, 200),
        (TxKind::Expense, 20),
    ];
    let forward: Vec<Transaction> = rows
        .iter()
        .enumerate()
        .map(|(i, (kind, amt))| Transaction {
            id: i as u64 + 1,
            kind: *kind,
            amount: Decimal::from(*amt),
            date: date(2025, 1, 1),
            source: None,
            name: None,
            category: "General".to_string(),
            note: None,
        })
        .collect();
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = Ledger::from_list(forward);
    let b = Ledger::from_list(reversed);
    assert_eq!(a.balance(), b.balance());
    assert_eq!(a.balance(), Decimal::from(300));
}

#[test]
fn edit_expense_overwrites_fields() {
    let today = date(2025, 6, 30);
    let mut app = setup();
    app.add_income(date(2025, 6, 1), Decimal::from(1000), "Salary", None)
        .unwrap();
    let tx = app
        .add_expense(date(2025, 6, 2), Decimal::from(100), "Chai", Some("Food"), None, today)
        .unwrap();

    app.edit_expense(tx.id, date(2025, 6, 3), Decimal::from(150), Some("Coffee"), None, today)
        .unwrap();
    let edited = app.ledger().get(tx.id).unwrap();
    assert_eq!(edited.amount, Decimal::from(150));
    assert_eq!(edited.name.as_deref(), Some("Coffee"));
    assert_eq!(edited.category, "Food");

    let err = app
        .edit_expense(tx.id, date(2025, 7, 1), Decimal::from(150), None, None, today)
        .unwrap_err();
    assert!(matches!(err, StoreError::FutureDate { .. }));
}

#[test]
fn delete_removes_only_the_target_row() {
    let today = date(2025, 6, 30);
    let mut app = setup();
    app.add_income(date(2025, 6, 1), Decimal::from(1000), "Salary", None)
        .unwrap();
    let tx = app
        .add_expense(date(2025, 6, 2), Decimal::from(100), "Chai", None, None, today)
        .unwrap();
    app.delete_transaction(tx.id).unwrap();
    assert_eq!(app.ledger().transactions().len(), 1);
    assert!(matches!(
        app.delete_transaction(tx.id).unwrap_err(),
        StoreError::NotFound { .. }
    ));
}

#[test]
fn replace_all_rejects_duplicate_ids() {
    let mut ledger = Ledger::new();
    let tx = |id| Transaction {
        id,
        kind: TxKind::Income,
        amount: Decimal::from(1),
        date: date(2025, 1, 1),
        source: Some("Salary".to_string()),
        name: None,
        category: "Income".to_string(),
        note: None,
    };
    assert!(ledger.replace_all(vec![tx(1), tx(2)]).is_ok());
    let err = ledger.replace_all(vec![tx(3), tx(3)]).unwrap_err();
    assert!(matches!(err, StoreError::Validation { field: "id", .. }));
    // Failed replacement leaves the previous list in place.
    assert_eq!(ledger.transactions().len(), 2);
}

#[test]
fn deduct_balance_appends_a_guarded_expense_dated_today() {
    let today = date(2025, 6, 30);
    let mut ledger = Ledger::new();
    ledger
        .add_income(date(2025, 6, 1), Decimal::from(1000), "Salary", None)
        .unwrap();

    let tx = ledger
        .deduct_balance(Decimal::from(200), "Ravi", "UPI", Some("lunch"), today)
        .unwrap()
        .clone();
    assert_eq!(tx.kind, TxKind::Expense);
    assert_eq!(tx.date, today);
    assert_eq!(tx.category, "UPI");
    assert_eq!(tx.note.as_deref(), Some("lunch"));

    // Same guards as any other expense.
    let err = ledger
        .deduct_balance(Decimal::from(5000), "Ravi", "UPI", None, today)
        .unwrap_err();
    assert!(matches!(err, StoreError::InsufficientFunds { .. }));
}

#[test]
fn breakdowns_group_and_sort_by_amount() {
    let today = date(2025, 6, 30);
    let mut app = setup();
    app.add_income(date(2025, 6, 1), Decimal::from(9000), "Salary", None)
        .unwrap();
    app.add_income(date(2025, 6, 5), Decimal::from(500), "Freelance", None)
        .unwrap();
    app.add_expense(date(2025, 6, 6), Decimal::from(300), "Lunch", Some("Food"), None, today)
        .unwrap();
    app.add_expense(date(2025, 6, 7), Decimal::from(700), "Train", Some("Travel"), None, today)
        .unwrap();
    app.add_expense(date(2025, 6, 8), Decimal::from(100), "Snacks", Some("Food"), None, today)
        .unwrap();

    let spend = app.ledger().expense_by_category();
    assert_eq!(
        spend,
        vec![
            ("Travel".to_string(), Decimal::from(700)),
            ("Food".to_string(), Decimal::from(400)),
        ]
    );
    let income = app.ledger().income_by_source();
    assert_eq!(income[0].0, "Salary");
}
