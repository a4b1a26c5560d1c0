// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use fintrack::app::App;
use fintrack::commands::{loans, transactions};
use fintrack::models::LoanForm;
use fintrack::storage::MemoryStore;
use fintrack::{cli, utils};
use rust_decimal::Decimal;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn setup() -> App {
    let mut app = App::load(Box::new(MemoryStore::new())).unwrap();
    for i in 1..=3 {
        app.add_income(date(2025, 1, i), Decimal::from(100 * i as i64), "Salary", None)
            .unwrap();
    }
    app
}

#[test]
fn list_limit_respected() {
    let app = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from(["fintrack", "tx", "list", "--limit", "2"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&app, list_m);
            assert_eq!(rows.len(), 2);
            // Newest first.
            assert_eq!(rows[0].date, "2025-01-03");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_filters_by_type_and_month() {
    let mut app = setup();
    app.add_expense(
        date(2025, 2, 1),
        Decimal::from(50),
        "Chai",
        Some("Food"),
        None,
        date(2025, 2, 28),
    )
    .unwrap();

    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "fintrack", "tx", "list", "--type", "expense", "--month", "2025-02",
    ]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let rows = transactions::query_rows(&app, list_m);
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].r#type, "expense");
            assert_eq!(rows[0].category, "Food");
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn tx_add_requires_an_amount() {
    let res = cli::build_cli().try_get_matches_from(["fintrack", "tx", "add", "--source", "Salary"]);
    assert!(res.is_err());
}

#[test]
fn loan_add_handler_creates_the_loan() {
    let mut app = setup();
    let cli = cli::build_cli();
    let matches = cli.get_matches_from([
        "fintrack",
        "loan",
        "add",
        "--lender",
        "HDFC",
        "--amount",
        "100000",
        "--rate",
        "12",
        "--tenure",
        "12",
        "--start-date",
        "2025-01-01",
    ]);
    if let Some(("loan", loan_m)) = matches.subcommand() {
        loans::handle(&mut app, loan_m).unwrap();
    } else {
        panic!("no loan subcommand");
    }
    assert_eq!(app.loans().loans().len(), 1);
    assert_eq!(
        app.loans().loans()[0].emi,
        "8884.88".parse::<Decimal>().unwrap()
    );
}

#[test]
fn transfer_method_is_validated_at_parse_time() {
    let res = cli::build_cli().try_get_matches_from([
        "fintrack", "transfer", "send", "--recipient", "Ravi", "--amount", "100", "--method",
        "cheque",
    ]);
    assert!(res.is_err());
}

#[test]
fn loan_row_presentation_uses_rupee_formatting() {
    let mut app = setup();
    app.add_loan(LoanForm {
        lender: "HDFC".to_string(),
        amount: Decimal::from(100_000),
        rate: Decimal::from(12),
        tenure: 12,
        start_date: date(2025, 1, 1),
    })
    .unwrap();
    let rows = loans::query_rows(&app);
    assert_eq!(rows[0].amount, "₹1,00,000.00");
    assert_eq!(rows[0].rate, "12%");
}

#[test]
fn money_formatting_groups_indian_style() {
    assert_eq!(utils::fmt_money(&Decimal::from(100_000)), "₹1,00,000.00");
    assert_eq!(utils::fmt_money(&Decimal::from(999)), "₹999.00");
    assert_eq!(
        utils::fmt_money(&"8884.88".parse::<Decimal>().unwrap()),
        "₹8,884.88"
    );
    assert_eq!(
        utils::fmt_money(&Decimal::from(12_345_678)),
        "₹1,23,45,678.00"
    );
    assert_eq!(utils::fmt_money(&Decimal::from(-2500)), "-₹2,500.00");
}
