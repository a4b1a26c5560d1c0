// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::models::TxKind;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("summary", sub)) => summary(app, sub)?,
        Some(("spend-by-category", sub)) => spend_by_category(app, sub)?,
        Some(("income-by-source", sub)) => {
            breakdown(app.ledger().income_by_source(), "Source", sub)?
        }
        Some(("loan-by-lender", sub)) => breakdown(app.ledger().loan_by_lender(), "Lender", sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct Summary {
    income: Decimal,
    expense: Decimal,
    loan: Decimal,
    balance: Decimal,
}

fn summary(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let ledger = app.ledger();
    let data = Summary {
        income: ledger.total_income(),
        expense: ledger.total_expense(),
        loan: ledger.total_loan(),
        balance: ledger.balance(),
    };
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if let Some(user) = app.session().current() {
            println!("Welcome, {}", user.display_name());
        }
        let rows = vec![
            vec!["Total Income".to_string(), fmt_money(&data.income)],
            vec!["Total Expense".to_string(), fmt_money(&data.expense)],
            vec!["Total Loan Taken".to_string(), fmt_money(&data.loan)],
            vec!["Balance".to_string(), fmt_money(&data.balance)],
        ];
        println!("{}", pretty_table(&["", "Amount"], rows));
    }
    Ok(())
}

fn spend_by_category(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let items = match sub.get_one::<String>("month") {
        Some(month) => {
            let month = crate::utils::parse_month(month)?;
            let mut agg: BTreeMap<String, Decimal> = BTreeMap::new();
            for t in app
                .ledger()
                .transactions()
                .iter()
                .filter(|t| t.kind == TxKind::Expense)
                .filter(|t| t.date.format("%Y-%m").to_string() == month)
            {
                *agg.entry(t.category.clone()).or_insert(Decimal::ZERO) += t.amount;
            }
            let mut items: Vec<_> = agg.into_iter().collect();
            items.sort_by(|a, b| b.1.cmp(&a.1));
            items
        }
        None => app.ledger().expense_by_category(),
    };
    breakdown(items, "Category", sub)
}

fn breakdown(items: Vec<(String, Decimal)>, header: &str, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data: Vec<Vec<String>> = items
        .into_iter()
        .map(|(label, amount)| vec![label, fmt_money(&amount)])
        .collect();
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        println!("{}", pretty_table(&[header, "Amount"], data));
    }
    Ok(())
}
