// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::commands::warn_if_unsaved;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::Result;
use serde::Serialize;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("delete", sub)) => delete(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub.get_one::<String>("type").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(s) => parse_date(s)?,
        None => today(),
    };
    let category = sub.get_one::<String>("category").map(String::as_str);
    let res = if kind == "income" {
        let source = sub.get_one::<String>("source").map(String::as_str).unwrap_or("");
        app.add_income(date, amount, source, category)
    } else {
        let name = sub.get_one::<String>("name").map(String::as_str).unwrap_or("");
        let note = sub.get_one::<String>("note").map(String::as_str);
        app.add_expense(date, amount, name, category, note, today())
    };
    if let Some(tx) = warn_if_unsaved(res)? {
        println!(
            "Recorded {} {} on {} (id {})",
            tx.kind.as_str(),
            fmt_money(&tx.amount),
            tx.date,
            tx.id
        );
    }
    Ok(())
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app, sub);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.r#type.clone(),
                    r.date.clone(),
                    r.label.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["Id", "Type", "Date", "Label", "Category", "Amount", "Note"],
                rows,
            )
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransactionRow {
    pub id: u64,
    pub r#type: String,
    pub date: String,
    pub label: String,
    pub category: String,
    pub amount: String,
    pub note: String,
}

/// Newest first, filtered by the list flags.
pub fn query_rows(app: &App, sub: &clap::ArgMatches) -> Vec<TransactionRow> {
    let kind = sub.get_one::<String>("type");
    let month = sub.get_one::<String>("month");
    let category = sub.get_one::<String>("category");
    let limit = sub.get_one::<usize>("limit");

    let mut data: Vec<TransactionRow> = app
        .ledger()
        .transactions()
        .iter()
        .rev()
        .filter(|t| kind.is_none_or(|k| t.kind.as_str() == k))
        .filter(|t| month.is_none_or(|mth| t.date.format("%Y-%m").to_string() == *mth))
        .filter(|t| category.is_none_or(|c| &t.category == c))
        .map(|t| TransactionRow {
            id: t.id,
            r#type: t.kind.as_str().to_string(),
            date: t.date.to_string(),
            label: t.label().to_string(),
            category: t.category.clone(),
            amount: fmt_money(&t.amount),
            note: t.note.clone().unwrap_or_default(),
        })
        .collect();
    if let Some(limit) = limit {
        data.truncate(*limit);
    }
    data
}

fn edit(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = parse_date(sub.get_one::<String>("date").unwrap())?;
    let name = sub.get_one::<String>("name").map(String::as_str);
    let category = sub.get_one::<String>("category").map(String::as_str);
    let res = app.edit_expense(id, date, amount, name, category, today());
    if let Some(tx) = warn_if_unsaved(res)? {
        println!("Updated expense {} ({})", tx.id, fmt_money(&tx.amount));
    }
    Ok(())
}

fn delete(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap();
    let res = app.delete_transaction(id);
    if let Some(tx) = warn_if_unsaved(res)? {
        println!("Deleted transaction {} ({})", tx.id, tx.label());
    }
    Ok(())
}
