// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::commands::warn_if_unsaved;
use crate::ledger::TransferMethod;
use crate::models::TxKind;
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table, today};
use anyhow::Result;
use serde::Serialize;

const TRANSFER_CATEGORIES: [&str; 3] = ["Bank Transfer", "UPI", "Mobile Transfer"];

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("send", sub)) => send(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn send(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let recipient = sub.get_one::<String>("recipient").unwrap();
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let method: TransferMethod = sub.get_one::<String>("method").unwrap().parse()?;
    let note = sub.get_one::<String>("note").map(String::as_str);

    let res = app.transfer(amount, recipient, method, note, today());
    if let Some(tx) = warn_if_unsaved(res)? {
        println!(
            "{} has been transferred via {} to {}",
            fmt_money(&tx.amount),
            method.as_str().to_uppercase(),
            recipient
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct TransferRow {
    pub id: u64,
    pub date: String,
    pub recipient: String,
    pub method: String,
    pub amount: String,
    pub note: String,
}

/// Transfers are plain expense rows; what marks them is the method category.
/// Any expense filed under one of the method categories lists here, however
/// it was entered.
pub fn query_rows(app: &App) -> Vec<TransferRow> {
    app.ledger()
        .transactions()
        .iter()
        .rev()
        .filter(|t| t.kind == TxKind::Expense && TRANSFER_CATEGORIES.contains(&t.category.as_str()))
        .map(|t| TransferRow {
            id: t.id,
            date: t.date.to_string(),
            recipient: t.label().to_string(),
            method: t.category.clone(),
            amount: fmt_money(&t.amount),
            note: t.note.clone().unwrap_or_default(),
        })
        .collect()
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.recipient.clone(),
                    r.method.clone(),
                    r.amount.clone(),
                    r.note.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Id", "Date", "Recipient", "Method", "Amount", "Note"], rows)
        );
    }
    Ok(())
}
