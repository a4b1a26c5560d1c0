// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::commands::warn_if_unsaved;
use crate::error::StoreError;
use crate::loans::{EditPolicy, PaymentOutcome};
use crate::models::LoanForm;
use crate::utils::{fmt_money, maybe_print_json, parse_date, parse_decimal, pretty_table, today};
use anyhow::Result;
use serde::Serialize;

pub fn handle(app: &mut App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(app, sub)?,
        Some(("list", sub)) => list(app, sub)?,
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("delete", sub)) => delete(app, sub)?,
        Some(("pay-emi", sub)) => pay_emi(app, sub)?,
        _ => {}
    }
    Ok(())
}

fn add(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let form = LoanForm {
        lender: sub.get_one::<String>("lender").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        rate: parse_decimal(sub.get_one::<String>("rate").unwrap())?,
        tenure: *sub.get_one::<u32>("tenure").unwrap(),
        start_date: parse_date(sub.get_one::<String>("start-date").unwrap())?,
    };
    if let Some(loan) = warn_if_unsaved(app.add_loan(form))? {
        println!(
            "Added loan {} from {}: {} over {} months, EMI {}",
            loan.id,
            loan.lender,
            fmt_money(&loan.amount),
            loan.tenure,
            fmt_money(&loan.emi)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct LoanRow {
    pub id: u64,
    pub lender: String,
    pub amount: String,
    pub rate: String,
    pub tenure: u32,
    pub emi: String,
    pub start_date: String,
    pub remaining: String,
    pub paid_emis: u32,
    pub status: String,
}

pub fn query_rows(app: &App) -> Vec<LoanRow> {
    app.loans()
        .loans()
        .iter()
        .map(|l| LoanRow {
            id: l.id,
            lender: l.lender.clone(),
            amount: fmt_money(&l.amount),
            rate: format!("{}%", l.rate),
            tenure: l.tenure,
            emi: fmt_money(&l.emi),
            start_date: l.start_date.to_string(),
            remaining: fmt_money(&l.remaining),
            paid_emis: l.paid_emis,
            status: l.status.as_str().to_string(),
        })
        .collect()
}

fn list(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(app);
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        if data.is_empty() {
            println!("No loans added yet.");
            return Ok(());
        }
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|l| {
                vec![
                    l.id.to_string(),
                    l.lender.clone(),
                    l.amount.clone(),
                    l.rate.clone(),
                    l.tenure.to_string(),
                    l.emi.clone(),
                    l.start_date.clone(),
                    l.remaining.clone(),
                    format!("{}/{}", l.paid_emis, l.tenure),
                    l.status.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &[
                    "Id", "Lender", "Amount", "Rate", "Tenure", "EMI", "Start", "Remaining",
                    "Paid", "Status",
                ],
                rows,
            )
        );
    }
    Ok(())
}

fn edit(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap();
    let current = app
        .loans()
        .get(id)
        .ok_or(StoreError::NotFound { what: "loan", id })?;
    let form = LoanForm {
        lender: sub
            .get_one::<String>("lender")
            .cloned()
            .unwrap_or_else(|| current.lender.clone()),
        amount: match sub.get_one::<String>("amount") {
            Some(s) => parse_decimal(s)?,
            None => current.amount,
        },
        rate: match sub.get_one::<String>("rate") {
            Some(s) => parse_decimal(s)?,
            None => current.rate,
        },
        tenure: sub.get_one::<u32>("tenure").copied().unwrap_or(current.tenure),
        start_date: match sub.get_one::<String>("start-date") {
            Some(s) => parse_date(s)?,
            None => current.start_date,
        },
    };
    let policy = if sub.get_flag("resync-remaining") {
        EditPolicy::ResyncRemaining
    } else {
        EditPolicy::KeepRemaining
    };
    if let Some(loan) = warn_if_unsaved(app.edit_loan(id, form, policy))? {
        println!(
            "Updated loan {}: EMI {}, remaining {}",
            loan.id,
            fmt_money(&loan.emi),
            fmt_money(&loan.remaining)
        );
    }
    Ok(())
}

fn delete(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap();
    if let Some(loan) = warn_if_unsaved(app.delete_loan(id))? {
        println!("Deleted loan {} from {}", loan.id, loan.lender);
    }
    Ok(())
}

fn pay_emi(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<u64>("id").unwrap();
    let now = today();
    match warn_if_unsaved(app.pay_emi(id, now))? {
        Some(PaymentOutcome::Paid {
            emi,
            remaining,
            status,
        }) => {
            println!(
                "Paid EMI of {}; remaining {} ({})",
                fmt_money(&emi),
                fmt_money(&remaining),
                status.as_str()
            );
        }
        Some(PaymentOutcome::AlreadyPaidThisMonth) => {
            println!("EMI already paid for {}", now.format("%Y-%m"));
        }
        Some(PaymentOutcome::AlreadyCompleted) => {
            println!("Loan {} is already completed; nothing to pay", id);
        }
        None => {}
    }
    Ok(())
}
