// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use anyhow::Result;

pub fn handle(app: &App, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("transactions", sub)) => export_transactions(app, sub),
        Some(("loans", sub)) => export_loans(app, sub),
        _ => Ok(()),
    }
}

fn export_transactions(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let transactions = app.ledger().transactions();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id", "type", "date", "source", "name", "category", "amount", "note",
            ])?;
            for t in transactions {
                wtr.write_record([
                    t.id.to_string(),
                    t.kind.as_str().to_string(),
                    t.date.to_string(),
                    t.source.clone().unwrap_or_default(),
                    t.name.clone().unwrap_or_default(),
                    t.category.clone(),
                    t.amount.to_string(),
                    t.note.clone().unwrap_or_default(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(transactions)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported transactions to {}", out);
    Ok(())
}

fn export_loans(app: &App, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    let loans = app.loans().loans();

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record([
                "id",
                "lender",
                "amount",
                "rate",
                "tenure",
                "startDate",
                "emi",
                "remaining",
                "paidEMIs",
                "lastEMIPaidDate",
                "status",
            ])?;
            for l in loans {
                wtr.write_record([
                    l.id.to_string(),
                    l.lender.clone(),
                    l.amount.to_string(),
                    l.rate.to_string(),
                    l.tenure.to_string(),
                    l.start_date.to_string(),
                    l.emi.to_string(),
                    l.remaining.to_string(),
                    l.paid_emis.to_string(),
                    l.last_emi_paid.clone().unwrap_or_default(),
                    l.status.as_str().to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(loans)?)?;
        }
        _ => {
            eprintln!("Unknown format: {} (use csv|json)", fmt);
            return Ok(());
        }
    }
    println!("Exported loans to {}", out);
    Ok(())
}
