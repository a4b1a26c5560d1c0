// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::loans::{amortization_schedule, calculate_emi};
use crate::utils::{fmt_money, maybe_print_json, parse_decimal, pretty_table};
use anyhow::Result;
use rust_decimal::Decimal;

pub fn handle(m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("calc", sub)) => calc(sub)?,
        Some(("schedule", sub)) => schedule(sub)?,
        _ => {}
    }
    Ok(())
}

fn terms(sub: &clap::ArgMatches) -> Result<(Decimal, Decimal, u32)> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let rate = parse_decimal(sub.get_one::<String>("rate").unwrap())?;
    let tenure = *sub.get_one::<u32>("tenure").unwrap();
    Ok((amount, rate, tenure))
}

fn calc(sub: &clap::ArgMatches) -> Result<()> {
    let (amount, rate, tenure) = terms(sub)?;
    let emi = calculate_emi(amount, rate, tenure);
    let total = emi * Decimal::from(tenure);
    println!("Monthly EMI: {}", fmt_money(&emi));
    println!("Total payment: {}", fmt_money(&total));
    println!("Total interest: {}", fmt_money(&(total - amount)));
    Ok(())
}

fn schedule(sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let (amount, rate, tenure) = terms(sub)?;
    let rows = amortization_schedule(amount, rate, tenure);
    if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
        let data: Vec<Vec<String>> = rows
            .iter()
            .map(|r| {
                vec![
                    r.month.to_string(),
                    fmt_money(&r.principal),
                    fmt_money(&r.interest),
                    fmt_money(&r.balance),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Principal", "Interest", "Balance"], data)
        );
    }
    Ok(())
}
