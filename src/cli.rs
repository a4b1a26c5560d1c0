// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn json_flags(c: Command) -> Command {
    c.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as a JSON array"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(u64))
}

pub fn build_cli() -> Command {
    Command::new("fintrack")
        .version(crate_version!())
        .about("Personal income, expense, loan, and EMI tracking")
        .subcommand(Command::new("init").about("Report the data directory"))
        .subcommand(tx_cmd())
        .subcommand(loan_cmd())
        .subcommand(transfer_cmd())
        .subcommand(report_cmd())
        .subcommand(emi_cmd())
        .subcommand(
            Command::new("login").about("Set the current user").arg(
                Arg::new("user")
                    .long("user")
                    .required(true)
                    .help("Display name or email"),
            ),
        )
        .subcommand(
            Command::new("signup")
                .about("Create a user (same effect as login)")
                .arg(Arg::new("user").long("user").required(true)),
        )
        .subcommand(Command::new("logout").about("Clear the current user"))
        .subcommand(Command::new("whoami").about("Show the current user"))
        .subcommand(export_cmd())
}

fn tx_cmd() -> Command {
    Command::new("tx")
        .about("Record and inspect transactions")
        .subcommand(
            Command::new("add")
                .about("Add an income or expense")
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense"])
                        .default_value("income"),
                )
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("date")
                        .long("date")
                        .help("YYYY-MM-DD, defaults to today"),
                )
                .arg(
                    Arg::new("source")
                        .long("source")
                        .help("Income source, e.g. Salary"),
                )
                .arg(Arg::new("name").long("name").help("Expense name"))
                .arg(Arg::new("category").long("category"))
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(
            json_flags(Command::new("list").about("List transactions"))
                .arg(
                    Arg::new("type")
                        .long("type")
                        .value_parser(["income", "expense", "loan"]),
                )
                .arg(Arg::new("month").long("month").help("YYYY-MM"))
                .arg(Arg::new("category").long("category"))
                .arg(
                    Arg::new("limit")
                        .long("limit")
                        .value_parser(value_parser!(usize)),
                ),
        )
        .subcommand(
            Command::new("edit")
                .about("Edit an expense")
                .arg(id_arg())
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(Arg::new("date").long("date").required(true))
                .arg(Arg::new("name").long("name"))
                .arg(Arg::new("category").long("category")),
        )
        .subcommand(
            Command::new("delete")
                .about("Delete a transaction")
                .arg(id_arg()),
        )
}

fn loan_cmd() -> Command {
    Command::new("loan")
        .about("Manage loans and EMI payments")
        .subcommand(
            Command::new("add")
                .about("Record a new loan and credit its principal")
                .arg(Arg::new("lender").long("lender").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("rate")
                        .long("rate")
                        .required(true)
                        .help("Annual interest rate, percent"),
                )
                .arg(
                    Arg::new("tenure")
                        .long("tenure")
                        .required(true)
                        .value_parser(value_parser!(u32))
                        .help("Number of monthly installments"),
                )
                .arg(Arg::new("start-date").long("start-date").required(true)),
        )
        .subcommand(json_flags(Command::new("list").about("List loans")))
        .subcommand(
            Command::new("edit")
                .about("Edit a loan's terms (the installment is recomputed)")
                .arg(id_arg())
                .arg(Arg::new("lender").long("lender"))
                .arg(Arg::new("amount").long("amount"))
                .arg(Arg::new("rate").long("rate"))
                .arg(
                    Arg::new("tenure")
                        .long("tenure")
                        .value_parser(value_parser!(u32)),
                )
                .arg(Arg::new("start-date").long("start-date"))
                .arg(
                    Arg::new("resync-remaining")
                        .long("resync-remaining")
                        .action(ArgAction::SetTrue)
                        .help("Reset the outstanding balance to the edited principal"),
                ),
        )
        .subcommand(Command::new("delete").about("Delete a loan").arg(id_arg()))
        .subcommand(
            Command::new("pay-emi")
                .about("Pay this month's installment")
                .arg(id_arg()),
        )
}

fn transfer_cmd() -> Command {
    Command::new("transfer")
        .about("Send money out of the ledger")
        .subcommand(
            Command::new("send")
                .about("Record an outgoing transfer")
                .arg(Arg::new("recipient").long("recipient").required(true))
                .arg(Arg::new("amount").long("amount").required(true))
                .arg(
                    Arg::new("method")
                        .long("method")
                        .value_parser(["bank", "upi", "mobile"])
                        .default_value("bank"),
                )
                .arg(Arg::new("note").long("note")),
        )
        .subcommand(json_flags(Command::new("list").about(
            "List past transfers (expenses filed under the method categories)",
        )))
}

fn report_cmd() -> Command {
    Command::new("report")
        .about("Aggregated views over the ledger")
        .subcommand(json_flags(
            Command::new("summary").about("Income, expense, loan, and balance totals"),
        ))
        .subcommand(
            json_flags(Command::new("spend-by-category").about("Expense totals per category"))
                .arg(Arg::new("month").long("month").help("YYYY-MM")),
        )
        .subcommand(json_flags(
            Command::new("income-by-source").about("Income totals per source"),
        ))
        .subcommand(json_flags(
            Command::new("loan-by-lender").about("Loan credit totals per lender"),
        ))
}

fn emi_cmd() -> Command {
    let terms = |c: Command| {
        c.arg(Arg::new("amount").long("amount").required(true))
            .arg(Arg::new("rate").long("rate").required(true))
            .arg(
                Arg::new("tenure")
                    .long("tenure")
                    .required(true)
                    .value_parser(value_parser!(u32)),
            )
    };
    Command::new("emi")
        .about("Standalone EMI calculator")
        .subcommand(terms(
            Command::new("calc").about("Monthly installment for the given terms"),
        ))
        .subcommand(json_flags(terms(
            Command::new("schedule").about("Month-by-month amortization schedule"),
        )))
}

fn export_cmd() -> Command {
    let target = |name: &'static str, about: &'static str| {
        Command::new(name)
            .about(about)
            .arg(
                Arg::new("format")
                    .long("format")
                    .value_parser(["csv", "json"])
                    .default_value("csv"),
            )
            .arg(Arg::new("out").long("out").required(true))
    };
    Command::new("export")
        .about("Export stored data to a file")
        .subcommand(target("transactions", "Export the transaction list"))
        .subcommand(target("loans", "Export the loan list"))
}
