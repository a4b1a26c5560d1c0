// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::{app::App, cli, commands, storage};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let store = storage::JsonFileStore::open_default()?;
    let mut app = App::load(Box::new(store))?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Data directory at {}", storage::data_dir()?.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&mut app, sub)?,
        Some(("loan", sub)) => commands::loans::handle(&mut app, sub)?,
        Some(("transfer", sub)) => commands::transfer::handle(&mut app, sub)?,
        Some(("report", sub)) => commands::reports::handle(&app, sub)?,
        Some(("emi", sub)) => commands::emi::handle(sub)?,
        Some(("login", sub)) => commands::session::login(&mut app, sub)?,
        Some(("signup", sub)) => commands::session::signup(&mut app, sub)?,
        Some(("logout", _)) => commands::session::logout(&mut app)?,
        Some(("whoami", _)) => commands::session::whoami(&app)?,
        Some(("export", sub)) => commands::exporter::handle(&app, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
