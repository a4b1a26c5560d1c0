// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::commands::warn_if_unsaved;
use anyhow::Result;

pub fn login(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let identifier = sub.get_one::<String>("user").unwrap();
    if let Some(user) = warn_if_unsaved(app.login(identifier))? {
        println!("Logged in as {}", user.display_name());
    }
    Ok(())
}

pub fn signup(app: &mut App, sub: &clap::ArgMatches) -> Result<()> {
    let identifier = sub.get_one::<String>("user").unwrap();
    if let Some(user) = warn_if_unsaved(app.signup(identifier))? {
        println!("Welcome, {}", user.display_name());
    }
    Ok(())
}

pub fn logout(app: &mut App) -> Result<()> {
    match warn_if_unsaved(app.logout())? {
        Some(Some(user)) => println!("Logged out {}", user.display_name()),
        Some(None) => println!("No user was logged in"),
        None => {}
    }
    Ok(())
}

pub fn whoami(app: &App) -> Result<()> {
    match app.session().current() {
        Some(user) => println!("{}", user.name),
        None => println!("Not logged in"),
    }
    Ok(())
}
