// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{BudgetSettings, DEFAULT_DANGER_PERCENT, DEFAULT_WARNING_PERCENT};
use crate::store::Store;
use crate::utils::{
    flag, fmt_amount, maybe_print_json, now, parse_decimal, parse_percent, pretty_table, today,
};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = Store::new(conn);
    match m.subcommand() {
        Some(("set", sub)) => set(&store, sub)?,
        Some(("show", sub)) => show(&store, sub)?,
        Some(("clear", _)) => {
            store.clear_budget_settings()?;
            println!("Budget removed");
        }
        Some(("on", _)) => {
            store.set_budget_enabled(true)?;
            println!("Budget panel ON");
        }
        Some(("off", _)) => {
            store.set_budget_enabled(false)?;
            println!("Budget panel OFF");
        }
        _ => {}
    }
    Ok(())
}

fn set(store: &Store<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let limit = parse_decimal(sub.get_one::<String>("limit").unwrap())?;
    let warning = match sub.get_one::<String>("warning") {
        Some(w) => parse_percent(w)?,
        None => DEFAULT_WARNING_PERCENT,
    };
    let danger = match sub.get_one::<String>("danger") {
        Some(d) => parse_percent(d)?,
        None => DEFAULT_DANGER_PERCENT,
    };
    let settings = BudgetSettings::new(limit, warning, danger, now())?;
    store.save_budget_settings(&settings)?;
    println!(
        "Budget set: {} (warning {}%, danger {}%)",
        fmt_amount(&settings.limit_amount),
        settings.warning_percent,
        settings.danger_percent
    );
    Ok(())
}

fn show(store: &Store<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let settings = store.budget_settings(today())?;
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &settings)? {
        return Ok(());
    }
    let enabled = if store.budget_enabled()? { "ON" } else { "OFF" };
    let row = match settings {
        Some(s) => vec![
            enabled.to_string(),
            fmt_amount(&s.limit_amount),
            format!("{}%", s.warning_percent),
            format!("{}%", s.danger_percent),
            s.updated_at.format("%Y-%m-%d %H:%M").to_string(),
        ],
        None => vec![
            enabled.to_string(),
            "-".into(),
            "-".into(),
            "-".into(),
            "-".into(),
        ],
    };
    println!(
        "{}",
        pretty_table(&["Panel", "Limit", "Warning", "Danger", "Updated"], vec![row])
    );
    Ok(())
}
