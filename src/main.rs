// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use moneynote::{cli, commands, config::Config, db};

fn main() -> Result<()> {
    moneynote::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = Config::db_path_from_env()?;
    let conn = db::open_or_init(&db_path)?;
    let cfg = Config::load(&conn, db_path)?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!("Database initialized at {}", cfg.db_path.display());
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, &cfg, sub)?,
        Some((name @ ("summary" | "chart" | "history"), sub)) => {
            commands::reports::handle(&conn, &cfg, name, sub)?
        }
        Some(("budget", sub)) => commands::budgets::handle(&conn, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&conn, sub)?,
        Some(("config", sub)) => commands::settings::handle(&conn, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
