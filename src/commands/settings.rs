// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::{Config, set_language};
use crate::i18n::{Language, search_suggestions};
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let rows = vec![
                vec!["database".to_string(), cfg.db_path.display().to_string()],
                vec!["language".to_string(), cfg.language.to_string()],
                vec![
                    "categories".to_string(),
                    search_suggestions(cfg.language).join(", "),
                ],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("lang", sub)) => {
            let lang = sub.get_one::<String>("language").unwrap().parse::<Language>()?;
            set_language(conn, lang)?;
            println!("Language set to {}", lang);
        }
        _ => {}
    }
    Ok(())
}
