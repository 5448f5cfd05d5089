// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::db;
use crate::i18n::Language;
use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::PathBuf;

/// Runtime settings, built once in `main` and handed to every command.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub language: Language,
}

impl Config {
    /// Database location: `$MONEYNOTE_DB`, else the platform data dir.
    pub fn db_path_from_env() -> Result<PathBuf> {
        match std::env::var_os(db::DB_ENV) {
            Some(p) if !p.is_empty() => Ok(PathBuf::from(p)),
            _ => db::default_db_path(),
        }
    }

    pub fn load(conn: &Connection, db_path: PathBuf) -> Result<Self> {
        Ok(Config {
            db_path,
            language: get_language(conn)?,
        })
    }
}

pub fn get_setting(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v: Option<String> = conn
        .query_row("SELECT value FROM settings WHERE key=?1", params![key], |r| {
            r.get(0)
        })
        .optional()?;
    Ok(v)
}

pub fn set_setting(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO settings(key, value) VALUES(?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    Ok(())
}

pub fn get_language(conn: &Connection) -> Result<Language> {
    match get_setting(conn, "language")? {
        Some(v) => v
            .parse::<Language>()
            .with_context(|| format!("Invalid language '{}' in settings", v)),
        None => Ok(Language::default()),
    }
}

pub fn set_language(conn: &Connection, lang: Language) -> Result<()> {
    set_setting(conn, "language", lang.code())
}
