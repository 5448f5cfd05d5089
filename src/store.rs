// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! SQLite-backed transaction and budget store.
//!
//! Every successful mutation is reported to subscribed listeners as a
//! [`ChangeEvent`], so the presentation layer can re-run aggregation
//! without polling.

use crate::models::{BudgetSettings, NewTransaction, Transaction, TransactionType};
use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::{Connection, OptionalExtension, params};
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Amount must be greater than zero (got {0})")]
    NonPositiveAmount(Decimal),
    #[error("Label must not be empty")]
    EmptyLabel,
    #[error("Transaction {0} not found")]
    NotFound(i64),
    #[error("Corrupt row {id}: {detail}")]
    Corrupt { id: i64, detail: String },
    #[error("Invalid value '{value}' for setting '{key}'")]
    InvalidSetting { key: &'static str, value: String },
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    TransactionAdded(i64),
    TransactionUpdated(i64),
    TransactionDeleted(i64),
    BudgetChanged,
}

type Listener<'c> = Box<dyn Fn(&ChangeEvent) + 'c>;

pub struct Store<'c> {
    conn: &'c Connection,
    listeners: Vec<Listener<'c>>,
}

fn validate(new: &NewTransaction) -> StoreResult<()> {
    if new.amount <= Decimal::ZERO {
        return Err(StoreError::NonPositiveAmount(new.amount));
    }
    if new.label.trim().is_empty() {
        return Err(StoreError::EmptyLabel);
    }
    Ok(())
}

type RawRow = (i64, NaiveDate, String, String, String, Option<NaiveDateTime>);

fn raw_row(r: &rusqlite::Row<'_>) -> rusqlite::Result<RawRow> {
    Ok((
        r.get(0)?,
        r.get(1)?,
        r.get(2)?,
        r.get(3)?,
        r.get(4)?,
        r.get(5)?,
    ))
}

fn from_raw((id, date, amount, label, typ, created_at): RawRow) -> StoreResult<Transaction> {
    let corrupt = |detail: String| StoreError::Corrupt { id, detail };
    let amount = amount
        .parse::<Decimal>()
        .map_err(|e| corrupt(format!("amount '{}': {}", amount, e)))?;
    let r#type = typ
        .parse::<TransactionType>()
        .map_err(|e| corrupt(e.to_string()))?;
    Ok(Transaction {
        id,
        amount,
        label,
        date,
        r#type,
        created_at,
    })
}

const BUDGET_ENABLED_KEY: &str = "budget_enabled";

const SELECT_TX: &str = "SELECT id, date, amount, label, type, created_at FROM transactions";

impl<'c> Store<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Store {
            conn,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: impl Fn(&ChangeEvent) + 'c) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&self, event: ChangeEvent) {
        tracing::info!(?event, "store changed");
        for l in &self.listeners {
            l(&event);
        }
    }

    pub fn insert(&self, new: &NewTransaction) -> StoreResult<Transaction> {
        validate(new)?;
        self.conn.execute(
            "INSERT INTO transactions(date, amount, label, type, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                new.date,
                new.amount.to_string(),
                new.label.trim(),
                new.r#type.as_str(),
                crate::utils::now(),
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        let stored = self.get(id)?.ok_or(StoreError::NotFound(id))?;
        self.emit(ChangeEvent::TransactionAdded(id));
        Ok(stored)
    }

    pub fn update(&self, id: i64, new: &NewTransaction) -> StoreResult<Transaction> {
        validate(new)?;
        let n = self.conn.execute(
            "UPDATE transactions SET date=?1, amount=?2, label=?3, type=?4 WHERE id=?5",
            params![
                new.date,
                new.amount.to_string(),
                new.label.trim(),
                new.r#type.as_str(),
                id
            ],
        )?;
        if n == 0 {
            return Err(StoreError::NotFound(id));
        }
        let stored = self.get(id)?.ok_or(StoreError::NotFound(id))?;
        self.emit(ChangeEvent::TransactionUpdated(id));
        Ok(stored)
    }

    pub fn delete(&self, id: i64) -> StoreResult<()> {
        let n = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        if n == 0 {
            return Err(StoreError::NotFound(id));
        }
        self.emit(ChangeEvent::TransactionDeleted(id));
        Ok(())
    }

    pub fn get(&self, id: i64) -> StoreResult<Option<Transaction>> {
        let raw = self
            .conn
            .query_row(&format!("{} WHERE id=?1", SELECT_TX), params![id], raw_row)
            .optional()?;
        raw.map(from_raw).transpose()
    }

    /// Full snapshot, oldest first.
    pub fn all(&self) -> StoreResult<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} ORDER BY date ASC, id ASC", SELECT_TX))?;
        let rows = stmt.query_map([], raw_row)?;
        let mut out = Vec::new();
        for row in rows {
            out.push(from_raw(row?)?);
        }
        tracing::debug!(count = out.len(), "loaded transactions");
        Ok(out)
    }

    /// The active budget, or `None` when unset or saved in an earlier month.
    /// A stale row is deleted so the new month starts unconfigured.
    pub fn budget_settings(&self, today: NaiveDate) -> StoreResult<Option<BudgetSettings>> {
        let row: Option<(String, u8, u8, NaiveDateTime)> = self
            .conn
            .query_row(
                "SELECT limit_amount, warning_percent, danger_percent, updated_at
                 FROM budget_settings WHERE id=1",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?, r.get(3)?)),
            )
            .optional()?;
        let Some((limit, warning_percent, danger_percent, updated_at)) = row else {
            return Ok(None);
        };
        let limit_amount = limit.parse::<Decimal>().map_err(|e| StoreError::Corrupt {
            id: 1,
            detail: format!("budget limit '{}': {}", limit, e),
        })?;
        let settings = BudgetSettings {
            limit_amount,
            warning_percent,
            danger_percent,
            updated_at,
        };
        if !settings.is_current(today) {
            tracing::info!(%updated_at, "discarding budget settings from a previous month");
            self.conn
                .execute("DELETE FROM budget_settings WHERE id=1", [])?;
            return Ok(None);
        }
        Ok(Some(settings))
    }

    pub fn save_budget_settings(&self, s: &BudgetSettings) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO budget_settings(id, limit_amount, warning_percent, danger_percent, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                limit_amount=excluded.limit_amount,
                warning_percent=excluded.warning_percent,
                danger_percent=excluded.danger_percent,
                updated_at=excluded.updated_at",
            params![
                s.limit_amount.to_string(),
                s.warning_percent,
                s.danger_percent,
                s.updated_at
            ],
        )?;
        self.emit(ChangeEvent::BudgetChanged);
        Ok(())
    }

    pub fn clear_budget_settings(&self) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM budget_settings WHERE id=1", [])?;
        self.emit(ChangeEvent::BudgetChanged);
        Ok(())
    }

    /// The budget panel switch; on unless turned off.
    pub fn budget_enabled(&self) -> StoreResult<bool> {
        let v: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM settings WHERE key=?1",
                params![BUDGET_ENABLED_KEY],
                |r| r.get(0),
            )
            .optional()?;
        match v.as_deref() {
            None | Some("true") => Ok(true),
            Some("false") => Ok(false),
            Some(other) => Err(StoreError::InvalidSetting {
                key: BUDGET_ENABLED_KEY,
                value: other.to_string(),
            }),
        }
    }

    pub fn set_budget_enabled(&self, enabled: bool) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO settings(key, value) VALUES(?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value=excluded.value",
            params![BUDGET_ENABLED_KEY, if enabled { "true" } else { "false" }],
        )?;
        self.emit(ChangeEvent::BudgetChanged);
        Ok(())
    }
}
