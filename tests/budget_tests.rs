// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{NaiveDate, NaiveDateTime};
use moneynote::commands::{budgets, reports};
use moneynote::ledger::BudgetState;
use moneynote::models::{BudgetSettings, ModelError, NewTransaction, TransactionType};
use moneynote::store::{ChangeEvent, Store, StoreError};
use moneynote::{cli, db, utils};
use rusqlite::{Connection, params};
use rust_decimal::Decimal;
use std::cell::RefCell;

fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
}

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

#[test]
fn settings_validation_bounds() {
    let at = ts("2024-06-01 09:00:00");
    let hundred = Decimal::from(100);
    assert!(BudgetSettings::new(hundred, 80, 100, at).is_ok());
    assert!(BudgetSettings::new(hundred, 50, 55, at).is_ok());
    assert!(BudgetSettings::new(hundred, 95, 100, at).is_ok());

    assert_eq!(
        BudgetSettings::new(Decimal::ZERO, 80, 100, at).unwrap_err(),
        ModelError::NonPositiveLimit
    );
    assert_eq!(
        BudgetSettings::new(hundred, 49, 100, at).unwrap_err(),
        ModelError::WarningOutOfRange(49)
    );
    assert_eq!(
        BudgetSettings::new(hundred, 96, 100, at).unwrap_err(),
        ModelError::WarningOutOfRange(96)
    );
    assert_eq!(
        BudgetSettings::new(hundred, 80, 84, at).unwrap_err(),
        ModelError::DangerOutOfRange { danger: 84, min: 85 }
    );
    assert!(BudgetSettings::new(hundred, 80, 101, at).is_err());
    assert!(BudgetSettings::new(hundred, 80, 80, at).is_err());
}

#[test]
fn settings_round_trip_within_month() {
    let conn = setup();
    let store = Store::new(&conn);
    let s = BudgetSettings::new(Decimal::from(200000), 70, 90, ts("2024-06-03 10:00:00")).unwrap();
    store.save_budget_settings(&s).unwrap();
    assert_eq!(store.budget_settings(day("2024-06-30")).unwrap(), Some(s));
}

#[test]
fn stale_settings_are_discarded_at_month_boundary() {
    let conn = setup();
    let store = Store::new(&conn);
    let s = BudgetSettings::new(Decimal::from(100), 80, 100, ts("2024-05-31 23:59:00")).unwrap();
    store.save_budget_settings(&s).unwrap();

    assert_eq!(store.budget_settings(day("2024-06-01")).unwrap(), None);
    let left: i64 = conn
        .query_row("SELECT COUNT(*) FROM budget_settings", [], |r| r.get(0))
        .unwrap();
    assert_eq!(left, 0);
}

#[test]
fn same_month_other_year_is_stale() {
    let conn = setup();
    let store = Store::new(&conn);
    let s = BudgetSettings::new(Decimal::from(100), 80, 100, ts("2023-06-10 08:00:00")).unwrap();
    store.save_budget_settings(&s).unwrap();
    assert_eq!(store.budget_settings(day("2024-06-10")).unwrap(), None);
}

#[test]
fn budget_changes_emit_events() {
    let conn = setup();
    let seen = RefCell::new(Vec::new());
    let mut store = Store::new(&conn);
    store.subscribe(|e| seen.borrow_mut().push(e.clone()));

    let s = BudgetSettings::new(Decimal::from(100), 80, 100, ts("2024-06-01 00:00:00")).unwrap();
    store.save_budget_settings(&s).unwrap();
    store.set_budget_enabled(false).unwrap();
    store.clear_budget_settings().unwrap();
    drop(store);

    assert_eq!(seen.into_inner(), vec![ChangeEvent::BudgetChanged; 3]);
}

#[test]
fn budget_panel_defaults_on() {
    let conn = setup();
    let store = Store::new(&conn);
    assert!(store.budget_enabled().unwrap());
    store.set_budget_enabled(false).unwrap();
    assert!(!store.budget_enabled().unwrap());
    store.set_budget_enabled(true).unwrap();
    assert!(store.budget_enabled().unwrap());
}

#[test]
fn budget_panel_rejects_garbled_switch() {
    let conn = setup();
    conn.execute(
        "INSERT INTO settings(key, value) VALUES('budget_enabled', 'maybe')",
        [],
    )
    .unwrap();
    let err = Store::new(&conn).budget_enabled().unwrap_err();
    assert!(matches!(err, StoreError::InvalidSetting { value, .. } if value == "maybe"));
}

#[test]
fn budget_set_command_saves_defaults() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["moneynote", "budget", "set", "--limit", "150000"]);
    if let Some(("budget", m)) = matches.subcommand() {
        budgets::handle(&conn, m).unwrap();
    } else {
        panic!("no budget subcommand");
    }
    let (limit, w, d): (String, i64, i64) = conn
        .query_row(
            "SELECT limit_amount, warning_percent, danger_percent FROM budget_settings",
            [],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .unwrap();
    assert_eq!(limit, "150000");
    assert_eq!((w, d), (80, 100));
}

#[test]
fn budget_set_command_rejects_inverted_thresholds() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from([
        "moneynote", "budget", "set", "--limit", "100", "--warning", "90", "--danger", "80",
    ]);
    if let Some(("budget", m)) = matches.subcommand() {
        let err = budgets::handle(&conn, m).unwrap_err();
        assert!(err.to_string().contains("Danger percent 80"));
    } else {
        panic!("no budget subcommand");
    }
    let n: i64 = conn
        .query_row("SELECT COUNT(*) FROM budget_settings", [], |r| r.get(0))
        .unwrap();
    assert_eq!(n, 0);
}

#[test]
fn summary_reports_unconfigured_without_settings() {
    let conn = setup();
    let period = utils::current_month();
    let s = reports::build_summary(&conn, period).unwrap();
    assert_eq!(s.budget.unwrap().state, BudgetState::Unconfigured);
    assert_eq!(s.limit, None);
}

#[test]
fn summary_classifies_current_month_spend() {
    let conn = setup();
    let store = Store::new(&conn);
    let today = utils::today();
    store
        .insert(&NewTransaction {
            amount: Decimal::from(85),
            label: "Groceries".into(),
            date: today,
            r#type: TransactionType::Expense,
        })
        .unwrap();
    conn.execute(
        "INSERT INTO budget_settings(id, limit_amount, warning_percent, danger_percent, updated_at)
         VALUES (1, '100', 80, 100, ?1)",
        params![utils::now()],
    )
    .unwrap();

    let s = reports::build_summary(&conn, utils::current_month()).unwrap();
    let status = s.budget.unwrap();
    assert_eq!(status.state, BudgetState::Warning);
    assert_eq!(s.limit, Some(Decimal::from(100)));
    assert_eq!(s.stats.expense, Decimal::from(85));
}

#[test]
fn summary_omits_budget_when_panel_off() {
    let conn = setup();
    Store::new(&conn).set_budget_enabled(false).unwrap();
    let s = reports::build_summary(&conn, utils::current_month()).unwrap();
    assert!(s.budget.is_none());
}
