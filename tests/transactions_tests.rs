// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneynote::config::Config;
use moneynote::i18n::Language;
use moneynote::models::{NewTransaction, TransactionType};
use moneynote::store::{ChangeEvent, Store, StoreError};
use moneynote::{cli, commands::transactions, db};
use rusqlite::Connection;
use rust_decimal::Decimal;
use std::cell::RefCell;

fn setup() -> Connection {
    db::open_in_memory().unwrap()
}

fn cfg(language: Language) -> Config {
    Config {
        db_path: ":memory:".into(),
        language,
    }
}

fn new_tx(amount: i64, label: &str, date: &str, t: TransactionType) -> NewTransaction {
    NewTransaction {
        amount: Decimal::from(amount),
        label: label.into(),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        r#type: t,
    }
}

fn seed(conn: &Connection) {
    let store = Store::new(conn);
    for (amount, label, date, t) in [
        (4500, "Breakfast", "2024-06-01", TransactionType::Expense),
        (5000, "Shopping", "2024-06-01", TransactionType::Expense),
        (300000, "Salary", "2024-06-05", TransactionType::Income),
        (1200, "Bus", "2024-05-20", TransactionType::Expense),
    ] {
        store.insert(&new_tx(amount, label, date, t)).unwrap();
    }
}

fn run_tx(conn: &Connection, cfg: &Config, args: &[&str]) -> anyhow::Result<()> {
    let mut argv = vec!["moneynote", "tx"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    match matches.subcommand() {
        Some(("tx", m)) => transactions::handle(conn, cfg, m),
        _ => panic!("no tx subcommand"),
    }
}

#[test]
fn insert_assigns_id_and_created_at() {
    let conn = setup();
    let store = Store::new(&conn);
    let t = store
        .insert(&new_tx(4500, "  Breakfast ", "2024-06-01", TransactionType::Expense))
        .unwrap();
    assert!(t.id > 0);
    assert_eq!(t.label, "Breakfast");
    assert!(t.created_at.is_some());
    assert_eq!(store.get(t.id).unwrap(), Some(t));
}

#[test]
fn insert_validates_amount_and_label() {
    let conn = setup();
    let store = Store::new(&conn);
    assert!(matches!(
        store.insert(&new_tx(0, "Tea", "2024-06-01", TransactionType::Expense)),
        Err(StoreError::NonPositiveAmount(_))
    ));
    assert!(matches!(
        store.insert(&new_tx(-5, "Tea", "2024-06-01", TransactionType::Expense)),
        Err(StoreError::NonPositiveAmount(_))
    ));
    assert!(matches!(
        store.insert(&new_tx(5, "   ", "2024-06-01", TransactionType::Expense)),
        Err(StoreError::EmptyLabel)
    ));
    assert!(store.all().unwrap().is_empty());
}

#[test]
fn mutations_emit_one_event_each() {
    let conn = setup();
    let seen = RefCell::new(Vec::new());
    let mut store = Store::new(&conn);
    store.subscribe(|e| seen.borrow_mut().push(e.clone()));

    let t = store
        .insert(&new_tx(10, "Tea", "2024-06-01", TransactionType::Expense))
        .unwrap();
    store
        .update(t.id, &new_tx(12, "Milk tea", "2024-06-02", TransactionType::Expense))
        .unwrap();
    assert!(store.update(999, &new_tx(1, "x", "2024-06-02", TransactionType::Expense)).is_err());
    assert!(store.insert(&new_tx(0, "bad", "2024-06-02", TransactionType::Expense)).is_err());
    store.delete(t.id).unwrap();
    assert!(matches!(store.delete(t.id), Err(StoreError::NotFound(_))));
    drop(store);

    assert_eq!(
        seen.into_inner(),
        vec![
            ChangeEvent::TransactionAdded(t.id),
            ChangeEvent::TransactionUpdated(t.id),
            ChangeEvent::TransactionDeleted(t.id),
        ]
    );
}

#[test]
fn update_replaces_whole_record() {
    let conn = setup();
    let store = Store::new(&conn);
    let t = store
        .insert(&new_tx(10, "Tea", "2024-06-01", TransactionType::Expense))
        .unwrap();
    let u = store
        .update(t.id, &new_tx(700, "Refund", "2024-07-03", TransactionType::Income))
        .unwrap();
    assert_eq!(u.id, t.id);
    assert_eq!(u.amount, Decimal::from(700));
    assert_eq!(u.label, "Refund");
    assert_eq!(u.r#type, TransactionType::Income);
    assert_eq!(u.date.to_string(), "2024-07-03");
    assert_eq!(u.created_at, t.created_at);
}

#[test]
fn all_is_ordered_by_date() {
    let conn = setup();
    seed(&conn);
    let all = Store::new(&conn).all().unwrap();
    let dates: Vec<String> = all.iter().map(|t| t.date.to_string()).collect();
    assert_eq!(dates, vec!["2024-05-20", "2024-06-01", "2024-06-01", "2024-06-05"]);
}

#[test]
fn list_defaults_to_newest_first() {
    let conn = setup();
    seed(&conn);
    let matches = cli::build_cli().get_matches_from(["moneynote", "tx", "list", "--month", "2024-06"]);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            let view = transactions::query_rows(&conn, list_m).unwrap();
            let labels: Vec<&str> = view.rows.iter().map(|t| t.label.as_str()).collect();
            assert_eq!(labels, vec!["Salary", "Shopping", "Breakfast"]);
            assert_eq!(view.stats.net, Decimal::from(290500));
        } else {
            panic!("no list subcommand");
        }
    } else {
        panic!("no tx subcommand");
    }
}

#[test]
fn list_sort_and_search_flags() {
    let conn = setup();
    seed(&conn);
    let matches = cli::build_cli().get_matches_from([
        "moneynote", "tx", "list", "--month", "2024-06", "--sort", "amount",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let view = transactions::query_rows(&conn, list_m).unwrap();
    let amounts: Vec<String> = view.rows.iter().map(|t| t.amount.to_string()).collect();
    assert_eq!(amounts, vec!["4500", "5000", "300000"]);

    let matches = cli::build_cli().get_matches_from([
        "moneynote", "tx", "list", "--month", "2024-06", "--sort", "label", "--desc", "--search",
        "a",
    ]);
    let Some(("tx", tx_m)) = matches.subcommand() else {
        panic!("no tx subcommand");
    };
    let Some(("list", list_m)) = tx_m.subcommand() else {
        panic!("no list subcommand");
    };
    let view = transactions::query_rows(&conn, list_m).unwrap();
    let labels: Vec<&str> = view.rows.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(labels, vec!["Salary", "Breakfast"]);
}

#[test]
fn add_command_with_category_uses_localized_label() {
    let conn = setup();
    run_tx(
        &conn,
        &cfg(Language::En),
        &["add", "--amount", "300000", "--category", "salary", "--date", "2024-06-05"],
    )
    .unwrap();
    run_tx(
        &conn,
        &cfg(Language::My),
        &["add", "--amount", "4500", "--category", "food", "--date", "2024-06-01"],
    )
    .unwrap();

    let all = Store::new(&conn).all().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].label, "အစားအသောက်");
    assert_eq!(all[0].r#type, TransactionType::Expense);
    assert_eq!(all[1].label, "Salary");
    assert_eq!(all[1].r#type, TransactionType::Income);
}

#[test]
fn add_command_rejects_zero_amount() {
    let conn = setup();
    let err = run_tx(
        &conn,
        &cfg(Language::En),
        &["add", "--amount", "0", "--label", "Tea"],
    )
    .unwrap_err();
    assert!(err.to_string().contains("greater than zero"));
    assert!(Store::new(&conn).all().unwrap().is_empty());
}

#[test]
fn edit_command_keeps_unspecified_fields() {
    let conn = setup();
    seed(&conn);
    run_tx(
        &conn,
        &cfg(Language::En),
        &["edit", "--id", "2", "--amount", "5500"],
    )
    .unwrap();
    let t = Store::new(&conn).get(2).unwrap().unwrap();
    assert_eq!(t.amount, Decimal::from(5500));
    assert_eq!(t.label, "Shopping");
    assert_eq!(t.r#type, TransactionType::Expense);
    assert_eq!(t.date.to_string(), "2024-06-01");
}

#[test]
fn rm_command_deletes_and_reports_missing() {
    let conn = setup();
    seed(&conn);
    run_tx(&conn, &cfg(Language::En), &["rm", "--id", "1"]).unwrap();
    assert!(Store::new(&conn).get(1).unwrap().is_none());
    assert!(run_tx(&conn, &cfg(Language::En), &["rm", "--id", "1"]).is_err());
}
