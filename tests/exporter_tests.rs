// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneynote::models::{NewTransaction, TransactionType};
use moneynote::store::Store;
use moneynote::{cli, commands::exporter, db};
use rusqlite::Connection;
use serde_json::json;
use tempfile::tempdir;

fn base_conn() -> Connection {
    let conn = db::open_in_memory().unwrap();
    {
        let store = Store::new(&conn);
        store
            .insert(&NewTransaction {
                amount: "12.50".parse().unwrap(),
                label: "Corner Shop, Yangon".into(),
                date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                r#type: TransactionType::Expense,
            })
            .unwrap();
        store
            .insert(&NewTransaction {
                amount: "300000".parse().unwrap(),
                label: "လစာ".into(),
                date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                r#type: TransactionType::Income,
            })
            .unwrap();
    }
    conn
}

fn run_export(conn: &Connection, format: &str, out: &str) -> anyhow::Result<()> {
    let matches = cli::build_cli().get_matches_from([
        "moneynote",
        "export",
        "transactions",
        "--format",
        format,
        "--out",
        out,
    ]);
    if let Some(("export", export_m)) = matches.subcommand() {
        exporter::handle(conn, export_m)
    } else {
        panic!("no export subcommand");
    }
}

#[test]
fn export_transactions_csv_has_header_and_quotes() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.csv");
    run_export(&conn, "csv", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Date,Label,Type,Amount",
            "2025-01-01,လစာ,INCOME,300000",
            "2025-01-02,\"Corner Shop, Yangon\",EXPENSE,12.5",
        ]
    );
}

#[test]
fn export_transactions_pretty_json() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.json");
    run_export(&conn, "JSON", &out_path.to_string_lossy()).unwrap();

    let contents = std::fs::read_to_string(&out_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(
        parsed,
        json!([
            {"date": "2025-01-01", "label": "လစာ", "type": "INCOME", "amount": "300000"},
            {"date": "2025-01-02", "label": "Corner Shop, Yangon", "type": "EXPENSE", "amount": "12.5"}
        ])
    );
}

#[test]
fn export_transactions_rejects_unknown_format() {
    let conn = base_conn();
    let dir = tempdir().unwrap();
    let out_path = dir.path().join("export.unknown");
    assert!(run_export(&conn, "xml", &out_path.to_string_lossy()).is_err());
    assert!(!out_path.exists());
}
