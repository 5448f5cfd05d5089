// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::i18n::{self, category_label, period_title, type_label};
use crate::ledger::{self, Overview, SortConfig, SortDirection, SortKey};
use crate::models::{NewTransaction, PeriodKey, TransactionType};
use crate::store::{ChangeEvent, Store};
use crate::utils::{
    flag, fmt_amount, fmt_date, maybe_print_json, month_arg, parse_date, parse_decimal,
    pretty_table, today,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::cell::Cell;

pub fn handle(conn: &Connection, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    let changed: Cell<Option<ChangeEvent>> = Cell::new(None);
    let mut store = Store::new(conn);
    store.subscribe(|e| changed.set(Some(e.clone())));

    let touched = match m.subcommand() {
        Some(("add", sub)) => Some(add(&store, cfg, sub)?),
        Some(("edit", sub)) => Some(edit(&store, cfg, sub)?),
        Some(("rm", sub)) => rm(&store, sub)?,
        Some(("list", sub)) => {
            list(conn, cfg, sub)?;
            None
        }
        _ => None,
    };

    if let (Some(event), Some(period)) = (changed.take(), touched) {
        tracing::debug!(?event, %period, "refreshing month totals");
        print_month_line(&store, cfg, period)?;
    }
    Ok(())
}

fn print_month_line(store: &Store<'_>, cfg: &Config, period: PeriodKey) -> Result<()> {
    let all = store.all()?;
    let stats = ledger::compute_monthly_stats(&all, period);
    println!(
        "{}: {} {} / {} {} / {}",
        period_title(period, cfg.language),
        type_label(TransactionType::Income, cfg.language),
        fmt_amount(&stats.income),
        type_label(TransactionType::Expense, cfg.language),
        fmt_amount(&stats.expense),
        fmt_amount(&stats.net),
    );
    Ok(())
}

/// Label and type from `--label`/`--category`/`--type`, falling back to `prev`.
fn label_and_type(
    cfg: &Config,
    sub: &clap::ArgMatches,
    prev: Option<(&str, TransactionType)>,
) -> Result<(String, TransactionType)> {
    let explicit_type = sub
        .get_one::<String>("type")
        .map(|s| s.parse::<TransactionType>())
        .transpose()?;
    if let Some(code) = sub.get_one::<String>("category") {
        let cat = i18n::parse_category(code)?;
        let typ = explicit_type.unwrap_or_else(|| cat.default_type());
        return Ok((category_label(cat, cfg.language).to_string(), typ));
    }
    let label = match (sub.get_one::<String>("label"), prev) {
        (Some(l), _) => l.trim().to_string(),
        (None, Some((l, _))) => l.to_string(),
        (None, None) => String::new(),
    };
    let typ = explicit_type
        .or(prev.map(|(_, t)| t))
        .unwrap_or(TransactionType::Expense);
    Ok((label, typ))
}

fn add(store: &Store<'_>, cfg: &Config, sub: &clap::ArgMatches) -> Result<PeriodKey> {
    let amount = parse_decimal(sub.get_one::<String>("amount").unwrap())?;
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => today(),
    };
    let (label, r#type) = label_and_type(cfg, sub, None)?;
    let t = store.insert(&NewTransaction {
        amount,
        label,
        date,
        r#type,
    })?;
    println!(
        "Recorded #{} {} {} on {} '{}'",
        t.id,
        type_label(t.r#type, cfg.language),
        fmt_amount(&t.amount),
        t.date,
        t.label
    );
    Ok(PeriodKey::of(t.date))
}

fn edit(store: &Store<'_>, cfg: &Config, sub: &clap::ArgMatches) -> Result<PeriodKey> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let cur = store
        .get(id)?
        .with_context(|| format!("Transaction {} not found", id))?;
    let amount = match sub.get_one::<String>("amount") {
        Some(a) => parse_decimal(a)?,
        None => cur.amount,
    };
    let date = match sub.get_one::<String>("date") {
        Some(d) => parse_date(d)?,
        None => cur.date,
    };
    let (label, r#type) = label_and_type(cfg, sub, Some((cur.label.as_str(), cur.r#type)))?;
    let t = store.update(
        id,
        &NewTransaction {
            amount,
            label,
            date,
            r#type,
        },
    )?;
    println!("Updated #{} -> {} {} '{}'", t.id, t.date, fmt_amount(&t.amount), t.label);
    Ok(PeriodKey::of(t.date))
}

fn rm(store: &Store<'_>, sub: &clap::ArgMatches) -> Result<Option<PeriodKey>> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let cur = store
        .get(id)?
        .with_context(|| format!("Transaction {} not found", id))?;
    store.delete(id)?;
    println!("Deleted #{} '{}'", id, cur.label);
    Ok(Some(PeriodKey::of(cur.date)))
}

/// Sort order for `tx list`: an explicit `--asc`/`--desc` wins, otherwise
/// date starts newest-first and other keys start ascending.
pub fn sort_config(sub: &clap::ArgMatches) -> Result<SortConfig> {
    let key = match sub.get_one::<String>("sort") {
        Some(s) => s.parse::<SortKey>()?,
        None => SortKey::Date,
    };
    let mut cfg = SortConfig::default();
    if cfg.key != key {
        cfg = cfg.toggle(key);
    }
    if flag(sub, "asc") {
        cfg.direction = SortDirection::Asc;
    } else if flag(sub, "desc") {
        cfg.direction = SortDirection::Desc;
    }
    Ok(cfg)
}

pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Overview> {
    let period = month_arg(sub)?;
    let query = sub
        .get_one::<String>("search")
        .map(|s| s.as_str())
        .unwrap_or("");
    let all = Store::new(conn).all()?;
    Ok(ledger::overview(&all, period, sort_config(sub)?, query))
}

fn list(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let view = query_rows(conn, sub)?;
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &view.rows)? {
        return Ok(());
    }
    println!(
        "{} ({})",
        period_title(view.period, cfg.language),
        view.rows.len()
    );
    let rows: Vec<Vec<String>> = view
        .rows
        .iter()
        .map(|t| {
            let sign = match t.r#type {
                TransactionType::Income => "+",
                TransactionType::Expense => "-",
            };
            vec![
                t.id.to_string(),
                fmt_date(t.date),
                t.label.clone(),
                type_label(t.r#type, cfg.language).to_string(),
                format!("{}{}", sign, fmt_amount(&t.amount)),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Date", "Label", "Type", "Amount"], rows)
    );
    Ok(())
}
