// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::i18n::{budget_message, overspent_message, period_title, type_label};
use crate::ledger::{self, BudgetState, BudgetStatus};
use crate::models::{MonthlyStats, PeriodKey, TransactionType};
use crate::store::Store;
use crate::utils::{flag, fmt_amount, maybe_print_json, month_arg, pretty_table, today};
use anyhow::Result;
use rusqlite::Connection;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

pub fn handle(conn: &Connection, cfg: &Config, name: &str, sub: &clap::ArgMatches) -> Result<()> {
    match name {
        "summary" => summary(conn, cfg, sub),
        "chart" => chart(conn, sub),
        "history" => history(conn, cfg, sub),
        _ => Ok(()),
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub period: PeriodKey,
    #[serde(flatten)]
    pub stats: MonthlyStats,
    /// `None` when the budget panel is switched off.
    pub budget: Option<BudgetStatus>,
    pub limit: Option<Decimal>,
}

pub fn build_summary(conn: &Connection, period: PeriodKey) -> Result<Summary> {
    let store = Store::new(conn);
    let all = store.all()?;
    let stats = ledger::compute_monthly_stats(&all, period);
    let (budget, limit) = if store.budget_enabled()? {
        let settings = store.budget_settings(today())?;
        let status = match &settings {
            Some(s) => ledger::budget_state(
                stats.expense,
                s.limit_amount,
                s.warning_percent,
                s.danger_percent,
            ),
            None => ledger::budget_state(stats.expense, Decimal::ZERO, 0, 0),
        };
        (Some(status), settings.map(|s| s.limit_amount))
    } else {
        (None, None)
    };
    Ok(Summary {
        period,
        stats,
        budget,
        limit,
    })
}

fn summary(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let s = build_summary(conn, month_arg(sub)?)?;
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &s)? {
        return Ok(());
    }
    let lang = cfg.language;
    println!("{}", period_title(s.period, lang));
    println!(
        "{}",
        pretty_table(
            &[
                type_label(TransactionType::Income, lang),
                type_label(TransactionType::Expense, lang),
                "Net",
            ],
            vec![vec![
                fmt_amount(&s.stats.income),
                fmt_amount(&s.stats.expense),
                fmt_amount(&s.stats.net),
            ]],
        )
    );
    let Some(status) = s.budget else {
        return Ok(());
    };
    match (status.state, s.limit) {
        (BudgetState::Unconfigured, _) | (_, None) => {
            println!("{} (moneynote budget set --limit N)", budget_message(status.state, lang));
        }
        (state, Some(limit)) => {
            println!(
                "Budget {} / {} ({:.1}%) {}",
                fmt_amount(&s.stats.expense),
                fmt_amount(&limit),
                status.usage_percent,
                progress_bar(status.bar_percent())
            );
            println!("{}", budget_message(state, lang));
            if let Some(over) = status.overspend {
                println!("{} +{}", overspent_message(lang), fmt_amount(&over));
            }
        }
    }
    Ok(())
}

fn progress_bar(percent: Decimal) -> String {
    const WIDTH: i64 = 20;
    let filled = (percent * Decimal::from(WIDTH) / Decimal::ONE_HUNDRED)
        .floor()
        .to_i64()
        .unwrap_or(0)
        .clamp(0, WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled as usize),
        ".".repeat((WIDTH - filled) as usize)
    )
}

fn chart(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let period = month_arg(sub)?;
    let all = Store::new(conn).all()?;
    let series = ledger::build_daily_series(&all, period);
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &series)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = series
        .iter()
        .map(|p| vec![p.day.clone(), fmt_amount(&p.income), fmt_amount(&p.expense)])
        .collect();
    println!("{}", pretty_table(&["Day", "Income", "Expense"], rows));
    Ok(())
}

fn history(conn: &Connection, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let period = month_arg(sub)?;
    let all = Store::new(conn).all()?;
    let entries = ledger::build_history_summaries(&all, period);
    if maybe_print_json(flag(sub, "json"), flag(sub, "jsonl"), &entries)? {
        return Ok(());
    }
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                period_title(e.period, cfg.language),
                fmt_amount(&e.stats.income),
                fmt_amount(&e.stats.expense),
                fmt_amount(&e.stats.net),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Month", "Income", "Expense", "Net"], rows)
    );
    Ok(())
}
