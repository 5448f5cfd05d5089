// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Monthly aggregation over an in-memory transaction snapshot.
//!
//! Everything here is a pure function of its inputs and assumes the records
//! were validated when they were written.

use crate::models::{ModelError, MonthlyStats, PeriodKey, Transaction, TransactionType};
use crate::utils::days_in_month;
use chrono::Datelike;
use rust_decimal::Decimal;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::str::FromStr;

/// How many previous months the history list keeps.
pub const HISTORY_WINDOW: usize = 12;

/// Transactions dated inside `period`.
pub fn filter_by_period(transactions: &[Transaction], period: PeriodKey) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| period.contains(t.date))
        .cloned()
        .collect()
}

/// Income, expense and net for `period`; all zero when nothing matches.
pub fn compute_monthly_stats(transactions: &[Transaction], period: PeriodKey) -> MonthlyStats {
    let mut stats = MonthlyStats::default();
    for t in transactions.iter().filter(|t| period.contains(t.date)) {
        stats.record(t);
    }
    stats
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Date,
    Label,
    Amount,
}

impl FromStr for SortKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "label" => Ok(SortKey::Label),
            "amount" => Ok(SortKey::Amount),
            _ => Err(ModelError::InvalidSortKey(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SortConfig {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortConfig {
    fn default() -> Self {
        SortConfig {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortConfig {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        SortConfig { key, direction }
    }

    /// Column-header click: same key flips, a new key starts ascending.
    pub fn toggle(self, key: SortKey) -> Self {
        if self.key == key {
            SortConfig::new(key, self.direction.flipped())
        } else {
            SortConfig::new(key, SortDirection::Asc)
        }
    }
}

fn compare(a: &Transaction, b: &Transaction, key: SortKey) -> Ordering {
    match key {
        SortKey::Label => a.label.to_lowercase().cmp(&b.label.to_lowercase()),
        SortKey::Amount => a.amount.cmp(&b.amount),
        SortKey::Date => match (a.date.cmp(&b.date), a.created_at, b.created_at) {
            (Ordering::Equal, Some(ca), Some(cb)) => ca.cmp(&cb),
            (ord, _, _) => ord,
        },
    }
}

/// Stable sort; ties left after the `created_at` tie-break keep input order
/// in both directions.
pub fn sort_transactions(list: &mut [Transaction], config: SortConfig) {
    list.sort_by(|a, b| {
        let ord = compare(a, b, config.key);
        match config.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

/// The amount as a person would type it: `4500`, `12.5`.
pub fn amount_text(amount: Decimal) -> String {
    amount.normalize().to_string()
}

/// Case-insensitive match on the label, or a substring of [`amount_text`].
pub fn search_filter(list: &[Transaction], query: &str) -> Vec<Transaction> {
    if query.is_empty() {
        return list.to_vec();
    }
    let q = query.to_lowercase();
    list.iter()
        .filter(|t| t.label.to_lowercase().contains(&q) || amount_text(t.amount).contains(&q))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailyPoint {
    pub day: String,
    pub income: Decimal,
    pub expense: Decimal,
}

/// One point per calendar day of `period`, so the chart axis has no gaps.
pub fn build_daily_series(transactions: &[Transaction], period: PeriodKey) -> Vec<DailyPoint> {
    let days = days_in_month(period.year(), period.month());
    let mut series: Vec<DailyPoint> = (1..=days)
        .map(|d| DailyPoint {
            day: format!("{:02}", d),
            income: Decimal::ZERO,
            expense: Decimal::ZERO,
        })
        .collect();

    for t in transactions.iter().filter(|t| period.contains(t.date)) {
        let Some(point) = series.get_mut(t.date.day0() as usize) else {
            continue;
        };
        match t.r#type {
            TransactionType::Income => point.income = point.income.saturating_add(t.amount),
            TransactionType::Expense => point.expense = point.expense.saturating_add(t.amount),
        }
    }
    series
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub period: PeriodKey,
    #[serde(flatten)]
    pub stats: MonthlyStats,
}

/// Per-month totals for every month except `exclude`, newest first, capped
/// at [`HISTORY_WINDOW`] entries.
pub fn build_history_summaries(
    transactions: &[Transaction],
    exclude: PeriodKey,
) -> Vec<HistoryEntry> {
    let mut map: BTreeMap<PeriodKey, MonthlyStats> = BTreeMap::new();
    for t in transactions {
        let key = PeriodKey::of(t.date);
        if key == exclude {
            continue;
        }
        map.entry(key).or_default().record(t);
    }
    map.into_iter()
        .rev()
        .take(HISTORY_WINDOW)
        .map(|(period, stats)| HistoryEntry { period, stats })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetState {
    /// No limit set; show a setup prompt rather than a progress bar.
    Unconfigured,
    Normal,
    Warning,
    Danger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetStatus {
    pub state: BudgetState,
    pub usage_percent: Decimal,
    /// Present only when expense exceeds the limit.
    pub overspend: Option<Decimal>,
}

impl BudgetStatus {
    /// Usage clamped to 100 for a progress bar.
    pub fn bar_percent(&self) -> Decimal {
        self.usage_percent.min(Decimal::ONE_HUNDRED)
    }
}

pub fn budget_state(
    expense: Decimal,
    limit: Decimal,
    warning_percent: u8,
    danger_percent: u8,
) -> BudgetStatus {
    if limit <= Decimal::ZERO {
        return BudgetStatus {
            state: BudgetState::Unconfigured,
            usage_percent: Decimal::ZERO,
            overspend: None,
        };
    }
    // A tiny limit can push the ratio past Decimal::MAX; pin it there.
    let usage_percent = expense
        .checked_div(limit)
        .map_or(Decimal::MAX, |r| r.saturating_mul(Decimal::ONE_HUNDRED));
    let state = if usage_percent >= Decimal::from(danger_percent) {
        BudgetState::Danger
    } else if usage_percent >= Decimal::from(warning_percent) {
        BudgetState::Warning
    } else {
        BudgetState::Normal
    };
    let overspend = (expense > limit).then(|| expense - limit);
    BudgetStatus {
        state,
        usage_percent,
        overspend,
    }
}

/// The month view: rows after period filter, search and sort, plus totals.
#[derive(Debug, Clone, Serialize)]
pub struct Overview {
    pub period: PeriodKey,
    pub stats: MonthlyStats,
    pub rows: Vec<Transaction>,
}

pub fn overview(
    transactions: &[Transaction],
    period: PeriodKey,
    sort: SortConfig,
    query: &str,
) -> Overview {
    let in_period = filter_by_period(transactions, period);
    let mut rows = search_filter(&in_period, query);
    sort_transactions(&mut rows, sort);
    Overview {
        period,
        stats: compute_monthly_stats(&in_period, period),
        rows,
    }
}
