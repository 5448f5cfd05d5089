// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid month '{0}', expected YYYY-MM")]
    InvalidPeriod(String),
    #[error("Invalid transaction type '{0}', expected income|expense")]
    InvalidType(String),
    #[error("Unknown sort key '{0}', expected date|label|amount")]
    InvalidSortKey(String),
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
    #[error("Budget limit must be greater than zero")]
    NonPositiveLimit,
    #[error("Warning percent {0} out of range (50-95)")]
    WarningOutOfRange(u8),
    #[error("Danger percent {danger} out of range ({min}-100)")]
    DangerOutOfRange { danger: u8, min: u8 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionType::Income),
            "expense" => Ok(TransactionType::Expense),
            _ => Err(ModelError::InvalidType(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: Decimal,
    pub label: String,
    pub date: NaiveDate,
    pub r#type: TransactionType,
    pub created_at: Option<NaiveDateTime>,
}

/// The editable part of a transaction: what a form or import supplies.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub amount: Decimal,
    pub label: String,
    pub date: NaiveDate,
    pub r#type: TransactionType,
}

/// A calendar month, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    pub fn new(year: i32, month: u32) -> Result<Self, ModelError> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(ModelError::InvalidPeriod(format!("{}-{}", year, month)));
        }
        Ok(PeriodKey { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        PeriodKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Same as checking that `YYYY-MM-DD` starts with `YYYY-MM`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for PeriodKey {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ModelError::InvalidPeriod(s.to_string());
        let (y, m) = s.split_once('-').ok_or_else(invalid)?;
        if y.len() != 4 || m.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = y.parse().map_err(|_| invalid())?;
        let month: u32 = m.parse().map_err(|_| invalid())?;
        PeriodKey::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyStats {
    pub income: Decimal,
    pub expense: Decimal,
    pub net: Decimal,
}

impl MonthlyStats {
    /// Adds one transaction. Totals saturate at `Decimal::MAX` instead of
    /// overflowing.
    pub fn record(&mut self, t: &Transaction) {
        match t.r#type {
            TransactionType::Income => self.income = self.income.saturating_add(t.amount),
            TransactionType::Expense => self.expense = self.expense.saturating_add(t.amount),
        }
        self.net = self.income - self.expense;
    }
}

pub const MIN_WARNING_PERCENT: u8 = 50;
pub const MAX_WARNING_PERCENT: u8 = 95;
pub const MIN_THRESHOLD_GAP: u8 = 5;
pub const DEFAULT_WARNING_PERCENT: u8 = 80;
pub const DEFAULT_DANGER_PERCENT: u8 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetSettings {
    pub limit_amount: Decimal,
    pub warning_percent: u8,
    pub danger_percent: u8,
    pub updated_at: NaiveDateTime,
}

impl BudgetSettings {
    pub fn new(
        limit_amount: Decimal,
        warning_percent: u8,
        danger_percent: u8,
        updated_at: NaiveDateTime,
    ) -> Result<Self, ModelError> {
        if limit_amount <= Decimal::ZERO {
            return Err(ModelError::NonPositiveLimit);
        }
        if !(MIN_WARNING_PERCENT..=MAX_WARNING_PERCENT).contains(&warning_percent) {
            return Err(ModelError::WarningOutOfRange(warning_percent));
        }
        let min = warning_percent + MIN_THRESHOLD_GAP;
        if !(min..=100).contains(&danger_percent) {
            return Err(ModelError::DangerOutOfRange {
                danger: danger_percent,
                min,
            });
        }
        Ok(BudgetSettings {
            limit_amount,
            warning_percent,
            danger_percent,
            updated_at,
        })
    }

    /// Settings only hold for the month they were saved in.
    pub fn is_current(&self, today: NaiveDate) -> bool {
        PeriodKey::of(self.updated_at.date()) == PeriodKey::of(today)
    }
}

/// Quick-pick categories. Selecting one fills a transaction label with its
/// localized name; see [`crate::i18n::category_label`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Food,
    Transport,
    Shopping,
    Health,
    Bills,
    Phone,
    Gift,
    Work,
    Education,
    Salary,
    Bonus,
    Business,
    Allowance,
    Refund,
    General,
}

impl Category {
    pub const EXPENSE: [Category; 10] = [
        Category::Food,
        Category::Transport,
        Category::Shopping,
        Category::Health,
        Category::Bills,
        Category::Phone,
        Category::Gift,
        Category::Work,
        Category::Education,
        Category::General,
    ];

    pub const INCOME: [Category; 6] = [
        Category::Salary,
        Category::Bonus,
        Category::Business,
        Category::Allowance,
        Category::Refund,
        Category::General,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Category::Food => "food",
            Category::Transport => "transport",
            Category::Shopping => "shopping",
            Category::Health => "health",
            Category::Bills => "bills",
            Category::Phone => "phone",
            Category::Gift => "gift",
            Category::Work => "work",
            Category::Education => "education",
            Category::Salary => "salary",
            Category::Bonus => "bonus",
            Category::Business => "business",
            Category::Allowance => "allowance",
            Category::Refund => "refund",
            Category::General => "general",
        }
    }

    /// Categories offered for a transaction type, in display order.
    pub fn for_type(t: TransactionType) -> &'static [Category] {
        match t {
            TransactionType::Income => &Self::INCOME,
            TransactionType::Expense => &Self::EXPENSE,
        }
    }

    /// Income categories imply an income transaction; everything else is an expense.
    pub fn default_type(&self) -> TransactionType {
        if matches!(self, Category::General) || !Self::INCOME.contains(self) {
            TransactionType::Expense
        } else {
            TransactionType::Income
        }
    }
}

impl FromStr for Category {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Self::EXPENSE
            .iter()
            .chain(Self::INCOME.iter())
            .find(|c| c.code() == code)
            .copied()
            .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
    }
}
