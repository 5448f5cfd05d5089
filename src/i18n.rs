// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Display strings for the closed enumerations in [`crate::models`] and
//! [`crate::ledger`]. Aggregation never depends on this module.

use crate::ledger::BudgetState;
use crate::models::{Category, ModelError, PeriodKey, TransactionType};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    My,
    En,
    Ja,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::My => "my",
            Language::En => "en",
            Language::Ja => "ja",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown language '{0}' (use my|en|ja)")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "my" => Ok(Language::My),
            "en" => Ok(Language::En),
            "ja" => Ok(Language::Ja),
            _ => Err(UnknownLanguage(s.to_string())),
        }
    }
}

pub fn category_label(c: Category, lang: Language) -> &'static str {
    use Category::*;
    match lang {
        Language::My => match c {
            Food => "အစားအသောက်",
            Transport => "လမ်းစရိတ်",
            Shopping => "ဈေးဝယ်",
            Health => "ကျန်းမာရေး",
            Bills => "မီတာ/အင်တာနက်",
            Phone => "ဖုန်းဘေလ်",
            Gift => "လက်ဆောင်/အလှူ",
            Work => "လုပ်ငန်းသုံး",
            Education => "ပညာရေး",
            Salary => "လစာ",
            Bonus => "ဘောနပ်စ်",
            Business => "လုပ်ငန်း/အရောင်း",
            Allowance => "မုန့်ဖိုး",
            Refund => "ပြန်ရငွေ",
            General => "အထွေထွေ",
        },
        Language::En => match c {
            Food => "Food",
            Transport => "Transport",
            Shopping => "Shopping",
            Health => "Health",
            Bills => "Bills/Internet",
            Phone => "Phone Bill",
            Gift => "Gift/Donation",
            Work => "Work",
            Education => "Education",
            Salary => "Salary",
            Bonus => "Bonus",
            Business => "Business/Sales",
            Allowance => "Allowance",
            Refund => "Refund",
            General => "General",
        },
        Language::Ja => match c {
            Food => "食費",
            Transport => "交通費",
            Shopping => "買い物",
            Health => "医療",
            Bills => "光熱費/ネット",
            Phone => "携帯代",
            Gift => "贈り物/寄付",
            Work => "仕事",
            Education => "教育",
            Salary => "給料",
            Bonus => "ボーナス",
            Business => "事業/売上",
            Allowance => "お小遣い",
            Refund => "返金",
            General => "その他",
        },
    }
}

/// Every localized category label, deduplicated, for search suggestions.
pub fn search_suggestions(lang: Language) -> Vec<&'static str> {
    let mut out: Vec<&'static str> = Vec::new();
    for c in Category::EXPENSE.iter().chain(Category::INCOME.iter()) {
        let label = category_label(*c, lang);
        if !out.contains(&label) {
            out.push(label);
        }
    }
    out
}

/// Resolves `--category` input given either as a code (`food`) or as a
/// localized label in any language.
pub fn parse_category(s: &str) -> Result<Category, ModelError> {
    if let Ok(c) = s.parse::<Category>() {
        return Ok(c);
    }
    let wanted = s.trim();
    Category::EXPENSE
        .iter()
        .chain(Category::INCOME.iter())
        .find(|c| {
            [Language::My, Language::En, Language::Ja]
                .iter()
                .any(|l| category_label(**c, *l).eq_ignore_ascii_case(wanted))
        })
        .copied()
        .ok_or_else(|| ModelError::UnknownCategory(s.to_string()))
}

pub fn type_label(t: TransactionType, lang: Language) -> &'static str {
    match (lang, t) {
        (Language::My, TransactionType::Income) => "ဝင်ငွေ",
        (Language::My, TransactionType::Expense) => "ထွက်ငွေ",
        (Language::En, TransactionType::Income) => "Income",
        (Language::En, TransactionType::Expense) => "Expense",
        (Language::Ja, TransactionType::Income) => "収入",
        (Language::Ja, TransactionType::Expense) => "支出",
    }
}

const MONTHS_MY: [&str; 12] = [
    "ဇန်နဝါရီ",
    "ဖေဖော်ဝါရီ",
    "မတ်",
    "ဧပြီ",
    "မေ",
    "ဇွန်",
    "ဇူလိုင်",
    "သြဂုတ်",
    "စက်တင်ဘာ",
    "အောက်တိုဘာ",
    "နိုဝင်ဘာ",
    "ဒီဇင်ဘာ",
];

const MONTHS_EN: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Heading for a month view, e.g. `2024 ဇွန်လ`, `June 2024`, `2024年6月`.
pub fn period_title(p: PeriodKey, lang: Language) -> String {
    let idx = (p.month() - 1) as usize;
    match lang {
        Language::My => format!("{} {}လ", p.year(), MONTHS_MY[idx]),
        Language::En => format!("{} {}", MONTHS_EN[idx], p.year()),
        Language::Ja => format!("{}年{}月", p.year(), p.month()),
    }
}

pub fn budget_message(state: BudgetState, lang: Language) -> &'static str {
    match (lang, state) {
        (Language::My, BudgetState::Unconfigured) => {
            "လစဉ်သုံးငွေ လျာထားချက် သတ်မှတ်ထားခြင်း မရှိသေးပါ"
        }
        (Language::My, BudgetState::Normal) => "ပုံမှန်အခြေအနေတွင် ရှိနေပါသည်။",
        (Language::My, BudgetState::Warning) => "သတိပြုရန် - ကျော်နေပါပြီ။ ချွေတာပါ။",
        (Language::My, BudgetState::Danger) => "အန္တရာယ်အဆင့် ရောက်ရှိနေပါသည်",
        (Language::En, BudgetState::Unconfigured) => "No monthly budget set",
        (Language::En, BudgetState::Normal) => "Spending is within budget.",
        (Language::En, BudgetState::Warning) => "Warning: approaching your limit. Slow down.",
        (Language::En, BudgetState::Danger) => "Danger zone reached",
        (Language::Ja, BudgetState::Unconfigured) => "月の予算が未設定です",
        (Language::Ja, BudgetState::Normal) => "予算内に収まっています。",
        (Language::Ja, BudgetState::Warning) => "注意: 上限に近づいています。",
        (Language::Ja, BudgetState::Danger) => "危険ゾーンに達しました",
    }
}

pub fn overspent_message(lang: Language) -> &'static str {
    match lang {
        Language::My => "လျာထားချက်ထက် ပိုသုံးမိနေပါပြီ။",
        Language::En => "You have spent more than your budget.",
        Language::Ja => "予算を超えて支出しています。",
    }
}
