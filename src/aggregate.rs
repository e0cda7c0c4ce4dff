// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Totals and chart series derived from savings records.
//!
//! Everything here is pure: records in, view data out. Validation of the
//! raw backend rows happens before anything reaches these functions.

use crate::models::{SeriesEntry, SubtypeCode, Transaction, TypeCode, TypeFilter, TypeLookupEntry};
use chrono::{DateTime, Datelike, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid month '{0}', expected YYYY-MM")]
pub struct ParseMonthError(pub String);

/// A calendar month, parsed from `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| YearMonth { year, month })
    }

    pub fn of(dt: DateTime<Utc>) -> Self {
        YearMonth {
            year: dt.year(),
            month: dt.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn contains(&self, dt: &DateTime<Utc>) -> bool {
        dt.year() == self.year && dt.month() == self.month
    }
}

impl FromStr for YearMonth {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseMonthError(s.to_string());
        // chrono accepts signed and unpadded years, so pin the shape first
        if s.len() != 7 || !s.starts_with(|c: char| c.is_ascii_digit()) || s.as_bytes()[4] != b'-' {
            return Err(err());
        }
        let first = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d")
            .map_err(|_| err())?;
        Ok(YearMonth {
            year: first.year(),
            month: first.month(),
        })
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Window over which records are shown. `AllTime` is an explicit mode, not a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MonthSelector {
    AllTime,
    Month(YearMonth),
}

impl MonthSelector {
    /// The `month` query value for the backend, `None` for every record.
    pub fn query_value(&self) -> Option<String> {
        match self {
            MonthSelector::AllTime => None,
            MonthSelector::Month(ym) => Some(ym.to_string()),
        }
    }
}

impl FromStr for MonthSelector {
    type Err = ParseMonthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(MonthSelector::AllTime);
        }
        s.parse().map(MonthSelector::Month)
    }
}

impl fmt::Display for MonthSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthSelector::AllTime => write!(f, "all time"),
            MonthSelector::Month(ym) => write!(f, "{}", ym),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Totals {
    #[serde(with = "rust_decimal::serde::float")]
    pub income: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub expense: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

pub fn compute_totals(transactions: &[Transaction], filter: TypeFilter) -> Totals {
    let mut income = Decimal::ZERO;
    let mut expense = Decimal::ZERO;
    for t in transactions {
        if t.r#type == filter.income {
            income += t.amount;
        } else if t.r#type == filter.expense {
            expense += t.amount;
        }
    }
    Totals {
        income,
        expense,
        balance: income - expense,
    }
}

/// Sums amounts per subtype and labels each bucket from `lookup`.
///
/// Buckets keep first-seen order before the stable descending sort, so ties
/// come out in the order the records arrived. Subtypes are not split by
/// type: callers wanting separate income/expense series filter first.
pub fn aggregate_by_subtype(
    transactions: &[Transaction],
    lookup: &[TypeLookupEntry],
) -> Vec<SeriesEntry> {
    let mut index: HashMap<SubtypeCode, usize> = HashMap::new();
    let mut buckets: Vec<(SubtypeCode, Decimal)> = Vec::new();
    for t in transactions {
        match index.get(&t.sub_type) {
            Some(&i) => buckets[i].1 += t.amount,
            None => {
                index.insert(t.sub_type, buckets.len());
                buckets.push((t.sub_type, t.amount));
            }
        }
    }

    let mut labels: HashMap<SubtypeCode, &str> = HashMap::new();
    for entry in lookup {
        labels.entry(entry.sub_type).or_insert(entry.content.as_str());
    }

    let mut series: Vec<SeriesEntry> = buckets
        .into_iter()
        .map(|(code, total)| SeriesEntry {
            name: labels
                .get(&code)
                .map(|s| s.to_string())
                .unwrap_or_else(|| code.to_string()),
            total,
        })
        .collect();
    series.sort_by(|a, b| b.total.cmp(&a.total));
    series
}

pub fn filter_by_month(transactions: &[Transaction], selector: MonthSelector) -> Vec<Transaction> {
    match selector {
        MonthSelector::AllTime => transactions.to_vec(),
        MonthSelector::Month(ym) => transactions
            .iter()
            .filter(|t| ym.contains(&t.created_at))
            .cloned()
            .collect(),
    }
}

pub fn filter_by_type(transactions: &[Transaction], ty: TypeCode) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| t.r#type == ty)
        .cloned()
        .collect()
}

/// Which side of the ledger the chart series describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Income,
    Expense,
}

impl SeriesKind {
    pub fn type_code(&self, filter: TypeFilter) -> TypeCode {
        match self {
            SeriesKind::Income => filter.income,
            SeriesKind::Expense => filter.expense,
        }
    }
}

/// Everything the savings screen shows for one selector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingsDashboard {
    pub selector: String,
    pub kind: SeriesKind,
    pub all_time: Totals,
    pub selected: Totals,
    pub all_time_series: Vec<SeriesEntry>,
    pub selected_series: Vec<SeriesEntry>,
}

impl SavingsDashboard {
    pub fn build(
        transactions: &[Transaction],
        lookup: &[TypeLookupEntry],
        filter: TypeFilter,
        selector: MonthSelector,
        kind: SeriesKind,
    ) -> Self {
        let in_window = filter_by_month(transactions, selector);
        let ty = kind.type_code(filter);
        SavingsDashboard {
            selector: selector.to_string(),
            kind,
            all_time: compute_totals(transactions, filter),
            selected: compute_totals(&in_window, filter),
            all_time_series: aggregate_by_subtype(&filter_by_type(transactions, ty), lookup),
            selected_series: aggregate_by_subtype(&filter_by_type(&in_window, ty), lookup),
        }
    }
}
