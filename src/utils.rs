// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::SeriesEntry;
use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::Value;
use std::str::FromStr;

const UA: &str = concat!("deskboard/", env!("CARGO_PKG_VERSION"));

/// Largest magnitude accepted for a single record. Keeps any realistic sum
/// well inside `Decimal`'s range.
pub const AMOUNT_CEILING: i64 = 1_000_000_000_000;

pub fn within_ceiling(d: &Decimal) -> bool {
    d.abs() <= Decimal::from(AMOUNT_CEILING)
}

pub fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    let c = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_secs))
        .user_agent(UA)
        .build()?;
    Ok(c)
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))
}

/// Accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (taken as UTC) or a bare date.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
}

pub fn parse_decimal(s: &str) -> Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn parse_amount(s: &str) -> Result<Decimal> {
    let d = parse_decimal(s)?;
    if d.is_sign_negative() {
        anyhow::bail!("Amount '{}' must not be negative; use --type to record an expense", s);
    }
    if !within_ceiling(&d) {
        anyhow::bail!("Amount '{}' is larger than {}", s, AMOUNT_CEILING);
    }
    Ok(d)
}

/// Reads a money amount from loosely typed JSON: numbers or numeric strings.
pub fn coerce_amount(v: &Value) -> Option<Decimal> {
    match v {
        Value::Number(n) => Decimal::from_str(&n.to_string())
            .ok()
            .or_else(|| n.as_f64().and_then(|f| Decimal::try_from(f).ok())),
        Value::String(s) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    }
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(
    json_flag: bool,
    jsonl_flag: bool,
    v: &T,
) -> Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    if jsonl_flag {
        // Arrays stream one element per line
        let val = serde_json::to_value(v)?;
        if let Some(arr) = val.as_array() {
            for item in arr {
                println!("{}", serde_json::to_string(item)?);
            }
        } else {
            println!("{}", serde_json::to_string(&val)?);
        }
        return Ok(true);
    }
    Ok(false)
}

/// Horizontal bar chart lines, bars scaled so the largest total spans `width`.
pub fn render_bars(series: &[SeriesEntry], width: usize) -> Vec<String> {
    let label_w = series.iter().map(|e| e.name.chars().count()).max().unwrap_or(0);
    let max = series
        .iter()
        .map(|e| e.total)
        .max()
        .unwrap_or(Decimal::ZERO);
    series
        .iter()
        .map(|e| {
            let len = if max.is_zero() {
                0
            } else {
                (e.total / max * Decimal::from(width as u64))
                    .round()
                    .to_usize()
                    .unwrap_or(0)
            };
            format!(
                "{:<label_w$} | {} {}",
                e.name,
                "#".repeat(len),
                fmt_money(&e.total),
            )
        })
        .collect()
}
