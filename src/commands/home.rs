// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::plans::{CountdownRow, countdown_rows};
use crate::aggregate::{MonthSelector, Totals, YearMonth, compute_totals};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::{Note, Plan, Task, TaskStatus};
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

const UPCOMING: usize = 3;

#[derive(Debug, Serialize)]
pub struct HomeSummary {
    pub notes: usize,
    pub open_tasks: usize,
    pub month: String,
    pub totals: Totals,
    pub upcoming: Vec<CountdownRow>,
}

pub fn build_summary(client: &ApiClient, cfg: &Config, now: DateTime<Utc>) -> Result<HomeSummary> {
    let notes: Vec<Note> = client.list()?;
    let tasks: Vec<Task> = client.list()?;
    let plans: Vec<Plan> = client.list()?;
    let month = YearMonth::of(now);
    let txs = client.list_savings(MonthSelector::Month(month))?;
    let mut upcoming = countdown_rows(&plans, now);
    upcoming.truncate(UPCOMING);
    Ok(HomeSummary {
        notes: notes.len(),
        open_tasks: tasks.iter().filter(|t| t.status != TaskStatus::Done).count(),
        month: month.to_string(),
        totals: compute_totals(&txs, cfg.types.filter()),
        upcoming,
    })
}

/// One line per countdown; a plan whose day has come reads "due".
pub fn upcoming_rows(upcoming: &[CountdownRow]) -> Vec<Vec<String>> {
    upcoming
        .iter()
        .map(|r| {
            let left = if r.status.is_due() {
                "due".to_string()
            } else {
                format!("{} days", r.status.remaining_days)
            };
            vec![r.content.clone(), left]
        })
        .collect()
}

pub fn handle(client: &ApiClient, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let home = build_summary(client, cfg, Utc::now())?;
    if maybe_print_json(json_flag, jsonl_flag, &home)? {
        return Ok(());
    }
    let mut rows = vec![
        vec!["Notes".to_string(), home.notes.to_string()],
        vec!["Open tasks".to_string(), home.open_tasks.to_string()],
        vec![format!("Income {}", home.month), fmt_money(&home.totals.income)],
        vec![format!("Expense {}", home.month), fmt_money(&home.totals.expense)],
        vec![format!("Balance {}", home.month), fmt_money(&home.totals.balance)],
    ];
    rows.extend(upcoming_rows(&home.upcoming));
    println!("{}", pretty_table(&["", ""], rows));
    Ok(())
}
