// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{kind_label, window_from};
use crate::aggregate::{SavingsDashboard, SeriesKind, Totals};
use crate::api::ApiClient;
use crate::api::wire::{NewSaving, SavingPatch};
use crate::config::Config;
use crate::modal::edit_record;
use crate::models::{SeriesEntry, SubtypeCode, Transaction, TypeCode};
use crate::utils::{fmt_money, maybe_print_json, parse_amount, pretty_table, render_bars};
use crate::view::{Completion, SavingsView};
use anyhow::{Result, anyhow};
use chrono::Utc;
use serde::Serialize;

const BAR_WIDTH: usize = 40;

pub fn handle(client: &ApiClient, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(client, cfg, sub)?,
        Some(("add", sub)) => add(client, cfg, sub)?,
        Some(("edit", sub)) => edit(client, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete_saving(id)?;
            println!("Removed record {}", id);
        }
        Some(("summary", sub)) => summary(client, cfg, sub)?,
        Some(("chart", sub)) => chart(client, cfg, sub)?,
        _ => {}
    }
    Ok(())
}

fn type_for(cfg: &Config, kind: &str) -> TypeCode {
    if kind == "income" {
        cfg.types.income
    } else {
        cfg.types.expense
    }
}

fn series_kind(sub: &clap::ArgMatches) -> SeriesKind {
    if sub.get_flag("income") {
        SeriesKind::Income
    } else {
        SeriesKind::Expense
    }
}

#[derive(Serialize)]
pub struct SavingRow {
    pub id: i64,
    pub date: String,
    pub kind: String,
    pub category: String,
    pub amount: String,
    pub content: String,
}

pub fn query_rows(client: &ApiClient, cfg: &Config, sub: &clap::ArgMatches) -> Result<Vec<SavingRow>> {
    let selector = window_from(sub, Utc::now())?;
    let mut txs = client.list_savings(selector)?;
    if let Some(kind) = sub.get_one::<String>("kind") {
        let ty = type_for(cfg, kind);
        txs.retain(|t| t.r#type == ty);
    }
    let lookup = client.list_types(None)?;
    txs.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(txs
        .into_iter()
        .map(|t| SavingRow {
            id: t.id,
            date: t.created_at.format("%Y-%m-%d").to_string(),
            kind: kind_label(cfg, t.r#type),
            category: lookup
                .iter()
                .find(|e| e.sub_type == t.sub_type)
                .map(|e| e.content.clone())
                .unwrap_or_else(|| t.sub_type.to_string()),
            amount: fmt_money(&t.amount),
            content: t.content,
        })
        .collect())
}

fn list(client: &ApiClient, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let data = query_rows(client, cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &data)? {
        let rows = data
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.kind.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.content.clone(),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Date", "Type", "Category", "Amount", "Content"], rows)
        );
    }
    Ok(())
}

fn add(client: &ApiClient, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let kind = sub.get_one::<String>("kind").unwrap();
    let body = NewSaving {
        r#type: type_for(cfg, kind),
        sub_type: SubtypeCode(*sub.get_one::<i64>("sub_type").unwrap()),
        amount: parse_amount(sub.get_one::<String>("amount").unwrap())?,
        content: sub
            .get_one::<String>("content")
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
    };
    let saved = client.create_saving(&body)?;
    println!("Recorded {} {} (id {})", kind, fmt_money(&saved.amount), saved.id);
    Ok(())
}

pub fn edit_saving(
    client: &ApiClient,
    id: i64,
    patch: &SavingPatch,
) -> Result<Transaction> {
    let record = client.get_saving(id)?;
    let saved = edit_record(
        record,
        |draft| {
            if let Some(a) = patch.amount {
                draft.amount = a;
            }
            if let Some(c) = &patch.content {
                draft.content = c.clone();
            }
            if let Some(s) = patch.sub_type {
                draft.sub_type = s;
            }
        },
        |draft| {
            let body = SavingPatch {
                amount: Some(draft.amount),
                content: Some(draft.content.clone()),
                sub_type: Some(draft.sub_type),
            };
            client.update_saving(id, &body)
        },
    )??;
    Ok(saved)
}

fn edit(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").unwrap();
    let patch = SavingPatch {
        amount: sub
            .get_one::<String>("amount")
            .map(|s| parse_amount(s))
            .transpose()?,
        content: sub.get_one::<String>("content").map(|s| s.trim().to_string()),
        sub_type: sub.get_one::<i64>("sub_type").map(|c| SubtypeCode(*c)),
    };
    if patch.amount.is_none() && patch.content.is_none() && patch.sub_type.is_none() {
        return Err(anyhow!("Nothing to change; pass --amount, --content or --sub-type"));
    }
    let saved = edit_saving(client, id, &patch)?;
    println!("Updated record {} ({})", saved.id, fmt_money(&saved.amount));
    Ok(())
}

/// Fetches and builds the dashboard through the savings view.
pub fn load_dashboard(
    client: &ApiClient,
    cfg: &Config,
    sub: &clap::ArgMatches,
) -> Result<SavingsDashboard> {
    let selector = window_from(sub, Utc::now())?;
    let mut view = SavingsView::new(cfg.types.filter(), series_kind(sub));
    match view.refresh(client, selector) {
        Completion::Applied => view
            .dashboard()
            .cloned()
            .ok_or_else(|| anyhow!("savings view applied without data")),
        Completion::Failed | Completion::Stale => Err(anyhow!(
            "{}",
            view.notice().unwrap_or("savings could not be loaded")
        )),
    }
}

fn totals_row(label: &str, t: &Totals) -> Vec<String> {
    vec![
        label.to_string(),
        fmt_money(&t.income),
        fmt_money(&t.expense),
        fmt_money(&t.balance),
    ]
}

fn print_series(title: &str, series: &[SeriesEntry]) {
    println!("{}", title);
    if series.is_empty() {
        println!("  (no records)");
    }
    for line in render_bars(series, BAR_WIDTH) {
        println!("  {}", line);
    }
}

fn summary(client: &ApiClient, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let dash = load_dashboard(client, cfg, sub)?;
    if maybe_print_json(json_flag, jsonl_flag, &dash)? {
        return Ok(());
    }
    let rows = vec![
        totals_row("All time", &dash.all_time),
        totals_row(&dash.selector, &dash.selected),
    ];
    println!(
        "{}",
        pretty_table(&["Window", "Income", "Expense", "Balance"], rows)
    );
    let kind = match dash.kind {
        SeriesKind::Income => "Income",
        SeriesKind::Expense => "Expense",
    };
    print_series(&format!("{} by category, all time", kind), &dash.all_time_series);
    print_series(
        &format!("{} by category, {}", kind, dash.selector),
        &dash.selected_series,
    );
    Ok(())
}

fn chart(client: &ApiClient, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let dash = load_dashboard(client, cfg, sub)?;
    if !maybe_print_json(json_flag, jsonl_flag, &dash.selected_series)? {
        print_series(&dash.selector, &dash.selected_series);
    }
    Ok(())
}
