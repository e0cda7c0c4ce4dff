// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::api::wire::NewPlan;
use crate::config::Config;
use crate::countdown::{Countdown, CountdownStatus};
use crate::models::Plan;
use crate::utils::{maybe_print_json, parse_timestamp, pretty_table};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

const TICK: Duration = Duration::from_secs(60);

pub fn handle(client: &ApiClient, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(client, sub)?,
        Some(("add", sub)) => {
            let target_date = sub
                .get_one::<String>("target")
                .map(|s| {
                    parse_timestamp(s)
                        .with_context(|| format!("Invalid target '{}', expected YYYY-MM-DD", s))
                })
                .transpose()?;
            let salary_day = sub.get_one::<u32>("salary_day").copied();
            let body = NewPlan {
                r#type: cfg.types.plan,
                content: sub.get_one::<String>("content").unwrap().trim().to_string(),
                target_date,
                salary_day,
            };
            let plan: Plan = client.create(&body)?;
            println!("Added plan {}", plan.id);
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let content = sub.get_one::<String>("content").unwrap();
            let plan: Plan = super::edit_content(client, id, content)?;
            println!("Updated plan {}", plan.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete::<Plan>(id)?;
            println!("Removed plan {}", id);
        }
        Some(("countdown", sub)) => countdown(client, sub)?,
        _ => {}
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct CountdownRow {
    pub id: i64,
    pub content: String,
    #[serde(flatten)]
    pub status: CountdownStatus,
}

/// Plans that carry a target, soonest first.
pub fn countdown_rows(plans: &[Plan], now: DateTime<Utc>) -> Vec<CountdownRow> {
    let mut rows: Vec<CountdownRow> = plans
        .iter()
        .filter_map(|p| {
            Countdown::for_plan(p).map(|c| CountdownRow {
                id: p.id,
                content: p.content.clone(),
                status: c.evaluate(now),
            })
        })
        .collect();
    rows.sort_by(|a, b| {
        a.status
            .remaining_days
            .cmp(&b.status.remaining_days)
            .then(a.id.cmp(&b.id))
    });
    rows
}

fn table_rows(rows: &[CountdownRow]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| {
            vec![
                r.id.to_string(),
                r.content.clone(),
                r.status.target.format("%Y-%m-%d").to_string(),
                if r.status.is_due() {
                    "due".to_string()
                } else {
                    r.status.remaining_days.to_string()
                },
                format!("{:.0}%", r.status.progress * 100.0),
            ]
        })
        .collect()
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let plans: Vec<Plan> = client.list()?;
    if !maybe_print_json(json_flag, jsonl_flag, &plans)? {
        let now = Utc::now();
        let rows = plans
            .iter()
            .map(|p| {
                let left = Countdown::for_plan(p)
                    .map(|c| c.evaluate(now).remaining_days.to_string())
                    .unwrap_or_default();
                vec![p.id.to_string(), p.content.clone(), left]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Plan", "Days left"], rows));
    }
    Ok(())
}

fn countdown(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let mut plans: Vec<Plan> = match sub.get_one::<i64>("id") {
        Some(id) => vec![client.get(*id)?],
        None => client.list()?,
    };
    plans.retain(|p| Countdown::for_plan(p).is_some());
    loop {
        let rows = countdown_rows(&plans, Utc::now());
        if !maybe_print_json(json_flag, jsonl_flag, &rows)? {
            println!(
                "{}",
                pretty_table(
                    &["ID", "Plan", "Target", "Days left", "Remaining"],
                    table_rows(&rows)
                )
            );
        }
        if !sub.get_flag("watch") {
            break;
        }
        std::thread::sleep(TICK);
    }
    Ok(())
}
