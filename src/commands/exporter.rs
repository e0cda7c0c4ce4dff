// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::{kind_label, window_from};
use crate::api::ApiClient;
use crate::config::Config;
use crate::models::SubtypeCode;
use anyhow::{Context, Result, anyhow};
use chrono::Utc;
use serde_json::json;

pub fn handle(client: &ApiClient, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("savings", sub)) => export_savings(client, cfg, sub),
        _ => Ok(()),
    }
}

fn export_savings(client: &ApiClient, cfg: &Config, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = sub.get_one::<String>("format").unwrap().to_lowercase();
    let out = sub.get_one::<String>("out").unwrap();
    if fmt != "csv" && fmt != "json" {
        return Err(anyhow!("Unknown format: {} (use csv|json)", fmt));
    }

    let selector = window_from(sub, Utc::now())?;
    let mut txs = client.list_savings(selector)?;
    txs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
    let lookup = client.list_types(None)?;
    let label = |code: SubtypeCode| {
        lookup
            .iter()
            .find(|e| e.sub_type == code)
            .map(|e| e.content.clone())
            .unwrap_or_else(|| code.to_string())
    };

    match fmt.as_str() {
        "csv" => {
            let mut wtr =
                csv::Writer::from_path(out).with_context(|| format!("Create {}", out))?;
            wtr.write_record([
                "id", "date", "type", "sub_type", "category", "amount", "content",
            ])?;
            for t in &txs {
                wtr.write_record([
                    t.id.to_string(),
                    t.created_at.to_rfc3339(),
                    kind_label(cfg, t.r#type),
                    t.sub_type.to_string(),
                    label(t.sub_type),
                    t.amount.to_string(),
                    t.content.clone(),
                ])?;
            }
            wtr.flush()?;
        }
        _ => {
            let items: Vec<_> = txs
                .iter()
                .map(|t| {
                    json!({
                        "id": t.id,
                        "date": t.created_at.to_rfc3339(),
                        "type": kind_label(cfg, t.r#type),
                        "subType": t.sub_type,
                        "category": label(t.sub_type),
                        "amount": t.amount.to_string(),
                        "content": t.content,
                    })
                })
                .collect();
            std::fs::write(out, serde_json::to_string_pretty(&items)?)
                .with_context(|| format!("Write {}", out))?;
        }
    }
    println!("Exported {} records ({}) to {}", txs.len(), selector, out);
    Ok(())
}
