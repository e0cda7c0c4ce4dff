// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::api::wire::NewNote;
use crate::config::Config;
use crate::models::{Note, SubtypeCode};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::{Result, anyhow};
use regex::Regex;

pub fn handle(client: &ApiClient, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(client, sub)?,
        Some(("add", sub)) => {
            let body = NewNote {
                r#type: cfg.types.note,
                sub_type: sub.get_one::<i64>("sub_type").map(|c| SubtypeCode(*c)),
                content: sub.get_one::<String>("content").unwrap().trim().to_string(),
            };
            let note: Note = client.create(&body)?;
            println!("Added note {}", note.id);
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let content = sub.get_one::<String>("content").unwrap();
            let note: Note = super::edit_content(client, id, content)?;
            println!("Updated note {}", note.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete::<Note>(id)?;
            println!("Removed note {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let notes = query_notes(client, sub.get_one::<String>("grep").map(|s| s.as_str()))?;
    if !maybe_print_json(json_flag, jsonl_flag, &notes)? {
        let rows = notes
            .iter()
            .map(|n| {
                vec![
                    n.id.to_string(),
                    n.created_at.format("%Y-%m-%d").to_string(),
                    n.sub_type.map(|c| c.to_string()).unwrap_or_default(),
                    n.content.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Created", "Sub", "Content"], rows));
    }
    Ok(())
}

/// Newest first, optionally narrowed by a regex over the content.
pub fn query_notes(client: &ApiClient, grep: Option<&str>) -> Result<Vec<Note>> {
    let re = grep
        .map(|p| {
            Regex::new(p.trim()).map_err(|err| anyhow!("Invalid regex pattern '{}': {}", p, err))
        })
        .transpose()?;
    let mut notes: Vec<Note> = client.list()?;
    if let Some(re) = re {
        notes.retain(|n| re.is_match(&n.content));
    }
    notes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
    Ok(notes)
}
