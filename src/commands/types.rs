// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::api::wire::NewTypeEntry;
use crate::models::{SubtypeCode, TypeCode, TypeLookupEntry};
use crate::utils::{maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle(client: &ApiClient, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => {
            let json_flag = sub.get_flag("json");
            let jsonl_flag = sub.get_flag("jsonl");
            let ty = sub.get_one::<i64>("type").map(|t| TypeCode(*t));
            let entries = client.list_types(ty)?;
            if !maybe_print_json(json_flag, jsonl_flag, &entries)? {
                let rows = entries
                    .iter()
                    .map(|e| {
                        vec![
                            e.id.map(|i| i.to_string()).unwrap_or_default(),
                            e.r#type.map(|t| t.to_string()).unwrap_or_default(),
                            e.sub_type.to_string(),
                            e.content.clone(),
                        ]
                    })
                    .collect();
                println!("{}", pretty_table(&["ID", "Type", "Sub", "Label"], rows));
            }
        }
        Some(("add", sub)) => {
            let body = NewTypeEntry {
                r#type: TypeCode(*sub.get_one::<i64>("type").unwrap()),
                sub_type: SubtypeCode(*sub.get_one::<i64>("sub_type").unwrap()),
                content: sub.get_one::<String>("content").unwrap().trim().to_string(),
            };
            let entry: TypeLookupEntry = client.create(&body)?;
            println!("Added label '{}' for subtype {}", entry.content, entry.sub_type);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete::<TypeLookupEntry>(id)?;
            println!("Removed label {}", id);
        }
        _ => {}
    }
    Ok(())
}
