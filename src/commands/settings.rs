// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::config::Config;
use crate::models::TypeCode;
use crate::utils::pretty_table;
use anyhow::Result;
use std::path::Path;

pub fn handle(path: &Path, effective: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("show", _)) => {
            let t = &effective.types;
            let rows = vec![
                vec!["config file".into(), path.display().to_string()],
                vec!["api_url".into(), effective.api_url.clone()],
                vec!["timeout_secs".into(), effective.timeout_secs.to_string()],
                vec!["income type".into(), t.income.to_string()],
                vec!["expense type".into(), t.expense.to_string()],
                vec!["note type".into(), t.note.to_string()],
                vec!["plan type".into(), t.plan.to_string()],
                vec!["task type".into(), t.task.to_string()],
            ];
            println!("{}", pretty_table(&["Setting", "Value"], rows));
        }
        Some(("set", sub)) => {
            let cfg = apply_set(Config::load_from(path)?, sub);
            cfg.save_to(path)?;
            println!("Saved settings to {}", path.display());
        }
        _ => {}
    }
    Ok(())
}

/// Edits the stored file only; env and flag overrides are not persisted.
pub fn apply_set(mut cfg: Config, sub: &clap::ArgMatches) -> Config {
    if let Some(url) = sub.get_one::<String>("url") {
        cfg.api_url = url.trim().to_string();
    }
    if let Some(t) = sub.get_one::<i64>("income_type") {
        cfg.types.income = TypeCode(*t);
    }
    if let Some(t) = sub.get_one::<i64>("expense_type") {
        cfg.types.expense = TypeCode(*t);
    }
    if let Some(s) = sub.get_one::<u64>("timeout_secs") {
        cfg.timeout_secs = *s;
    }
    cfg
}
