// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod auth;
pub mod exporter;
pub mod home;
pub mod notes;
pub mod plans;
pub mod savings;
pub mod settings;
pub mod tasks;
pub mod types;

use crate::aggregate::{MonthSelector, YearMonth};
use crate::api::wire::RecordPatch;
use crate::api::{ApiClient, Resource};
use crate::config::Config;
use crate::models::{Described, TypeCode};
use crate::modal::edit_record;
use anyhow::Result;
use chrono::{DateTime, Utc};

/// `--all` wins, then `--month`, then the month containing `now`.
pub fn window_from(sub: &clap::ArgMatches, now: DateTime<Utc>) -> Result<MonthSelector> {
    if sub.get_flag("all") {
        return Ok(MonthSelector::AllTime);
    }
    match sub.get_one::<String>("month") {
        Some(m) => Ok(m.parse()?),
        None => Ok(MonthSelector::Month(YearMonth::of(now))),
    }
}

pub fn kind_label(cfg: &Config, ty: TypeCode) -> String {
    if ty == cfg.types.income {
        "income".into()
    } else if ty == cfg.types.expense {
        "expense".into()
    } else {
        ty.to_string()
    }
}

/// Loads a record, edits its text in a modal session and saves it.
pub fn edit_content<R>(client: &ApiClient, id: i64, content: &str) -> Result<R>
where
    R: Resource + Described + Clone,
{
    let record: R = client.get(id)?;
    let saved = edit_record(
        record,
        |draft: &mut R| *draft.content_mut() = content.trim().to_string(),
        |draft: &R| {
            let patch = RecordPatch {
                content: Some(draft.content().to_string()),
                ..Default::default()
            };
            client.update::<R, _>(id, &patch)
        },
    )??;
    Ok(saved)
}
