// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use crate::api::wire::{NewTask, RecordPatch};
use crate::config::Config;
use crate::modal::edit_record;
use crate::models::{Task, TaskStatus};
use crate::utils::{maybe_print_json, parse_date, pretty_table};
use anyhow::Result;

pub fn handle(client: &ApiClient, cfg: &Config, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(client, sub)?,
        Some(("board", _)) => board(client)?,
        Some(("add", sub)) => {
            let due_date = sub
                .get_one::<String>("due")
                .map(|s| parse_date(s))
                .transpose()?;
            let body = NewTask {
                r#type: cfg.types.task,
                content: sub.get_one::<String>("content").unwrap().trim().to_string(),
                status: TaskStatus::Todo,
                due_date,
            };
            let task: Task = client.create(&body)?;
            println!("Added task {}", task.id);
        }
        Some(("move", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let status: TaskStatus = sub.get_one::<String>("status").unwrap().parse()?;
            let task = move_task(client, id, status)?;
            println!("Task {} is now {}", task.id, task.status.as_str());
        }
        Some(("edit", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            let content = sub.get_one::<String>("content").unwrap();
            let task: Task = super::edit_content(client, id, content)?;
            println!("Updated task {}", task.id);
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").unwrap();
            client.delete::<Task>(id)?;
            println!("Removed task {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn list(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let json_flag = sub.get_flag("json");
    let jsonl_flag = sub.get_flag("jsonl");
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<TaskStatus>())
        .transpose()?;
    let mut tasks: Vec<Task> = client.list()?;
    if let Some(st) = status {
        tasks.retain(|t| t.status == st);
    }
    if !maybe_print_json(json_flag, jsonl_flag, &tasks)? {
        let rows = tasks
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.status.as_str().to_string(),
                    t.due_date.map(|d| d.to_string()).unwrap_or_default(),
                    t.content.clone(),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["ID", "Status", "Due", "Content"], rows));
    }
    Ok(())
}

/// Tasks split into one column per status, each column ordered by due date
/// (undated last) and then id.
pub fn board_columns(tasks: &[Task]) -> Vec<(TaskStatus, Vec<Task>)> {
    TaskStatus::ALL
        .iter()
        .map(|st| {
            let mut col: Vec<Task> = tasks.iter().filter(|t| t.status == *st).cloned().collect();
            col.sort_by(|a, b| match (a.due_date, b.due_date) {
                (Some(x), Some(y)) => x.cmp(&y).then(a.id.cmp(&b.id)),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => a.id.cmp(&b.id),
            });
            (*st, col)
        })
        .collect()
}

fn board(client: &ApiClient) -> Result<()> {
    let tasks: Vec<Task> = client.list()?;
    let columns = board_columns(&tasks);
    let depth = columns.iter().map(|(_, c)| c.len()).max().unwrap_or(0);
    let mut rows = Vec::new();
    for i in 0..depth {
        rows.push(
            columns
                .iter()
                .map(|(_, col)| {
                    col.get(i)
                        .map(|t| format!("#{} {}", t.id, t.content))
                        .unwrap_or_default()
                })
                .collect(),
        );
    }
    let headers: Vec<String> = columns
        .iter()
        .map(|(st, col)| format!("{} ({})", st.as_str(), col.len()))
        .collect();
    let headers: Vec<&str> = headers.iter().map(String::as_str).collect();
    println!("{}", pretty_table(&headers, rows));
    Ok(())
}

pub fn move_task(client: &ApiClient, id: i64, status: TaskStatus) -> Result<Task> {
    let task: Task = client.get(id)?;
    let saved = edit_record(
        task,
        |draft| draft.status = status,
        |draft| {
            let patch = RecordPatch {
                status: Some(draft.status),
                ..Default::default()
            };
            client.update::<Task, _>(id, &patch)
        },
    )??;
    Ok(saved)
}
