// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Goal, GoalDraft, GoalStatus};
use crate::services::goals;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, pretty_table, required};
use anyhow::{Context, Result};
use rusqlite::Connection;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = GoalDraft {
                name: required(sub, "name")?.trim().to_string(),
                description: sub
                    .get_one::<String>("description")
                    .cloned()
                    .unwrap_or_default(),
                target_amount: parse_decimal(required(sub, "target")?)?,
                target_date: sub
                    .get_one::<String>("by")
                    .map(|d| parse_date(d))
                    .transpose()?,
                status: required(sub, "status")?.parse()?,
                category: sub.get_one::<String>("category").cloned().unwrap_or_default(),
            };
            let goal = goals::create(&store, draft)?;
            println!("Added goal '{}' (id {})", goal.name, goal.id);
        }
        Some(("list", sub)) => list(conn, &store, sub)?,
        Some(("status", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing --id")?;
            let status: GoalStatus = required(sub, "status")?.parse()?;
            let goal = goals::set_status(&store, id, status)?;
            println!("Goal '{}' is now {} ({}%)", goal.name, goal.status, goal.progress());
        }
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing --id")?;
            goals::delete(&store, id)?;
            println!("Removed goal {}", id);
        }
        _ => {}
    }
    Ok(())
}

#[derive(Serialize)]
struct GoalRow {
    #[serde(flatten)]
    goal: Goal,
    progress: u8,
    days_remaining: Option<i64>,
    is_overdue: bool,
}

fn list(conn: &Connection, store: &SqliteStore<'_>, sub: &clap::ArgMatches) -> Result<()> {
    let status = sub
        .get_one::<String>("status")
        .map(|s| s.parse::<GoalStatus>())
        .transpose()?;
    let all: Vec<Goal> = store.list()?;
    let today = chrono::Local::now().date_naive();
    let data: Vec<GoalRow> = goals::with_status(&all, status)
        .into_iter()
        .map(|g| GoalRow {
            progress: g.progress(),
            days_remaining: g.days_remaining(today),
            is_overdue: g.is_overdue(today),
            goal: g,
        })
        .collect();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = data
        .iter()
        .map(|r| {
            let due = match (r.goal.target_date, r.days_remaining) {
                (Some(d), Some(n)) if r.is_overdue => format!("{} ({} days overdue)", d, -n),
                (Some(d), Some(n)) => format!("{} ({} days left)", d, n),
                _ => "-".to_string(),
            };
            vec![
                r.goal.id.to_string(),
                r.goal.name.clone(),
                fmt_money(&r.goal.target_amount, &ccy),
                r.goal.status.to_string(),
                format!("{}%", r.progress),
                due,
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["ID", "Goal", "Target", "Status", "Progress", "Due"], rows)
    );
    Ok(())
}
