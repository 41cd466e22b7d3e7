// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{Category, CategoryDraft, TxKind};
use crate::services::categories;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{maybe_print_json, pretty_table, required};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    match m.subcommand() {
        Some(("add", sub)) => {
            let draft = CategoryDraft {
                name: required(sub, "name")?.trim().to_string(),
                kind: required(sub, "type")?.parse()?,
                icon: sub.get_one::<String>("icon").cloned().unwrap_or_default(),
                color: sub.get_one::<String>("color").cloned().unwrap_or_default(),
            };
            let cat = categories::create(&store, draft)?;
            println!("Added category '{}' ({})", cat.name, cat.kind);
        }
        Some(("list", sub)) => {
            let kind = sub
                .get_one::<String>("type")
                .map(|t| t.parse::<TxKind>())
                .transpose()?;
            let all: Vec<Category> = store.list()?;
            let cats = categories::of_kind(&all, kind);
            if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &cats)? {
                let rows = cats
                    .into_iter()
                    .map(|c| vec![c.name, c.kind.to_string(), c.icon, c.color])
                    .collect();
                println!(
                    "{}",
                    pretty_table(&["Category", "Type", "Icon", "Color"], rows)
                );
            }
        }
        Some(("rename", sub)) => {
            let name = required(sub, "name")?;
            let new_name = required(sub, "new_name")?.trim().to_string();
            let cat = by_name(&store, name)?;
            let draft = CategoryDraft {
                name: new_name.clone(),
                kind: cat.kind,
                icon: cat.icon,
                color: cat.color,
            };
            categories::update(&store, &store, &store, cat.id, draft)?;
            println!("Renamed category '{}' to '{}'", name, new_name);
        }
        Some(("rm", sub)) => {
            let name = required(sub, "name")?;
            let cat = by_name(&store, name)?;
            categories::delete(&store, &store, &store, cat.id)?;
            println!("Removed category '{}'", name);
        }
        _ => {}
    }
    Ok(())
}

fn by_name(store: &SqliteStore<'_>, name: &str) -> Result<Category> {
    let cats: Vec<Category> = store.list()?;
    categories::find_by_name(&cats, name)
        .cloned()
        .ok_or_else(|| anyhow!("Category '{}' not found", name))
}
