// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::{FilterCriteria, SortKey, filter, sort};
use crate::models::{Transaction, TransactionDraft};
use crate::services::transactions;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{
    fmt_money, get_currency, maybe_print_json, parse_date, parse_decimal, parse_timestamp,
    pretty_table, required,
};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("edit", sub)) => edit(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing --id")?;
            transactions::delete(&SqliteStore::new(conn), id)?;
            println!("Removed transaction {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn timestamp_or_now(sub: &clap::ArgMatches) -> Result<chrono::NaiveDateTime> {
    match sub.get_one::<String>("date") {
        Some(s) => parse_timestamp(s),
        None => Ok(chrono::Local::now().naive_local()),
    }
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let draft = TransactionDraft {
        kind: required(sub, "type")?.parse()?,
        amount: parse_decimal(required(sub, "amount")?)?,
        category: required(sub, "category")?.trim().to_string(),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or_default(),
        date: timestamp_or_now(sub)?,
    };
    let tx = transactions::create(&SqliteStore::new(conn), draft)?;
    println!(
        "Recorded {} {} in '{}' on {} (id {})",
        tx.kind,
        fmt_money(&tx.amount, &get_currency(conn)?),
        tx.category,
        tx.date.format("%Y-%m-%d"),
        tx.id
    );
    Ok(())
}

fn edit(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    let id = *sub.get_one::<i64>("id").context("Missing --id")?;
    let cur: Transaction = store.get(id)?;
    let draft = TransactionDraft {
        kind: match sub.get_one::<String>("type") {
            Some(t) => t.parse()?,
            None => cur.kind,
        },
        amount: match sub.get_one::<String>("amount") {
            Some(a) => parse_decimal(a)?,
            None => cur.amount,
        },
        category: sub
            .get_one::<String>("category")
            .map(|c| c.trim().to_string())
            .unwrap_or(cur.category),
        description: sub
            .get_one::<String>("description")
            .cloned()
            .unwrap_or(cur.description),
        date: match sub.get_one::<String>("date") {
            Some(d) => parse_timestamp(d)?,
            None => cur.date,
        },
    };
    transactions::update(&store, id, draft)?;
    println!("Updated transaction {}", id);
    Ok(())
}

pub fn criteria_from_args(sub: &clap::ArgMatches) -> Result<FilterCriteria> {
    let opt = |id: &str| sub.get_one::<String>(id).map(|s| s.to_string());
    Ok(FilterCriteria {
        search_term: opt("search"),
        kind: opt("type").map(|t| t.parse()).transpose()?,
        start_date: opt("from").map(|d| parse_date(&d)).transpose()?,
        end_date: opt("to").map(|d| parse_date(&d)).transpose()?,
        category: opt("category"),
        min_amount: match opt("min") {
            Some(s) => FilterCriteria::parse_amount(&s)?,
            None => None,
        },
        max_amount: match opt("max") {
            Some(s) => FilterCriteria::parse_amount(&s)?,
            None => None,
        },
    })
}

/// Filtered, ordered and truncated transactions for `tx list`.
pub fn query_rows(conn: &Connection, sub: &clap::ArgMatches) -> Result<Vec<Transaction>> {
    let criteria = criteria_from_args(sub)?;
    let key: SortKey = match sub.get_one::<String>("sort") {
        Some(s) => s.parse()?,
        None => SortKey::default(),
    };
    let all: Vec<Transaction> = SqliteStore::new(conn).list()?;
    let mut rows = sort(&filter(&all, &criteria), key);
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    tracing::debug!(total = all.len(), shown = rows.len(), "transactions filtered");
    Ok(rows)
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let data = query_rows(conn, sub)?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.format("%Y-%m-%d").to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    fmt_money(&t.amount, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}
