// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::{period, period_or};
use crate::engine::{budget_progress, budget_totals, budget_variance};
use crate::models::{Budget, BudgetDraft};
use crate::services::budgets;
use crate::snapshot::Snapshot;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{
    fmt_money, fmt_percent, get_currency, maybe_print_json, parse_decimal, pretty_table, required,
};
use anyhow::{Context, Result};
use rusqlite::Connection;
use rust_decimal::Decimal;
use serde::Serialize;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("set", sub)) => set(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        Some(("status", sub)) => status(conn, sub)?,
        Some(("rm", sub)) => {
            let id = *sub.get_one::<i64>("id").context("Missing --id")?;
            budgets::delete(&SqliteStore::new(conn), id)?;
            println!("Removed budget {}", id);
        }
        _ => {}
    }
    Ok(())
}

fn set(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let store = SqliteStore::new(conn);
    // An update keeps the stored period unless --month/--year say otherwise.
    let existing: Option<Budget> = match sub.get_one::<i64>("id") {
        Some(id) => Some(store.get(*id)?),
        None => None,
    };
    let (month, year) = match &existing {
        Some(b) => period_or(sub, b.month, b.year)?,
        None => period(sub)?,
    };
    let draft = BudgetDraft {
        category: required(sub, "category")?.trim().to_string(),
        amount: parse_decimal(required(sub, "amount")?)?,
        month,
        year,
    };
    let budget = match existing {
        Some(b) => budgets::update(&store, b.id, draft)?,
        None => budgets::create(&store, draft)?,
    };
    println!(
        "Budget set for {} / {} {} = {}",
        budget.category,
        budget.month.name(),
        budget.year,
        fmt_money(&budget.amount, &get_currency(conn)?)
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (month, year) = period(sub)?;
    let all: Vec<Budget> = SqliteStore::new(conn).list()?;
    let data: Vec<Budget> = all
        .into_iter()
        .filter(|b| b.month == month && b.year == year)
        .collect();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|b| {
                vec![
                    b.id.to_string(),
                    b.category.clone(),
                    format!("{} {}", b.month.name(), b.year),
                    fmt_money(&b.amount, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["ID", "Category", "Period", "Budget"], rows)
        );
    }
    Ok(())
}

#[derive(Serialize)]
pub struct BudgetStatusRow {
    pub id: i64,
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
    pub percentage: Decimal,
    pub status: crate::engine::BudgetStatus,
}

/// Spend against each budget of the period, in budget order.
pub fn status_rows(snap: &Snapshot, month: chrono::Month, year: i32) -> Vec<BudgetStatusRow> {
    let budgets: Vec<&Budget> = snap
        .budgets
        .iter()
        .filter(|b| b.month == month && b.year == year)
        .collect();
    let variances = budget_variance(&snap.budgets, &snap.transactions, month, year);
    budgets
        .into_iter()
        .zip(variances)
        .map(|(b, v)| {
            let p = budget_progress(b, v.spent);
            BudgetStatusRow {
                id: b.id,
                category: v.category,
                budget: v.budget,
                spent: v.spent,
                remaining: p.remaining,
                percentage: p.percentage,
                status: p.status,
            }
        })
        .collect()
}

fn status(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (month, year) = period(sub)?;
    let store = SqliteStore::new(conn);
    let snap = Snapshot::load(&store, &store, &store)?;
    let data = status_rows(&snap, month, year);
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        return Ok(());
    }
    let ccy = get_currency(conn)?;
    let rows = data
        .iter()
        .map(|r| {
            vec![
                r.category.clone(),
                fmt_money(&r.budget, &ccy),
                fmt_money(&r.spent, &ccy),
                fmt_money(&r.remaining, &ccy),
                fmt_percent(&r.percentage),
                r.status.as_str().to_string(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(
            &["Category", "Budget", "Spent", "Remaining", "Used", "Status"],
            rows
        )
    );
    let totals = budget_totals(&budget_variance(
        &snap.budgets,
        &snap.transactions,
        month,
        year,
    ));
    println!(
        "Total budgeted {} | spent {} | remaining {}",
        fmt_money(&totals.budgeted, &ccy),
        fmt_money(&totals.spent, &ccy),
        fmt_money(&totals.remaining, &ccy)
    );
    Ok(())
}
