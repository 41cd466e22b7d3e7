// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period;
use crate::engine::{
    budget_variance, category_breakdown, month_transactions, monthly_totals, trend_to_date,
};
use crate::models::Transaction;
use crate::snapshot::Snapshot;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{fmt_money, fmt_percent, get_currency, maybe_print_json, pretty_table};
use anyhow::Result;
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("breakdown", sub)) => breakdown(conn, sub)?,
        Some(("variance", sub)) => variance(conn, sub)?,
        Some(("trend", sub)) => trend(conn, sub)?,
        _ => {}
    }
    Ok(())
}

fn all_transactions(conn: &Connection) -> Result<Vec<Transaction>> {
    Ok(SqliteStore::new(conn).list()?)
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (month, year) = period(sub)?;
    let totals = monthly_totals(&all_transactions(conn)?, month, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &totals)? {
        let ccy = get_currency(conn)?;
        let rows = vec![
            vec!["Income".to_string(), fmt_money(&totals.income, &ccy)],
            vec!["Expenses".to_string(), fmt_money(&totals.expenses, &ccy)],
            vec!["Net".to_string(), fmt_money(&totals.net, &ccy)],
        ];
        println!("{} {}", month.name(), year);
        println!("{}", pretty_table(&["Metric", "Amount"], rows));
    }
    Ok(())
}

fn breakdown(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (month, year) = period(sub)?;
    let in_month = month_transactions(&all_transactions(conn)?, month, year);
    let data = category_breakdown(&in_month);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|c| {
                vec![
                    c.category.clone(),
                    fmt_money(&c.amount, &ccy),
                    fmt_percent(&c.percentage),
                ]
            })
            .collect();
        println!("{}", pretty_table(&["Category", "Spent", "Share"], rows));
    }
    Ok(())
}

fn variance(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (month, year) = period(sub)?;
    let store = SqliteStore::new(conn);
    let snap = Snapshot::load(&store, &store, &store)?;
    let data = budget_variance(&snap.budgets, &snap.transactions, month, year);
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|v| {
                vec![
                    v.category.clone(),
                    fmt_money(&v.budget, &ccy),
                    fmt_money(&v.spent, &ccy),
                    fmt_money(&v.variance, &ccy),
                    fmt_percent(&v.usage()),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Category", "Budget", "Spent", "Variance", "Usage"], rows)
        );
    }
    Ok(())
}

fn trend(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let months = sub.get_one::<u16>("months").copied().unwrap_or(6);
    let data = trend_to_date(&all_transactions(conn)?, usize::from(months))?;
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &data)? {
        let ccy = get_currency(conn)?;
        let rows = data
            .iter()
            .map(|p| {
                vec![
                    p.label.clone(),
                    fmt_money(&p.income, &ccy),
                    fmt_money(&p.expenses, &ccy),
                    fmt_money(&p.net, &ccy),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(&["Month", "Income", "Expenses", "Net"], rows)
        );
    }
    Ok(())
}
