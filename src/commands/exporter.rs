// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::commands::period;
use crate::models::Transaction;
use crate::report::ReportData;
use crate::snapshot::Snapshot;
use crate::store::{RecordStore, SqliteStore};
use crate::utils::{get_currency, required};
use anyhow::{Context, Result, bail};
use rusqlite::Connection;
use std::fs::File;
use std::io::BufWriter;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("report", sub)) => export_report(conn, sub),
        Some(("transactions", sub)) => export_transactions(conn, sub),
        _ => Ok(()),
    }
}

fn export_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;
    let (month, year) = period(sub)?;
    let store = SqliteStore::new(conn);
    let snap = Snapshot::load(&store, &store, &store)?;
    let report = ReportData::build(&snap.transactions, &snap.budgets, month, year);

    match fmt.as_str() {
        "csv" => {
            let file = File::create(out).with_context(|| format!("Create {}", out))?;
            let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            report.write_csv(file, &get_currency(conn)?, &generated)?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&report)?)
                .with_context(|| format!("Write {}", out))?;
        }
        "html" => {
            let file = File::create(out).with_context(|| format!("Create {}", out))?;
            let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
            report.write_html(BufWriter::new(file), &get_currency(conn)?, &generated)?;
        }
        _ => bail!("Unknown format: {} (use csv|json|html)", fmt),
    }
    tracing::info!(path = %out, stem = %report.file_stem(), "report exported");
    println!("Exported {} report to {}", report.file_stem(), out);
    Ok(())
}

fn export_transactions(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let fmt = required(sub, "format")?.to_lowercase();
    let out = required(sub, "out")?;

    let mut rows: Vec<Transaction> = SqliteStore::new(conn).list()?;
    rows.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    match fmt.as_str() {
        "csv" => {
            let mut wtr = csv::Writer::from_path(out)?;
            wtr.write_record(["id", "date", "type", "category", "description", "amount"])?;
            for t in &rows {
                wtr.write_record([
                    t.id.to_string(),
                    t.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
                    t.kind.to_string(),
                    t.category.clone(),
                    t.description.clone(),
                    t.amount.to_string(),
                ])?;
            }
            wtr.flush()?;
        }
        "json" => {
            std::fs::write(out, serde_json::to_string_pretty(&rows)?)?;
        }
        _ => bail!("Unknown format: {} (use csv|json)", fmt),
    }
    println!("Exported {} transactions to {}", rows.len(), out);
    Ok(())
}
