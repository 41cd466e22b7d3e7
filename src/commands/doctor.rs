// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::can_create_budget;
use crate::models::BudgetDraft;
use crate::services::categories::orphaned_references;
use crate::snapshot::Snapshot;
use crate::store::SqliteStore;
use crate::utils::pretty_table;
use anyhow::Result;
use rusqlite::Connection;

/// Problems found in stored data, as (issue, detail) pairs.
pub fn check(snap: &Snapshot) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    // 1) References to categories that no longer exist
    for o in orphaned_references(&snap.categories, &snap.transactions, &snap.budgets) {
        rows.push(vec![
            format!("orphan_{}", o.kind),
            format!("#{} -> '{}'", o.id, o.category),
        ]);
    }

    // 2) Budgets sharing (category, month, year), e.g. from older writes
    for (i, b) in snap.budgets.iter().enumerate() {
        let draft = BudgetDraft {
            category: b.category.clone(),
            amount: b.amount,
            month: b.month,
            year: b.year,
        };
        if !can_create_budget(&snap.budgets[..i], &draft, None) {
            rows.push(vec![
                "duplicate_budget".into(),
                format!("#{} {} {} {}", b.id, b.category, b.month.name(), b.year),
            ]);
        }
    }
    rows
}

pub fn handle(conn: &Connection) -> Result<()> {
    let store = SqliteStore::new(conn);
    let snap = Snapshot::load(&store, &store, &store)?;
    let rows = check(&snap);
    if rows.is_empty() {
        println!("doctor: no issues found");
    } else {
        println!("{}", pretty_table(&["Issue", "Detail"], rows));
    }
    Ok(())
}
