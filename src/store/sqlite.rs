// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use rust_decimal::Decimal;

use super::{Record, RecordStore, now};
use crate::error::{Error, Result};
use crate::models::{
    Budget, BudgetDraft, Category, CategoryDraft, Goal, GoalDraft, Transaction, TransactionDraft,
};
use crate::utils::parse_month_name;

/// SQLite-backed store over a borrowed connection. One value serves all
/// four record kinds.
#[derive(Clone, Copy)]
pub struct SqliteStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        SqliteStore { conn }
    }

    pub fn conn(&self) -> &'c Connection {
        self.conn
    }
}

fn conversion<E>(idx: usize, e: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
}

fn decimal_at(r: &Row<'_>, idx: usize) -> rusqlite::Result<Decimal> {
    let s: String = r.get(idx)?;
    s.parse::<Decimal>().map_err(|e| conversion(idx, e))
}

fn parsed_at<T>(r: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: std::str::FromStr<Err = Error>,
{
    let s: String = r.get(idx)?;
    s.parse::<T>().map_err(|e| conversion(idx, e))
}

fn not_found<R: Record>(id: i64) -> Error {
    Error::NotFound { kind: R::KIND, id }
}

fn expect_changed<R: Record>(changed: usize, id: i64) -> Result<()> {
    if changed == 0 {
        return Err(not_found::<R>(id));
    }
    Ok(())
}

// --- transactions ---------------------------------------------------------

const TX_COLUMNS: &str = "id, type, amount, category, description, date, created_at";

fn tx_from_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    Ok(Transaction {
        id: r.get(0)?,
        kind: parsed_at(r, 1)?,
        amount: decimal_at(r, 2)?,
        category: r.get(3)?,
        description: r.get(4)?,
        date: r.get(5)?,
        created_at: r.get(6)?,
    })
}

impl RecordStore<Transaction> for SqliteStore<'_> {
    fn list(&self) -> Result<Vec<Transaction>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TX_COLUMNS} FROM transactions ORDER BY date DESC, id DESC"
        ))?;
        let rows = stmt.query_map([], tx_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get(&self, id: i64) -> Result<Transaction> {
        self.conn
            .query_row(
                &format!("SELECT {TX_COLUMNS} FROM transactions WHERE id=?1"),
                params![id],
                tx_from_row,
            )
            .optional()?
            .ok_or_else(|| not_found::<Transaction>(id))
    }

    fn create(&self, d: TransactionDraft) -> Result<Transaction> {
        self.conn.execute(
            "INSERT INTO transactions(type, amount, category, description, date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                d.kind.as_str(),
                d.amount.to_string(),
                d.category,
                d.description,
                d.date,
                now()
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "transaction inserted");
        RecordStore::<Transaction>::get(self, id)
    }

    fn update(&self, id: i64, d: TransactionDraft) -> Result<Transaction> {
        let changed = self.conn.execute(
            "UPDATE transactions SET type=?1, amount=?2, category=?3, description=?4, date=?5
             WHERE id=?6",
            params![
                d.kind.as_str(),
                d.amount.to_string(),
                d.category,
                d.description,
                d.date,
                id
            ],
        )?;
        expect_changed::<Transaction>(changed, id)?;
        RecordStore::<Transaction>::get(self, id)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM transactions WHERE id=?1", params![id])?;
        expect_changed::<Transaction>(changed, id)?;
        Ok(true)
    }
}

// --- budgets --------------------------------------------------------------

const BUDGET_COLUMNS: &str = "id, category, amount, month, year";

fn budget_from_row(r: &Row<'_>) -> rusqlite::Result<Budget> {
    let month: String = r.get(3)?;
    Ok(Budget {
        id: r.get(0)?,
        category: r.get(1)?,
        amount: decimal_at(r, 2)?,
        month: parse_month_name(&month).map_err(|e| conversion(3, e))?,
        year: r.get(4)?,
    })
}

impl RecordStore<Budget> for SqliteStore<'_> {
    fn list(&self) -> Result<Vec<Budget>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BUDGET_COLUMNS} FROM budgets ORDER BY id"))?;
        let rows = stmt.query_map([], budget_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get(&self, id: i64) -> Result<Budget> {
        self.conn
            .query_row(
                &format!("SELECT {BUDGET_COLUMNS} FROM budgets WHERE id=?1"),
                params![id],
                budget_from_row,
            )
            .optional()?
            .ok_or_else(|| not_found::<Budget>(id))
    }

    fn create(&self, d: BudgetDraft) -> Result<Budget> {
        self.conn.execute(
            "INSERT INTO budgets(category, amount, month, year) VALUES (?1, ?2, ?3, ?4)",
            params![d.category, d.amount.to_string(), d.month.name(), d.year],
        )?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(id, "budget inserted");
        RecordStore::<Budget>::get(self, id)
    }

    fn update(&self, id: i64, d: BudgetDraft) -> Result<Budget> {
        let changed = self.conn.execute(
            "UPDATE budgets SET category=?1, amount=?2, month=?3, year=?4 WHERE id=?5",
            params![d.category, d.amount.to_string(), d.month.name(), d.year, id],
        )?;
        expect_changed::<Budget>(changed, id)?;
        RecordStore::<Budget>::get(self, id)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM budgets WHERE id=?1", params![id])?;
        expect_changed::<Budget>(changed, id)?;
        Ok(true)
    }
}

// --- categories -----------------------------------------------------------

const CATEGORY_COLUMNS: &str = "id, name, type, icon, color";

fn category_from_row(r: &Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: r.get(0)?,
        name: r.get(1)?,
        kind: parsed_at(r, 2)?,
        icon: r.get(3)?,
        color: r.get(4)?,
    })
}

impl RecordStore<Category> for SqliteStore<'_> {
    fn list(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {CATEGORY_COLUMNS} FROM categories ORDER BY name"))?;
        let rows = stmt.query_map([], category_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get(&self, id: i64) -> Result<Category> {
        self.conn
            .query_row(
                &format!("SELECT {CATEGORY_COLUMNS} FROM categories WHERE id=?1"),
                params![id],
                category_from_row,
            )
            .optional()?
            .ok_or_else(|| not_found::<Category>(id))
    }

    fn create(&self, d: CategoryDraft) -> Result<Category> {
        self.conn.execute(
            "INSERT INTO categories(name, type, icon, color) VALUES (?1, ?2, ?3, ?4)",
            params![d.name, d.kind.as_str(), d.icon, d.color],
        )?;
        let id = self.conn.last_insert_rowid();
        RecordStore::<Category>::get(self, id)
    }

    fn update(&self, id: i64, d: CategoryDraft) -> Result<Category> {
        let changed = self.conn.execute(
            "UPDATE categories SET name=?1, type=?2, icon=?3, color=?4 WHERE id=?5",
            params![d.name, d.kind.as_str(), d.icon, d.color, id],
        )?;
        expect_changed::<Category>(changed, id)?;
        RecordStore::<Category>::get(self, id)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM categories WHERE id=?1", params![id])?;
        expect_changed::<Category>(changed, id)?;
        Ok(true)
    }
}

// --- goals ----------------------------------------------------------------

const GOAL_COLUMNS: &str = "id, name, description, target_amount, target_date, status, category";

fn goal_from_row(r: &Row<'_>) -> rusqlite::Result<Goal> {
    Ok(Goal {
        id: r.get(0)?,
        name: r.get(1)?,
        description: r.get(2)?,
        target_amount: decimal_at(r, 3)?,
        target_date: r.get(4)?,
        status: parsed_at(r, 5)?,
        category: r.get(6)?,
    })
}

impl RecordStore<Goal> for SqliteStore<'_> {
    fn list(&self) -> Result<Vec<Goal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {GOAL_COLUMNS} FROM goals ORDER BY id DESC"))?;
        let rows = stmt.query_map([], goal_from_row)?;
        Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
    }

    fn get(&self, id: i64) -> Result<Goal> {
        self.conn
            .query_row(
                &format!("SELECT {GOAL_COLUMNS} FROM goals WHERE id=?1"),
                params![id],
                goal_from_row,
            )
            .optional()?
            .ok_or_else(|| not_found::<Goal>(id))
    }

    fn create(&self, d: GoalDraft) -> Result<Goal> {
        self.conn.execute(
            "INSERT INTO goals(name, description, target_amount, target_date, status, category)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                d.name,
                d.description,
                d.target_amount.to_string(),
                d.target_date,
                d.status.label(),
                d.category
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        RecordStore::<Goal>::get(self, id)
    }

    fn update(&self, id: i64, d: GoalDraft) -> Result<Goal> {
        let changed = self.conn.execute(
            "UPDATE goals SET name=?1, description=?2, target_amount=?3, target_date=?4,
             status=?5, category=?6 WHERE id=?7",
            params![
                d.name,
                d.description,
                d.target_amount.to_string(),
                d.target_date,
                d.status.label(),
                d.category,
                id
            ],
        )?;
        expect_changed::<Goal>(changed, id)?;
        RecordStore::<Goal>::get(self, id)
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM goals WHERE id=?1", params![id])?;
        expect_changed::<Goal>(changed, id)?;
        Ok(true)
    }
}
