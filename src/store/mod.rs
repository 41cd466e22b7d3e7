// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Persistence seam. Services and the snapshot loader only see
//! [`RecordStore`]; which adapter sits behind it is the caller's choice.

pub mod memory;
pub mod sqlite;

use chrono::NaiveDateTime;

use crate::error::Result;
use crate::models::{
    Budget, BudgetDraft, Category, CategoryDraft, Goal, GoalDraft, Transaction, TransactionDraft,
};

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// An entity kind a store can hold.
pub trait Record: Clone {
    const KIND: &'static str;
    type Draft: Clone;

    fn id(&self) -> i64;

    /// Builds a fresh record; `now` fills store-owned timestamps.
    fn from_draft(id: i64, draft: Self::Draft, now: NaiveDateTime) -> Self;

    /// Overwrites the editable fields, keeping id and store-owned fields.
    fn apply(&mut self, draft: Self::Draft);
}

pub trait RecordStore<R: Record> {
    fn list(&self) -> Result<Vec<R>>;
    fn get(&self, id: i64) -> Result<R>;
    fn create(&self, draft: R::Draft) -> Result<R>;
    fn update(&self, id: i64, draft: R::Draft) -> Result<R>;
    fn delete(&self, id: i64) -> Result<bool>;
}

pub(crate) fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

impl Record for Transaction {
    const KIND: &'static str = "Transaction";
    type Draft = TransactionDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: TransactionDraft, now: NaiveDateTime) -> Self {
        Transaction {
            id,
            kind: d.kind,
            amount: d.amount,
            category: d.category,
            description: d.description,
            date: d.date,
            created_at: now,
        }
    }

    fn apply(&mut self, d: TransactionDraft) {
        self.kind = d.kind;
        self.amount = d.amount;
        self.category = d.category;
        self.description = d.description;
        self.date = d.date;
    }
}

impl Record for Budget {
    const KIND: &'static str = "Budget";
    type Draft = BudgetDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: BudgetDraft, _now: NaiveDateTime) -> Self {
        Budget {
            id,
            category: d.category,
            amount: d.amount,
            month: d.month,
            year: d.year,
        }
    }

    fn apply(&mut self, d: BudgetDraft) {
        self.category = d.category;
        self.amount = d.amount;
        self.month = d.month;
        self.year = d.year;
    }
}

impl Record for Category {
    const KIND: &'static str = "Category";
    type Draft = CategoryDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: CategoryDraft, _now: NaiveDateTime) -> Self {
        Category {
            id,
            name: d.name,
            kind: d.kind,
            icon: d.icon,
            color: d.color,
        }
    }

    fn apply(&mut self, d: CategoryDraft) {
        self.name = d.name;
        self.kind = d.kind;
        self.icon = d.icon;
        self.color = d.color;
    }
}

impl Record for Goal {
    const KIND: &'static str = "Goal";
    type Draft = GoalDraft;

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, d: GoalDraft, _now: NaiveDateTime) -> Self {
        Goal {
            id,
            name: d.name,
            description: d.description,
            target_amount: d.target_amount,
            target_date: d.target_date,
            status: d.status,
            category: d.category,
        }
    }

    fn apply(&mut self, d: GoalDraft) {
        self.name = d.name;
        self.description = d.description;
        self.target_amount = d.target_amount;
        self.target_date = d.target_date;
        self.status = d.status;
        self.category = d.category;
    }
}
