// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Month, NaiveDate};
use moneytrail::db;
use moneytrail::error::Error;
use moneytrail::models::{
    Budget, BudgetDraft, Category, CategoryDraft, Goal, GoalDraft, GoalStatus, Transaction,
    TransactionDraft, TxKind,
};
use moneytrail::store::{MemoryStore, RecordStore, SqliteStore};
use moneytrail::utils::parse_timestamp;
use rust_decimal::Decimal;

fn draft(amount: &str, category: &str, date: &str) -> TransactionDraft {
    TransactionDraft {
        kind: TxKind::Expense,
        amount: amount.parse().unwrap(),
        category: category.into(),
        description: "lunch".into(),
        date: parse_timestamp(date).unwrap(),
    }
}

fn insert(store: &SqliteStore<'_>, d: TransactionDraft) -> Transaction {
    store.create(d).unwrap()
}

// Same checks against any adapter.
fn exercise_transactions<S: RecordStore<Transaction>>(store: &S) {
    let a = store.create(draft("12.50", "Food", "2024-03-04T12:30:00")).unwrap();
    let b = store.create(draft("3", "Fun", "2024-03-05")).unwrap();
    assert_ne!(a.id, b.id);
    assert_eq!(store.get(a.id).unwrap(), a);
    assert_eq!(store.list().unwrap().len(), 2);

    let edited = store.update(a.id, draft("13.75", "Food", "2024-03-04T12:30:00")).unwrap();
    assert_eq!(edited.id, a.id);
    assert_eq!(edited.created_at, a.created_at);
    assert_eq!(edited.amount, "13.75".parse::<Decimal>().unwrap());
    assert_eq!(store.get(a.id).unwrap().amount, edited.amount);

    assert!(store.delete(b.id).unwrap());
    assert!(matches!(
        store.get(b.id),
        Err(Error::NotFound { kind: "Transaction", .. })
    ));
    assert!(matches!(store.delete(b.id), Err(Error::NotFound { .. })));
    assert!(matches!(
        store.update(9999, draft("1", "Food", "2024-03-01")),
        Err(Error::NotFound { id: 9999, .. })
    ));
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn memory_store_round_trip() {
    exercise_transactions(&MemoryStore::<Transaction>::new());
}

#[test]
fn sqlite_store_round_trip() {
    let conn = db::open_in_memory().unwrap();
    exercise_transactions(&SqliteStore::new(&conn));
}

#[test]
fn sqlite_lists_transactions_newest_first() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    insert(&store, draft("1", "A", "2024-01-10"));
    insert(&store, draft("2", "A", "2024-03-10"));
    insert(&store, draft("3", "A", "2024-02-10"));
    let rows: Vec<Transaction> = store.list().unwrap();
    let amounts: Vec<String> = rows.iter().map(|t| t.amount.to_string()).collect();
    assert_eq!(amounts, vec!["2", "3", "1"]);
}

#[test]
fn sqlite_keeps_decimal_precision() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    let t = insert(&store, draft("0.10", "A", "2024-01-10"));
    let u = insert(&store, draft("0.20", "A", "2024-01-10"));
    let t: Transaction = store.get(t.id).unwrap();
    let u: Transaction = store.get(u.id).unwrap();
    let sum = t.amount + u.amount;
    assert_eq!(sum, "0.3".parse::<Decimal>().unwrap());
}

#[test]
fn sqlite_budgets_categories_goals() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);

    let b: Budget = store
        .create(BudgetDraft {
            category: "Food".into(),
            amount: Decimal::from(500),
            month: Month::March,
            year: 2024,
        })
        .unwrap();
    let got: Budget = store.get(b.id).unwrap();
    assert_eq!(got.month, Month::March);
    assert_eq!(got, b);

    let c: Category = store
        .create(CategoryDraft {
            name: "Salary".into(),
            kind: TxKind::Income,
            icon: "💼".into(),
            color: "#00aa00".into(),
        })
        .unwrap();
    assert_eq!(RecordStore::<Category>::get(&store, c.id).unwrap(), c);

    let g: Goal = store
        .create(GoalDraft {
            name: "Holiday".into(),
            description: String::new(),
            target_amount: Decimal::from(1500),
            target_date: NaiveDate::from_ymd_opt(2024, 8, 1),
            status: GoalStatus::InProgress,
            category: "Travel".into(),
        })
        .unwrap();
    let got: Goal = store.get(g.id).unwrap();
    assert_eq!(got.status, GoalStatus::InProgress);
    assert_eq!(got.target_date, NaiveDate::from_ymd_opt(2024, 8, 1));

    assert!(matches!(
        RecordStore::<Goal>::delete(&store, 42),
        Err(Error::NotFound { kind: "Goal", id: 42 })
    ));
}

#[test]
fn memory_ids_continue_after_seed() {
    let seeded = Budget {
        id: 7,
        category: "Food".into(),
        amount: Decimal::from(10),
        month: Month::May,
        year: 2024,
    };
    let store = MemoryStore::with_records(vec![seeded]);
    let next = store
        .create(BudgetDraft {
            category: "Fun".into(),
            amount: Decimal::from(10),
            month: Month::May,
            year: 2024,
        })
        .unwrap();
    assert_eq!(next.id, 8);
}
