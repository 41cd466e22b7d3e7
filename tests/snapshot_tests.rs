// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::Arc;
use std::thread;

use chrono::Month;
use moneytrail::error::{Error, Result};
use moneytrail::models::{Budget, BudgetDraft, Category, Transaction, TransactionDraft, TxKind};
use moneytrail::snapshot::{Snapshot, SnapshotSlot};
use moneytrail::store::{MemoryStore, RecordStore};
use moneytrail::utils::parse_timestamp;
use rust_decimal::Decimal;

/// Budget store whose reads always fail.
struct Broken;

impl RecordStore<Budget> for Broken {
    fn list(&self) -> Result<Vec<Budget>> {
        Err(Error::Store("disk unplugged".into()))
    }
    fn get(&self, id: i64) -> Result<Budget> {
        Err(Error::NotFound { kind: "Budget", id })
    }
    fn create(&self, _draft: BudgetDraft) -> Result<Budget> {
        Err(Error::Store("read only".into()))
    }
    fn update(&self, id: i64, _draft: BudgetDraft) -> Result<Budget> {
        Err(Error::NotFound { kind: "Budget", id })
    }
    fn delete(&self, id: i64) -> Result<bool> {
        Err(Error::NotFound { kind: "Budget", id })
    }
}

fn spend(amount: i64) -> TransactionDraft {
    TransactionDraft {
        kind: TxKind::Expense,
        amount: Decimal::from(amount),
        category: "Food".into(),
        description: String::new(),
        date: parse_timestamp("2024-03-02").unwrap(),
    }
}

fn snap_with(count: usize) -> Snapshot {
    let txs = MemoryStore::<Transaction>::new();
    for i in 0..count {
        txs.create(spend(i as i64 + 1)).unwrap();
    }
    Snapshot::load(&txs, &MemoryStore::<Budget>::new(), &MemoryStore::<Category>::new()).unwrap()
}

#[test]
fn load_is_all_or_nothing() {
    let txs = MemoryStore::<Transaction>::new();
    txs.create(spend(5)).unwrap();
    let err = Snapshot::load(&txs, &Broken, &MemoryStore::<Category>::new()).unwrap_err();
    assert!(matches!(err, Error::Store(_)));
}

#[test]
fn stale_commit_is_discarded() {
    let slot = SnapshotSlot::new();
    assert!(slot.current().is_none());

    let first = slot.begin_load();
    let second = slot.begin_load();
    assert!(second > first);

    assert!(slot.commit(second, snap_with(2)).unwrap());
    assert!(!slot.commit(first, snap_with(1)).unwrap());
    assert_eq!(slot.current().unwrap().transactions.len(), 2);

    // The same ticket cannot land twice.
    assert!(!slot.commit(second, snap_with(3)).unwrap());
}

#[test]
fn reload_installs_fresh_data() {
    let slot = SnapshotSlot::new();
    let txs = MemoryStore::<Transaction>::new();
    let budgets = MemoryStore::<Budget>::new();
    let cats = MemoryStore::<Category>::new();

    assert!(slot.reload(&txs, &budgets, &cats).unwrap().transactions.is_empty());
    txs.create(spend(9)).unwrap();
    budgets
        .create(BudgetDraft {
            category: "Food".into(),
            amount: Decimal::from(100),
            month: Month::March,
            year: 2024,
        })
        .unwrap();
    let snap = slot.reload(&txs, &budgets, &cats).unwrap();
    assert_eq!(snap.transactions.len(), 1);
    assert_eq!(snap.budgets.len(), 1);

    // A failed reload leaves the previous snapshot in place.
    assert!(slot.reload(&txs, &Broken, &cats).is_err());
    assert_eq!(slot.current().unwrap().budgets.len(), 1);
}

#[test]
fn concurrent_commits_keep_newest_ticket() {
    let slot = Arc::new(SnapshotSlot::new());
    let tickets: Vec<_> = (0..8).map(|_| slot.begin_load()).collect();
    let newest = *tickets.iter().max().unwrap();

    let handles: Vec<_> = tickets
        .into_iter()
        .map(|t| {
            let slot = Arc::clone(&slot);
            thread::spawn(move || {
                slot.commit(t, snap_with(t.generation() as usize)).unwrap();
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }
    assert_eq!(
        slot.current().unwrap().transactions.len(),
        newest.generation() as usize
    );
}
