// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::models::{Budget, Category, Transaction};
use crate::store::RecordStore;

/// Everything a report needs, fetched together and never mutated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub categories: Vec<Category>,
}

impl Snapshot {
    /// Loads all three lists. Any failing list fails the whole load; there
    /// is no partial snapshot.
    pub fn load<T, B, C>(transactions: &T, budgets: &B, categories: &C) -> Result<Snapshot>
    where
        T: RecordStore<Transaction>,
        B: RecordStore<Budget>,
        C: RecordStore<Category>,
    {
        let snap = Snapshot {
            transactions: transactions.list()?,
            budgets: budgets.list()?,
            categories: categories.list()?,
        };
        tracing::debug!(
            transactions = snap.transactions.len(),
            budgets = snap.budgets.len(),
            categories = snap.categories.len(),
            "snapshot loaded"
        );
        Ok(snap)
    }
}

/// Proof that a load was started; carries its generation number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Installed {
    generation: u64,
    snapshot: Option<Arc<Snapshot>>,
}

/// Holds the current snapshot. Loads are numbered when they start, and a
/// load that finishes after a newer one has been committed is dropped.
#[derive(Debug, Default)]
pub struct SnapshotSlot {
    issued: AtomicU64,
    current: Mutex<Installed>,
}

impl SnapshotSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_load(&self) -> LoadTicket {
        LoadTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Installs `snapshot` unless a newer load already landed. Returns
    /// whether it was installed.
    pub fn commit(&self, ticket: LoadTicket, snapshot: Snapshot) -> Result<bool> {
        let mut cur = self
            .current
            .lock()
            .map_err(|_| Error::Store("snapshot slot lock poisoned".into()))?;
        if ticket.0 <= cur.generation {
            tracing::debug!(
                stale = ticket.0,
                installed = cur.generation,
                "discarding out-of-order snapshot"
            );
            return Ok(false);
        }
        cur.generation = ticket.0;
        cur.snapshot = Some(Arc::new(snapshot));
        Ok(true)
    }

    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.lock().ok().and_then(|c| c.snapshot.clone())
    }

    /// Begins, loads and commits in one step.
    pub fn reload<T, B, C>(&self, transactions: &T, budgets: &B, categories: &C) -> Result<Arc<Snapshot>>
    where
        T: RecordStore<Transaction>,
        B: RecordStore<Budget>,
        C: RecordStore<Category>,
    {
        let ticket = self.begin_load();
        let snap = Snapshot::load(transactions, budgets, categories)?;
        self.commit(ticket, snap.clone())?;
        // A newer commit may have won the race; hand back whatever is current.
        Ok(self.current().unwrap_or_else(|| Arc::new(snap)))
    }
}
