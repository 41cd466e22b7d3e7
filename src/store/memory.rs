// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::sync::{Mutex, MutexGuard};

use super::{Record, RecordStore, now};
use crate::error::{Error, Result};

/// Vec-backed store. Ids are handed out sequentially and never reused.
#[derive(Debug)]
pub struct MemoryStore<R> {
    inner: Mutex<Inner<R>>,
}

#[derive(Debug)]
struct Inner<R> {
    rows: Vec<R>,
    next_id: i64,
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Seeds the store; new ids continue after the largest seeded id.
    pub fn with_records(rows: Vec<R>) -> Self {
        let next_id = rows.iter().map(Record::id).max().unwrap_or(0) + 1;
        MemoryStore {
            inner: Mutex::new(Inner { rows, next_id }),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner<R>>> {
        self.inner
            .lock()
            .map_err(|_| Error::Store(format!("{} store lock poisoned", R::KIND)))
    }
}

impl<R: Record> RecordStore<R> for MemoryStore<R> {
    fn list(&self) -> Result<Vec<R>> {
        Ok(self.lock()?.rows.clone())
    }

    fn get(&self, id: i64) -> Result<R> {
        self.lock()?
            .rows
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(Error::NotFound { kind: R::KIND, id })
    }

    fn create(&self, draft: R::Draft) -> Result<R> {
        let mut inner = self.lock()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let rec = R::from_draft(id, draft, now());
        inner.rows.push(rec.clone());
        tracing::debug!(kind = R::KIND, id, "created in memory");
        Ok(rec)
    }

    fn update(&self, id: i64, draft: R::Draft) -> Result<R> {
        let mut inner = self.lock()?;
        let rec = inner
            .rows
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or(Error::NotFound { kind: R::KIND, id })?;
        rec.apply(draft);
        Ok(rec.clone())
    }

    fn delete(&self, id: i64) -> Result<bool> {
        let mut inner = self.lock()?;
        let pos = inner
            .rows
            .iter()
            .position(|r| r.id() == id)
            .ok_or(Error::NotFound { kind: R::KIND, id })?;
        inner.rows.remove(pos);
        tracing::debug!(kind = R::KIND, id, "deleted from memory");
        Ok(true)
    }
}
