// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::{Transaction, TransactionDraft};
use crate::store::RecordStore;

pub fn create<S: RecordStore<Transaction>>(store: &S, draft: TransactionDraft) -> Result<Transaction> {
    draft.validate()?;
    let tx = store.create(draft)?;
    tracing::info!(id = tx.id, kind = %tx.kind, amount = %tx.amount, "transaction recorded");
    Ok(tx)
}

pub fn update<S: RecordStore<Transaction>>(
    store: &S,
    id: i64,
    draft: TransactionDraft,
) -> Result<Transaction> {
    draft.validate()?;
    let tx = store.update(id, draft)?;
    tracing::info!(id, "transaction updated");
    Ok(tx)
}

pub fn delete<S: RecordStore<Transaction>>(store: &S, id: i64) -> Result<bool> {
    let removed = store.delete(id)?;
    tracing::info!(id, "transaction deleted");
    Ok(removed)
}
