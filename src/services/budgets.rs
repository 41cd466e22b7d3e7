// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::engine::ensure_unique_budget;
use crate::error::Result;
use crate::models::{Budget, BudgetDraft};
use crate::store::RecordStore;

pub fn create<S: RecordStore<Budget>>(store: &S, draft: BudgetDraft) -> Result<Budget> {
    draft.validate()?;
    let existing = store.list()?;
    ensure_unique_budget(&existing, &draft, None)?;
    let budget = store.create(draft)?;
    tracing::info!(id = budget.id, category = %budget.category, "budget created");
    Ok(budget)
}

pub fn update<S: RecordStore<Budget>>(store: &S, id: i64, draft: BudgetDraft) -> Result<Budget> {
    draft.validate()?;
    store.get(id)?;
    let existing = store.list()?;
    ensure_unique_budget(&existing, &draft, Some(id))?;
    let budget = store.update(id, draft)?;
    tracing::info!(id, category = %budget.category, "budget updated");
    Ok(budget)
}

pub fn delete<S: RecordStore<Budget>>(store: &S, id: i64) -> Result<bool> {
    let removed = store.delete(id)?;
    tracing::info!(id, "budget deleted");
    Ok(removed)
}
