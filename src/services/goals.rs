// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::models::{Goal, GoalDraft, GoalStatus};
use crate::store::RecordStore;

pub fn create<S: RecordStore<Goal>>(store: &S, draft: GoalDraft) -> Result<Goal> {
    draft.validate()?;
    let goal = store.create(draft)?;
    tracing::info!(id = goal.id, name = %goal.name, "goal created");
    Ok(goal)
}

pub fn update<S: RecordStore<Goal>>(store: &S, id: i64, draft: GoalDraft) -> Result<Goal> {
    draft.validate()?;
    store.update(id, draft)
}

/// Moves a goal to `status`, leaving every other field as stored.
pub fn set_status<S: RecordStore<Goal>>(store: &S, id: i64, status: GoalStatus) -> Result<Goal> {
    let g = store.get(id)?;
    let draft = GoalDraft {
        name: g.name,
        description: g.description,
        target_amount: g.target_amount,
        target_date: g.target_date,
        status,
        category: g.category,
    };
    let goal = store.update(id, draft)?;
    tracing::info!(id, status = %status, "goal status changed");
    Ok(goal)
}

pub fn delete<S: RecordStore<Goal>>(store: &S, id: i64) -> Result<bool> {
    store.delete(id)
}

/// Goals with the given status; `None` keeps them all.
pub fn with_status(goals: &[Goal], status: Option<GoalStatus>) -> Vec<Goal> {
    goals
        .iter()
        .filter(|g| status.is_none_or(|s| g.status == s))
        .cloned()
        .collect()
}
