// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{Error, Result};
use crate::models::{Budget, BudgetDraft};

/// False iff another budget already covers the candidate's
/// (category, month, year). `exclude_id` is the budget being updated.
pub fn can_create_budget(
    existing: &[Budget],
    candidate: &BudgetDraft,
    exclude_id: Option<i64>,
) -> bool {
    !existing.iter().any(|b| {
        Some(b.id) != exclude_id
            && b.category == candidate.category
            && b.month == candidate.month
            && b.year == candidate.year
    })
}

pub fn ensure_unique_budget(
    existing: &[Budget],
    candidate: &BudgetDraft,
    exclude_id: Option<i64>,
) -> Result<()> {
    if can_create_budget(existing, candidate, exclude_id) {
        return Ok(());
    }
    tracing::warn!(
        category = %candidate.category,
        month = candidate.month.name(),
        year = candidate.year,
        "duplicate budget rejected"
    );
    Err(Error::DuplicateBudget {
        category: candidate.category.clone(),
        month: candidate.month.name().to_string(),
        year: candidate.year,
    })
}
