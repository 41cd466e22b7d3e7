// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure filtering, ordering and aggregation over in-memory records.
//!
//! Nothing in here touches a store. Callers load a snapshot first and hand
//! slices in; empty input always yields empty or zero output.

pub mod aggregate;
pub mod filter;
pub mod guard;
pub mod sort;

pub use aggregate::{
    BudgetProgress, BudgetStatus, BudgetTotals, BudgetVariance, CategoryShare, MAX_TREND_MONTHS,
    MonthlyTotals, TrendPoint, average_expense, budget_progress, budget_totals, budget_variance,
    category_breakdown, month_transactions, monthly_totals, trend, trend_to_date,
};
pub use filter::{FilterCriteria, filter};
pub use guard::{can_create_budget, ensure_unique_budget};
pub use sort::{SortKey, sort};
