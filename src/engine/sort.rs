// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::models::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Most recent first.
    #[default]
    Date,
    /// Largest amount first.
    Amount,
    /// Category name, A to Z.
    Category,
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "date" => Ok(SortKey::Date),
            "amount" => Ok(SortKey::Amount),
            "category" => Ok(SortKey::Category),
            other => Err(Error::validation(format!(
                "unknown sort key '{}', expected date|amount|category",
                other
            ))),
        }
    }
}

// Case-folded first so "food" and "Food" sit together, raw text breaks ties.
fn category_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Stable sort: equal keys keep their input order.
pub fn sort(transactions: &[Transaction], key: SortKey) -> Vec<Transaction> {
    let mut out = transactions.to_vec();
    match key {
        SortKey::Date => out.sort_by(|a, b| b.date.cmp(&a.date)),
        SortKey::Amount => out.sort_by(|a, b| b.amount.cmp(&a.amount)),
        SortKey::Category => out.sort_by(|a, b| category_order(&a.category, &b.category)),
    }
    out
}
