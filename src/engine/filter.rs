// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::models::{Transaction, TxKind};

/// Optional constraints; an unset field never excludes anything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub search_term: Option<String>,
    pub kind: Option<TxKind>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub category: Option<String>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
}

impl FilterCriteria {
    /// Parses a user-supplied amount bound. Blank input means no bound.
    pub fn parse_amount(raw: &str) -> Result<Option<Decimal>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        raw.parse::<Decimal>()
            .map(Some)
            .map_err(|_| Error::validation(format!("amount bound '{}' is not a number", raw)))
    }

    pub fn is_empty(&self) -> bool {
        self.search_term().is_none()
            && self.kind.is_none()
            && self.start_date.is_none()
            && self.end_date.is_none()
            && self.category().is_none()
            && self.min_amount.is_none()
            && self.max_amount.is_none()
    }

    fn search_term(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    fn category(&self) -> Option<&str> {
        self.category.as_deref().filter(|s| !s.is_empty())
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        self.matches_with(tx, self.search_term().as_deref())
    }

    fn matches_with(&self, tx: &Transaction, needle: Option<&str>) -> bool {
        if let Some(needle) = needle {
            if !tx.description.to_lowercase().contains(needle) {
                return false;
            }
        }
        if let Some(kind) = self.kind {
            if tx.kind != kind {
                return false;
            }
        }
        // Day bounds are inclusive: start of start_date through the last
        // instant of end_date.
        let day = tx.date.date();
        if self.start_date.is_some_and(|start| day < start) {
            return false;
        }
        if self.end_date.is_some_and(|end| day > end) {
            return false;
        }
        if let Some(cat) = self.category() {
            if tx.category != cat {
                return false;
            }
        }
        let magnitude = tx.amount.abs();
        if self.min_amount.is_some_and(|min| magnitude < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| magnitude > max) {
            return false;
        }
        true
    }
}

/// Returns the transactions satisfying every set criterion, in input order.
pub fn filter(transactions: &[Transaction], criteria: &FilterCriteria) -> Vec<Transaction> {
    let needle = criteria.search_term();
    transactions
        .iter()
        .filter(|tx| criteria.matches_with(tx, needle.as_deref()))
        .cloned()
        .collect()
}
