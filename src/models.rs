// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Direction of money flow. Amounts are always stored as magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TxKind {
    Income,
    Expense,
}

impl TxKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Income => "income",
            TxKind::Expense => "expense",
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TxKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TxKind::Income),
            "expense" => Ok(TxKind::Expense),
            other => Err(Error::validation(format!(
                "unknown transaction type '{}', expected income|expense",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub amount: Decimal,
    pub category: String,
    pub description: String,
    pub date: NaiveDateTime,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<()> {
        if self.amount < Decimal::ZERO {
            return Err(Error::validation(
                "transaction amount must be a non-negative magnitude",
            ));
        }
        if self.category.trim().is_empty() {
            return Err(Error::validation("transaction category is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: i64,
    pub category: String,
    pub amount: Decimal,
    #[serde(with = "crate::utils::month_name")]
    pub month: Month,
    pub year: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDraft {
    pub category: String,
    pub amount: Decimal,
    #[serde(with = "crate::utils::month_name")]
    pub month: Month,
    pub year: i32,
}

/// Budgets below this year are rejected, same floor as the budget form.
pub const MIN_BUDGET_YEAR: i32 = 2020;

impl BudgetDraft {
    pub fn validate(&self) -> Result<()> {
        if self.category.trim().is_empty() {
            return Err(Error::validation("budget category is required"));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::validation("budget amount must be greater than 0"));
        }
        if self.year < MIN_BUDGET_YEAR {
            return Err(Error::validation(format!(
                "budget year {} is before {}",
                self.year, MIN_BUDGET_YEAR
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub icon: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub icon: String,
    pub color: String,
}

impl CategoryDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("category name is required"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GoalStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
    Cancelled,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 5] = [
        GoalStatus::NotStarted,
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::OnHold,
        GoalStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::NotStarted => "Not Started",
            GoalStatus::InProgress => "In Progress",
            GoalStatus::Completed => "Completed",
            GoalStatus::OnHold => "On Hold",
            GoalStatus::Cancelled => "Cancelled",
        }
    }

    /// Fixed status-to-percentage mapping. Not derived from transactions.
    pub fn progress(&self) -> u8 {
        match self {
            GoalStatus::Completed => 100,
            GoalStatus::InProgress => 50,
            GoalStatus::OnHold => 25,
            GoalStatus::NotStarted | GoalStatus::Cancelled => 0,
        }
    }
}

impl fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for GoalStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        GoalStatus::ALL
            .into_iter()
            .find(|st| st.label().replace(' ', "").to_ascii_lowercase() == key)
            .ok_or_else(|| Error::validation(format!("unknown goal status '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub target_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub category: String,
}

impl Goal {
    pub fn progress(&self) -> u8 {
        self.status.progress()
    }

    pub fn days_remaining(&self, today: NaiveDate) -> Option<i64> {
        self.target_date.map(|d| (d - today).num_days())
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.target_date.is_some_and(|d| d < today)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalDraft {
    pub name: String,
    pub description: String,
    pub target_amount: Decimal,
    pub target_date: Option<NaiveDate>,
    pub status: GoalStatus,
    pub category: String,
}

impl GoalDraft {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("goal name is required"));
        }
        if self.target_amount < Decimal::ZERO {
            return Err(Error::validation("goal target amount cannot be negative"));
        }
        Ok(())
    }
}
