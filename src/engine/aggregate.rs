// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::{Datelike, Month, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Budget, Transaction, TxKind};
use crate::utils::{shift_month, short_month};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Longest window `trend` will build.
pub const MAX_TREND_MONTHS: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct MonthlyTotals {
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

impl MonthlyTotals {
    fn add(&mut self, tx: &Transaction) {
        match tx.kind {
            TxKind::Income => self.income = self.income.saturating_add(tx.amount),
            TxKind::Expense => self.expenses = self.expenses.saturating_add(tx.amount),
        }
        self.net = self.income.saturating_sub(self.expenses);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryShare {
    pub category: String,
    pub amount: Decimal,
    pub percentage: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetVariance {
    pub category: String,
    pub budget: Decimal,
    pub spent: Decimal,
    pub variance: Decimal,
}

impl BudgetVariance {
    /// Share of the budget already spent, 0 for a zero budget.
    pub fn usage(&self) -> Decimal {
        percent_of(self.spent, self.budget)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    Near,
    Over,
}

impl BudgetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetStatus::Ok => "ok",
            BudgetStatus::Near => "near",
            BudgetStatus::Over => "over",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    pub percentage: Decimal,
    pub status: BudgetStatus,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BudgetTotals {
    pub budgeted: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub year: i32,
    #[serde(with = "crate::utils::month_name")]
    pub month: Month,
    pub label: String,
    pub income: Decimal,
    pub expenses: Decimal,
    pub net: Decimal,
}

// Sums saturate at Decimal::MAX instead of overflowing.
fn total<I: IntoIterator<Item = Decimal>>(amounts: I) -> Decimal {
    amounts
        .into_iter()
        .fold(Decimal::ZERO, |acc, a| acc.saturating_add(a))
}

// A ratio too large to represent saturates, so it still reads as over budget.
fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|r| r.checked_mul(HUNDRED))
        .unwrap_or(Decimal::MAX)
}

fn in_month(date: &NaiveDateTime, month: Month, year: i32) -> bool {
    date.year() == year && date.month() == month.number_from_month()
}

/// Transactions dated within the calendar month, in input order.
pub fn month_transactions(transactions: &[Transaction], month: Month, year: i32) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| in_month(&t.date, month, year))
        .cloned()
        .collect()
}

pub fn monthly_totals(transactions: &[Transaction], month: Month, year: i32) -> MonthlyTotals {
    let mut totals = MonthlyTotals::default();
    for tx in transactions.iter().filter(|t| in_month(&t.date, month, year)) {
        totals.add(tx);
    }
    totals
}

/// Expense totals per category, largest first. Categories with equal totals
/// keep the order in which they first appear.
pub fn category_breakdown(transactions: &[Transaction]) -> Vec<CategoryShare> {
    let mut sums: Vec<(String, Decimal)> = Vec::new();
    for tx in transactions.iter().filter(|t| t.kind == TxKind::Expense) {
        match sums.iter_mut().find(|(c, _)| *c == tx.category) {
            Some((_, amt)) => *amt = amt.saturating_add(tx.amount),
            None => sums.push((tx.category.clone(), tx.amount)),
        }
    }
    let all = total(sums.iter().map(|(_, a)| *a));
    let mut shares: Vec<CategoryShare> = sums
        .into_iter()
        .map(|(category, amount)| CategoryShare {
            percentage: percent_of(amount, all),
            category,
            amount,
        })
        .collect();
    shares.sort_by(|a, b| b.amount.cmp(&a.amount));
    shares
}

fn spent_in(transactions: &[Transaction], category: &str, month: Month, year: i32) -> Decimal {
    total(
        transactions
            .iter()
            .filter(|t| {
                t.kind == TxKind::Expense
                    && t.category == category
                    && in_month(&t.date, month, year)
            })
            .map(|t| t.amount),
    )
}

/// One row per budget for (month, year), in the order the budgets were given.
pub fn budget_variance(
    budgets: &[Budget],
    transactions: &[Transaction],
    month: Month,
    year: i32,
) -> Vec<BudgetVariance> {
    budgets
        .iter()
        .filter(|b| b.month == month && b.year == year)
        .map(|b| {
            let spent = spent_in(transactions, &b.category, month, year);
            BudgetVariance {
                category: b.category.clone(),
                budget: b.amount,
                spent,
                variance: b.amount.saturating_sub(spent),
            }
        })
        .collect()
}

pub fn budget_progress(budget: &Budget, spent: Decimal) -> BudgetProgress {
    let percentage = percent_of(spent, budget.amount);
    let status = if percentage >= HUNDRED {
        BudgetStatus::Over
    } else if percentage >= Decimal::from(80) {
        BudgetStatus::Near
    } else {
        BudgetStatus::Ok
    };
    BudgetProgress {
        percentage,
        status,
        remaining: budget.amount.saturating_sub(spent),
    }
}

pub fn budget_totals(rows: &[BudgetVariance]) -> BudgetTotals {
    rows.iter().fold(BudgetTotals::default(), |mut acc, r| {
        acc.budgeted = acc.budgeted.saturating_add(r.budget);
        acc.spent = acc.spent.saturating_add(r.spent);
        acc.remaining = acc.remaining.saturating_add(r.variance);
        acc
    })
}

/// Mean expense amount; zero when there are no expenses.
pub fn average_expense(transactions: &[Transaction]) -> Decimal {
    let (sum, count) = transactions
        .iter()
        .filter(|t| t.kind == TxKind::Expense)
        .fold((Decimal::ZERO, 0u32), |(s, n), t| (s.saturating_add(t.amount), n + 1));
    if count == 0 {
        Decimal::ZERO
    } else {
        sum / Decimal::from(count)
    }
}

/// `month_count` consecutive months ending with the month of `today`,
/// oldest first. Months without transactions stay at zero. More than
/// [`MAX_TREND_MONTHS`] is a validation error.
pub fn trend(
    transactions: &[Transaction],
    month_count: usize,
    today: NaiveDate,
) -> Result<Vec<TrendPoint>> {
    let span = match i32::try_from(month_count) {
        Ok(n) if month_count <= MAX_TREND_MONTHS => n,
        _ => {
            return Err(Error::validation(format!(
                "trend window of {} months exceeds {}",
                month_count, MAX_TREND_MONTHS
            )));
        }
    };
    let Some(current) = crate::utils::MONTHS.get(today.month0() as usize).copied() else {
        return Ok(Vec::new());
    };
    let mut points: Vec<TrendPoint> = (0..span)
        .map(|i| {
            let (year, month) = shift_month(today.year(), current, i - (span - 1));
            TrendPoint {
                year,
                month,
                label: format!("{} {}", short_month(month), year),
                income: Decimal::ZERO,
                expenses: Decimal::ZERO,
                net: Decimal::ZERO,
            }
        })
        .collect();

    for tx in transactions {
        let bucket = points
            .iter_mut()
            .find(|p| in_month(&tx.date, p.month, p.year));
        if let Some(p) = bucket {
            match tx.kind {
                TxKind::Income => p.income = p.income.saturating_add(tx.amount),
                TxKind::Expense => p.expenses = p.expenses.saturating_add(tx.amount),
            }
            p.net = p.income.saturating_sub(p.expenses);
        }
    }
    Ok(points)
}

pub fn trend_to_date(transactions: &[Transaction], month_count: usize) -> Result<Vec<TrendPoint>> {
    trend(transactions, month_count, chrono::Local::now().date_naive())
}
