// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::{self, Write};

use chrono::Month;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::engine::{
    BudgetVariance, CategoryShare, MonthlyTotals, average_expense, budget_variance,
    category_breakdown, month_transactions, monthly_totals,
};
use crate::models::{Budget, Transaction, TxKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionLine {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TxKind,
    pub category: String,
    pub description: String,
    pub amount: Decimal,
}

/// One month's figures, shaped for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportData {
    #[serde(with = "crate::utils::month_name")]
    pub month: Month,
    pub year: i32,
    pub totals: MonthlyTotals,
    pub budget_variances: Vec<BudgetVariance>,
    pub category_breakdown: Vec<CategoryShare>,
    pub transactions: Vec<TransactionLine>,
    pub transaction_count: usize,
    pub average_expense: Decimal,
}

impl ReportData {
    pub fn build(transactions: &[Transaction], budgets: &[Budget], month: Month, year: i32) -> Self {
        let in_month = month_transactions(transactions, month, year);
        let lines = in_month
            .iter()
            .map(|t| TransactionLine {
                date: t.date.format("%Y-%m-%d").to_string(),
                kind: t.kind,
                category: t.category.clone(),
                description: t.description.clone(),
                amount: t.amount,
            })
            .collect();
        ReportData {
            month,
            year,
            totals: monthly_totals(&in_month, month, year),
            budget_variances: budget_variance(budgets, &in_month, month, year),
            category_breakdown: category_breakdown(&in_month),
            transactions: lines,
            transaction_count: in_month.len(),
            average_expense: average_expense(&in_month),
        }
    }

    pub fn file_stem(&self) -> String {
        format!("financial-report-{}-{}", self.month.name(), self.year)
    }

    /// Sectioned CSV: summary, key metrics, variances, breakdown, details.
    /// Empty sections are left out.
    pub fn write_csv<W: Write>(&self, out: W, currency: &str, generated: &str) -> csv::Result<()> {
        let mut w = csv::WriterBuilder::new().flexible(true).from_writer(out);
        let money = |d: &Decimal| format!("{:.2}", d.round_dp(2));

        w.write_record(["FINANCIAL REPORT SUMMARY"])?;
        w.write_record(["Period", &format!("{} {}", self.month.name(), self.year)])?;
        w.write_record(["Generated", generated])?;
        w.write_record(["Currency", currency])?;
        w.write_record([""])?;

        w.write_record(["KEY METRICS"])?;
        w.write_record(["Metric", "Amount"])?;
        w.write_record(["Total Income", &money(&self.totals.income)])?;
        w.write_record(["Total Expenses", &money(&self.totals.expenses)])?;
        w.write_record(["Net Income", &money(&self.totals.net)])?;
        w.write_record([""])?;

        if !self.budget_variances.is_empty() {
            w.write_record(["BUDGET VARIANCES"])?;
            w.write_record(["Category", "Budget", "Spent", "Variance", "Usage %"])?;
            for v in &self.budget_variances {
                w.write_record([
                    v.category.as_str(),
                    &money(&v.budget),
                    &money(&v.spent),
                    &money(&v.variance),
                    &format!("{:.1}", v.usage().round_dp(1)),
                ])?;
            }
            w.write_record([""])?;
        }

        if !self.category_breakdown.is_empty() {
            w.write_record(["EXPENSE BREAKDOWN BY CATEGORY"])?;
            w.write_record(["Category", "Amount", "Percentage"])?;
            for c in &self.category_breakdown {
                w.write_record([
                    c.category.as_str(),
                    &money(&c.amount),
                    &format!("{:.1}", c.percentage.round_dp(1)),
                ])?;
            }
            w.write_record([""])?;
        }

        if !self.transactions.is_empty() {
            w.write_record(["TRANSACTION DETAILS"])?;
            w.write_record(["Date", "Type", "Category", "Description", "Amount"])?;
            for t in &self.transactions {
                w.write_record([
                    t.date.as_str(),
                    t.kind.as_str(),
                    t.category.as_str(),
                    t.description.as_str(),
                    &money(&t.amount),
                ])?;
            }
        }
        w.flush()?;
        Ok(())
    }

    /// Standalone HTML page meant for printing. Same sections as the CSV.
    pub fn write_html<W: Write>(&self, mut out: W, currency: &str, generated: &str) -> io::Result<()> {
        let money = |d: &Decimal| format!("{} {:.2}", escape(currency), d.round_dp(2));
        let period = format!("{} {}", self.month.name(), self.year);

        writeln!(out, "<!DOCTYPE html>")?;
        writeln!(out, "<html><head><meta charset=\"utf-8\">")?;
        writeln!(out, "<title>Financial Report - {}</title>", period)?;
        writeln!(out, "<style>{}</style></head><body>", PRINT_CSS)?;
        writeln!(out, "<h1>Financial Report</h1>")?;
        writeln!(out, "<p>{} &middot; generated {}</p>", period, escape(generated))?;

        writeln!(out, "<h2>Key Metrics</h2>")?;
        table(
            &mut out,
            &["Metric", "Amount"],
            &[
                vec!["Total Income".into(), money(&self.totals.income)],
                vec!["Total Expenses".into(), money(&self.totals.expenses)],
                vec!["Net Income".into(), money(&self.totals.net)],
            ],
        )?;

        if !self.budget_variances.is_empty() {
            writeln!(out, "<h2>Budget Variances</h2>")?;
            let rows: Vec<Vec<String>> = self
                .budget_variances
                .iter()
                .map(|v| {
                    vec![
                        escape(&v.category),
                        money(&v.budget),
                        money(&v.spent),
                        money(&v.variance),
                        format!("{:.1}%", v.usage().round_dp(1)),
                    ]
                })
                .collect();
            table(&mut out, &["Category", "Budget", "Spent", "Variance", "Usage"], &rows)?;
        }

        if !self.category_breakdown.is_empty() {
            writeln!(out, "<h2>Expense Breakdown by Category</h2>")?;
            let rows: Vec<Vec<String>> = self
                .category_breakdown
                .iter()
                .map(|c| {
                    vec![
                        escape(&c.category),
                        money(&c.amount),
                        format!("{:.1}%", c.percentage.round_dp(1)),
                    ]
                })
                .collect();
            table(&mut out, &["Category", "Amount", "Share"], &rows)?;
        }

        if !self.transactions.is_empty() {
            writeln!(out, "<h2>Transaction Details</h2>")?;
            let rows: Vec<Vec<String>> = self
                .transactions
                .iter()
                .map(|t| {
                    vec![
                        escape(&t.date),
                        t.kind.as_str().to_string(),
                        escape(&t.category),
                        escape(&t.description),
                        money(&t.amount),
                    ]
                })
                .collect();
            table(
                &mut out,
                &["Date", "Type", "Category", "Description", "Amount"],
                &rows,
            )?;
        }
        writeln!(out, "</body></html>")?;
        out.flush()
    }
}

const PRINT_CSS: &str = "body{font-family:sans-serif;margin:2em}\
table{border-collapse:collapse;width:100%;margin-bottom:1.5em}\
th,td{border:1px solid #ccc;padding:4px 8px;text-align:left}\
@media print{body{margin:0}}";

// Cells must already be escaped.
fn table<W: Write>(out: &mut W, headers: &[&str], rows: &[Vec<String>]) -> io::Result<()> {
    write!(out, "<table><tr>")?;
    for h in headers {
        write!(out, "<th>{}</th>", h)?;
    }
    writeln!(out, "</tr>")?;
    for row in rows {
        write!(out, "<tr>")?;
        for cell in row {
            write!(out, "<td>{}</td>", cell)?;
        }
        writeln!(out, "</tr>")?;
    }
    writeln!(out, "</table>")
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
