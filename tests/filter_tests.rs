// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneytrail::engine::{FilterCriteria, filter};
use moneytrail::error::Error;
use moneytrail::models::{Transaction, TxKind};
use moneytrail::utils::parse_timestamp;
use rust_decimal::Decimal;

fn tx(id: i64, kind: TxKind, amount: i64, category: &str, description: &str, date: &str) -> Transaction {
    let date = parse_timestamp(date).unwrap();
    Transaction {
        id,
        kind,
        amount: Decimal::from(amount),
        category: category.into(),
        description: description.into(),
        date,
        created_at: date,
    }
}

fn sample() -> Vec<Transaction> {
    vec![
        tx(1, TxKind::Expense, 4, "Food", "Morning Coffee", "2024-03-04T08:15:00"),
        tx(2, TxKind::Expense, 6, "Food", "COFFEE run", "2024-03-05T00:00:00"),
        tx(3, TxKind::Expense, 3, "Food", "Tea", "2024-03-05T23:59:59.999"),
        tx(4, TxKind::Income, 2000, "Salary", "March salary", "2024-03-01"),
        tx(5, TxKind::Expense, 120, "Rent", "Rent share", "2024-03-06T10:00:00"),
    ]
}

fn ids(v: &[Transaction]) -> Vec<i64> {
    v.iter().map(|t| t.id).collect()
}

#[test]
fn empty_criteria_is_identity() {
    let all = sample();
    let out = filter(&all, &FilterCriteria::default());
    assert_eq!(out, all);
    assert!(FilterCriteria::default().is_empty());
}

#[test]
fn search_term_is_case_insensitive_substring() {
    let c = FilterCriteria {
        search_term: Some("coffee".into()),
        ..Default::default()
    };
    assert_eq!(ids(&filter(&sample(), &c)), vec![1, 2]);
}

#[test]
fn blank_search_and_category_impose_nothing() {
    let c = FilterCriteria {
        search_term: Some("   ".into()),
        category: Some(String::new()),
        ..Default::default()
    };
    assert!(c.is_empty());
    assert_eq!(filter(&sample(), &c).len(), 5);
}

#[test]
fn date_bounds_cover_whole_days() {
    let day = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let c = FilterCriteria {
        start_date: Some(day),
        end_date: Some(day),
        ..Default::default()
    };
    // Midnight and the last millisecond of the 5th are both in.
    assert_eq!(ids(&filter(&sample(), &c)), vec![2, 3]);
}

#[test]
fn criteria_combine_with_and() {
    let c = FilterCriteria {
        kind: Some(TxKind::Expense),
        category: Some("Food".into()),
        min_amount: Some(Decimal::from(4)),
        max_amount: Some(Decimal::from(6)),
        ..Default::default()
    };
    // Bounds are inclusive on both ends.
    assert_eq!(ids(&filter(&sample(), &c)), vec![1, 2]);

    let c = FilterCriteria {
        kind: Some(TxKind::Income),
        category: Some("Food".into()),
        ..Default::default()
    };
    assert!(filter(&sample(), &c).is_empty());
}

#[test]
fn result_is_ordered_subset_and_input_untouched() {
    let all = sample();
    let before = all.clone();
    let c = FilterCriteria {
        kind: Some(TxKind::Expense),
        ..Default::default()
    };
    let out = filter(&all, &c);
    assert_eq!(ids(&out), vec![1, 2, 3, 5]);
    assert!(out.iter().all(|t| c.matches(t)));
    assert_eq!(all, before);
}

#[test]
fn amount_bounds_parse_or_reject() {
    assert_eq!(FilterCriteria::parse_amount("").unwrap(), None);
    assert_eq!(
        FilterCriteria::parse_amount(" 12.50 ").unwrap(),
        Some("12.5".parse::<Decimal>().unwrap())
    );
    let err = FilterCriteria::parse_amount("ten").unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
}

#[test]
fn empty_input_gives_empty_output() {
    let c = FilterCriteria {
        search_term: Some("x".into()),
        ..Default::default()
    };
    assert!(filter(&[], &c).is_empty());
}
