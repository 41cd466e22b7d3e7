// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use moneytrail::db;
use moneytrail::error::Error;
use moneytrail::models::{Goal, GoalDraft, GoalStatus};
use moneytrail::services::goals;
use moneytrail::store::{MemoryStore, SqliteStore};
use rust_decimal::Decimal;

fn holiday(status: GoalStatus) -> GoalDraft {
    GoalDraft {
        name: "Holiday".into(),
        description: "Two weeks in Lisbon".into(),
        target_amount: Decimal::from(1500),
        target_date: NaiveDate::from_ymd_opt(2024, 8, 1),
        status,
        category: "Travel".into(),
    }
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn progress_follows_status() {
    let expected = [
        (GoalStatus::NotStarted, 0),
        (GoalStatus::InProgress, 50),
        (GoalStatus::Completed, 100),
        (GoalStatus::OnHold, 25),
        (GoalStatus::Cancelled, 0),
    ];
    for (status, pct) in expected {
        assert_eq!(status.progress(), pct, "{}", status);
    }
}

#[test]
fn status_parses_loosely() {
    assert_eq!("in-progress".parse::<GoalStatus>().unwrap(), GoalStatus::InProgress);
    assert_eq!("Not Started".parse::<GoalStatus>().unwrap(), GoalStatus::NotStarted);
    assert_eq!("on_hold".parse::<GoalStatus>().unwrap(), GoalStatus::OnHold);
    assert!(matches!("done".parse::<GoalStatus>(), Err(Error::Validation(_))));
}

#[test]
fn days_remaining_and_overdue() {
    let store = MemoryStore::<Goal>::new();
    let g = goals::create(&store, holiday(GoalStatus::InProgress)).unwrap();
    assert_eq!(g.days_remaining(day(2024, 7, 22)), Some(10));
    assert!(!g.is_overdue(day(2024, 8, 1)));
    assert!(g.is_overdue(day(2024, 8, 2)));
    assert_eq!(g.days_remaining(day(2024, 8, 3)), Some(-2));

    let mut open_ended = holiday(GoalStatus::NotStarted);
    open_ended.target_date = None;
    let g = goals::create(&store, open_ended).unwrap();
    assert_eq!(g.days_remaining(day(2030, 1, 1)), None);
    assert!(!g.is_overdue(day(2030, 1, 1)));
}

#[test]
fn set_status_keeps_other_fields() {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    let g = goals::create(&store, holiday(GoalStatus::NotStarted)).unwrap();
    let done = goals::set_status(&store, g.id, GoalStatus::Completed).unwrap();
    assert_eq!(done.status, GoalStatus::Completed);
    assert_eq!(done.progress(), 100);
    assert_eq!(done.name, g.name);
    assert_eq!(done.target_amount, g.target_amount);
    assert_eq!(done.target_date, g.target_date);

    assert!(matches!(
        goals::set_status(&store, 404, GoalStatus::OnHold),
        Err(Error::NotFound { kind: "Goal", id: 404 })
    ));
}

#[test]
fn filter_by_status() {
    let store = MemoryStore::<Goal>::new();
    goals::create(&store, holiday(GoalStatus::InProgress)).unwrap();
    goals::create(&store, holiday(GoalStatus::Completed)).unwrap();
    goals::create(&store, holiday(GoalStatus::InProgress)).unwrap();
    let all = moneytrail::store::RecordStore::list(&store).unwrap();

    assert_eq!(goals::with_status(&all, None).len(), 3);
    assert_eq!(goals::with_status(&all, Some(GoalStatus::InProgress)).len(), 2);
    assert!(goals::with_status(&all, Some(GoalStatus::Cancelled)).is_empty());
}

#[test]
fn invalid_goals_rejected() {
    let store = MemoryStore::<Goal>::new();
    let mut nameless = holiday(GoalStatus::NotStarted);
    nameless.name = " ".into();
    assert!(matches!(goals::create(&store, nameless), Err(Error::Validation(_))));

    let mut negative = holiday(GoalStatus::NotStarted);
    negative.target_amount = Decimal::from(-5);
    assert!(matches!(goals::create(&store, negative), Err(Error::Validation(_))));
}
