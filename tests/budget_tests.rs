// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::Month;
use moneytrail::commands::budgets::{self as budget_cmd, status_rows};
use moneytrail::{cli, db};
use moneytrail::engine::{BudgetStatus, can_create_budget};
use moneytrail::error::Error;
use moneytrail::models::{Budget, BudgetDraft, TransactionDraft, TxKind};
use moneytrail::services::{budgets, transactions};
use moneytrail::snapshot::Snapshot;
use moneytrail::store::{MemoryStore, RecordStore, SqliteStore};
use moneytrail::utils::parse_timestamp;
use rusqlite::{Connection, params};
use rust_decimal::Decimal;

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    conn.execute(
        "INSERT INTO budgets(category, amount, month, year) VALUES(?1, ?2, ?3, ?4)",
        params!["Dining", "50.00", "August", 2025],
    )
    .unwrap();
    conn
}

fn draft(category: &str, amount: i64, month: Month, year: i32) -> BudgetDraft {
    BudgetDraft {
        category: category.into(),
        amount: Decimal::from(amount),
        month,
        year,
    }
}

#[test]
fn duplicate_budget_rejected() {
    let store = MemoryStore::<Budget>::new();
    budgets::create(&store, draft("Food", 500, Month::March, 2024)).unwrap();

    let err = budgets::create(&store, draft("Food", 300, Month::March, 2024)).unwrap_err();
    assert!(matches!(err, Error::DuplicateBudget { ref category, year: 2024, .. } if category == "Food"));
    assert_eq!(store.list().unwrap().len(), 1);

    // Different month or category is fine.
    budgets::create(&store, draft("Food", 300, Month::April, 2024)).unwrap();
    budgets::create(&store, draft("Fun", 300, Month::March, 2024)).unwrap();
}

#[test]
fn guard_excludes_the_budget_being_edited() {
    let store = MemoryStore::<Budget>::new();
    let food = budgets::create(&store, draft("Food", 500, Month::March, 2024)).unwrap();
    let fun = budgets::create(&store, draft("Fun", 100, Month::March, 2024)).unwrap();
    let existing = store.list().unwrap();

    let same_slot = draft("Food", 650, Month::March, 2024);
    assert!(!can_create_budget(&existing, &same_slot, None));
    assert!(can_create_budget(&existing, &same_slot, Some(food.id)));
    assert!(can_create_budget(&[], &same_slot, None));

    let updated = budgets::update(&store, food.id, same_slot).unwrap();
    assert_eq!(updated.amount, Decimal::from(650));

    // Moving Fun onto Food's slot collides.
    let err = budgets::update(&store, fun.id, draft("Food", 100, Month::March, 2024)).unwrap_err();
    assert!(matches!(err, Error::DuplicateBudget { .. }));
}

#[test]
fn invalid_budgets_rejected() {
    let store = MemoryStore::<Budget>::new();
    for bad in [
        draft("", 10, Month::March, 2024),
        draft("Food", 0, Month::March, 2024),
        draft("Food", 10, Month::March, 2019),
    ] {
        assert!(matches!(budgets::create(&store, bad), Err(Error::Validation(_))));
    }
    assert!(matches!(
        budgets::update(&store, 3, draft("Food", 10, Month::March, 2024)),
        Err(Error::NotFound { kind: "Budget", id: 3 })
    ));
}

#[test]
fn sqlite_rows_feed_the_guard() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let err = budgets::create(&store, draft("Dining", 80, Month::August, 2025)).unwrap_err();
    assert!(matches!(err, Error::DuplicateBudget { .. }));
    budgets::create(&store, draft("Dining", 80, Month::September, 2025)).unwrap();
    let all: Vec<Budget> = store.list().unwrap();
    assert_eq!(all.len(), 2);
}

#[test]
fn status_rows_follow_budget_order() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    budgets::create(&store, draft("Groceries", 200, Month::August, 2025)).unwrap();
    for (amount, category, date) in [
        ("45", "Dining", "2025-08-03"),
        ("30", "Groceries", "2025-08-04"),
        ("99", "Dining", "2025-07-30"),
    ] {
        transactions::create(
            &store,
            TransactionDraft {
                kind: TxKind::Expense,
                amount: amount.parse().unwrap(),
                category: category.into(),
                description: String::new(),
                date: parse_timestamp(date).unwrap(),
            },
        )
        .unwrap();
    }

    let snap = Snapshot::load(&store, &store, &store).unwrap();
    let rows = status_rows(&snap, Month::August, 2025);
    assert_eq!(rows.len(), 2);

    assert_eq!(rows[0].category, "Dining");
    assert_eq!(rows[0].spent, Decimal::from(45));
    assert_eq!(rows[0].percentage, Decimal::from(90));
    assert_eq!(rows[0].status, BudgetStatus::Near);
    assert_eq!(rows[0].remaining, Decimal::from(5));

    assert_eq!(rows[1].category, "Groceries");
    assert_eq!(rows[1].status, BudgetStatus::Ok);
}

#[test]
fn delete_missing_budget_is_not_found() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    assert!(matches!(
        budgets::delete(&store, 99),
        Err(Error::NotFound { kind: "Budget", id: 99 })
    ));
    assert!(budgets::delete(&store, 1).unwrap());
}

fn run_budget(conn: &Connection, args: &[&str]) {
    let mut argv = vec!["moneytrail", "budget"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("budget", budget_m)) = matches.subcommand() {
        budget_cmd::handle(conn, budget_m).unwrap();
    } else {
        panic!("no budget subcommand");
    }
}

#[test]
fn set_with_id_keeps_stored_period() {
    let conn = setup();
    run_budget(&conn, &["set", "--id", "1", "--category", "Dining", "--amount", "75"]);
    let b: Budget = SqliteStore::new(&conn).get(1).unwrap();
    assert_eq!(b.amount, Decimal::from(75));
    assert_eq!((b.month, b.year), (Month::August, 2025));

    run_budget(
        &conn,
        &["set", "--id", "1", "--category", "Dining", "--amount", "75", "--month", "Oct"],
    );
    let b: Budget = SqliteStore::new(&conn).get(1).unwrap();
    assert_eq!((b.month, b.year), (Month::October, 2025));
}
