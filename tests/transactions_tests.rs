// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use moneytrail::models::{TransactionDraft, TxKind};
use moneytrail::services::transactions as tx_service;
use moneytrail::store::SqliteStore;
use moneytrail::utils::parse_timestamp;
use moneytrail::{cli, commands::transactions, db};
use rusqlite::Connection;

fn setup() -> Connection {
    let conn = db::open_in_memory().unwrap();
    let store = SqliteStore::new(&conn);
    let rows = [
        (TxKind::Expense, "4.50", "Food", "Morning Coffee", "2025-01-01T08:00:00"),
        (TxKind::Expense, "6", "Food", "COFFEE run", "2025-01-02T09:30:00"),
        (TxKind::Expense, "3", "Food", "Tea", "2025-01-03T16:00:00"),
        (TxKind::Income, "2500", "Salary", "January pay", "2025-01-03T09:00:00"),
        (TxKind::Expense, "900", "Rent", "Flat", "2025-02-01T00:00:00"),
    ];
    for (kind, amount, category, description, date) in rows {
        tx_service::create(
            &store,
            TransactionDraft {
                kind,
                amount: amount.parse().unwrap(),
                category: category.into(),
                description: description.into(),
                date: parse_timestamp(date).unwrap(),
            },
        )
        .unwrap();
    }
    conn
}

fn list_rows(conn: &Connection, args: &[&str]) -> Vec<moneytrail::models::Transaction> {
    let mut argv = vec!["moneytrail", "tx", "list"];
    argv.extend_from_slice(args);
    let matches = cli::build_cli().get_matches_from(argv);
    if let Some(("tx", tx_m)) = matches.subcommand() {
        if let Some(("list", list_m)) = tx_m.subcommand() {
            return transactions::query_rows(conn, list_m).unwrap();
        }
        panic!("no list subcommand");
    }
    panic!("no tx subcommand");
}

#[test]
fn list_limit_respected() {
    let conn = setup();
    let rows = list_rows(&conn, &["--limit", "2"]);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "Rent");
    assert_eq!(rows[1].description, "Tea");
}

#[test]
fn search_is_case_insensitive() {
    let conn = setup();
    let rows = list_rows(&conn, &["--search", "coffee", "--sort", "amount"]);
    let descs: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["COFFEE run", "Morning Coffee"]);
}

#[test]
fn date_range_and_type_filters() {
    let conn = setup();
    let rows = list_rows(
        &conn,
        &["--from", "2025-01-02", "--to", "2025-01-03", "--type", "expense"],
    );
    let descs: Vec<&str> = rows.iter().map(|t| t.description.as_str()).collect();
    assert_eq!(descs, vec!["Tea", "COFFEE run"]);
}

#[test]
fn amount_range_and_category_sort() {
    let conn = setup();
    let rows = list_rows(&conn, &["--min", "5", "--max", "1000", "--sort", "category"]);
    let cats: Vec<&str> = rows.iter().map(|t| t.category.as_str()).collect();
    assert_eq!(cats, vec!["Food", "Rent"]);
}

#[test]
fn bad_amount_bound_is_an_error() {
    let conn = setup();
    let matches = cli::build_cli().get_matches_from(["moneytrail", "tx", "list", "--min", "lots"]);
    let (_, tx_m) = matches.subcommand().unwrap();
    let (_, list_m) = tx_m.subcommand().unwrap();
    assert!(transactions::query_rows(&conn, list_m).is_err());
}

#[test]
fn negative_amount_rejected() {
    let conn = setup();
    let store = SqliteStore::new(&conn);
    let err = tx_service::create(
        &store,
        TransactionDraft {
            kind: TxKind::Expense,
            amount: "-1".parse().unwrap(),
            category: "Food".into(),
            description: String::new(),
            date: parse_timestamp("2025-01-05").unwrap(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, moneytrail::error::Error::Validation(_)));
}
