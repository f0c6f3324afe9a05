// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::models::{AccountRef, Asset, AssetKind, Transaction};
use tallybook::snapshot;
use tallybook::store::Store;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn populated_store() -> Store {
    let mut store = Store::new();
    store.assets.push(Asset {
        id: "a1".into(),
        name: "Checking".into(),
        kind: AssetKind::Cash,
        value: d("4500.50"),
        institution: Some("Bank".into()),
    });
    store.insert_transaction(Transaction {
        id: "t1".into(),
        date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        description: "Groceries".into(),
        amount: d("-499.50"),
        category: "Food".into(),
        account: "Checking".into(),
        payment_source: AccountRef::Asset { id: "a1".into() },
    });
    store
}

#[test]
fn save_then_load_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tallybook.json");
    let store = populated_store();

    snapshot::save(&path, &store).unwrap();
    let loaded = snapshot::load_or_init(&path).unwrap();

    assert_eq!(loaded, store);
}

#[test]
fn missing_snapshot_initializes_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");

    let store = snapshot::load_or_init(&path).unwrap();
    assert_eq!(store, Store::new());
}

#[test]
fn numeric_strings_in_a_snapshot_are_coerced() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tallybook.json");
    std::fs::write(
        &path,
        r#"{
            "transactions": [{
                "id": "t1",
                "date": "2025-07-01",
                "description": "Groceries",
                "amount": "-499.50",
                "category": "Food",
                "account": "Checking",
                "paymentSource": {"type": "asset", "id": "a1"}
            }],
            "assets": [{
                "id": "a1",
                "name": "Checking",
                "type": "cash",
                "value": 4500.5
            }]
        }"#,
    )
    .unwrap();

    let store = snapshot::load_or_init(&path).unwrap();
    assert_eq!(store.transactions[0].amount, d("-499.50"));
    assert_eq!(store.assets[0].value, d("4500.5"));
}

#[test]
fn corrupt_snapshot_is_an_error_not_a_reset() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tallybook.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(snapshot::load_or_init(&path).is_err());
}
