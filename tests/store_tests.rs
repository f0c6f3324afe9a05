// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tallybook::models::{AccountRef, Asset, AssetKind, Transaction};
use tallybook::store::Store;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn tx(id: &str, amount: &str) -> Transaction {
    Transaction {
        id: id.into(),
        date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
        description: "Coffee".into(),
        amount: d(amount),
        category: "Food".into(),
        account: "Checking".into(),
        payment_source: AccountRef::Unlinked,
    }
}

#[test]
fn revision_bumps_on_every_commit() {
    let mut store = Store::new();
    assert_eq!(store.revision, 0);

    store.insert_transaction(tx("t1", "-5"));
    let after_insert = store.revision;
    assert!(after_insert > 0);

    store.commit_collections(store.collections());
    assert!(store.revision > after_insert);
}

#[test]
fn collections_snapshot_is_detached_from_the_store() {
    let mut store = Store::new();
    store.assets.push(Asset {
        id: "a1".into(),
        name: "Checking".into(),
        kind: AssetKind::Cash,
        value: d("100"),
        institution: None,
    });

    let mut snapshot = store.collections();
    snapshot.assets[0].value = d("0");

    assert_eq!(store.assets[0].value, d("100"));
}

#[test]
fn replace_transaction_swaps_in_place() {
    let mut store = Store::new();
    store.insert_transaction(tx("t1", "-5"));
    store.insert_transaction(tx("t2", "-10"));

    assert!(store.replace_transaction("t1", tx("srv-1", "-5")));

    assert_eq!(store.transactions.len(), 2);
    assert_eq!(store.transactions[0].id, "srv-1");
    assert_eq!(store.transactions[1].id, "t2");
    assert!(!store.replace_transaction("t1", tx("t1", "-5")));
}

#[test]
fn remove_returns_the_record() {
    let mut store = Store::new();
    store.insert_transaction(tx("t1", "-5"));

    let removed = store.remove_transaction("t1").unwrap();
    assert_eq!(removed.id, "t1");
    assert!(store.transactions.is_empty());
    assert!(store.remove_transaction("t1").is_none());
}

#[test]
fn insert_at_restores_the_original_position() {
    let mut store = Store::new();
    store.insert_transaction(tx("t1", "-5"));
    store.insert_transaction(tx("t2", "-10"));
    store.insert_transaction(tx("t3", "-15"));

    let removed = store.remove_transaction("t2").unwrap();
    store.insert_transaction_at(1, removed);

    let ids: Vec<&str> = store.transactions.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);
}

#[test]
fn insert_at_clamps_past_the_end() {
    let mut store = Store::new();
    store.insert_transaction_at(7, tx("t1", "-5"));
    assert_eq!(store.transactions.len(), 1);
}
