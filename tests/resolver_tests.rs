// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;
use tallybook::models::{AccountRef, Asset, AssetKind, CreditCard};
use tallybook::resolver::resolve_account;

fn d(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn assets() -> Vec<Asset> {
    vec![
        Asset {
            id: "a1".into(),
            name: "Checking".into(),
            kind: AssetKind::Cash,
            value: d("5000"),
            institution: None,
        },
        Asset {
            id: "a2".into(),
            name: "VISA 1234".into(),
            kind: AssetKind::Other,
            value: d("10"),
            institution: None,
        },
    ]
}

fn cards() -> Vec<CreditCard> {
    vec![CreditCard {
        id: "c1".into(),
        brand: "Visa".into(),
        last4: "1234".into(),
        limit: d("50000"),
        balance: d("1000"),
        apr: None,
        points_balance: None,
        bill_due_date: None,
        bill_amount: None,
    }]
}

#[test]
fn exact_asset_name_wins() {
    let r = resolve_account("Checking", d("-500"), &assets(), &cards());
    assert_eq!(r, AccountRef::Asset { id: "a1".into() });
}

#[test]
fn asset_match_takes_precedence_over_card() {
    // "VISA 1234" is both an asset name and the card's synthesized label.
    let r = resolve_account("VISA 1234", d("-500"), &assets(), &cards());
    assert_eq!(r, AccountRef::Asset { id: "a2".into() });
}

#[test]
fn card_matched_by_last4_substring() {
    let r = resolve_account("card ending 1234", d("-500"), &[], &cards());
    assert_eq!(r, AccountRef::CreditCard { id: "c1".into() });
}

#[test]
fn card_matched_by_brand_and_last4_case_insensitively() {
    let r = resolve_account("visa 1234", d("-500"), &[], &cards());
    assert_eq!(r, AccountRef::CreditCard { id: "c1".into() });
}

#[test]
fn income_never_resolves_to_a_card() {
    let r = resolve_account("Visa 1234", d("500"), &[], &cards());
    assert_eq!(r, AccountRef::Unlinked);
}

#[test]
fn unknown_label_is_unlinked() {
    let r = resolve_account("Venmo", d("-20"), &assets(), &cards());
    assert_eq!(r, AccountRef::Unlinked);
}

#[test]
fn label_is_trimmed_before_matching() {
    let r = resolve_account("  Checking  ", d("-20"), &assets(), &cards());
    assert_eq!(r, AccountRef::Asset { id: "a1".into() });
}
