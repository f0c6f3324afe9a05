// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure computation of a transaction's monetary effect on the balance
//! collections, and its exact inverse.
//!
//! `reverse` undoes `apply` field-for-field: for every entity present in the
//! input collections, `reverse(tx, apply(tx, c))` restores each numeric field
//! to its value in `c`. Edit and rollback are both built from these two
//! primitives by composition, never from ad hoc field patches. The only
//! asymmetry is a mirror liability lazily created by `apply`: `reverse`
//! returns its balance to the card's restored balance but does not delete the
//! record (the sync coordinator prunes mirrors it knows a rolled-back
//! mutation created).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{self, AccountRef, Asset, CreditCard, Liability, Transaction};

/// The triple of collections a transaction's effect can touch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collections {
    pub assets: Vec<Asset>,
    pub credit_cards: Vec<CreditCard>,
    pub liabilities: Vec<Liability>,
}

#[derive(Clone, Copy, PartialEq)]
enum Direction {
    Apply,
    Reverse,
}

/// New collections reflecting `tx`'s monetary effect.
pub fn apply(tx: &Transaction, collections: &Collections) -> Collections {
    shift(tx, collections, Direction::Apply)
}

/// New collections with `tx`'s monetary effect undone.
pub fn reverse(tx: &Transaction, collections: &Collections) -> Collections {
    shift(tx, collections, Direction::Reverse)
}

fn shift(tx: &Transaction, collections: &Collections, dir: Direction) -> Collections {
    let mut next = collections.clone();
    if tx.amount.is_zero() {
        return next;
    }

    match &tx.payment_source {
        AccountRef::Asset { id } => {
            let signed = match dir {
                Direction::Apply => tx.amount,
                Direction::Reverse => -tx.amount,
            };
            match next.assets.iter_mut().find(|a| a.id == *id) {
                Some(asset) => asset.value += signed,
                None => tracing::warn!(
                    asset_id = %id,
                    tx_id = %tx.id,
                    "transaction references a missing asset; balances unchanged"
                ),
            }
        }
        AccountRef::CreditCard { id } => {
            if tx.amount > Decimal::ZERO {
                // The resolver never links income to a card.
                tracing::warn!(
                    card_id = %id,
                    tx_id = %tx.id,
                    "income linked to a credit card; balances unchanged"
                );
            } else {
                let delta = match dir {
                    Direction::Apply => tx.amount.abs(),
                    Direction::Reverse => -tx.amount.abs(),
                };
                shift_card(&mut next, id, delta, tx, dir);
            }
        }
        AccountRef::Unlinked => {}
    }
    next
}

/// Moves a card's debt by `delta` and keeps its mirror liability in
/// lock-step, creating the mirror on the first charge.
fn shift_card(next: &mut Collections, card_id: &str, delta: Decimal, tx: &Transaction, dir: Direction) {
    let (balance_after, mirror_name) = {
        let Some(card) = next.credit_cards.iter_mut().find(|c| c.id == card_id) else {
            tracing::warn!(
                card_id = %card_id,
                tx_id = %tx.id,
                "transaction references a missing credit card; balances unchanged"
            );
            return;
        };
        card.balance += delta;
        (card.balance, card.mirror_name())
    };

    let mirror = next
        .liabilities
        .iter_mut()
        .find(|l| l.mirror_of_card_id.as_deref() == Some(card_id));
    match mirror {
        Some(liability) => liability.balance += delta,
        None if dir == Direction::Apply => next.liabilities.push(Liability {
            id: models::new_id(),
            name: mirror_name,
            kind: "credit card".to_string(),
            // First charge: the mirror starts at the card's post-charge
            // balance so it tracks the card exactly from day one.
            balance: balance_after,
            apr: None,
            mirror_of_card_id: Some(card_id.to_string()),
        }),
        None => tracing::warn!(
            card_id = %card_id,
            tx_id = %tx.id,
            "no mirror liability to reverse for card charge"
        ),
    }
}
