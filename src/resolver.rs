// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{AccountRef, Asset, CreditCard};

/// Resolve a free-text account label into a concrete payment source.
///
/// Runs once, when the transaction (or its edited replacement) is created;
/// the result is stored on the record, so later renames cannot detach
/// history. Policy, in order:
///
/// 1. exact `Asset.name` match;
/// 2. for expenses only, a card whose `last4` appears in the label or whose
///    `"<brand> <last4>"` equals the label (brand case-insensitive);
/// 3. otherwise `Unlinked` — the transaction is still recorded, with no
///    balance effect.
pub fn resolve_account(
    label: &str,
    amount: Decimal,
    assets: &[Asset],
    cards: &[CreditCard],
) -> AccountRef {
    let label = label.trim();

    if let Some(asset) = assets.iter().find(|a| a.name == label) {
        return AccountRef::Asset {
            id: asset.id.clone(),
        };
    }

    // Income never resolves to a card: only assets receive money.
    if amount < Decimal::ZERO {
        let card_match = cards.iter().find(|c| {
            (!c.last4.is_empty() && label.contains(c.last4.as_str()))
                || label.eq_ignore_ascii_case(&format!("{} {}", c.brand, c.last4))
        });
        if let Some(card) = card_match {
            return AccountRef::CreditCard { id: card.id.clone() };
        }
    }

    tracing::warn!(
        account = label,
        "account label matched no asset or card; recording transaction unlinked"
    );
    AccountRef::Unlinked
}
