// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;
use rust_decimal::Decimal;

use crate::store::Store;
use crate::utils::{fmt_money, pretty_table};

pub fn handle(store: &Store) -> Result<()> {
    let asset_rows = store
        .assets
        .iter()
        .map(|a| vec![a.name.clone(), a.kind.to_string(), fmt_money(&a.value)])
        .collect();
    println!("{}", pretty_table(&["Asset", "Type", "Value"], asset_rows));

    let card_rows = store
        .credit_cards
        .iter()
        .map(|c| vec![c.mirror_name(), fmt_money(&c.balance), fmt_money(&c.limit)])
        .collect();
    println!("{}", pretty_table(&["Card", "Balance", "Limit"], card_rows));

    let liability_rows = store
        .liabilities
        .iter()
        .map(|l| vec![l.name.clone(), l.kind.clone(), fmt_money(&l.balance)])
        .collect();
    println!(
        "{}",
        pretty_table(&["Liability", "Type", "Balance"], liability_rows)
    );

    // Card debt is counted once, through the mirror liabilities.
    let assets: Decimal = store.assets.iter().map(|a| a.value).sum();
    let liabilities: Decimal = store.liabilities.iter().map(|l| l.balance).sum();
    let loans: Decimal = store.loans.iter().map(|l| l.balance).sum();
    println!(
        "Net position: {} (assets {} - liabilities {} - loans {})",
        fmt_money(&(assets - liabilities - loans)),
        fmt_money(&assets),
        fmt_money(&liabilities),
        fmt_money(&loans),
    );
    Ok(())
}
