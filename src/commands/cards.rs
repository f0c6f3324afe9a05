// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::report;
use crate::api::PersistApi;
use crate::coordinator::Coordinator;
use crate::models::{self, CreditCard};
use crate::store::Store;
use crate::utils::{fmt_money, parse_decimal, pretty_table};

pub async fn handle<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(coord, store, sub).await?,
        Some(("list", _)) => list(store),
        _ => {}
    }
    Ok(())
}

async fn add<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let apr = match sub.get_one::<String>("apr") {
        Some(s) => Some(parse_decimal(s)?),
        None => None,
    };
    let card = CreditCard {
        id: models::new_id(),
        brand: sub.get_one::<String>("brand").unwrap().clone(),
        last4: sub.get_one::<String>("last4").unwrap().clone(),
        limit: parse_decimal(sub.get_one::<String>("limit").unwrap())?,
        balance: parse_decimal(sub.get_one::<String>("balance").unwrap())?,
        apr,
        points_balance: None,
        bill_due_date: None,
        bill_amount: None,
    };
    let label = card.mirror_name();
    report(coord.add_credit_card(store, card).await, |r| {
        format!("Added card '{}' ({})", label, r.id)
    });
    Ok(())
}

fn list(store: &Store) {
    let rows = store
        .credit_cards
        .iter()
        .map(|c| {
            vec![
                c.brand.clone(),
                c.last4.clone(),
                fmt_money(&c.balance),
                fmt_money(&c.limit),
                c.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Brand", "Last4", "Balance", "Limit", "Id"], rows)
    );
}
