// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::report;
use crate::api::PersistApi;
use crate::coordinator::Coordinator;
use crate::models::{self, Liability};
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
    let liability = Liability {
        id: models::new_id(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        kind: sub.get_one::<String>("type").unwrap().clone(),
        balance: parse_decimal(sub.get_one::<String>("balance").unwrap())?,
        apr,
        mirror_of_card_id: None,
    };
    let name = liability.name.clone();
    report(coord.add_liability(store, liability).await, |r| {
        format!("Added liability '{}' ({})", name, r.id)
    });
    Ok(())
}

fn list(store: &Store) {
    let rows = store
        .liabilities
        .iter()
        .map(|l| {
            vec![
                l.name.clone(),
                l.kind.clone(),
                fmt_money(&l.balance),
                l.mirror_of_card_id.clone().unwrap_or_default(),
                l.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Type", "Balance", "Mirror of card", "Id"], rows)
    );
}
