// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::report;
use crate::api::PersistApi;
use crate::coordinator::Coordinator;
use crate::models::{self, Loan};
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
    let principal = parse_decimal(sub.get_one::<String>("principal").unwrap())?;
    let balance = match sub.get_one::<String>("balance") {
        Some(s) => parse_decimal(s)?,
        None => principal,
    };
    let monthly_payment = match sub.get_one::<String>("monthly-payment") {
        Some(s) => Some(parse_decimal(s)?),
        None => None,
    };
    let loan = Loan {
        id: models::new_id(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        principal,
        balance,
        apr: parse_decimal(sub.get_one::<String>("apr").unwrap())?,
        monthly_payment,
    };
    let name = loan.name.clone();
    report(coord.add_loan(store, loan).await, |r| {
        format!("Added loan '{}' ({})", name, r.id)
    });
    Ok(())
}

fn list(store: &Store) {
    let rows = store
        .loans
        .iter()
        .map(|l| {
            vec![
                l.name.clone(),
                fmt_money(&l.principal),
                fmt_money(&l.balance),
                fmt_money(&l.apr),
                l.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Principal", "Balance", "APR", "Id"], rows)
    );
}
