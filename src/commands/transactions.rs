// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::report;
use crate::api::PersistApi;
use crate::coordinator::Coordinator;
use crate::models::{AccountRef, TransactionDraft};
use crate::store::Store;
use crate::utils::{fmt_money, parse_date, parse_decimal, pretty_table};

pub async fn handle<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    m: &clap::ArgMatches,
) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(coord, store, sub).await?,
        Some(("expense", sub)) => expense(coord, store, sub).await?,
        Some(("edit", sub)) => edit(coord, store, sub).await?,
        Some(("rm", sub)) => rm(coord, store, sub).await?,
        Some(("list", sub)) => list(store, sub),
        _ => {}
    }
    Ok(())
}

fn draft_from(sub: &clap::ArgMatches) -> Result<TransactionDraft> {
    Ok(TransactionDraft {
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        description: sub.get_one::<String>("description").unwrap().clone(),
        amount: parse_decimal(sub.get_one::<String>("amount").unwrap())?,
        category: sub.get_one::<String>("category").unwrap().clone(),
        account: sub.get_one::<String>("account").unwrap().clone(),
    })
}

async fn add<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let draft = draft_from(sub)?;
    let amount = draft.amount;
    report(coord.add_transaction(store, draft).await, |r| {
        format!("Recorded {} (tx {})", fmt_money(&amount), r.id)
    });
    Ok(())
}

async fn expense<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let draft = draft_from(sub)?;
    let source = if let Some(id) = sub.get_one::<String>("card") {
        AccountRef::CreditCard { id: id.clone() }
    } else if let Some(id) = sub.get_one::<String>("asset") {
        AccountRef::Asset { id: id.clone() }
    } else {
        crate::resolver::resolve_account(
            &draft.account,
            -draft.amount.abs(),
            &store.assets,
            &store.credit_cards,
        )
    };
    report(coord.add_expense(store, draft, source).await, |r| {
        format!("Expense recorded (tx {})", r.id)
    });
    Ok(())
}

async fn edit<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    let draft = draft_from(sub)?;
    report(coord.update_transaction(store, id, draft).await, |r| {
        format!("Updated tx {}", r.id)
    });
    Ok(())
}

async fn rm<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let id = sub.get_one::<String>("id").unwrap();
    report(coord.delete_transaction(store, id).await, |r| {
        format!("Deleted tx {}", r.id)
    });
    Ok(())
}

fn list(store: &Store, sub: &clap::ArgMatches) {
    let mut rows: Vec<Vec<String>> = store
        .transactions
        .iter()
        .rev()
        .map(|t| {
            vec![
                t.date.to_string(),
                t.description.clone(),
                fmt_money(&t.amount),
                t.category.clone(),
                t.account.clone(),
                t.payment_source.to_string(),
                t.id.clone(),
            ]
        })
        .collect();
    if let Some(limit) = sub.get_one::<usize>("limit") {
        rows.truncate(*limit);
    }
    println!(
        "{}",
        pretty_table(
            &["Date", "Description", "Amount", "Category", "Account", "Source", "Id"],
            rows,
        )
    );
}
