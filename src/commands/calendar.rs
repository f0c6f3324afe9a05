// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use super::report;
use crate::api::PersistApi;
use crate::coordinator::Coordinator;
use crate::models::{self, CalendarEvent};
use crate::store::Store;
use crate::utils::{fmt_money, parse_date, parse_decimal, pretty_table};

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
    let amount = match sub.get_one::<String>("amount") {
        Some(s) => Some(parse_decimal(s)?),
        None => None,
    };
    let event = CalendarEvent {
        id: models::new_id(),
        title: sub.get_one::<String>("title").unwrap().clone(),
        date: parse_date(sub.get_one::<String>("date").unwrap())?,
        amount,
        note: sub.get_one::<String>("note").cloned(),
    };
    let title = event.title.clone();
    report(coord.add_calendar_event(store, event).await, |r| {
        format!("Added event '{}' ({})", title, r.id)
    });
    Ok(())
}

fn list(store: &Store) {
    let rows = store
        .calendar_events
        .iter()
        .map(|e| {
            vec![
                e.date.to_string(),
                e.title.clone(),
                e.amount.as_ref().map(fmt_money).unwrap_or_default(),
                e.note.clone().unwrap_or_default(),
                e.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Date", "Title", "Amount", "Note", "Id"], rows)
    );
}
