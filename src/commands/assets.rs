// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Result, bail};

use super::report;
use crate::api::PersistApi;
use crate::coordinator::Coordinator;
use crate::models::{self, Asset, AssetKind};
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

fn parse_kind(s: &str) -> Result<AssetKind> {
    Ok(match s.trim().to_lowercase().as_str() {
        "cash" => AssetKind::Cash,
        "investment" => AssetKind::Investment,
        "property" => AssetKind::Property,
        "other" => AssetKind::Other,
        _ => bail!("Invalid asset type '{}', expected cash|investment|property|other", s),
    })
}

async fn add<A: PersistApi>(
    coord: &Coordinator<A>,
    store: &mut Store,
    sub: &clap::ArgMatches,
) -> Result<()> {
    let asset = Asset {
        id: models::new_id(),
        name: sub.get_one::<String>("name").unwrap().clone(),
        kind: parse_kind(sub.get_one::<String>("type").unwrap())?,
        value: parse_decimal(sub.get_one::<String>("value").unwrap())?,
        institution: sub.get_one::<String>("institution").cloned(),
    };
    let name = asset.name.clone();
    report(coord.add_asset(store, asset).await, |r| {
        format!("Added asset '{}' ({})", name, r.id)
    });
    Ok(())
}

fn list(store: &Store) {
    let rows = store
        .assets
        .iter()
        .map(|a| {
            vec![
                a.name.clone(),
                a.kind.to_string(),
                fmt_money(&a.value),
                a.institution.clone().unwrap_or_default(),
                a.id.clone(),
            ]
        })
        .collect();
    println!(
        "{}",
        pretty_table(&["Name", "Type", "Value", "Institution", "Id"], rows)
    );
}
