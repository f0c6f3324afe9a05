// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use tallybook::api::RestClient;
use tallybook::coordinator::Coordinator;
use tallybook::{cli, commands, snapshot};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let matches = cli::build_cli().get_matches();
    let path = match matches.get_one::<String>("snapshot") {
        Some(p) => PathBuf::from(p),
        None => snapshot::snapshot_path()?,
    };
    let mut store = snapshot::load_or_init(&path)?;
    let coord = Coordinator::new(RestClient::new(
        matches.get_one::<String>("api-url").unwrap().as_str(),
    )?);

    match matches.subcommand() {
        Some(("init", _)) => println!("Snapshot initialized at {}", path.display()),
        Some(("balances", _)) => commands::balances::handle(&store)?,
        Some(("tx", sub)) => commands::transactions::handle(&coord, &mut store, sub).await?,
        Some(("asset", sub)) => commands::assets::handle(&coord, &mut store, sub).await?,
        Some(("card", sub)) => commands::cards::handle(&coord, &mut store, sub).await?,
        Some(("liability", sub)) => commands::liabilities::handle(&coord, &mut store, sub).await?,
        Some(("loan", sub)) => commands::loans::handle(&coord, &mut store, sub).await?,
        Some(("calendar", sub)) => commands::calendar::handle(&coord, &mut store, sub).await?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }

    // Mutations are terminal by now (confirmed or rolled back), so the saved
    // snapshot never captures a half-applied state.
    snapshot::save(&path, &store)?;
    Ok(())
}
