// Copyright (c) 2025 Tallybook Contributors.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, Command, crate_version, value_parser};

fn date_arg() -> Arg {
    Arg::new("date")
        .long("date")
        .value_name("YYYY-MM-DD")
        .required(true)
}

fn amount_arg() -> Arg {
    Arg::new("amount")
        .long("amount")
        .value_name("SIGNED_DECIMAL")
        .allow_negative_numbers(true)
        .required(true)
}

fn tx_field_args(cmd: Command) -> Command {
    cmd.arg(date_arg())
        .arg(amount_arg())
        .arg(
            Arg::new("description")
                .long("description")
                .required(true),
        )
        .arg(
            Arg::new("account")
                .long("account")
                .help("Account label, e.g. an asset name or 'VISA 1234'")
                .required(true),
        )
        .arg(Arg::new("category").long("category").default_value(""))
}

pub fn build_cli() -> Command {
    Command::new("tallybook")
        .version(crate_version!())
        .about("Personal-finance dashboard core: ledger, balances, optimistic REST sync")
        .arg(
            Arg::new("api-url")
                .long("api-url")
                .global(true)
                .default_value("http://localhost:4000/api")
                .help("Base URL of the persistence API"),
        )
        .arg(
            Arg::new("snapshot")
                .long("snapshot")
                .global(true)
                .value_name("PATH")
                .help("Local snapshot file (defaults to the platform data dir)"),
        )
        .subcommand(Command::new("init").about("Create an empty local snapshot"))
        .subcommand(Command::new("balances").about("Show assets, cards, liabilities and the net position"))
        .subcommand(
            Command::new("tx")
                .about("Ledger transactions")
                .subcommand(tx_field_args(
                    Command::new("add").about("Record a transaction (negative amount = expense)"),
                ))
                .subcommand(
                    tx_field_args(
                        Command::new("expense")
                            .about("Record an expense against an explicit asset or card"),
                    )
                    .arg(Arg::new("asset").long("asset").value_name("ASSET_ID").conflicts_with("card"))
                    .arg(Arg::new("card").long("card").value_name("CARD_ID")),
                )
                .subcommand(
                    tx_field_args(Command::new("edit").about("Replace a transaction's fields"))
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("rm")
                        .about("Delete a transaction and undo its balance effect")
                        .arg(Arg::new("id").long("id").required(true)),
                )
                .subcommand(
                    Command::new("list").about("List transactions").arg(
                        Arg::new("limit")
                            .long("limit")
                            .value_parser(value_parser!(usize)),
                    ),
                ),
        )
        .subcommand(
            Command::new("asset")
                .about("Cash, investment, and property assets")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("cash")
                                .help("cash|investment|property|other"),
                        )
                        .arg(Arg::new("value").long("value").required(true))
                        .arg(Arg::new("institution").long("institution")),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("card")
                .about("Credit cards")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("brand").long("brand").required(true))
                        .arg(Arg::new("last4").long("last4").required(true))
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(Arg::new("balance").long("balance").default_value("0"))
                        .arg(Arg::new("apr").long("apr")),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("liability")
                .about("Non-loan liabilities")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("type").long("type").default_value("other"))
                        .arg(Arg::new("balance").long("balance").required(true))
                        .arg(Arg::new("apr").long("apr")),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("loan")
                .about("Loans")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").long("name").required(true))
                        .arg(Arg::new("principal").long("principal").required(true))
                        .arg(Arg::new("balance").long("balance"))
                        .arg(Arg::new("apr").long("apr").required(true))
                        .arg(Arg::new("monthly-payment").long("monthly-payment")),
                )
                .subcommand(Command::new("list")),
        )
        .subcommand(
            Command::new("calendar")
                .about("Calendar events")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("title").long("title").required(true))
                        .arg(date_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(Arg::new("note").long("note")),
                )
                .subcommand(Command::new("list")),
        )
}
