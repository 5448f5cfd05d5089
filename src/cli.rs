// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version};

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to show (defaults to the current month)")
}

fn json_args() -> [Arg; 2] {
    [
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .conflicts_with("jsonl")
            .help("Print as pretty JSON"),
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    ]
}

fn tx_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("amount")
            .long("amount")
            .required(required)
            .help("Positive amount"),
    )
    .arg(
        Arg::new("label")
            .long("label")
            .conflicts_with("category")
            .help("Description"),
    )
    .arg(
        Arg::new("category")
            .long("category")
            .help("Quick-pick category code (food, salary, ...); fills the label"),
    )
    .arg(
        Arg::new("date")
            .long("date")
            .value_name("YYYY-MM-DD")
            .help("Calendar day (defaults to today)"),
    )
    .arg(
        Arg::new("type")
            .long("type")
            .value_parser(["income", "expense"])
            .help("income or expense"),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneynote")
        .version(crate_version!())
        .about("MoneyNote: monthly income/expense tracking with budget alerts")
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("tx")
                .about("Transactions")
                .subcommand(tx_fields(
                    Command::new("add")
                        .about("Record a transaction")
                        .group(
                            clap::ArgGroup::new("what")
                                .args(["label", "category"])
                                .required(true),
                        ),
                    true,
                ))
                .subcommand(tx_fields(
                    Command::new("edit").about("Replace fields of a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                    false,
                ))
                .subcommand(
                    Command::new("rm").about("Delete a transaction").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(clap::value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("list")
                        .about("List a month's transactions")
                        .arg(month_arg())
                        .arg(
                            Arg::new("search")
                                .long("search")
                                .help("Match label (case-insensitive) or amount"),
                        )
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .value_parser(["date", "label", "amount"])
                                .default_value("date"),
                        )
                        .arg(
                            Arg::new("asc")
                                .long("asc")
                                .action(ArgAction::SetTrue)
                                .conflicts_with("desc"),
                        )
                        .arg(Arg::new("desc").long("desc").action(ArgAction::SetTrue))
                        .args(json_args()),
                ),
        )
        .subcommand(
            Command::new("summary")
                .about("Monthly totals and budget status")
                .arg(month_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("chart")
                .about("Per-day income/expense for a month")
                .arg(month_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("history")
                .about("Totals for previous months (up to 12)")
                .arg(month_arg())
                .args(json_args()),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly spending limit")
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("limit").long("limit").required(true))
                        .arg(
                            Arg::new("warning")
                                .long("warning")
                                .help("Warning threshold percent (50-95)"),
                        )
                        .arg(
                            Arg::new("danger")
                                .long("danger")
                                .help("Danger threshold percent (warning+5 to 100)"),
                        ),
                )
                .subcommand(Command::new("show").args(json_args()))
                .subcommand(Command::new("clear"))
                .subcommand(Command::new("on"))
                .subcommand(Command::new("off")),
        )
        .subcommand(
            Command::new("export")
                .about("Export data")
                .subcommand(
                    Command::new("transactions")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("lang")
                        .arg(Arg::new("language").required(true).help("my|en|ja")),
                ),
        )
}
