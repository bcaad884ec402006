// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

fn json_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print as pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .help("Print as JSON lines"),
    )
}

fn month_arg() -> Arg {
    Arg::new("month")
        .long("month")
        .value_name("YYYY-MM")
        .help("Month to report on (default: current month)")
}

fn search_arg() -> Arg {
    Arg::new("search")
        .long("search")
        .value_name("TEXT")
        .help("Case-insensitive substring over project/category/vendor/description/ref")
}

pub fn build_cli() -> Command {
    Command::new("prodbook")
        .about("Production P&L ledger, sales targets, and reporting")
        .version(clap::crate_version!())
        .arg(
            Arg::new("backend")
                .long("backend")
                .global(true)
                .value_parser(["sheet", "sqlite"])
                .default_value("sheet")
                .help("Storage backend"),
        )
        .arg(
            Arg::new("data-dir")
                .long("data-dir")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Store location (default: platform data dir)"),
        )
        .subcommand(Command::new("init").about("Initialize the store and print its location"))
        .subcommand(
            Command::new("tx")
                .about("Record, list and delete ledger transactions")
                .subcommand(
                    Command::new("add")
                        .about("Append a transaction")
                        .arg(Arg::new("date").long("date").value_name("YYYY-MM-DD"))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(["Income", "Expense"]),
                        )
                        .arg(Arg::new("project").long("project"))
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("vendor").long("vendor"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("qty").long("qty").default_value("1"))
                        .arg(
                            Arg::new("unit-price")
                                .long("unit-price")
                                .required(true)
                                .value_name("AMOUNT"),
                        )
                        .arg(
                            Arg::new("vat")
                                .long("vat")
                                .default_value("0")
                                .value_name("PERCENT"),
                        )
                        .arg(Arg::new("payment").long("payment"))
                        .arg(Arg::new("status").long("status"))
                        .arg(Arg::new("ref").long("ref")),
                )
                .subcommand(json_flags(
                    Command::new("list")
                        .about("List transactions with derived amounts, newest first")
                        .arg(month_arg())
                        .arg(search_arg())
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(
                    Command::new("delete").about("Delete a transaction by id").arg(
                        Arg::new("id")
                            .long("id")
                            .required(true)
                            .value_parser(value_parser!(i64)),
                    ),
                )
                .subcommand(
                    Command::new("sample")
                        .about("Seed two demo rows for the given month")
                        .arg(month_arg()),
                ),
        )
        .subcommand(
            Command::new("dashboard")
                .about("Monthly P&L, full-year series and target achievement")
                .arg(month_arg())
                .arg(search_arg()),
        )
        .subcommand(
            Command::new("target")
                .about("Set and list sales targets (month 0 = annual)")
                .subcommand(
                    Command::new("set")
                        .about("Upsert a target for (year, month)")
                        .arg(
                            Arg::new("year")
                                .long("year")
                                .required(true)
                                .value_parser(value_parser!(i32)),
                        )
                        .arg(
                            Arg::new("month")
                                .long("month")
                                .required(true)
                                .value_parser(value_parser!(u32).range(0..=12))
                                .help("0 for the annual target, 1-12 for a monthly override"),
                        )
                        .arg(
                            Arg::new("amount")
                                .long("amount")
                                .required(true)
                                .value_name("AMOUNT"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").about("List stored targets").arg(
                        Arg::new("year")
                            .long("year")
                            .value_parser(value_parser!(i32)),
                    ),
                )),
        )
        .subcommand(
            Command::new("export").about("Export filtered data").subcommand(
                Command::new("transactions")
                    .about("Export the filtered ledger with derived columns")
                    .arg(month_arg())
                    .arg(search_arg())
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .default_value("csv")
                            .value_name("csv|json"),
                    )
                    .arg(
                        Arg::new("out")
                            .long("out")
                            .required(true)
                            .value_name("PATH"),
                    ),
            ),
        )
}
