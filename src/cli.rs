// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, value_parser};

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
            .conflicts_with("json")
            .help("Print as JSON lines"),
    )
}

fn month_year(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .help("Month name, e.g. March (default: current month)"),
    )
    .arg(
        Arg::new("year")
            .long("year")
            .value_parser(value_parser!(i32))
            .help("Year (default: current year)"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn transaction_fields(cmd: Command, required: bool) -> Command {
    cmd.arg(
        Arg::new("type")
            .long("type")
            .required(required)
            .help("income|expense"),
    )
    .arg(Arg::new("amount").long("amount").required(required))
    .arg(Arg::new("category").long("category").required(required))
    .arg(Arg::new("description").long("description"))
    .arg(
        Arg::new("date")
            .long("date")
            .help("YYYY-MM-DD or YYYY-MM-DDTHH:MM:SS (default: now)"),
    )
}

pub fn build_cli() -> Command {
    Command::new("moneytrail")
        .about("Track transactions, monthly category budgets and savings goals")
        .version(clap::crate_version!())
        .subcommand(Command::new("init").about("Create the database"))
        .subcommand(
            Command::new("config")
                .about("Settings")
                .subcommand(Command::new("get").arg(Arg::new("key").required(true)))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("key").required(true))
                        .arg(Arg::new("value").required(true)),
                ),
        )
        .subcommand(
            Command::new("category")
                .about("Manage categories")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .default_value("expense")
                                .help("income|expense"),
                        )
                        .arg(Arg::new("icon").long("icon").default_value(""))
                        .arg(Arg::new("color").long("color").default_value("")),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .help("Only income or expense categories"),
                    ),
                ))
                .subcommand(
                    Command::new("rename")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("new_name").required(true)),
                )
                .subcommand(Command::new("rm").arg(Arg::new("name").required(true))),
        )
        .subcommand(
            Command::new("tx")
                .about("Record and browse transactions")
                .subcommand(transaction_fields(Command::new("add"), true))
                .subcommand(json_flags(
                    Command::new("list")
                        .arg(Arg::new("search").long("search").help("Text in description"))
                        .arg(Arg::new("type").long("type").help("income|expense"))
                        .arg(Arg::new("from").long("from").help("First day, YYYY-MM-DD"))
                        .arg(Arg::new("to").long("to").help("Last day, YYYY-MM-DD"))
                        .arg(Arg::new("category").long("category"))
                        .arg(Arg::new("min").long("min").help("Minimum amount"))
                        .arg(Arg::new("max").long("max").help("Maximum amount"))
                        .arg(
                            Arg::new("sort")
                                .long("sort")
                                .default_value("date")
                                .help("date|amount|category"),
                        )
                        .arg(
                            Arg::new("limit")
                                .long("limit")
                                .value_parser(value_parser!(usize)),
                        ),
                ))
                .subcommand(transaction_fields(Command::new("edit").arg(id_arg()), false))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("budget")
                .about("Monthly category budgets")
                .subcommand(month_year(
                    Command::new("set")
                        .arg(Arg::new("category").long("category").required(true))
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64))
                                .help("Update this budget instead of creating one"),
                        ),
                ))
                .subcommand(json_flags(month_year(Command::new("list"))))
                .subcommand(json_flags(month_year(Command::new("status"))))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("goal")
                .about("Savings goals")
                .subcommand(
                    Command::new("add")
                        .arg(Arg::new("name").required(true))
                        .arg(Arg::new("target").long("target").required(true))
                        .arg(Arg::new("by").long("by").help("Target date, YYYY-MM-DD"))
                        .arg(Arg::new("description").long("description"))
                        .arg(Arg::new("category").long("category"))
                        .arg(
                            Arg::new("status")
                                .long("status")
                                .default_value("not-started"),
                        ),
                )
                .subcommand(json_flags(
                    Command::new("list").arg(Arg::new("status").long("status")),
                ))
                .subcommand(
                    Command::new("status")
                        .arg(id_arg())
                        .arg(Arg::new("status").required(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("report")
                .about("Totals, breakdowns and trends")
                .subcommand(json_flags(month_year(Command::new("monthly"))))
                .subcommand(json_flags(month_year(Command::new("breakdown"))))
                .subcommand(json_flags(month_year(Command::new("variance"))))
                .subcommand(json_flags(
                    Command::new("trend").arg(
                        Arg::new("months")
                            .long("months")
                            .default_value("6")
                            .value_parser(value_parser!(u16).range(1..=120))
                            .help("Number of months, 1 to 120"),
                    ),
                )),
        )
        .subcommand(
            Command::new("export")
                .about("Write reports and transactions to disk")
                .subcommand(month_year(
                    Command::new("report")
                        .arg(
                            Arg::new("format")
                                .long("format")
                                .default_value("csv")
                                .help("csv|json|html"),
                        )
                        .arg(Arg::new("out").long("out").required(true)),
                ))
                .subcommand(
                    Command::new("transactions")
                        .arg(Arg::new("format").long("format").default_value("csv"))
                        .arg(Arg::new("out").long("out").required(true)),
                ),
        )
        .subcommand(Command::new("doctor").about("Check for dangling category references"))
}
