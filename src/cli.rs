// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use clap::{Arg, ArgAction, Command, crate_version, value_parser};

fn output_flags(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("json")
            .long("json")
            .action(ArgAction::SetTrue)
            .help("Print pretty JSON"),
    )
    .arg(
        Arg::new("jsonl")
            .long("jsonl")
            .action(ArgAction::SetTrue)
            .conflicts_with("json")
            .help("Print one JSON object per line"),
    )
}

fn window_args(cmd: Command) -> Command {
    cmd.arg(
        Arg::new("month")
            .long("month")
            .help("Calendar month YYYY-MM (defaults to the current month)"),
    )
    .arg(
        Arg::new("all")
            .long("all")
            .action(ArgAction::SetTrue)
            .conflicts_with("month")
            .help("Every record, regardless of date"),
    )
}

fn id_arg() -> Arg {
    Arg::new("id")
        .long("id")
        .required(true)
        .value_parser(value_parser!(i64))
}

fn content_arg(required: bool) -> Arg {
    Arg::new("content").long("content").required(required)
}

pub fn build_cli() -> Command {
    Command::new("deskboard")
        .version(crate_version!())
        .about("Notes, tasks, plans and savings analytics from the terminal")
        .arg(
            Arg::new("api_url")
                .long("api-url")
                .global(true)
                .help("Backend base URL (overrides config and DESKBOARD_API_URL)"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("More log output on stderr (-v info, -vv debug)"),
        )
        .subcommand(
            Command::new("login")
                .about("Sign in and keep the session token")
                .arg(Arg::new("username").long("username").short('u').required(true))
                .arg(Arg::new("password").long("password").short('p').required(true)),
        )
        .subcommand(Command::new("logout").about("Forget the stored session token"))
        .subcommand(Command::new("whoami").about("Check the stored session"))
        .subcommand(output_flags(
            Command::new("home").about("Overview of notes, tasks, plans and this month's money"),
        ))
        .subcommand(
            Command::new("note")
                .about("Notes")
                .subcommand(output_flags(
                    Command::new("list")
                        .arg(Arg::new("grep").long("grep").help("Regex over note content")),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(content_arg(true))
                        .arg(
                            Arg::new("sub_type")
                                .long("sub-type")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(Command::new("edit").arg(id_arg()).arg(content_arg(true)))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("task")
                .about("Tasks")
                .subcommand(output_flags(
                    Command::new("list").arg(Arg::new("status").long("status")),
                ))
                .subcommand(Command::new("board").about("Tasks grouped by status"))
                .subcommand(
                    Command::new("add")
                        .arg(content_arg(true))
                        .arg(Arg::new("due").long("due").help("Due date YYYY-MM-DD")),
                )
                .subcommand(
                    Command::new("move")
                        .arg(id_arg())
                        .arg(Arg::new("status").long("status").required(true)),
                )
                .subcommand(Command::new("edit").arg(id_arg()).arg(content_arg(true)))
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("plan")
                .about("Plans and countdowns")
                .subcommand(output_flags(Command::new("list")))
                .subcommand(
                    Command::new("add")
                        .arg(content_arg(true))
                        .arg(
                            Arg::new("target")
                                .long("target")
                                .help("Target date YYYY-MM-DD or RFC 3339"),
                        )
                        .arg(
                            Arg::new("salary_day")
                                .long("salary-day")
                                .value_parser(value_parser!(u32).range(1..=31))
                                .conflicts_with("target")
                                .help("Recurring day of month"),
                        ),
                )
                .subcommand(Command::new("edit").arg(id_arg()).arg(content_arg(true)))
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(output_flags(
                    Command::new("countdown")
                        .arg(
                            Arg::new("id")
                                .long("id")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("watch")
                                .long("watch")
                                .action(ArgAction::SetTrue)
                                .help("Refresh once a minute"),
                        ),
                )),
        )
        .subcommand(
            Command::new("savings")
                .about("Income and expense records")
                .subcommand(output_flags(window_args(
                    Command::new("list").arg(
                        Arg::new("kind")
                            .long("type")
                            .value_parser(["income", "expense"]),
                    ),
                )))
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("kind")
                                .long("type")
                                .required(true)
                                .value_parser(["income", "expense"]),
                        )
                        .arg(
                            Arg::new("sub_type")
                                .long("sub-type")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(Arg::new("amount").long("amount").required(true))
                        .arg(content_arg(false)),
                )
                .subcommand(
                    Command::new("edit")
                        .arg(id_arg())
                        .arg(Arg::new("amount").long("amount"))
                        .arg(content_arg(false))
                        .arg(
                            Arg::new("sub_type")
                                .long("sub-type")
                                .value_parser(value_parser!(i64)),
                        ),
                )
                .subcommand(Command::new("rm").arg(id_arg()))
                .subcommand(output_flags(window_args(
                    Command::new("summary").arg(
                        Arg::new("income")
                            .long("income")
                            .action(ArgAction::SetTrue)
                            .help("Chart income categories instead of expenses"),
                    ),
                )))
                .subcommand(output_flags(window_args(
                    Command::new("chart").arg(
                        Arg::new("income")
                            .long("income")
                            .action(ArgAction::SetTrue),
                    ),
                ))),
        )
        .subcommand(
            Command::new("types")
                .about("Subtype labels")
                .subcommand(output_flags(
                    Command::new("list").arg(
                        Arg::new("type")
                            .long("type")
                            .value_parser(value_parser!(i64)),
                    ),
                ))
                .subcommand(
                    Command::new("add")
                        .arg(
                            Arg::new("type")
                                .long("type")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("sub_type")
                                .long("sub-type")
                                .required(true)
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(content_arg(true)),
                )
                .subcommand(Command::new("rm").arg(id_arg())),
        )
        .subcommand(
            Command::new("export").subcommand(window_args(
                Command::new("savings")
                    .arg(
                        Arg::new("format")
                            .long("format")
                            .required(true)
                            .help("csv|json"),
                    )
                    .arg(Arg::new("out").long("out").required(true)),
            )),
        )
        .subcommand(
            Command::new("config")
                .about("Local settings")
                .subcommand(Command::new("show"))
                .subcommand(
                    Command::new("set")
                        .arg(Arg::new("url").long("url").help("Backend base URL to store"))
                        .arg(
                            Arg::new("income_type")
                                .long("income-type")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("expense_type")
                                .long("expense-type")
                                .value_parser(value_parser!(i64)),
                        )
                        .arg(
                            Arg::new("timeout_secs")
                                .long("timeout-secs")
                                .value_parser(value_parser!(u64)),
                        ),
                ),
        )
}
