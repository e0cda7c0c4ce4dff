// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use deskboard::api::{ApiClient, FileTokenStore, HttpTransport};
use deskboard::config::{self, Config};
use deskboard::{cli, commands, logging};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();
    logging::init(matches.get_count("verbose"));

    let cfg_path = config::config_path()?;
    let cfg = Config::resolve(
        &cfg_path,
        matches.get_one::<String>("api_url").map(|s| s.as_str()),
    )?;

    if let Some(("config", sub)) = matches.subcommand() {
        return commands::settings::handle(&cfg_path, &cfg, sub);
    }

    let transport = HttpTransport::new(&cfg.api_url, cfg.timeout_secs)?;
    let tokens = FileTokenStore::new(config::token_path()?);
    let client = ApiClient::new(Box::new(transport), Box::new(tokens));

    match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&client, sub)?,
        Some(("logout", _)) => commands::auth::logout(&client)?,
        Some(("whoami", _)) => commands::auth::whoami(&client)?,
        Some(("home", sub)) => commands::home::handle(&client, &cfg, sub)?,
        Some(("note", sub)) => commands::notes::handle(&client, &cfg, sub)?,
        Some(("task", sub)) => commands::tasks::handle(&client, &cfg, sub)?,
        Some(("plan", sub)) => commands::plans::handle(&client, &cfg, sub)?,
        Some(("savings", sub)) => commands::savings::handle(&client, &cfg, sub)?,
        Some(("types", sub)) => commands::types::handle(&client, sub)?,
        Some(("export", sub)) => commands::exporter::handle(&client, &cfg, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
