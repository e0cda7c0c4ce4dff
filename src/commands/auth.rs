// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api::ApiClient;
use anyhow::Result;

pub fn login(client: &ApiClient, sub: &clap::ArgMatches) -> Result<()> {
    let username = sub.get_one::<String>("username").unwrap().trim();
    let password = sub.get_one::<String>("password").unwrap();
    client.login(username, password)?;
    println!("Signed in as {}", username);
    Ok(())
}

pub fn logout(client: &ApiClient) -> Result<()> {
    client.logout()?;
    println!("Signed out");
    Ok(())
}

pub fn whoami(client: &ApiClient) -> Result<()> {
    let profile = client.profile()?;
    println!("Signed in as {} (id {})", profile.username, profile.id);
    Ok(())
}
