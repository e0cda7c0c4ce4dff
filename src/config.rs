// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::models::{TypeCode, TypeFilter};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

static APP: Lazy<(&str, &str, &str)> =
    Lazy::new(|| ("com.alphavelocity", "Deskboard", "deskboard"));

pub const API_URL_ENV: &str = "DESKBOARD_API_URL";
const DEFAULT_API_URL: &str = "http://localhost:3000";

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from(APP.0, APP.1, APP.2)
        .context("Could not determine platform-specific directories")
}

pub fn config_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.config_dir();
    fs::create_dir_all(dir).context("Failed to create config dir")?;
    Ok(dir.join("config.json"))
}

pub fn token_path() -> Result<PathBuf> {
    let proj = project_dirs()?;
    let dir = proj.data_dir();
    fs::create_dir_all(dir).context("Failed to create data dir")?;
    Ok(dir.join("token"))
}

/// Numeric `type` codes the backend uses for each record kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeCodes {
    pub income: TypeCode,
    pub expense: TypeCode,
    pub note: TypeCode,
    pub plan: TypeCode,
    pub task: TypeCode,
}

impl Default for TypeCodes {
    fn default() -> Self {
        TypeCodes {
            income: TypeCode(1),
            expense: TypeCode(2),
            note: TypeCode(3),
            plan: TypeCode(4),
            task: TypeCode(5),
        }
    }
}

impl TypeCodes {
    pub fn filter(&self) -> TypeFilter {
        TypeFilter {
            income: self.income,
            expense: self.expense,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub timeout_secs: u64,
    pub types: TypeCodes,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: 15,
            types: TypeCodes::default(),
        }
    }
}

impl Config {
    /// Reads `path`, falling back to defaults when the file does not exist yet.
    pub fn load_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Read config at {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("Parse config at {}", path.display()))
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)
            .with_context(|| format!("Write config at {}", path.display()))
    }

    /// File first, then the environment, then an explicit flag.
    pub fn resolve(path: &Path, flag_url: Option<&str>) -> Result<Config> {
        let mut cfg = Config::load_from(path)?;
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                cfg.api_url = url.trim().to_string();
            }
        }
        if let Some(url) = flag_url {
            cfg.api_url = url.trim().to_string();
        }
        Ok(cfg)
    }
}
