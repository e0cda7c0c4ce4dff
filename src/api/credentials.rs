// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::ApiError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

/// Where the bearer token lives between invocations.
pub trait CredentialProvider {
    fn token(&self) -> Option<String>;
    fn store(&self, token: &str) -> Result<(), ApiError>;
    fn clear(&self) -> Result<(), ApiError>;
}

pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: PathBuf) -> Self {
        FileTokenStore { path }
    }
}

impl CredentialProvider for FileTokenStore {
    fn token(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn store(&self, token: &str) -> Result<(), ApiError> {
        let mut opts = OpenOptions::new();
        opts.write(true).create(true).truncate(true);
        // owner-only, the file holds a bearer token
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            opts.mode(0o600);
        }
        let fail = |e: std::io::Error| {
            ApiError::Credentials(format!("write {}: {}", self.path.display(), e))
        };
        let mut file = opts.open(&self.path).map_err(fail)?;
        // mode only applies when the file is created
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(fail)?;
        }
        file.write_all(token.trim().as_bytes()).map_err(fail)
    }

    fn clear(&self) -> Result<(), ApiError> {
        if !self.path.exists() {
            return Ok(());
        }
        fs::remove_file(&self.path).map_err(|e| {
            ApiError::Credentials(format!("remove {}: {}", self.path.display(), e))
        })
    }
}

#[derive(Default)]
pub struct MemoryCredentials {
    token: Mutex<Option<String>>,
}

impl MemoryCredentials {
    pub fn new(token: Option<&str>) -> Self {
        MemoryCredentials {
            token: Mutex::new(token.map(str::to_string)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialProvider for MemoryCredentials {
    fn token(&self) -> Option<String> {
        self.slot().clone()
    }

    fn store(&self, token: &str) -> Result<(), ApiError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), ApiError> {
        *self.slot() = None;
        Ok(())
    }
}
