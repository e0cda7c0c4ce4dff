// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Authenticated access to the dashboard backend.

pub mod credentials;
pub mod transport;
pub mod wire;

pub use credentials::{CredentialProvider, FileTokenStore, MemoryCredentials};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

use crate::aggregate::{MonthSelector, filter_by_month};
use crate::models::{Note, Plan, Profile, Task, Transaction, TypeCode, TypeLookupEntry};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use wire::{LoginRequest, LoginResponse, NewSaving, SavingPatch, WireSaving, sanitize_savings};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("not logged in or session expired; run `deskboard login`")]
    Unauthorized,
    #[error("backend returned {status}: {message}")]
    Status { status: u16, message: String },
    #[error("request failed: {0}")]
    Transport(String),
    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("could not encode request body: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("credential store: {0}")]
    Credentials(String),
    #[error("invalid record from backend: {0}")]
    InvalidRecord(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

/// A record kind served under a collection path.
pub trait Resource: DeserializeOwned {
    const PATH: &'static str;
}

impl Resource for Note {
    const PATH: &'static str = "/notes";
}

impl Resource for Task {
    const PATH: &'static str = "/tasks";
}

impl Resource for Plan {
    const PATH: &'static str = "/plans";
}

impl Resource for TypeLookupEntry {
    const PATH: &'static str = "/types";
}

const SAVINGS_PATH: &str = "/savings";

#[derive(serde::Deserialize)]
struct Wrapped<T> {
    data: T,
}

fn decode<R: DeserializeOwned>(path: &str, body: &str) -> Result<R, ApiError> {
    if let Ok(w) = serde_json::from_str::<Wrapped<R>>(body) {
        return Ok(w.data);
    }
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

pub struct ApiClient {
    transport: Box<dyn Transport>,
    credentials: Box<dyn CredentialProvider>,
}

impl ApiClient {
    pub fn new(transport: Box<dyn Transport>, credentials: Box<dyn CredentialProvider>) -> Self {
        ApiClient {
            transport,
            credentials,
        }
    }

    pub fn credentials(&self) -> &dyn CredentialProvider {
        self.credentials.as_ref()
    }

    fn call(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
        authenticated: bool,
    ) -> Result<ApiResponse, ApiError> {
        let bearer = if authenticated {
            Some(self.credentials.token().ok_or(ApiError::Unauthorized)?)
        } else {
            None
        };
        let req = ApiRequest {
            method,
            path: path.to_string(),
            query,
            body,
            bearer,
        };
        tracing::debug!(%method, path, "sending request");
        let resp = self.transport.execute(&req)?;
        if authenticated && (resp.status == 401 || resp.status == 403) {
            tracing::warn!(status = resp.status, path, "authentication rejected, clearing token");
            self.credentials.clear()?;
            return Err(ApiError::Unauthorized);
        }
        if !resp.is_success() {
            return Err(ApiError::Status {
                status: resp.status,
                message: error_message(&resp.body),
            });
        }
        Ok(resp)
    }

    fn send<R: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<R, ApiError> {
        let resp = self.call(method, path, query, body, true)?;
        decode(path, &resp.body)
    }

    fn encode<B: Serialize>(body: &B) -> Result<Value, ApiError> {
        serde_json::to_value(body).map_err(ApiError::Encode)
    }

    pub fn login(&self, username: &str, password: &str) -> Result<(), ApiError> {
        let body = Self::encode(&LoginRequest { username, password })?;
        let resp = self.call(Method::Post, "/auth/login", Vec::new(), Some(body), false)?;
        let login: LoginResponse = decode("/auth/login", &resp.body)?;
        self.credentials.store(&login.access_token)?;
        tracing::info!(username, "logged in");
        Ok(())
    }

    pub fn logout(&self) -> Result<(), ApiError> {
        self.credentials.clear()
    }

    /// Verifies the stored token. A rejected token is removed.
    pub fn profile(&self) -> Result<Profile, ApiError> {
        self.send(Method::Get, "/auth/profile", Vec::new(), None)
    }

    pub fn list<R: Resource>(&self) -> Result<Vec<R>, ApiError> {
        self.send(Method::Get, R::PATH, Vec::new(), None)
    }

    pub fn get<R: Resource>(&self, id: i64) -> Result<R, ApiError> {
        self.send(Method::Get, &format!("{}/{}", R::PATH, id), Vec::new(), None)
    }

    pub fn create<R: Resource, B: Serialize>(&self, body: &B) -> Result<R, ApiError> {
        self.send(Method::Post, R::PATH, Vec::new(), Some(Self::encode(body)?))
    }

    pub fn update<R: Resource, B: Serialize>(&self, id: i64, body: &B) -> Result<R, ApiError> {
        let path = format!("{}/{}", R::PATH, id);
        self.send(Method::Patch, &path, Vec::new(), Some(Self::encode(body)?))
    }

    pub fn delete<R: Resource>(&self, id: i64) -> Result<(), ApiError> {
        self.delete_path(&format!("{}/{}", R::PATH, id))
    }

    fn delete_path(&self, path: &str) -> Result<(), ApiError> {
        self.call(Method::Delete, path, Vec::new(), None, true)?;
        Ok(())
    }

    pub fn list_types(&self, ty: Option<TypeCode>) -> Result<Vec<TypeLookupEntry>, ApiError> {
        let query = ty
            .map(|t| vec![("type".to_string(), t.to_string())])
            .unwrap_or_default();
        self.send(Method::Get, TypeLookupEntry::PATH, query, None)
    }

    /// Savings for one window, validated row by row at this boundary.
    pub fn list_savings(&self, selector: MonthSelector) -> Result<Vec<Transaction>, ApiError> {
        let query = selector
            .query_value()
            .map(|m| vec![("month".to_string(), m)])
            .unwrap_or_default();
        let rows: Vec<WireSaving> = self.send(Method::Get, SAVINGS_PATH, query, None)?;
        let total = rows.len();
        let txs = filter_by_month(&sanitize_savings(rows), selector);
        tracing::debug!(total, kept = txs.len(), %selector, "fetched savings");
        Ok(txs)
    }

    fn saving_from_wire(row: WireSaving) -> Result<Transaction, ApiError> {
        Transaction::try_from(row).map_err(ApiError::InvalidRecord)
    }

    pub fn get_saving(&self, id: i64) -> Result<Transaction, ApiError> {
        let path = format!("{}/{}", SAVINGS_PATH, id);
        Self::saving_from_wire(self.send(Method::Get, &path, Vec::new(), None)?)
    }

    pub fn create_saving(&self, body: &NewSaving) -> Result<Transaction, ApiError> {
        let row = self.send(Method::Post, SAVINGS_PATH, Vec::new(), Some(Self::encode(body)?))?;
        Self::saving_from_wire(row)
    }

    pub fn update_saving(&self, id: i64, body: &SavingPatch) -> Result<Transaction, ApiError> {
        let path = format!("{}/{}", SAVINGS_PATH, id);
        let row = self.send(Method::Patch, &path, Vec::new(), Some(Self::encode(body)?))?;
        Self::saving_from_wire(row)
    }

    pub fn delete_saving(&self, id: i64) -> Result<(), ApiError> {
        self.delete_path(&format!("{}/{}", SAVINGS_PATH, id))
    }
}
