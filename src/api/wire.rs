// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Request bodies and the loosely typed savings rows the backend returns.

use crate::models::{SubtypeCode, TaskStatus, Transaction, TypeCode};
use crate::utils::{coerce_amount, parse_timestamp, within_ceiling};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A savings row as it arrives, before any field is trusted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireSaving {
    pub id: i64,
    pub r#type: TypeCode,
    pub sub_type: SubtypeCode,
    #[serde(default)]
    pub amount: Value,
    #[serde(default, alias = "description")]
    pub content: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl TryFrom<WireSaving> for Transaction {
    type Error = String;

    fn try_from(w: WireSaving) -> Result<Self, Self::Error> {
        let amount = coerce_amount(&w.amount)
            .ok_or_else(|| format!("record {} has no usable amount ({})", w.id, w.amount))?;
        if !within_ceiling(&amount) {
            return Err(format!("record {} has an out-of-range amount ({})", w.id, amount));
        }
        if amount.is_sign_negative() {
            tracing::warn!(id = w.id, "negative amount from backend, using its magnitude");
        }
        let raw_date = w
            .created_at
            .ok_or_else(|| format!("record {} has no createdAt", w.id))?;
        let created_at = parse_timestamp(&raw_date)
            .ok_or_else(|| format!("record {} has invalid createdAt '{}'", w.id, raw_date))?;
        Ok(Transaction {
            id: w.id,
            r#type: w.r#type,
            sub_type: w.sub_type,
            // direction comes from `type`; a signed amount is folded to its magnitude
            amount: amount.abs(),
            content: w.content.unwrap_or_default(),
            created_at,
        })
    }
}

/// Keeps the rows that validate; logs and drops the rest.
pub fn sanitize_savings(rows: Vec<WireSaving>) -> Vec<Transaction> {
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        match Transaction::try_from(row) {
            Ok(t) => out.push(t),
            Err(reason) => tracing::warn!("dropping savings row: {reason}"),
        }
    }
    out
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(alias = "access_token", alias = "token")]
    pub access_token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaving {
    pub r#type: TypeCode,
    pub sub_type: SubtypeCode,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub content: String,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingPatch {
    #[serde(
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<SubtypeCode>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub r#type: TypeCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<SubtypeCode>,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub r#type: TypeCode,
    pub content: String,
    pub status: TaskStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlan {
    pub r#type: TypeCode,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_day: Option<u32>,
}

/// Partial update shared by notes, tasks and plans.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTypeEntry {
    pub r#type: TypeCode,
    pub sub_type: SubtypeCode,
    pub content: String,
}
