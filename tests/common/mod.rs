// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use deskboard::api::{
    ApiClient, ApiError, ApiRequest, ApiResponse, MemoryCredentials, Method, Transport,
};
use deskboard::models::{SubtypeCode, Transaction, TypeCode, TypeFilter, TypeLookupEntry};
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::cell::RefCell;
use std::rc::Rc;

pub const INCOME: TypeCode = TypeCode(1);
pub const EXPENSE: TypeCode = TypeCode(2);

pub fn filter() -> TypeFilter {
    TypeFilter {
        income: INCOME,
        expense: EXPENSE,
    }
}

pub fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

pub fn tx(id: i64, ty: TypeCode, sub: i64, amount: i64, at: &str) -> Transaction {
    Transaction {
        id,
        r#type: ty,
        sub_type: SubtypeCode(sub),
        amount: Decimal::from(amount),
        content: String::new(),
        created_at: ts(at),
    }
}

pub fn label(sub: i64, content: &str) -> TypeLookupEntry {
    TypeLookupEntry {
        id: None,
        r#type: None,
        sub_type: SubtypeCode(sub),
        content: content.to_string(),
    }
}

/// Answers requests from a fixed route table and records what it was sent.
#[derive(Default)]
pub struct FakeBackend {
    routes: Vec<(Method, String, u16, String)>,
    log: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, method: Method, path: &str, status: u16, body: Value) -> Self {
        self.routes
            .push((method, path.to_string(), status, body.to_string()));
        self
    }

    pub fn log(&self) -> Rc<RefCell<Vec<ApiRequest>>> {
        self.log.clone()
    }
}

impl Transport for FakeBackend {
    fn execute(&self, req: &ApiRequest) -> Result<ApiResponse, ApiError> {
        self.log.borrow_mut().push(req.clone());
        let hit = self
            .routes
            .iter()
            .find(|(m, p, _, _)| *m == req.method && *p == req.path);
        Ok(match hit {
            Some((_, _, status, body)) => ApiResponse {
                status: *status,
                body: body.clone(),
            },
            None => ApiResponse {
                status: 404,
                body: json!({"message": "no such route"}).to_string(),
            },
        })
    }
}

pub fn client(backend: FakeBackend, token: Option<&str>) -> ApiClient {
    ApiClient::new(Box::new(backend), Box::new(MemoryCredentials::new(token)))
}

pub fn savings_rows() -> Value {
    json!([
        {"id": 1, "type": 1, "subType": 1, "amount": 100, "content": "June pay", "createdAt": "2025-06-01T00:00:00Z"},
        {"id": 2, "type": 2, "subType": 2, "amount": 40, "content": "Groceries", "createdAt": "2025-06-10T12:00:00Z"},
        {"id": 3, "type": 2, "subType": 2, "amount": "10.50", "content": "Lunch", "createdAt": "2025-06-30T23:59:59Z"},
        {"id": 4, "type": 2, "subType": 3, "amount": 25, "content": "Bus pass", "createdAt": "2025-07-01T00:00:00Z"}
    ])
}

pub fn type_rows() -> Value {
    json!([
        {"id": 10, "type": 1, "subType": 1, "content": "Salary"},
        {"id": 11, "type": 2, "subType": 2, "content": "Food"},
        {"id": 12, "type": 2, "subType": 3, "description": "Transport"}
    ])
}
