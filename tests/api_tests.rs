// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeBackend, client, savings_rows, type_rows};
use deskboard::aggregate::MonthSelector;
use deskboard::api::wire::NewSaving;
use deskboard::api::{ApiClient, ApiError, CredentialProvider, FileTokenStore, MemoryCredentials, Method};
use deskboard::models::{Note, SubtypeCode, TypeCode};
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::tempdir;

#[test]
fn authenticated_calls_carry_bearer_token() {
    let backend = FakeBackend::new().route(Method::Get, "/notes", 200, json!([]));
    let log = backend.log();
    let api = client(backend, Some("tok-123"));
    let notes: Vec<Note> = api.list().unwrap();
    assert!(notes.is_empty());
    let sent = log.borrow();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].bearer.as_deref(), Some("tok-123"));
    assert_eq!(sent[0].method, Method::Get);
}

#[test]
fn rejected_token_is_cleared() {
    let backend = FakeBackend::new().route(
        Method::Get,
        "/auth/profile",
        401,
        json!({"message": "jwt expired"}),
    );
    let api = client(backend, Some("stale"));
    let err = api.profile().unwrap_err();
    assert!(err.is_unauthorized());
    assert!(api.credentials().token().is_none());
}

#[test]
fn missing_token_fails_without_a_request() {
    let backend = FakeBackend::new();
    let log = backend.log();
    let api = client(backend, None);
    assert!(matches!(api.list::<Note>(), Err(ApiError::Unauthorized)));
    assert!(log.borrow().is_empty());
}

#[test]
fn login_stores_the_token() {
    let backend = FakeBackend::new().route(
        Method::Post,
        "/auth/login",
        201,
        json!({"access_token": "fresh"}),
    );
    let log = backend.log();
    let api = client(backend, None);
    api.login("ada", "secret").unwrap();
    assert_eq!(api.credentials().token().as_deref(), Some("fresh"));
    let sent = log.borrow();
    assert!(sent[0].bearer.is_none());
    assert_eq!(sent[0].body.as_ref().unwrap()["username"], "ada");
}

#[test]
fn server_errors_keep_the_message_and_token() {
    let backend = FakeBackend::new().route(
        Method::Delete,
        "/notes/4",
        500,
        json!({"message": "database down"}),
    );
    let api = client(backend, Some("tok"));
    match api.delete::<Note>(4) {
        Err(ApiError::Status { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("unexpected {:?}", other),
    }
    assert_eq!(api.credentials().token().as_deref(), Some("tok"));
}

#[test]
fn wrapped_and_bare_bodies_decode() {
    let wrapped = FakeBackend::new().route(Method::Get, "/types", 200, json!({"data": type_rows()}));
    let bare = FakeBackend::new().route(Method::Get, "/types", 200, type_rows());
    for api in [client(wrapped, Some("t")), client(bare, Some("t"))] {
        let types = api.list_types(None).unwrap();
        assert_eq!(types.len(), 3);
        assert_eq!(types[2].content, "Transport");
        assert_eq!(types[2].r#type, Some(TypeCode(2)));
    }
}

#[test]
fn savings_month_is_sent_as_query_and_applied_locally() {
    let backend = FakeBackend::new().route(Method::Get, "/savings", 200, savings_rows());
    let log = backend.log();
    let api = client(backend, Some("t"));
    let june = MonthSelector::Month("2025-06".parse().unwrap());
    let txs = api.list_savings(june).unwrap();
    let ids: Vec<i64> = txs.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(txs[2].amount, Decimal::new(1050, 2));
    assert_eq!(
        log.borrow()[0].query,
        vec![("month".to_string(), "2025-06".to_string())]
    );

    let all = api.list_savings(MonthSelector::AllTime).unwrap();
    assert_eq!(all.len(), 4);
    assert!(log.borrow()[1].query.is_empty());
}

#[test]
fn malformed_savings_rows_are_dropped_or_coerced() {
    let rows = json!([
        {"id": 1, "type": 2, "subType": 2, "amount": -12.5, "createdAt": "2025-06-01T00:00:00Z"},
        {"id": 2, "type": 2, "subType": 2, "createdAt": "2025-06-01T00:00:00Z"},
        {"id": 3, "type": 2, "subType": 2, "amount": "abc", "createdAt": "2025-06-01T00:00:00Z"},
        {"id": 4, "type": 2, "subType": 2, "amount": 5, "createdAt": "not a date"},
        {"id": 5, "type": 2, "subType": 2, "amount": " 7 ", "createdAt": "2025-06-02 08:30:00"}
    ]);
    let backend = FakeBackend::new().route(Method::Get, "/savings", 200, rows);
    let api = client(backend, Some("t"));
    let txs = api.list_savings(MonthSelector::AllTime).unwrap();
    let kept: Vec<(i64, Decimal)> = txs.iter().map(|t| (t.id, t.amount)).collect();
    assert_eq!(
        kept,
        vec![(1, Decimal::new(125, 1)), (5, Decimal::from(7))]
    );
    assert_eq!(txs[0].content, "");
}

#[test]
fn created_savings_come_back_validated() {
    let backend = FakeBackend::new().route(
        Method::Post,
        "/savings",
        201,
        json!({"id": 9, "type": 2, "subType": 4, "amount": "3.20", "content": "Coffee", "createdAt": "2025-06-03T08:00:00+02:00"}),
    );
    let log = backend.log();
    let api = client(backend, Some("t"));
    let saved = api
        .create_saving(&NewSaving {
            r#type: TypeCode(2),
            sub_type: SubtypeCode(4),
            amount: Decimal::new(320, 2),
            content: "Coffee".into(),
        })
        .unwrap();
    assert_eq!(saved.id, 9);
    assert_eq!(saved.created_at, common::ts("2025-06-03T06:00:00Z"));
    let body = log.borrow()[0].body.clone().unwrap();
    assert_eq!(body["amount"].as_f64(), Some(3.2));
    assert_eq!(body["subType"], 4);
    assert_eq!(body["type"], 2);
}

#[test]
fn file_token_store_round_trips() {
    let dir = tempdir().unwrap();
    let store = FileTokenStore::new(dir.path().join("token"));
    assert!(store.token().is_none());
    store.store("abc\n").unwrap();
    assert_eq!(store.token().as_deref(), Some("abc"));
    store.clear().unwrap();
    assert!(store.token().is_none());
    store.clear().unwrap();
}

#[test]
fn logout_forgets_the_token() {
    let api = ApiClient::new(
        Box::new(FakeBackend::new()),
        Box::new(MemoryCredentials::new(Some("t"))),
    );
    api.logout().unwrap();
    assert!(api.credentials().token().is_none());
}

#[test]
fn huge_amounts_are_dropped_before_aggregation() {
    let huge = "50000000000000000000000000000";
    let backend = FakeBackend::new().route(
        Method::Get,
        "/savings",
        200,
        json!([
            {"id": 1, "type": 2, "subType": 2, "amount": huge, "createdAt": "2025-06-01T00:00:00Z"},
            {"id": 2, "type": 2, "subType": 2, "amount": huge, "createdAt": "2025-06-02T00:00:00Z"},
            {"id": 3, "type": 2, "subType": 2, "amount": 1e30, "createdAt": "2025-06-03T00:00:00Z"},
            {"id": 4, "type": 2, "subType": 2, "amount": "999999999999.99", "createdAt": "2025-06-04T00:00:00Z"},
            {"id": 5, "type": 2, "subType": 2, "amount": "999999999999.99", "createdAt": "2025-06-05T00:00:00Z"}
        ]),
    );
    let api = client(backend, Some("t"));
    let txs = api.list_savings(MonthSelector::AllTime).unwrap();
    let ids: Vec<i64> = txs.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![4, 5]);

    let totals = deskboard::aggregate::compute_totals(&txs, common::filter());
    assert_eq!(totals.expense, Decimal::new(199999999999998, 2));
    let series = deskboard::aggregate::aggregate_by_subtype(&txs, &[]);
    assert_eq!(series[0].total, totals.expense);
}

#[test]
fn amount_flag_above_ceiling_is_rejected() {
    assert!(deskboard::utils::parse_amount("1000000000000").is_ok());
    let err = deskboard::utils::parse_amount("1000000000000.01").unwrap_err();
    assert!(err.to_string().contains("larger than"));
}

#[cfg(unix)]
#[test]
fn token_file_is_private_to_the_owner() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("token");
    std::fs::write(&path, "old").unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

    let store = FileTokenStore::new(path.clone());
    store.store("fresh").unwrap();
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
    assert_eq!(store.token().as_deref(), Some("fresh"));

    let other = dir.path().join("token2");
    FileTokenStore::new(other.clone()).store("x").unwrap();
    let mode = std::fs::metadata(&other).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
