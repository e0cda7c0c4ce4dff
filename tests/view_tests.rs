// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{EXPENSE, FakeBackend, INCOME, client, filter, label, savings_rows, tx, type_rows};
use deskboard::aggregate::{MonthSelector, SeriesKind};
use deskboard::api::{ApiError, Method};
use deskboard::view::{Completion, SavingsView};
use rust_decimal::Decimal;
use serde_json::json;

fn month(s: &str) -> MonthSelector {
    s.parse().unwrap()
}

fn payload() -> (Vec<deskboard::models::Transaction>, Vec<deskboard::models::TypeLookupEntry>) {
    (
        vec![
            tx(1, INCOME, 1, 100, "2025-06-01T00:00:00Z"),
            tx(2, EXPENSE, 2, 30, "2025-05-03T00:00:00Z"),
            tx(3, EXPENSE, 2, 20, "2025-06-04T00:00:00Z"),
        ],
        vec![label(1, "Salary"), label(2, "Food")],
    )
}

#[test]
fn late_response_for_an_old_month_is_discarded() {
    let mut view = SavingsView::new(filter(), SeriesKind::Expense);
    let may = view.begin_fetch(month("2025-05"));
    let june = view.begin_fetch(month("2025-06"));

    assert_eq!(view.complete(june, Ok(payload())), Completion::Applied);
    assert_eq!(view.complete(may, Ok(payload())), Completion::Stale);

    let dash = view.dashboard().unwrap();
    assert_eq!(dash.selector, "2025-06");
    assert_eq!(dash.selected.expense, Decimal::from(20));
    assert!(!view.is_loading());
}

#[test]
fn stale_response_does_not_end_loading() {
    let mut view = SavingsView::new(filter(), SeriesKind::Expense);
    let first = view.begin_fetch(MonthSelector::AllTime);
    let _second = view.begin_fetch(month("2025-06"));
    assert_eq!(view.complete(first, Ok(payload())), Completion::Stale);
    assert!(view.is_loading());
    assert!(view.dashboard().is_none());
}

#[test]
fn failure_keeps_last_good_data_and_sets_notice() {
    let mut view = SavingsView::new(filter(), SeriesKind::Expense);
    let t = view.begin_fetch(month("2025-06"));
    view.complete(t, Ok(payload()));

    let t = view.begin_fetch(month("2025-05"));
    let outcome = view.complete(t, Err(ApiError::Transport("connection refused".into())));
    assert_eq!(outcome, Completion::Failed);
    assert!(!view.is_loading());
    assert!(view.notice().unwrap().contains("connection refused"));
    assert_eq!(view.dashboard().unwrap().selector, "2025-06");
    assert_eq!(view.selector(), month("2025-05"));
}

#[test]
fn successful_fetch_clears_notice() {
    let mut view = SavingsView::new(filter(), SeriesKind::Income);
    let t = view.begin_fetch(MonthSelector::AllTime);
    view.complete(t, Err(ApiError::Unauthorized));
    assert!(view.notice().is_some());

    let t = view.begin_fetch(MonthSelector::AllTime);
    assert_eq!(view.complete(t, Ok(payload())), Completion::Applied);
    assert!(view.notice().is_none());
    let dash = view.dashboard().unwrap();
    assert_eq!(dash.all_time_series[0].name, "Salary");
    assert_eq!(dash.selected, dash.all_time);
}

#[test]
fn refresh_pulls_savings_and_labels() {
    let backend = FakeBackend::new()
        .route(Method::Get, "/savings", 200, savings_rows())
        .route(Method::Get, "/types", 200, json!({"data": type_rows()}));
    let api = client(backend, Some("t"));
    let mut view = SavingsView::new(filter(), SeriesKind::Expense);
    assert_eq!(view.refresh(&api, month("2025-06")), Completion::Applied);

    let dash = view.dashboard().unwrap();
    assert_eq!(dash.all_time.expense, Decimal::new(7550, 2));
    assert_eq!(dash.selected.expense, Decimal::new(5050, 2));
    assert_eq!(dash.selected.balance, Decimal::new(4950, 2));
    let names: Vec<&str> = dash.all_time_series.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Food", "Transport"]);
}

#[test]
fn refresh_reports_auth_failure_as_notice() {
    let backend = FakeBackend::new().route(Method::Get, "/savings", 403, json!({}));
    let api = client(backend, Some("t"));
    let mut view = SavingsView::new(filter(), SeriesKind::Expense);
    assert_eq!(view.refresh(&api, MonthSelector::AllTime), Completion::Failed);
    assert!(view.notice().unwrap().contains("login"));
    assert!(!view.is_loading());
}
