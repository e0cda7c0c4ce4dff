// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::ts;
use deskboard::countdown::Countdown;
use deskboard::models::Plan;

#[test]
fn fixed_target_rounds_up_partial_days() {
    let c = Countdown::fixed(ts("2025-06-01T00:00:00Z"), ts("2025-06-11T00:00:00Z"));

    let start = c.evaluate(ts("2025-06-01T00:00:00Z"));
    assert_eq!(start.remaining_days, 10);
    assert_eq!(start.total_days, 10);
    assert_eq!(start.progress, 1.0);

    let mid = c.evaluate(ts("2025-06-06T12:00:00Z"));
    assert_eq!(mid.remaining_days, 5);
    assert_eq!(mid.total_days, 10);
    assert!((mid.progress - 0.5).abs() < 1e-9);
}

#[test]
fn passed_target_reports_zero() {
    let c = Countdown::fixed(ts("2025-06-01T00:00:00Z"), ts("2025-06-11T00:00:00Z"));
    let after = c.evaluate(ts("2025-06-11T00:00:01Z"));
    assert_eq!(after.remaining_days, 0);
    assert!(after.is_due());
    assert_eq!(after.progress, 0.0);
}

#[test]
fn monthly_target_before_the_day() {
    let c = Countdown::monthly(ts("2025-01-01T00:00:00Z"), 25).unwrap();
    let s = c.evaluate(ts("2025-06-10T08:00:00Z"));
    assert_eq!(s.target, ts("2025-06-25T00:00:00Z"));
    assert_eq!(s.period_start, ts("2025-05-25T00:00:00Z"));
    assert_eq!(s.remaining_days, 15);
    assert_eq!(s.total_days, 31);
    assert!((s.progress - 15.0 / 31.0).abs() < 1e-9);
}

#[test]
fn monthly_target_rolls_over_after_the_day() {
    let c = Countdown::monthly(ts("2025-01-01T00:00:00Z"), 25).unwrap();
    let s = c.evaluate(ts("2025-06-26T00:00:01Z"));
    assert_eq!(s.target, ts("2025-07-25T00:00:00Z"));
    assert_eq!(s.period_start, ts("2025-06-25T00:00:00Z"));
    assert_eq!(s.remaining_days, 29);
    assert_eq!(s.total_days, 30);
}

#[test]
fn monthly_target_is_due_on_the_day() {
    let c = Countdown::monthly(ts("2025-01-01T00:00:00Z"), 25).unwrap();
    let s = c.evaluate(ts("2025-06-25T10:00:00Z"));
    assert_eq!(s.target, ts("2025-06-25T00:00:00Z"));
    assert!(s.is_due());
}

#[test]
fn monthly_day_clamps_to_short_months() {
    let c = Countdown::monthly(ts("2024-01-01T00:00:00Z"), 31).unwrap();
    let feb = c.evaluate(ts("2025-02-10T00:00:00Z"));
    assert_eq!(feb.target, ts("2025-02-28T00:00:00Z"));
    assert_eq!(feb.period_start, ts("2025-01-31T00:00:00Z"));

    let leap = Countdown::monthly(ts("2024-01-01T00:00:00Z"), 30)
        .unwrap()
        .evaluate(ts("2024-02-01T00:00:00Z"));
    assert_eq!(leap.target, ts("2024-02-29T00:00:00Z"));
}

#[test]
fn monthly_rolls_into_next_year() {
    let c = Countdown::monthly(ts("2025-01-01T00:00:00Z"), 5).unwrap();
    let s = c.evaluate(ts("2025-12-06T00:00:00Z"));
    assert_eq!(s.target, ts("2026-01-05T00:00:00Z"));
}

#[test]
fn first_period_starts_at_creation() {
    let c = Countdown::monthly(ts("2025-06-20T00:00:00Z"), 25).unwrap();
    let s = c.evaluate(ts("2025-06-21T00:00:00Z"));
    assert_eq!(s.period_start, ts("2025-06-20T00:00:00Z"));
    assert_eq!(s.total_days, 5);
    assert_eq!(s.remaining_days, 4);
    assert!((s.progress - 0.8).abs() < 1e-9);
}

#[test]
fn monthly_rejects_impossible_days() {
    assert!(Countdown::monthly(ts("2025-01-01T00:00:00Z"), 0).is_none());
    assert!(Countdown::monthly(ts("2025-01-01T00:00:00Z"), 32).is_none());
}

#[test]
fn plans_pick_their_countdown() {
    let mut plan = Plan {
        id: 1,
        content: "Trip".into(),
        target_date: Some(ts("2025-09-01T00:00:00Z")),
        salary_day: Some(10),
        created_at: ts("2025-06-01T00:00:00Z"),
    };
    let fixed = Countdown::for_plan(&plan).unwrap();
    assert_eq!(fixed.evaluate(ts("2025-08-31T00:00:00Z")).remaining_days, 1);

    plan.target_date = None;
    let monthly = Countdown::for_plan(&plan).unwrap();
    assert_eq!(
        monthly.evaluate(ts("2025-08-01T00:00:00Z")).target,
        ts("2025-08-10T00:00:00Z")
    );

    plan.salary_day = None;
    assert!(Countdown::for_plan(&plan).is_none());
}
