// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Days-remaining arithmetic for plans.
//!
//! A countdown either aims at a fixed instant or recurs on a day of the
//! month (a salary date). The period a countdown measures against is fixed
//! when it starts or rolls over, so `progress` falls from 1 towards 0 as the
//! target approaches.

use crate::models::Plan;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::Serialize;

const DAY_SECS: i64 = 86_400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTarget {
    Fixed(DateTime<Utc>),
    /// Recurs every month on this day, clamped to the month's last day.
    MonthlyOn { day: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub created_at: DateTime<Utc>,
    pub target: CountdownTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CountdownStatus {
    pub target: DateTime<Utc>,
    pub period_start: DateTime<Utc>,
    pub remaining_days: i64,
    pub total_days: i64,
    pub progress: f64,
}

impl CountdownStatus {
    pub fn is_due(&self) -> bool {
        self.remaining_days == 0
    }
}

impl Countdown {
    pub fn fixed(created_at: DateTime<Utc>, target: DateTime<Utc>) -> Self {
        Countdown {
            created_at,
            target: CountdownTarget::Fixed(target),
        }
    }

    /// `None` unless `day` is a plausible day of month.
    pub fn monthly(created_at: DateTime<Utc>, day: u32) -> Option<Self> {
        (1..=31).contains(&day).then_some(Countdown {
            created_at,
            target: CountdownTarget::MonthlyOn { day },
        })
    }

    pub fn for_plan(plan: &Plan) -> Option<Self> {
        if let Some(target) = plan.target_date {
            return Some(Countdown::fixed(plan.created_at, target));
        }
        plan.salary_day
            .and_then(|day| Countdown::monthly(plan.created_at, day))
    }

    pub fn evaluate(&self, now: DateTime<Utc>) -> CountdownStatus {
        let (target, period_start) = match self.target {
            CountdownTarget::Fixed(target) => (target, self.created_at),
            CountdownTarget::MonthlyOn { day } => {
                let today = now.date_naive();
                let this_month = month_start(today);
                let this_occ = occurrence(this_month, day);
                let (target, previous) = if today > this_occ {
                    (occurrence(next_month_start(this_month), day), this_occ)
                } else {
                    (this_occ, occurrence(prev_month_start(this_month), day))
                };
                (midnight(target), midnight(previous).max(self.created_at))
            }
        };
        let remaining_days = ceil_days(now, target);
        let total_days = ceil_days(period_start, target);
        let progress = if total_days == 0 {
            0.0
        } else {
            (remaining_days as f64 / total_days as f64).clamp(0.0, 1.0)
        };
        CountdownStatus {
            target,
            period_start,
            remaining_days,
            total_days,
            progress,
        }
    }
}

/// Whole days from `from` until `to`, rounded up; zero once `to` has passed.
fn ceil_days(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let secs = (to - from).num_seconds();
    if secs <= 0 {
        0
    } else {
        (secs + DAY_SECS - 1) / DAY_SECS
    }
}

fn midnight(d: NaiveDate) -> DateTime<Utc> {
    d.and_time(NaiveTime::MIN).and_utc()
}

fn month_start(d: NaiveDate) -> NaiveDate {
    d - Duration::days(d.day0() as i64)
}

fn next_month_start(first: NaiveDate) -> NaiveDate {
    month_start(first + Duration::days(32))
}

fn prev_month_start(first: NaiveDate) -> NaiveDate {
    month_start(first - Duration::days(1))
}

fn occurrence(first: NaiveDate, day: u32) -> NaiveDate {
    let len = (next_month_start(first) - first).num_days();
    first + Duration::days((day as i64).min(len) - 1)
}
