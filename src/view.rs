// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! View state for the savings screen.
//!
//! Every fetch is stamped with a ticket. A response whose ticket is no
//! longer the latest is dropped, so a slow reply for an old month can never
//! replace the data for the month now selected.

use crate::aggregate::{MonthSelector, SavingsDashboard, SeriesKind};
use crate::api::{ApiClient, ApiError};
use crate::models::{Transaction, TypeFilter, TypeLookupEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    selector: MonthSelector,
}

impl FetchTicket {
    pub fn selector(&self) -> MonthSelector {
        self.selector
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Failed,
    Stale,
}

pub type SavingsPayload = (Vec<Transaction>, Vec<TypeLookupEntry>);

#[derive(Debug, Clone)]
pub struct SavingsView {
    filter: TypeFilter,
    kind: SeriesKind,
    selector: MonthSelector,
    generation: u64,
    loading: bool,
    dashboard: Option<SavingsDashboard>,
    notice: Option<String>,
}

impl SavingsView {
    pub fn new(filter: TypeFilter, kind: SeriesKind) -> Self {
        SavingsView {
            filter,
            kind,
            selector: MonthSelector::AllTime,
            generation: 0,
            loading: false,
            dashboard: None,
            notice: None,
        }
    }

    pub fn selector(&self) -> MonthSelector {
        self.selector
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn dashboard(&self) -> Option<&SavingsDashboard> {
        self.dashboard.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn begin_fetch(&mut self, selector: MonthSelector) -> FetchTicket {
        self.generation += 1;
        self.selector = selector;
        self.loading = true;
        FetchTicket {
            generation: self.generation,
            selector,
        }
    }

    /// Applies a response if `ticket` is still the latest fetch.
    ///
    /// Loading ends on any applied completion. A failure leaves the last
    /// good dashboard in place and records a notice instead.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<SavingsPayload, ApiError>,
    ) -> Completion {
        if ticket.generation != self.generation || ticket.selector != self.selector {
            tracing::debug!(
                stale = %ticket.selector,
                current = %self.selector,
                "discarding stale savings response"
            );
            return Completion::Stale;
        }
        self.loading = false;
        match result {
            Ok((transactions, lookup)) => {
                self.dashboard = Some(SavingsDashboard::build(
                    &transactions,
                    &lookup,
                    self.filter,
                    ticket.selector,
                    self.kind,
                ));
                self.notice = None;
                Completion::Applied
            }
            Err(e) => {
                tracing::warn!("savings fetch failed: {e}");
                self.notice = Some(e.to_string());
                Completion::Failed
            }
        }
    }

    /// Fetches everything the screen needs for `selector` and applies it.
    pub fn refresh(&mut self, client: &ApiClient, selector: MonthSelector) -> Completion {
        let ticket = self.begin_fetch(selector);
        let result = client
            .list_savings(MonthSelector::AllTime)
            .and_then(|txs| Ok((txs, client.list_types(None)?)));
        self.complete(ticket, result)
    }
}
