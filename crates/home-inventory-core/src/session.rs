//! Caller-side search state: query guard, recent searches, and
//! last-write-wins application of results.
//!
//! The aggregator in [`crate::search`] is stateless. Interactive front ends
//! keep one [`SearchSession`] per user session and route every query and
//! every outcome through it:
//!
//! ```text
//! raw input ─▶ prepare() ─▶ begin() ─▶ search() ─▶ complete(ticket, outcome)
//!                 │                                   │
//!            too short: clear                 stale ticket: dropped
//!                                             failure: keep old results
//! ```

use std::collections::VecDeque;

use crate::search::{SearchError, SearchResult};

pub const DEFAULT_MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Bounded, most-recent-first history of submitted queries.
#[derive(Debug, Clone)]
pub struct RecentSearches {
    limit: usize,
    entries: VecDeque<String>,
}

impl RecentSearches {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            entries: VecDeque::with_capacity(limit),
        }
    }

    /// Record a query. A query already in the history moves to the front.
    pub fn record(&mut self, query: &str) {
        if self.limit == 0 {
            return;
        }
        self.entries.retain(|q| q != query);
        self.entries.push_front(query.to_string());
        self.entries.truncate(self.limit);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for RecentSearches {
    fn default() -> Self {
        Self::new(DEFAULT_RECENT_LIMIT)
    }
}

/// Identifies one issued search. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SearchTicket(u64);

/// What [`SearchSession::complete`] did with an outcome.
#[derive(Debug)]
pub enum SessionUpdate {
    /// The outcome belonged to the newest search and replaced the results.
    Applied,
    /// A newer search was issued since; the outcome was dropped.
    Stale,
    /// The newest search failed; the previous results are untouched.
    Failed(SearchError),
}

/// Per-user search state for interactive front ends.
#[derive(Debug)]
pub struct SearchSession {
    min_query_chars: usize,
    recent: RecentSearches,
    latest: u64,
    results: Vec<SearchResult>,
}

impl SearchSession {
    pub fn new(min_query_chars: usize, recent_limit: usize) -> Self {
        Self {
            min_query_chars,
            recent: RecentSearches::new(recent_limit),
            latest: 0,
            results: Vec::new(),
        }
    }

    /// Trim raw input and decide whether it is worth searching.
    ///
    /// Returns `None` for input shorter than the minimum (in chars). In that
    /// case the current results are cleared and any search still in flight
    /// becomes stale.
    pub fn prepare(&mut self, raw: &str) -> Option<String> {
        let query = raw.trim();
        if query.chars().count() < self.min_query_chars {
            self.results.clear();
            self.latest += 1;
            return None;
        }
        Some(query.to_string())
    }

    /// Register a search about to be issued for `query`.
    pub fn begin(&mut self, query: &str) -> SearchTicket {
        self.recent.record(query);
        self.latest += 1;
        SearchTicket(self.latest)
    }

    /// Apply the outcome of the search identified by `ticket`.
    pub fn complete(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<Vec<SearchResult>, SearchError>,
    ) -> SessionUpdate {
        if ticket.0 != self.latest {
            return SessionUpdate::Stale;
        }
        match outcome {
            Ok(results) => {
                self.results = results;
                SessionUpdate::Applied
            }
            Err(e) => SessionUpdate::Failed(e),
        }
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    /// Forget the current results, e.g. after the user picked one.
    pub fn clear_results(&mut self) {
        self.results.clear();
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_QUERY_CHARS, DEFAULT_RECENT_LIMIT)
    }
}
