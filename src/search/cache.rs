//! Suggestion query cache
//!
//! Results are keyed by the exact debounced keyword. An entry is served
//! without a request while fresh, refetched once stale, and dropped after
//! the eviction window no matter how often it was read. A keyword with a
//! fetch in flight never gets a second one.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::MIN_KEYWORD_LEN;
use crate::backend::types::QueryResult;
use crate::error::FetchError;

/// How long a result is served without refetching
pub const STALE_TIME: Duration = Duration::from_secs(5 * 60);

/// How long any entry is kept at all
pub const EVICT_TIME: Duration = Duration::from_secs(10 * 60);

/// Whether `keyword` is long enough to be fetched
pub fn is_searchable(keyword: &str) -> bool {
    keyword.trim().chars().count() >= MIN_KEYWORD_LEN
}

/// What the caller should do after asking for a keyword
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    /// Keyword too short; no fetch, no data
    Disabled,
    /// Fresh result, no fetch needed
    Fresh(Arc<QueryResult>),
    /// A fetch for this keyword is already running; wait for it
    InFlight,
    /// Caller must fetch and report back with `complete` or `cancel`
    Fetch,
}

/// Observable state of one keyword
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QueryStatus<'a> {
    Idle,
    Loading,
    Failed(&'a FetchError),
    Ready(&'a QueryResult),
}

#[derive(Debug, Default)]
struct Entry {
    data: Option<(Arc<QueryResult>, Instant)>,
    error: Option<(FetchError, Instant)>,
    fetching: bool,
}

impl Entry {
    fn last_update(&self) -> Option<Instant> {
        let data = self.data.as_ref().map(|(_, at)| *at);
        let error = self.error.as_ref().map(|(_, at)| *at);
        data.max(error)
    }

    fn is_expired(&self, now: Instant, evict_after: Duration) -> bool {
        if self.fetching {
            return false;
        }
        match self.last_update() {
            Some(at) => now.saturating_duration_since(at) >= evict_after,
            None => true,
        }
    }
}

#[derive(Debug)]
pub struct SuggestionCache {
    entries: HashMap<String, Entry>,
    stale_after: Duration,
    evict_after: Duration,
}

impl Default for SuggestionCache {
    fn default() -> Self {
        Self::new(STALE_TIME, EVICT_TIME)
    }
}

impl SuggestionCache {
    pub fn new(stale_after: Duration, evict_after: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stale_after,
            evict_after,
        }
    }

    /// Ask for `keyword`; marks the keyword in flight when a fetch is due
    pub fn lookup(&mut self, keyword: &str, now: Instant) -> Lookup {
        if !is_searchable(keyword) {
            return Lookup::Disabled;
        }

        if self
            .entries
            .get(keyword)
            .is_some_and(|entry| entry.is_expired(now, self.evict_after))
        {
            self.entries.remove(keyword);
        }

        let entry = self.entries.entry(keyword.to_string()).or_default();

        if entry.fetching {
            tracing::debug!("Cache: {:?} already in flight", keyword);
            return Lookup::InFlight;
        }

        if let Some((data, fetched_at)) = &entry.data {
            if now.saturating_duration_since(*fetched_at) < self.stale_after {
                tracing::debug!("Cache: hit for {:?}", keyword);
                return Lookup::Fresh(data.clone());
            }
        }

        tracing::debug!("Cache: miss for {:?}", keyword);
        entry.fetching = true;
        Lookup::Fetch
    }

    /// Record the outcome of a fetch started by `lookup`
    pub fn complete(&mut self, keyword: &str, outcome: Result<QueryResult, FetchError>, now: Instant) {
        let entry = self.entries.entry(keyword.to_string()).or_default();
        entry.fetching = false;
        match outcome {
            Ok(result) => {
                entry.data = Some((Arc::new(result), now));
                entry.error = None;
            }
            Err(e) => {
                entry.error = Some((e, now));
            }
        }
    }

    /// Forget an aborted fetch so the keyword can be requested again
    pub fn cancel(&mut self, keyword: &str) {
        if let Some(entry) = self.entries.get_mut(keyword) {
            entry.fetching = false;
            if entry.last_update().is_none() {
                self.entries.remove(keyword);
            }
        }
    }

    /// Latest fetched result for `keyword`, even if stale
    pub fn data(&self, keyword: &str) -> Option<Arc<QueryResult>> {
        self.entries
            .get(keyword)
            .and_then(|entry| entry.data.as_ref())
            .map(|(data, _)| data.clone())
    }

    /// Loading / error / success view of `keyword`.
    ///
    /// A failed refetch reports the error even when older data exists; a
    /// refetch in progress keeps showing the older data.
    pub fn status(&self, keyword: &str) -> QueryStatus<'_> {
        if !is_searchable(keyword) {
            return QueryStatus::Idle;
        }
        let Some(entry) = self.entries.get(keyword) else {
            return QueryStatus::Idle;
        };

        if let (false, Some((e, _))) = (entry.fetching, &entry.error) {
            return QueryStatus::Failed(e);
        }

        match &entry.data {
            Some((data, _)) => QueryStatus::Ready(data),
            None if entry.fetching => QueryStatus::Loading,
            None => QueryStatus::Idle,
        }
    }

    /// Drop entries older than the eviction window; returns how many went
    pub fn evict_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let evict_after = self.evict_after;
        self.entries.retain(|_, entry| !entry.is_expired(now, evict_after));
        let evicted = before - self.entries.len();
        if evicted > 0 {
            tracing::debug!("Cache: evicted {} expired entries", evicted);
        }
        evicted
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
