//! Request tokens that let a view discard responses to superseded requests.
//!
//! Each fragment handler takes a token before calling the Expense API and only
//! renders the API's answer if no newer request for the same view has started
//! in the meantime. This turns "last response wins" into "last request wins".
//!
//! Sequences are kept per page: every rendered page gets a [PageId] that htmx
//! sends back in the [PAGE_ID_HEADER] header, so one browser tab never marks
//! another tab's request as stale.

use std::{
    collections::{HashMap, VecDeque},
    convert::Infallible,
    sync::{
        Mutex, PoisonError,
        atomic::{AtomicU64, Ordering},
    },
};

use axum::{extract::OptionalFromRequestParts, http::request::Parts};
use time::OffsetDateTime;

/// The request header that carries the [PageId].
pub(crate) const PAGE_ID_HEADER: &str = "x-page-id";

/// The number of pages whose sequences are remembered. The oldest page is
/// forgotten first.
const MAX_TRACKED_PAGES: usize = 256;

/// A part of the page that is refreshed from the Expense API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum View {
    /// The expense listing.
    List,
    /// The statistics panel and its category breakdown.
    Statistics,
    /// The options of the category filter.
    Categories,
}

impl View {
    fn index(self) -> usize {
        match self {
            View::List => 0,
            View::Statistics => 1,
            View::Categories => 2,
        }
    }
}

/// Identifies one rendered page, i.e. one browser tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct PageId(u64);

impl PageId {
    #[cfg(test)]
    pub(crate) fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads the [PageId] header. Requests without a valid header have no page.
impl<S> OptionalFromRequestParts<S> for PageId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(parts
            .headers
            .get(PAGE_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse().ok())
            .map(Self))
    }
}

/// Identifies one request for a [View] on one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RequestToken {
    page: Option<PageId>,
    view: View,
    value: u64,
}

#[derive(Debug, Default)]
struct PageSequences {
    counters: HashMap<PageId, [u64; 3]>,
    /// Pages in the order they were first seen.
    order: VecDeque<PageId>,
}

/// Issues monotonically increasing [RequestToken]s, one sequence per page and [View].
#[derive(Debug)]
pub(crate) struct RequestSequencer {
    next_page: AtomicU64,
    pages: Mutex<PageSequences>,
}

impl Default for RequestSequencer {
    fn default() -> Self {
        // Seeded from the clock so pages rendered before a restart are
        // unlikely to share an ID with new ones.
        let seed = OffsetDateTime::now_utc().unix_timestamp().unsigned_abs() << 16;

        Self {
            next_page: AtomicU64::new(seed),
            pages: Mutex::default(),
        }
    }
}

impl RequestSequencer {
    /// Create a sequencer where no requests have been issued yet.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// A fresh ID for a newly rendered page.
    pub(crate) fn new_page(&self) -> PageId {
        PageId(self.next_page.fetch_add(1, Ordering::Relaxed))
    }

    /// Issue a token for a new request for `view` on `page`, superseding all
    /// earlier tokens for that view on that page.
    ///
    /// Requests without a page are not sequenced.
    pub(crate) fn issue(&self, page: Option<PageId>, view: View) -> RequestToken {
        let Some(page_id) = page else {
            return RequestToken {
                page,
                view,
                value: 0,
            };
        };

        let mut pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);

        if !pages.counters.contains_key(&page_id) {
            if pages.order.len() >= MAX_TRACKED_PAGES {
                if let Some(oldest) = pages.order.pop_front() {
                    pages.counters.remove(&oldest);
                }
            }

            pages.order.push_back(page_id);
        }

        let counter = &mut pages.counters.entry(page_id).or_default()[view.index()];
        *counter += 1;

        RequestToken {
            page,
            view,
            value: *counter,
        }
    }

    /// Whether `token` belongs to the most recent request for its view on its page.
    pub(crate) fn is_current(&self, token: RequestToken) -> bool {
        let Some(page_id) = token.page else {
            return true;
        };

        let pages = self.pages.lock().unwrap_or_else(PoisonError::into_inner);

        // A forgotten page has no newer requests to compare against.
        pages
            .counters
            .get(&page_id)
            .is_none_or(|counters| counters[token.view.index()] == token.value)
    }
}
