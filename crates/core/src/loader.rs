//! Incremental (infinite scroll) page loader.
//!
//! ```text
//!             sentinel visible && has_more
//!   Idle ─────────────────────────────────────▶ LoadingPage
//!    ▲  ▲                                          │
//!    │  └──── page merged, more pages ─────────────┤
//!    │  └──── fetch failed (error kept) ───────────┤
//!    │                                             │ page merged, last page
//!    └──────── reset() (filters changed) ◀── Exhausted
//! ```
//!
//! Every request carries the loader's generation (bumped on reset) and a
//! monotonically increasing sequence number. Only the request currently
//! awaited in the current generation may commit; anything else is stale and
//! discarded without touching state. Since the token for page N+1 comes from
//! page N, this keeps pages merged in issue order.

use crate::dedupe::{Identified, SeenIds};
use crate::error::FetchError;
use crate::fetch::{Page, PageToken};

/// Loader lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderState {
    Idle,
    LoadingPage,
    Exhausted,
}

/// A page request handed to the fetch collaborator.
///
/// Must be passed back unchanged to [`IncrementalLoader::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub seq: u64,
    /// `None` requests the first page.
    pub token: Option<PageToken>,
}

/// Result of handing a fetch result back to the loader.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeOutcome {
    /// The page was merged; `added` counts items not already listed.
    Committed { added: usize, exhausted: bool },
    /// The fetch failed; accumulated items are untouched.
    Failed(FetchError),
    /// The result belonged to a superseded request and was dropped.
    Stale,
}

/// Accumulated listing plus pagination state for one view.
#[derive(Debug)]
pub struct IncrementalLoader<T> {
    items: Vec<T>,
    seen: SeenIds,
    state: LoaderState,
    has_more: bool,
    next_token: Option<PageToken>,
    error: Option<FetchError>,
    generation: u64,
    next_seq: u64,
    awaiting: Option<u64>,
    pages_loaded: usize,
    closed: bool,
}

impl<T> Default for IncrementalLoader<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            seen: SeenIds::default(),
            state: LoaderState::Idle,
            has_more: true,
            next_token: None,
            error: None,
            generation: 0,
            next_seq: 0,
            awaiting: None,
            pages_loaded: 0,
            closed: false,
        }
    }
}

impl<T: Identified> IncrementalLoader<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoaderState::LoadingPage
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Error from the most recent failed fetch, cleared by the next request.
    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pages_loaded(&self) -> usize {
        self.pages_loaded
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// The sentinel entered the prefetch margin.
    ///
    /// Returns a request only from `Idle` with more pages available; while a
    /// page is loading, repeated visibility events are ignored.
    pub fn on_sentinel_visible(&mut self) -> Option<PageRequest> {
        if self.closed {
            return None;
        }
        match self.state {
            LoaderState::Idle if self.has_more => Some(self.issue()),
            LoaderState::Idle | LoaderState::Exhausted => None,
            LoaderState::LoadingPage => {
                tracing::trace!(
                    generation = self.generation,
                    "Sentinel visible while a page is loading, ignored"
                );
                None
            }
        }
    }

    /// Re-issue the failed page request.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.closed || self.state != LoaderState::Idle || self.error.is_none() {
            return None;
        }
        Some(self.issue())
    }

    fn issue(&mut self) -> PageRequest {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.awaiting = Some(seq);
        self.state = LoaderState::LoadingPage;
        self.error = None;
        tracing::debug!(
            generation = self.generation,
            seq,
            has_token = self.next_token.is_some(),
            "Requesting next page"
        );
        PageRequest {
            generation: self.generation,
            seq,
            token: self.next_token.clone(),
        }
    }

    /// Hand back the outcome of `request`.
    pub fn complete(
        &mut self,
        request: &PageRequest,
        result: Result<Page<T>, FetchError>,
    ) -> MergeOutcome {
        if self.closed
            || request.generation != self.generation
            || self.awaiting != Some(request.seq)
        {
            tracing::debug!(
                generation = request.generation,
                seq = request.seq,
                current_generation = self.generation,
                "Discarding stale page result"
            );
            return MergeOutcome::Stale;
        }
        self.awaiting = None;

        match result {
            Ok(page) => {
                let (added, _) = self.seen.extend_unique(&mut self.items, page.items);
                self.has_more = page.next_page_token.is_some();
                self.next_token = page.next_page_token;
                self.pages_loaded += 1;
                self.state = if self.has_more {
                    LoaderState::Idle
                } else {
                    LoaderState::Exhausted
                };
                tracing::debug!(
                    seq = request.seq,
                    added,
                    total = self.items.len(),
                    has_more = self.has_more,
                    "Merged page"
                );
                MergeOutcome::Committed {
                    added,
                    exhausted: !self.has_more,
                }
            }
            Err(err) => {
                tracing::warn!(seq = request.seq, error = %err, "Page fetch failed");
                self.error = Some(err.clone());
                self.state = LoaderState::Idle;
                MergeOutcome::Failed(err)
            }
        }
    }

    /// Restart pagination from page one (the filter set changed).
    ///
    /// Clears accumulated items and invalidates any in-flight request.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.items.clear();
        self.seen.clear();
        self.state = LoaderState::Idle;
        self.has_more = true;
        self.next_token = None;
        self.error = None;
        self.awaiting = None;
        self.pages_loaded = 0;
    }

    /// The owning view is gone; every later result is discarded.
    pub fn close(&mut self) {
        self.closed = true;
        self.awaiting = None;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
