//! Async driver that connects a [`ListingPresenter`] to a [`PageFetcher`].
//!
//! The session awaits each fetch under the configured timeout and feeds the
//! result back into the presenter. Tearing the session down (from any task
//! holding its [`CancellationToken`]) abandons the in-flight fetch; its
//! result never reaches presenter state.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::FetchError;
use crate::fetch::PageFetcher;
use crate::filters::FilterState;
use crate::loader::{MergeOutcome, PageRequest};
use crate::presenter::{ListingPresenter, ListingView};
use crate::viewport::{SentinelBounds, SentinelId, Viewport};

pub struct ListingSession<F> {
    presenter: ListingPresenter,
    fetcher: Arc<F>,
    cancel: CancellationToken,
}

impl<F: PageFetcher> ListingSession<F> {
    pub fn new(presenter: ListingPresenter, fetcher: Arc<F>) -> Self {
        Self {
            presenter,
            fetcher,
            cancel: CancellationToken::new(),
        }
    }

    pub fn presenter(&self) -> &ListingPresenter {
        &self.presenter
    }

    pub fn view(&self) -> ListingView {
        self.presenter.view()
    }

    /// Token that tears the session down when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Mount on `sentinel` and load page one.
    pub async fn mount(&mut self, sentinel: SentinelId) -> Option<MergeOutcome> {
        let request = self.presenter.mount(sentinel)?;
        Some(self.run(request).await)
    }

    /// Scroll/resize notification; loads the next page if due.
    pub async fn on_viewport<B>(&mut self, viewport: Viewport, bounds: B) -> Option<MergeOutcome>
    where
        B: Fn(SentinelId) -> Option<SentinelBounds>,
    {
        let request = self.presenter.on_viewport(viewport, bounds)?;
        Some(self.run(request).await)
    }

    pub async fn set_filters(&mut self, filters: FilterState) -> Option<MergeOutcome> {
        let request = self.presenter.set_filters(filters)?;
        Some(self.run(request).await)
    }

    pub async fn retry(&mut self) -> Option<MergeOutcome> {
        let request = self.presenter.retry()?;
        Some(self.run(request).await)
    }

    /// Tear down: cancel any in-flight fetch and release the sentinel.
    pub fn teardown(&mut self) {
        self.cancel.cancel();
        self.presenter.unmount();
    }

    /// Fetch `request` and merge the result.
    pub async fn run(&mut self, request: PageRequest) -> MergeOutcome {
        if self.cancel.is_cancelled() {
            self.presenter.unmount();
            return MergeOutcome::Stale;
        }

        let filters = self.presenter.filters().clone();
        let timeout = self.presenter.config().fetch_timeout;
        let fetcher = Arc::clone(&self.fetcher);
        let cancel = self.cancel.clone();
        let fetch = fetcher.fetch_page(&filters, request.token.as_ref());

        let result = tokio::select! {
            biased;
            () = cancel.cancelled() => None,
            res = tokio::time::timeout(timeout, fetch) => {
                Some(res.unwrap_or_else(|_| {
                    tracing::warn!(seq = request.seq, ?timeout, "Page fetch timed out");
                    Err(FetchError::TimedOut)
                }))
            }
        };

        match result {
            Some(result) => self.presenter.on_page_result(&request, result),
            None => {
                tracing::debug!(seq = request.seq, "Session torn down, dropping in-flight page");
                self.presenter.unmount();
                MergeOutcome::Stale
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
