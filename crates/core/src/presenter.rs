//! Listing presenter: the state behind a menu or gallery view.
//!
//! Owns the active filters, the incremental loader and the sentinel
//! subscription of one view, and exposes the result as plain data
//! ([`ListingView`]) for whatever renders it. It never performs I/O: page
//! requests are returned to the caller, who fetches them and hands the result
//! back through [`ListingPresenter::on_page_result`]. See
//! [`crate::session::ListingSession`] for an async driver.

use std::time::Duration;

use serde::Serialize;

use crate::catalog::CatalogItem;
use crate::error::FetchError;
use crate::fetch::Page;
use crate::filters::{apply_filters, FilterState};
use crate::loader::{IncrementalLoader, LoaderState, MergeOutcome, PageRequest};
use crate::status::{derive_status, DisplayStatus};
use crate::viewport::{
    ScrollObserver, SentinelBounds, SentinelId, SentinelSubscription, Viewport,
    DEFAULT_PREFETCH_MARGIN,
};

/// Default time a single page fetch may take before it counts as failed.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Tuning for a listing view.
#[derive(Debug, Clone)]
pub struct ListingConfig {
    /// Prefetch margin around the viewport, in logical pixels.
    pub prefetch_margin: f64,
    /// Per-request timeout applied by [`crate::session::ListingSession`].
    pub fetch_timeout: Duration,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            prefetch_margin: DEFAULT_PREFETCH_MARGIN,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

/// One rendered entry: the raw item plus everything derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListedItem {
    pub item: CatalogItem,
    pub status: DisplayStatus,
    pub detail_path: String,
    pub image_url: String,
}

/// Snapshot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingView {
    pub items: Vec<ListedItem>,
    pub loading: bool,
    pub has_more: bool,
    pub state: LoaderState,
    /// Message for a "failed to load more" notice.
    pub error: Option<String>,
    pub filters: FilterState,
}

// ---------------------------------------------------------------------------
// ListingPresenter
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ListingPresenter {
    filters: FilterState,
    loader: IncrementalLoader<CatalogItem>,
    observer: ScrollObserver,
    subscription: Option<SentinelSubscription>,
    config: ListingConfig,
}

impl ListingPresenter {
    pub fn new(observer: ScrollObserver, config: ListingConfig) -> Self {
        Self {
            filters: FilterState::new(),
            loader: IncrementalLoader::new(),
            observer,
            subscription: None,
            config,
        }
    }

    /// Start with `filters` already selected (e.g. parsed from the URL).
    pub fn with_filters(mut self, filters: FilterState) -> Self {
        self.filters = filters;
        self
    }

    pub fn config(&self) -> &ListingConfig {
        &self.config
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn state(&self) -> LoaderState {
        self.loader.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// The view appeared: observe `sentinel` and request page one.
    pub fn mount(&mut self, sentinel: SentinelId) -> Option<PageRequest> {
        if self.loader.is_closed() {
            return None;
        }
        self.replace_sentinel(sentinel);
        self.loader.on_sentinel_visible()
    }

    /// Observe a new sentinel element after a re-render replaced it.
    pub fn replace_sentinel(&mut self, sentinel: SentinelId) {
        if self
            .subscription
            .as_ref()
            .is_some_and(|s| s.sentinel() == sentinel)
        {
            return;
        }
        // Release the old registration before taking the new one.
        self.subscription = None;
        self.subscription = Some(self.observer.observe(sentinel, self.config.prefetch_margin));
    }

    /// Re-evaluate visibility after a scroll or resize.
    ///
    /// Only for a scroll container observed by this presenter alone; shared
    /// containers call [`ScrollObserver::notify`] themselves and dispatch via
    /// [`on_sentinel_entered`](Self::on_sentinel_entered).
    pub fn on_viewport<F>(&mut self, viewport: Viewport, bounds: F) -> Option<PageRequest>
    where
        F: Fn(SentinelId) -> Option<SentinelBounds>,
    {
        let sentinel = self.subscription.as_ref()?.sentinel();
        if self.observer.notify(viewport, bounds).contains(&sentinel) {
            self.on_sentinel_entered(sentinel)
        } else {
            None
        }
    }

    /// A sentinel entered the prefetch margin.
    pub fn on_sentinel_entered(&mut self, sentinel: SentinelId) -> Option<PageRequest> {
        match &self.subscription {
            Some(sub) if sub.sentinel() == sentinel => self.loader.on_sentinel_visible(),
            _ => None,
        }
    }

    /// Replace the filter set. A change restarts pagination from page one.
    pub fn set_filters(&mut self, filters: FilterState) -> Option<PageRequest> {
        if filters == self.filters {
            return None;
        }
        tracing::debug!(?filters, "Filters changed, restarting listing");
        self.filters = filters;
        self.loader.reset();

        let sentinel = self.subscription.take()?.sentinel();
        self.replace_sentinel(sentinel);
        self.loader.on_sentinel_visible()
    }

    /// Hand back the result of a request this presenter issued.
    pub fn on_page_result(
        &mut self,
        request: &PageRequest,
        result: Result<Page<CatalogItem>, FetchError>,
    ) -> MergeOutcome {
        let outcome = self.loader.complete(request, result);
        if let MergeOutcome::Committed {
            exhausted: false, ..
        } = outcome
        {
            // A short page can leave the sentinel in view; let the next
            // notification fire again.
            if let Some(sub) = &self.subscription {
                sub.rearm();
            }
        }
        outcome
    }

    /// Retry after a failed page.
    pub fn retry(&mut self) -> Option<PageRequest> {
        self.loader.retry()
    }

    /// The view is gone: release the sentinel and drop any late results.
    pub fn unmount(&mut self) {
        self.subscription = None;
        self.loader.close();
    }

    /// Deduplicated, filtered items with freshly derived status.
    pub fn view(&self) -> ListingView {
        let items = apply_filters(self.loader.items(), &self.filters)
            .into_iter()
            .map(|item| ListedItem {
                status: derive_status(item),
                detail_path: item.detail_path(),
                image_url: item.image_url().to_string(),
                item: item.clone(),
            })
            .collect();

        ListingView {
            items,
            loading: self.loader.is_loading(),
            has_more: self.loader.has_more(),
            state: self.loader.state(),
            error: self.loader.error().map(ToString::to_string),
            filters: self.filters.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ArtAvailability, ArtPiece, MenuAvailability, MenuItem, Visibility};
    use crate::fetch::PageToken;
    use crate::filters::FilterKey;
    use assert_matches::assert_matches;

    const SENTINEL: SentinelId = SentinelId(7);

    fn presenter() -> (ListingPresenter, ScrollObserver) {
        let observer = ScrollObserver::new();
        (
            ListingPresenter::new(observer.clone(), ListingConfig::default()),
            observer,
        )
    }

    fn art(id: &str, status: ArtAvailability) -> CatalogItem {
        CatalogItem::Art(ArtPiece {
            id: id.into(),
            title: format!("Piece {id}"),
            availability_status: Some(status),
            ..Default::default()
        })
    }

    fn menu(id: &str, visibility: Visibility, sold_out: bool) -> CatalogItem {
        CatalogItem::Menu(MenuItem {
            id: id.into(),
            name: format!("Item {id}"),
            visibility: Some(visibility),
            availability: Some(MenuAvailability {
                is_sold_out: Some(sold_out),
            }),
            ..Default::default()
        })
    }

    fn view_ids(p: &ListingPresenter) -> Vec<String> {
        p.view()
            .items
            .iter()
            .map(|i| crate::dedupe::Identified::id(&i.item).to_string())
            .collect()
    }

    fn near_bottom() -> (Viewport, impl Fn(SentinelId) -> Option<SentinelBounds>) {
        (Viewport::new(0.0, 800.0), |_| Some(SentinelBounds::at(900.0)))
    }

    #[test]
    fn mount_requests_first_page() {
        let (mut p, observer) = presenter();
        let req = p.mount(SENTINEL).expect("page one");
        assert_eq!(req.token, None);
        assert!(p.is_mounted());
        assert_eq!(observer.active_subscriptions(), 1);
        assert!(p.view().loading);
    }

    #[test]
    fn two_pages_merge_into_deduplicated_list() {
        let (mut p, _observer) = presenter();
        let req = p.mount(SENTINEL).unwrap();
        p.on_page_result(
            &req,
            Ok(Page::new(
                vec![menu("1", Visibility::Visible, false), menu("2", Visibility::Visible, false)],
                Some(PageToken::new("2")),
            )),
        );

        let (vp, bounds) = near_bottom();
        let req = p.on_viewport(vp, bounds).expect("sentinel near bottom");
        p.on_page_result(
            &req,
            Ok(Page::last(vec![
                menu("2", Visibility::Visible, false),
                menu("3", Visibility::Visible, false),
            ])),
        );

        assert_eq!(view_ids(&p), ["1", "2", "3"]);
        let view = p.view();
        assert!(!view.has_more);
        assert_eq!(view.state, LoaderState::Exhausted);
    }

    #[test]
    fn view_derives_status_for_every_item() {
        let (mut p, _observer) = presenter();
        let req = p.mount(SENTINEL).unwrap();
        p.on_page_result(
            &req,
            Ok(Page::last(vec![
                menu("1", Visibility::Visible, false),
                menu("2", Visibility::Hidden, true),
                menu("3", Visibility::Visible, true),
            ])),
        );

        let statuses: Vec<_> = p.view().items.iter().map(|i| i.status).collect();
        assert_eq!(
            statuses,
            [DisplayStatus::Available, DisplayStatus::Hidden, DisplayStatus::SoldOut]
        );
        assert_eq!(p.view().items[0].detail_path, "/menu/1");
    }

    #[test]
    fn visibility_while_loading_does_not_double_trigger() {
        let (mut p, _observer) = presenter();
        let _req = p.mount(SENTINEL).unwrap();
        assert!(p.on_sentinel_entered(SENTINEL).is_none());
        let (vp, bounds) = near_bottom();
        assert!(p.on_viewport(vp, bounds).is_none());
    }

    #[test]
    fn other_sentinels_are_ignored() {
        let (mut p, _observer) = presenter();
        let req = p.mount(SENTINEL).unwrap();
        p.on_page_result(&req, Ok(Page::new(vec![], Some(PageToken::new("t")))));
        assert!(p.on_sentinel_entered(SentinelId(99)).is_none());
        assert!(p.on_sentinel_entered(SENTINEL).is_some());
    }

    #[test]
    fn filter_change_restarts_from_page_one() {
        let (mut p, observer) = presenter();
        let req = p.mount(SENTINEL).unwrap();
        p.on_page_result(
            &req,
            Ok(Page::last(vec![art("1", ArtAvailability::Sold)])),
        );
        assert_eq!(p.state(), LoaderState::Exhausted);

        let filters = FilterState::new()

            .with(FilterKey::AvailabilityStatus, "for-sale");
        let restart = p.set_filters(filters.clone()).expect("restart");
        assert_eq!(restart.token, None);
        assert!(p.view().items.is_empty());
        assert_eq!(observer.active_subscriptions(), 1);

        // Same filters again is not a change.
        p.on_page_result(&restart, Ok(Page::last(vec![art("2", ArtAvailability::ForSale)])));
        assert!(p.set_filters(filters).is_none());
        assert_eq!(view_ids(&p), ["2"]);
    }

    #[test]
    fn results_for_previous_filters_are_discarded() {
        let (mut p, _observer) = presenter();
        let old = p.mount(SENTINEL).unwrap();
        let fresh = p
            .set_filters(FilterState::new().with(FilterKey::Mood, "calm"))
            .unwrap();

        let stale = Page::last(vec![art("old", ArtAvailability::Sold)]);
        let outcome = p.on_page_result(&old, Ok(stale));
        assert_eq!(outcome, MergeOutcome::Stale);
        assert!(p.view().items.is_empty());
        assert!(p.view().loading);

        p.on_page_result(&fresh, Ok(Page::last(vec![])));
        assert!(!p.view().loading);
    }

    #[test]
    fn view_applies_filters_client_side() {
        let (mut p, _observer) = presenter();
        let mut p_filtered = {
            let filters = FilterState::new()
                .with(FilterKey::AvailabilityStatus, "for-sale");
            ListingPresenter::new(ScrollObserver::new(), ListingConfig::default())
                .with_filters(filters)
        };

        let page = Page::last(vec![
            art("1", ArtAvailability::Sold),
            art("2", ArtAvailability::ForSale),
        ]);
        let req = p.mount(SENTINEL).unwrap();
        p.on_page_result(&req, Ok(page.clone()));
        let req = p_filtered.mount(SENTINEL).unwrap();
        p_filtered.on_page_result(&req, Ok(page));

        assert_eq!(view_ids(&p), ["1", "2"]);
        assert_eq!(view_ids(&p_filtered), ["2"]);
    }

    #[test]
    fn failure_is_reported_and_retryable() {
        let (mut p, _observer) = presenter();
        let req = p.mount(SENTINEL).unwrap();
        let outcome = p.on_page_result(
            &req,
            Err(FetchError::Server {
                status: 503,
                message: "busy".into(),
            }),
        );
        assert_matches!(outcome, MergeOutcome::Failed(FetchError::Server { status: 503, .. }));

        let view = p.view();
        assert!(view.error.is_some());
        assert!(view.has_more);
        assert!(!view.loading);

        let retry = p.retry().expect("retry");
        p.on_page_result(&retry, Ok(Page::last(vec![art("1", ArtAvailability::Sold)])));
        assert!(p.view().error.is_none());
        assert_eq!(view_ids(&p), ["1"]);
    }

    #[test]
    fn replacing_the_sentinel_resubscribes() {
        let (mut p, observer) = presenter();
        let _req = p.mount(SENTINEL).unwrap();
        p.replace_sentinel(SentinelId(8));
        assert_eq!(observer.active_subscriptions(), 1);
        p.replace_sentinel(SentinelId(8));
        assert_eq!(observer.active_subscriptions(), 1);
    }

    #[test]
    fn unmount_releases_and_discards_late_results() {
        let (mut p, observer) = presenter();
        let req = p.mount(SENTINEL).unwrap();
        p.unmount();

        assert_eq!(observer.active_subscriptions(), 0);
        assert!(!p.is_mounted());
        let outcome = p.on_page_result(&req, Ok(Page::last(vec![art("1", ArtAvailability::Sold)])));
        assert_eq!(outcome, MergeOutcome::Stale);
        assert!(p.view().items.is_empty());
    }

    #[test]
    fn view_serializes_for_rendering() {
        let (mut p, _observer) = presenter();
        let req = p.mount(SENTINEL).unwrap();
        p.on_page_result(&req, Ok(Page::last(vec![art("9", ArtAvailability::ForSale)])));

        let json = serde_json::to_value(p.view()).unwrap();
        let first = &json["items"][0];
        assert_eq!(first["item"]["kind"], "art");
        assert_eq!(first["item"]["id"], "9");
        assert_eq!(first["status"], "for-sale");
        assert_eq!(first["detailPath"], "/art/9");
        assert_eq!(json["hasMore"], false);
        assert_eq!(json["state"], "exhausted");
    }
}
