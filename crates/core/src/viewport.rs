//! Sentinel observation for infinite scroll.
//!
//! A sentinel is an invisible marker rendered after the last list item. The
//! loader asks for the next page when the sentinel comes within a prefetch
//! margin of the viewport, so loading starts before the user reaches the
//! literal bottom.
//!
//! Observation is a scoped resource: [`ScrollObserver::observe`] returns a
//! [`SentinelSubscription`] guard and the subscription lives exactly as long
//! as the guard. Dropping it (unmount, filter reset, sentinel replaced, early
//! return on an error path) releases the registration.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

/// Distance (logical pixels) below the viewport at which the sentinel
/// already counts as visible.
pub const DEFAULT_PREFETCH_MARGIN: f64 = 200.0;

/// The visible window of the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scroll_top: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.scroll_top + self.height
    }
}

/// Vertical extent of a sentinel in the same coordinate space as
/// [`Viewport`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentinelBounds {
    pub top: f64,
    pub bottom: f64,
}

impl SentinelBounds {
    /// A zero-height marker at `top`.
    pub fn at(top: f64) -> Self {
        Self { top, bottom: top }
    }
}

/// Whether `bounds` intersects the viewport grown by `margin` on both edges.
pub fn is_within_margin(viewport: Viewport, bounds: SentinelBounds, margin: f64) -> bool {
    let margin = margin.max(0.0);
    bounds.top <= viewport.bottom() + margin && bounds.bottom >= viewport.scroll_top - margin
}

/// Identity of a rendered sentinel element. A re-render that replaces the
/// element produces a new id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SentinelId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct SubscriptionId(u64);

#[derive(Debug)]
struct Subscription {
    sentinel: SentinelId,
    margin: f64,
    visible: bool,
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    subscriptions: HashMap<SubscriptionId, Subscription>,
}

// ---------------------------------------------------------------------------
// ScrollObserver
// ---------------------------------------------------------------------------

/// Tracks sentinel subscriptions for one scroll container.
///
/// Cheaply cloneable; clones share the same registry.
#[derive(Debug, Clone, Default)]
pub struct ScrollObserver {
    inner: Arc<Mutex<Registry>>,
}

impl ScrollObserver {
    pub fn new() -> Self {
        Self::default()
    }

    fn registry(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start observing `sentinel`. Observation ends when the returned guard
    /// is dropped.
    pub fn observe(&self, sentinel: SentinelId, margin: f64) -> SentinelSubscription {
        let mut registry = self.registry();
        let id = SubscriptionId(registry.next_id);
        registry.next_id += 1;
        registry.subscriptions.insert(
            id,
            Subscription {
                sentinel,
                margin,
                visible: false,
            },
        );
        tracing::trace!(sentinel = sentinel.0, "Sentinel subscribed");

        SentinelSubscription {
            id,
            sentinel,
            registry: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    pub fn active_subscriptions(&self) -> usize {
        self.registry().subscriptions.len()
    }

    /// Re-evaluate every subscription against `viewport`.
    ///
    /// `bounds` resolves a sentinel to its current position (`None` when it
    /// is not laid out). Returns the sentinels that *became* visible since
    /// the previous call; a sentinel that stays in view is reported once.
    /// `bounds` must not call back into this observer.
    pub fn notify<F>(&self, viewport: Viewport, bounds: F) -> Vec<SentinelId>
    where
        F: Fn(SentinelId) -> Option<SentinelBounds>,
    {
        let mut registry = self.registry();
        let mut entered = Vec::new();
        for sub in registry.subscriptions.values_mut() {
            let now = bounds(sub.sentinel)
                .is_some_and(|b| is_within_margin(viewport, b, sub.margin));
            if now && !sub.visible {
                entered.push(sub.sentinel);
            }
            sub.visible = now;
        }
        entered.sort_unstable();
        entered.dedup();
        entered
    }
}

// ---------------------------------------------------------------------------
// SentinelSubscription
// ---------------------------------------------------------------------------

/// Guard for one sentinel subscription; released on drop.
#[derive(Debug)]
pub struct SentinelSubscription {
    id: SubscriptionId,
    sentinel: SentinelId,
    registry: Weak<Mutex<Registry>>,
}

impl SentinelSubscription {
    pub fn sentinel(&self) -> SentinelId {
        self.sentinel
    }

    /// Forget the last visibility so a sentinel still in view is reported
    /// again on the next notification (used after a page is merged).
    pub fn rearm(&self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(sub) = registry.subscriptions.get_mut(&self.id) {
                sub.visible = false;
            }
        }
    }
}

impl Drop for SentinelSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .subscriptions
                .remove(&self.id);
            tracing::trace!(sentinel = self.sentinel.0, "Sentinel released");
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const SENTINEL: SentinelId = SentinelId(1);

    fn at(top: f64) -> impl Fn(SentinelId) -> Option<SentinelBounds> {
        move |_| Some(SentinelBounds::at(top))
    }

    // -- Geometry -------------------------------------------------------------

    #[test]
    fn sentinel_inside_viewport_is_visible() {
        let vp = Viewport::new(0.0, 800.0);
        assert!(is_within_margin(vp, SentinelBounds::at(500.0), 0.0));
    }

    #[test]
    fn prefetch_margin_extends_below_viewport() {
        let vp = Viewport::new(0.0, 800.0);
        assert!(!is_within_margin(vp, SentinelBounds::at(950.0), 0.0));
        assert!(is_within_margin(vp, SentinelBounds::at(950.0), DEFAULT_PREFETCH_MARGIN));
        assert!(!is_within_margin(vp, SentinelBounds::at(1001.0), DEFAULT_PREFETCH_MARGIN));
    }

    #[test]
    fn negative_margin_is_treated_as_zero() {
        let vp = Viewport::new(0.0, 800.0);
        assert!(is_within_margin(vp, SentinelBounds::at(800.0), -50.0));
    }

    #[test]
    fn sentinel_scrolled_past_is_not_visible() {
        let vp = Viewport::new(2000.0, 800.0);
        assert!(!is_within_margin(vp, SentinelBounds::at(1000.0), DEFAULT_PREFETCH_MARGIN));
    }

    // -- Notifications --------------------------------------------------------

    #[test]
    fn reports_entry_once_while_it_stays_visible() {
        let observer = ScrollObserver::new();
        let _sub = observer.observe(SENTINEL, DEFAULT_PREFETCH_MARGIN);
        let vp = Viewport::new(0.0, 800.0);

        assert_eq!(observer.notify(vp, at(900.0)), [SENTINEL]);
        assert!(observer.notify(vp, at(900.0)).is_empty());
    }

    #[test]
    fn reports_again_after_leaving_and_reentering() {
        let observer = ScrollObserver::new();
        let _sub = observer.observe(SENTINEL, 0.0);

        assert_eq!(observer.notify(Viewport::new(0.0, 800.0), at(500.0)), [SENTINEL]);
        assert!(observer.notify(Viewport::new(0.0, 100.0), at(500.0)).is_empty());
        assert_eq!(observer.notify(Viewport::new(0.0, 800.0), at(500.0)), [SENTINEL]);
    }

    #[test]
    fn rearm_reports_a_sentinel_still_in_view() {
        let observer = ScrollObserver::new();
        let sub = observer.observe(SENTINEL, 0.0);
        let vp = Viewport::new(0.0, 800.0);

        assert_eq!(observer.notify(vp, at(100.0)), [SENTINEL]);
        sub.rearm();
        assert_eq!(observer.notify(vp, at(100.0)), [SENTINEL]);
    }

    #[test]
    fn unlaid_out_sentinel_is_not_visible() {
        let observer = ScrollObserver::new();
        let _sub = observer.observe(SENTINEL, DEFAULT_PREFETCH_MARGIN);
        assert!(observer.notify(Viewport::new(0.0, 800.0), |_| None).is_empty());
    }

    // -- Scoped release -------------------------------------------------------

    #[test]
    fn dropping_the_guard_releases_the_subscription() {
        let observer = ScrollObserver::new();
        {
            let _sub = observer.observe(SENTINEL, 0.0);
            assert_eq!(observer.active_subscriptions(), 1);
        }
        assert_eq!(observer.active_subscriptions(), 0);
        assert!(observer.notify(Viewport::new(0.0, 800.0), at(10.0)).is_empty());
    }

    #[test]
    fn guard_released_on_early_return() {
        fn render(observer: &ScrollObserver, fail: bool) -> Result<SentinelSubscription, ()> {
            let sub = observer.observe(SENTINEL, 0.0);
            if fail {
                return Err(());
            }
            Ok(sub)
        }

        let observer = ScrollObserver::new();
        assert!(render(&observer, true).is_err());
        assert_eq!(observer.active_subscriptions(), 0);

        let kept = render(&observer, false).unwrap();
        assert_eq!(observer.active_subscriptions(), 1);
        drop(kept);
        assert_eq!(observer.active_subscriptions(), 0);
    }

    #[test]
    fn guard_outliving_observer_drops_cleanly() {
        let sub = {
            let observer = ScrollObserver::new();
            observer.observe(SENTINEL, 0.0)
        };
        sub.rearm();
        drop(sub);
    }
}
