//! Filter state and composition for catalog listings.
//!
//! A filter is a single `key = value` constraint. Active filters combine
//! with logical AND; an empty value means "no constraint". Boolean-style
//! toggles (e.g. "for sale only") are ordinary keys that get set or cleared,
//! so one composition rule covers every control in the UI.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::catalog::{CatalogItem, CatalogKind};
use crate::dedupe::Identified;

// ---------------------------------------------------------------------------
// Filter keys
// ---------------------------------------------------------------------------

/// Recognised filter keys. Art listings use the first three, the menu the
/// last two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilterKey {
    Mood,
    Style,
    AvailabilityStatus,
    Category,
    Type,
}

impl FilterKey {
    pub const ALL: [FilterKey; 5] = [
        Self::Mood,
        Self::Style,
        Self::AvailabilityStatus,
        Self::Category,
        Self::Type,
    ];

    /// Wire name, used both in UI state and as the query parameter name.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mood => "mood",
            Self::Style => "style",
            Self::AvailabilityStatus => "availabilityStatus",
            Self::Category => "category",
            Self::Type => "type",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == s)
    }

    /// Whether this key constrains items of the given kind.
    pub const fn applies_to(self, kind: CatalogKind) -> bool {
        match self {
            Self::Mood | Self::Style | Self::AvailabilityStatus => {
                matches!(kind, CatalogKind::Art)
            }
            Self::Category | Self::Type => matches!(kind, CatalogKind::Menu),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterState
// ---------------------------------------------------------------------------

/// Selected filter values, keyed by [`FilterKey`].
///
/// Only non-empty values are stored, so "absent" and "empty" are the same
/// state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterState {
    values: BTreeMap<FilterKey, String>,
}

/// Decodes through [`FilterState::from_pairs`], so blank values are dropped
/// and unknown keys ignored.
impl<'de> Deserialize<'de> for FilterState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, String>::deserialize(deserializer)?;
        Ok(Self::from_pairs(raw))
    }
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from untyped `(key, value)` pairs, e.g. URL query parameters.
    ///
    /// Unknown keys are skipped.
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut state = Self::new();
        for (key, value) in pairs {
            match FilterKey::parse(key.as_ref()) {
                Some(k) => {
                    state.set(k, value);
                }
                None => {
                    tracing::debug!(key = key.as_ref(), "Ignoring unknown filter key");
                }
            }
        }
        state
    }

    /// Set `key` to `value`. A blank value clears the key.
    pub fn set(&mut self, key: FilterKey, value: impl Into<String>) -> &mut Self {
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(&key);
        } else {
            self.values.insert(key, value);
        }
        self
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, key: FilterKey, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn clear(&mut self, key: FilterKey) -> &mut Self {
        self.values.remove(&key);
        self
    }

    /// Flip a boolean-style filter: clear `key` if it already holds `value`,
    /// otherwise set it.
    pub fn toggle(&mut self, key: FilterKey, value: &str) -> &mut Self {
        if self.get(key) == Some(value) {
            self.clear(key)
        } else {
            self.set(key, value)
        }
    }

    pub fn get(&self, key: FilterKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }

    /// Active constraints in key order.
    pub fn active(&self) -> impl Iterator<Item = (FilterKey, &str)> {
        self.values.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Query parameters for the fetch collaborator.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.values
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect()
    }

    /// Whether `item` satisfies every active constraint that applies to its
    /// kind.
    pub fn matches(&self, item: &CatalogItem) -> bool {
        let kind = item.kind();
        self.active()
            .filter(|(key, _)| key.applies_to(kind))
            .all(|(key, value)| item.filter_value(key) == Some(value))
    }
}

/// Keep the well-formed items that satisfy `filters`, in input order.
///
/// Comparison is exact and case-sensitive.
pub fn apply_filters<'a>(items: &'a [CatalogItem], filters: &FilterState) -> Vec<&'a CatalogItem> {
    items
        .iter()
        .filter(|item| item.is_well_formed() && filters.matches(item))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
