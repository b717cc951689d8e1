//! Boundary to the catalog fetch collaborator.
//!
//! The presenter never performs I/O itself. Anything that can produce a page
//! of catalog items for a filter set and a page token (the REST client, a
//! fixture in tests) implements [`PageFetcher`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::CatalogItem;
use crate::error::FetchError;
use crate::filters::FilterState;

/// Opaque cursor identifying the next page of results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageToken(String);

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PageToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of results. `next_page_token` is `None` on the last page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    #[serde(default)]
    pub next_page_token: Option<PageToken>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, next_page_token: Option<PageToken>) -> Self {
        Self {
            items,
            next_page_token,
        }
    }

    /// A page with no successor.
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn has_more(&self) -> bool {
        self.next_page_token.is_some()
    }
}

/// Fallible, asynchronous source of catalog pages.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page identified by `token` (`None` for the first page).
    async fn fetch_page(
        &self,
        filters: &FilterState,
        token: Option<&PageToken>,
    ) -> Result<Page<CatalogItem>, FetchError>;
}
