//! [`PageFetcher`] backed by the catalog REST API.

use async_trait::async_trait;
use cafe_core::catalog::{CatalogItem, CatalogKind};
use cafe_core::error::FetchError;
use cafe_core::fetch::{Page, PageFetcher, PageToken};
use cafe_core::filters::FilterState;

use crate::api::CatalogApi;

/// Fetches pages of one collection for a listing view.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    api: CatalogApi,
    kind: CatalogKind,
    include_hidden: bool,
}

impl HttpPageFetcher {
    /// Public menu (hidden items excluded).
    pub fn menu(api: CatalogApi) -> Self {
        Self {
            api,
            kind: CatalogKind::Menu,
            include_hidden: false,
        }
    }

    /// Admin menu listing, hidden items included.
    pub fn admin_menu(api: CatalogApi) -> Self {
        Self {
            include_hidden: true,
            ..Self::menu(api)
        }
    }

    pub fn art(api: CatalogApi) -> Self {
        Self {
            api,
            kind: CatalogKind::Art,
            include_hidden: false,
        }
    }

    pub fn kind(&self) -> CatalogKind {
        self.kind
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_page(
        &self,
        filters: &FilterState,
        token: Option<&PageToken>,
    ) -> Result<Page<CatalogItem>, FetchError> {
        let page = match self.kind {
            CatalogKind::Menu => {
                let page = self
                    .api
                    .list_menu_items(filters, token, self.include_hidden)
                    .await?;
                into_catalog_page(page)
            }
            CatalogKind::Art => into_catalog_page(self.api.list_art_pieces(filters, token).await?),
        };
        tracing::debug!(
            kind = ?self.kind,
            count = page.items.len(),
            has_more = page.has_more(),
            "Fetched catalog page"
        );
        Ok(page)
    }
}

fn into_catalog_page<T: Into<CatalogItem>>(page: Page<T>) -> Page<CatalogItem> {
    Page::new(
        page.items.into_iter().map(Into::into).collect(),
        page.next_page_token,
    )
}
