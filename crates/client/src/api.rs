//! REST client for the catalog listing endpoints.

use cafe_core::catalog::{ArtPiece, CatalogKind, MenuItem};
use cafe_core::error::FetchError;
use cafe_core::fetch::{Page, PageToken};
use cafe_core::filters::FilterState;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::ClientConfig;

/// Errors from the catalog REST layer.
#[derive(Debug, thiserror::Error)]
pub enum CatalogApiError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout, ...).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("Catalog API error ({status}): {body}")]
    ApiError {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the expected `{ "data": ... }` payload.
    #[error("Malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<CatalogApiError> for FetchError {
    fn from(err: CatalogApiError) -> Self {
        match err {
            CatalogApiError::Request(e) if e.is_timeout() => FetchError::TimedOut,
            CatalogApiError::Request(e) if e.is_decode() => FetchError::Decode(e.to_string()),
            CatalogApiError::Request(e) => FetchError::Transport(e.to_string()),
            CatalogApiError::ApiError { status, body } => FetchError::Server {
                status,
                message: error_message(&body),
            },
            CatalogApiError::Decode(e) => FetchError::Decode(e.to_string()),
        }
    }
}

/// Pull the `error` field out of a JSON error body, or fall back to the raw
/// text.
fn error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: String,
    }

    serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.error)
        .unwrap_or_else(|_| body.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Page payload with items left undecoded, so one bad row does not sink the
/// rest of the page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPage {
    items: Vec<serde_json::Value>,
    #[serde(default)]
    next_page_token: Option<PageToken>,
}

/// Decode a `{ "data": { "items": [...], "nextPageToken": ... } }` body.
/// Items that do not decode as `T` are logged and skipped.
fn decode_page<T: DeserializeOwned>(body: &[u8]) -> Result<Page<T>, CatalogApiError> {
    let envelope: Envelope<RawPage> = serde_json::from_slice(body)?;
    let RawPage {
        items,
        next_page_token,
    } = envelope.data;

    let items = items
        .into_iter()
        .filter_map(|raw| match serde_json::from_value::<T>(raw) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(error = %e, "Skipping malformed catalog item");
                None
            }
        })
        .collect();
    Ok(Page::new(items, next_page_token))
}

/// API path of the collection holding `kind` items.
pub const fn collection_path(kind: CatalogKind) -> &'static str {
    match kind {
        CatalogKind::Menu => "menu-items",
        CatalogKind::Art => "art-pieces",
    }
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    api_url: String,
    page_size: Option<u32>,
}

impl CatalogApi {
    /// Build a client with the configured timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, CatalogApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.fetch_timeout)
            .build()?;
        Ok(Self::with_client(client, config))
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            page_size: config.page_size,
        }
    }

    /// One page of menu items. Hidden items are only included when
    /// `include_hidden` is set.
    pub async fn list_menu_items(
        &self,
        filters: &FilterState,
        token: Option<&PageToken>,
        include_hidden: bool,
    ) -> Result<Page<MenuItem>, CatalogApiError> {
        let request = self.list_request(CatalogKind::Menu, filters, token, include_hidden)?;
        self.fetch(request).await
    }

    pub async fn list_art_pieces(
        &self,
        filters: &FilterState,
        token: Option<&PageToken>,
    ) -> Result<Page<ArtPiece>, CatalogApiError> {
        let request = self.list_request(CatalogKind::Art, filters, token, false)?;
        self.fetch(request).await
    }

    /// Build the listing request. Only filters that apply to `kind` are
    /// sent.
    pub fn list_request(
        &self,
        kind: CatalogKind,
        filters: &FilterState,
        token: Option<&PageToken>,
        include_hidden: bool,
    ) -> Result<reqwest::Request, CatalogApiError> {
        let mut query: Vec<(&str, String)> = filters
            .active()
            .filter(|(key, _)| key.applies_to(kind))
            .map(|(key, value)| (key.as_str(), value.to_string()))
            .collect();
        if let Some(token) = token {
            query.push(("pageToken", token.as_str().to_string()));
        }
        if let Some(limit) = self.page_size {
            query.push(("limit", limit.to_string()));
        }
        if include_hidden {
            query.push(("includeHidden", "true".to_string()));
        }

        let request = self
            .client
            .get(format!("{}/api/v1/{}", self.api_url, collection_path(kind)))
            .query(&query)
            .build()?;
        Ok(request)
    }

    // ---- private helpers ----

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<Page<T>, CatalogApiError> {
        tracing::debug!(url = %request.url(), "Fetching catalog page");
        let response = self.client.execute(request).await?;
        let response = Self::ensure_success(response).await?;
        let bytes = response.bytes().await?;
        decode_page(&bytes)
    }

    /// Turn a non-2xx response into [`CatalogApiError::ApiError`].
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, CatalogApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response
            .text()
            .await
            .unwrap_or_else(|e| format!("<failed to read body: {e}>"));
        tracing::warn!(status = status.as_u16(), "Catalog API returned an error");
        Err(CatalogApiError::ApiError {
            status: status.as_u16(),
            body,
        })
    }
}
