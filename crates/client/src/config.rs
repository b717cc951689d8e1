use std::time::Duration;

use cafe_core::presenter::{ListingConfig, DEFAULT_FETCH_TIMEOUT};
use cafe_core::viewport::DEFAULT_PREFETCH_MARGIN;

/// Catalog client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API server, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub fetch_timeout: Duration,
    /// Requested page size; `None` leaves it to the server.
    pub page_size: Option<u32>,
    /// Prefetch margin for listing views, in logical pixels.
    pub prefetch_margin: f64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000".to_string(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            page_size: None,
            prefetch_margin: DEFAULT_PREFETCH_MARGIN,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `CAFE_API_URL`            | `http://localhost:3000` |
    /// | `CAFE_FETCH_TIMEOUT_SECS` | `10`                    |
    /// | `CAFE_PAGE_SIZE`          | (server default)        |
    /// | `CAFE_PREFETCH_MARGIN`    | `200`                   |
    ///
    /// Unparseable values fall back to the default with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let api_url = lookup("CAFE_API_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.api_url);

        let fetch_timeout = parse_or(&lookup, "CAFE_FETCH_TIMEOUT_SECS")
            .map(Duration::from_secs)
            .unwrap_or(defaults.fetch_timeout);

        let page_size = parse_or::<u32>(&lookup, "CAFE_PAGE_SIZE").filter(|n| *n > 0);

        let prefetch_margin = parse_or::<f64>(&lookup, "CAFE_PREFETCH_MARGIN")
            .filter(|m| m.is_finite() && *m >= 0.0)
            .unwrap_or(defaults.prefetch_margin);

        Self {
            api_url,
            fetch_timeout,
            page_size,
            prefetch_margin,
        }
    }

    /// Presenter tuning derived from this configuration.
    pub fn listing_config(&self) -> ListingConfig {
        ListingConfig {
            prefetch_margin: self.prefetch_margin,
            fetch_timeout: self.fetch_timeout,
        }
    }
}

fn parse_or<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparseable configuration value");
            None
        }
    }
}
