//! Query parameter types for API handlers.
//!
//! Catalog listings accept the same filter names the listing presenter
//! sends (`category`, `type`, `mood`, `style`, `availabilityStatus`) plus a
//! `pageToken` cursor. Blank filter values impose no constraint.

use cafe_core::catalog::ArtAvailability;
use cafe_core::error::CoreError;
use cafe_core::filters::{FilterKey, FilterState};
use cafe_core::types::DbId;
use cafe_db::models::art_piece::ArtPieceFilter;
use cafe_db::models::menu_item::MenuItemFilter;
use cafe_db::pagination::{clamp_limit, parse_page_token, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Values are clamped via `clamp_limit` / `clamp_offset` before they reach
/// the repository.
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Cursor shared by the catalog listings.
#[derive(Debug, Default, Clone)]
pub struct CursorParams {
    pub page_token: Option<String>,
    pub limit: Option<i64>,
}

impl CursorParams {
    /// Decode the page token. Absent or blank means the first page.
    pub fn after(&self) -> Result<Option<DbId>, CoreError> {
        match self.page_token.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(token) => parse_page_token(token).map(Some),
        }
    }

    pub fn limit(&self) -> i64 {
        clamp_limit(self.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE)
    }
}

/// `GET /menu-items` parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuListParams {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    #[serde(default)]
    pub include_hidden: bool,
    pub page_token: Option<String>,
    pub limit: Option<i64>,
}

impl MenuListParams {
    pub fn cursor(&self) -> CursorParams {
        CursorParams {
            page_token: self.page_token.clone(),
            limit: self.limit,
        }
    }

    pub fn filters(&self) -> FilterState {
        let mut filters = FilterState::new();
        if let Some(category) = &self.category {
            filters.set(FilterKey::Category, category.as_str());
        }
        if let Some(item_type) = &self.item_type {
            filters.set(FilterKey::Type, item_type.as_str());
        }
        filters
    }

    pub fn to_filter(&self) -> MenuItemFilter {
        let filters = self.filters();
        MenuItemFilter {
            category: filters.get(FilterKey::Category).map(str::to_string),
            item_type: filters.get(FilterKey::Type).map(str::to_string),
            include_hidden: self.include_hidden,
        }
    }
}

/// `GET /art-pieces` parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtListParams {
    pub mood: Option<String>,
    pub style: Option<String>,
    pub availability_status: Option<String>,
    pub page_token: Option<String>,
    pub limit: Option<i64>,
}

impl ArtListParams {
    pub fn cursor(&self) -> CursorParams {
        CursorParams {
            page_token: self.page_token.clone(),
            limit: self.limit,
        }
    }

    pub fn filters(&self) -> FilterState {
        let mut filters = FilterState::new();
        for (key, value) in [
            (FilterKey::Mood, &self.mood),
            (FilterKey::Style, &self.style),
            (FilterKey::AvailabilityStatus, &self.availability_status),
        ] {
            if let Some(value) = value {
                filters.set(key, value.as_str());
            }
        }
        filters
    }

    /// Fails on an availability status outside the known set.
    pub fn to_filter(&self) -> Result<ArtPieceFilter, CoreError> {
        let filters = self.filters();
        let availability_status = filters
            .get(FilterKey::AvailabilityStatus)
            .map(|raw| {
                ArtAvailability::parse(raw).ok_or_else(|| {
                    CoreError::Validation(format!("Unknown availabilityStatus: {raw}"))
                })
            })
            .transpose()?;
        Ok(ArtPieceFilter {
            mood: filters.get(FilterKey::Mood).map(str::to_string),
            art_style: filters.get(FilterKey::Style).map(str::to_string),
            availability_status,
        })
    }
}
