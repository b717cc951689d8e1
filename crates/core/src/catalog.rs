//! Catalog item model shared by the menu and the art gallery.
//!
//! Items arrive from the backend with most fields optional. Missing values
//! are kept as `None` here and resolved to display defaults in exactly one
//! place each: [`CatalogItem::image_url`] for artwork and
//! [`crate::status::derive_status`] for availability.

use serde::{Deserialize, Serialize};

use crate::dedupe::Identified;
use crate::error::CoreError;
use crate::filters::FilterKey;

/// Image shown for items that have no uploaded picture.
pub const PLACEHOLDER_IMAGE_URL: &str = "/images/placeholder.webp";

/// Maximum length of a menu item name or art piece title.
pub const MAX_NAME_LEN: usize = 200;

// ---------------------------------------------------------------------------
// Raw enums
// ---------------------------------------------------------------------------

/// Admin-controlled visibility of a menu item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Visible,
    Hidden,
}

impl Visibility {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::Hidden => "hidden",
        }
    }

    /// Parse a stored value. Unrecognised values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "visible" => Some(Self::Visible),
            "hidden" => Some(Self::Hidden),
            _ => None,
        }
    }
}

/// Sale status of an art piece as stored by the gallery admin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtAvailability {
    ForSale,
    Sold,
    NotForSale,
}

impl ArtAvailability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ForSale => "for-sale",
            Self::Sold => "sold",
            Self::NotForSale => "not-for-sale",
        }
    }

    /// Parse a stored value. Unrecognised values yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "for-sale" => Some(Self::ForSale),
            "sold" => Some(Self::Sold),
            "not-for-sale" => Some(Self::NotForSale),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Menu items
// ---------------------------------------------------------------------------

/// Nested availability block of a menu item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuAvailability {
    pub is_sold_out: Option<bool>,
}

/// A drink or dish on the café menu.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub image_url: Option<String>,
    pub visibility: Option<Visibility>,
    pub availability: Option<MenuAvailability>,
}

impl MenuItem {
    pub fn is_hidden(&self) -> bool {
        self.visibility == Some(Visibility::Hidden)
    }

    pub fn is_sold_out(&self) -> bool {
        self.availability
            .as_ref()
            .and_then(|a| a.is_sold_out)
            .unwrap_or(false)
    }
}

// ---------------------------------------------------------------------------
// Art pieces
// ---------------------------------------------------------------------------

/// A work hanging in the café gallery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArtPiece {
    pub id: String,
    pub title: String,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub medium: Option<String>,
    pub art_style: Option<String>,
    pub mood: Option<String>,
    pub image_url: Option<String>,
    pub availability_status: Option<ArtAvailability>,
}

// ---------------------------------------------------------------------------
// CatalogItem
// ---------------------------------------------------------------------------

/// Which listing an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    Menu,
    Art,
}

impl CatalogKind {
    /// Route prefix of the detail view for this kind of item.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::Art => "art",
        }
    }
}

/// An entry in either listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CatalogItem {
    Menu(MenuItem),
    Art(ArtPiece),
}

impl CatalogItem {
    pub fn kind(&self) -> CatalogKind {
        match self {
            Self::Menu(_) => CatalogKind::Menu,
            Self::Art(_) => CatalogKind::Art,
        }
    }

    /// Name of a menu item or title of an art piece.
    pub fn display_name(&self) -> &str {
        match self {
            Self::Menu(m) => &m.name,
            Self::Art(a) => &a.title,
        }
    }

    pub fn price(&self) -> Option<f64> {
        match self {
            Self::Menu(m) => m.price,
            Self::Art(a) => a.price,
        }
    }

    /// Image to render, falling back to [`PLACEHOLDER_IMAGE_URL`].
    pub fn image_url(&self) -> &str {
        let url = match self {
            Self::Menu(m) => m.image_url.as_deref(),
            Self::Art(a) => a.image_url.as_deref(),
        };
        match url {
            Some(u) if !u.trim().is_empty() => u,
            _ => PLACEHOLDER_IMAGE_URL,
        }
    }

    /// Location of the detail view, handed to the navigation layer.
    pub fn detail_path(&self) -> String {
        format!("/{}/{}", self.kind().path_segment(), self.id())
    }

    /// Value of the field a filter key constrains.
    ///
    /// Returns `None` both when the field is unset and when the key does not
    /// apply to this kind of item; callers check [`FilterKey::applies_to`]
    /// first.
    pub fn filter_value(&self, key: FilterKey) -> Option<&str> {
        match (self, key) {
            (Self::Menu(m), FilterKey::Category) => m.category.as_deref(),
            (Self::Menu(m), FilterKey::Type) => m.item_type.as_deref(),
            (Self::Art(a), FilterKey::Mood) => a.mood.as_deref(),
            (Self::Art(a), FilterKey::Style) => a.art_style.as_deref(),
            (Self::Art(a), FilterKey::AvailabilityStatus) => {
                a.availability_status.map(ArtAvailability::as_str)
            }
            _ => None,
        }
    }
}

impl Identified for MenuItem {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for ArtPiece {
    fn id(&self) -> &str {
        &self.id
    }
}

impl Identified for CatalogItem {
    fn id(&self) -> &str {
        match self {
            Self::Menu(m) => &m.id,
            Self::Art(a) => &a.id,
        }
    }
}

impl From<MenuItem> for CatalogItem {
    fn from(item: MenuItem) -> Self {
        Self::Menu(item)
    }
}

impl From<ArtPiece> for CatalogItem {
    fn from(item: ArtPiece) -> Self {
        Self::Art(item)
    }
}

// ---------------------------------------------------------------------------
// Validation helpers (admin input)
// ---------------------------------------------------------------------------

/// Validate a required display string (`field` names it in the message).
pub fn validate_name(field: &str, value: &str) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LEN {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {MAX_NAME_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate an optional price: finite and non-negative.
pub fn validate_price(price: Option<f64>) -> Result<(), CoreError> {
    match price {
        Some(p) if !p.is_finite() => Err(CoreError::Validation(
            "Price must be a finite number".to_string(),
        )),
        Some(p) if p < 0.0 => Err(CoreError::Validation(format!(
            "Price must be non-negative, got {p}"
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
