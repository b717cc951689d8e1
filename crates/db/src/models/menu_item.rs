//! Menu item rows and DTOs.

use cafe_core::catalog::{MenuAvailability, MenuItem, Visibility};
use cafe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `menu_items` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItemRow {
    pub id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub item_type: Option<String>,
    pub image_url: Option<String>,
    pub visibility: String,
    pub is_sold_out: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<MenuItemRow> for MenuItem {
    fn from(row: MenuItemRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            description: row.description,
            price: row.price,
            category: row.category,
            item_type: row.item_type,
            image_url: row.image_url,
            visibility: Visibility::parse(&row.visibility),
            availability: Some(MenuAvailability {
                is_sold_out: Some(row.is_sold_out),
            }),
        }
    }
}

/// DTO for creating a menu item.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMenuItem {
    pub name: String,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub image_url: Option<String>,
    pub visibility: Option<Visibility>,
    pub is_sold_out: Option<bool>,
}

/// DTO for patching a menu item. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMenuItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub item_type: Option<String>,
    pub image_url: Option<String>,
    pub visibility: Option<Visibility>,
    pub is_sold_out: Option<bool>,
}

/// Server-side listing constraints. `None` imposes no constraint.
#[derive(Debug, Clone, Default)]
pub struct MenuItemFilter {
    pub category: Option<String>,
    pub item_type: Option<String>,
    /// Admin listings include hidden items; the public menu does not.
    pub include_hidden: bool,
}
