//! Display status derived from raw catalog fields.
//!
//! Status is computed on every render and never stored: the underlying
//! record can change (sold out, hidden by an admin) without its identity
//! changing.
//!
//! Menu precedence is an explicit rule table: **hidden > sold-out >
//! available**. A hidden item that is also sold out displays as hidden.

use serde::{Deserialize, Serialize};

use crate::catalog::{ArtAvailability, ArtPiece, CatalogItem, MenuItem};

/// Display classification of a catalog item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayStatus {
    Available,
    #[serde(rename = "soldout")]
    SoldOut,
    Hidden,
    ForSale,
    Sold,
    NotForSale,
    Unknown,
}

impl DisplayStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::SoldOut => "soldout",
            Self::Hidden => "hidden",
            Self::ForSale => "for-sale",
            Self::Sold => "sold",
            Self::NotForSale => "not-for-sale",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Menu rules
// ---------------------------------------------------------------------------

/// A single precedence rule: if `applies` holds, the item shows `status`.
pub struct StatusRule {
    pub status: DisplayStatus,
    pub applies: fn(&MenuItem) -> bool,
}

/// Menu status rules in priority order. The first matching rule wins;
/// [`MENU_FALLBACK_STATUS`] applies when none match.
pub const MENU_STATUS_RULES: &[StatusRule] = &[
    StatusRule {
        status: DisplayStatus::Hidden,
        applies: MenuItem::is_hidden,
    },
    StatusRule {
        status: DisplayStatus::SoldOut,
        applies: MenuItem::is_sold_out,
    },
];

/// Status of a menu item no rule matched.
pub const MENU_FALLBACK_STATUS: DisplayStatus = DisplayStatus::Available;

pub fn derive_menu_status(item: &MenuItem) -> DisplayStatus {
    MENU_STATUS_RULES
        .iter()
        .find(|rule| (rule.applies)(item))
        .map_or(MENU_FALLBACK_STATUS, |rule| rule.status)
}

// ---------------------------------------------------------------------------
// Art
// ---------------------------------------------------------------------------

pub fn derive_art_status(item: &ArtPiece) -> DisplayStatus {
    match item.availability_status {
        Some(ArtAvailability::ForSale) => DisplayStatus::ForSale,
        Some(ArtAvailability::Sold) => DisplayStatus::Sold,
        Some(ArtAvailability::NotForSale) => DisplayStatus::NotForSale,
        None => DisplayStatus::Unknown,
    }
}

/// Derive the display status of any catalog item. Pure and total.
pub fn derive_status(item: &CatalogItem) -> DisplayStatus {
    match item {
        CatalogItem::Menu(m) => derive_menu_status(m),
        CatalogItem::Art(a) => derive_art_status(a),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{MenuAvailability, Visibility};

    fn menu(id: &str, visibility: Option<Visibility>, sold_out: Option<bool>) -> MenuItem {
        MenuItem {
            id: id.into(),
            name: format!("Item {id}"),
            visibility,
            availability: sold_out.map(|s| MenuAvailability {
                is_sold_out: Some(s),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn hidden_wins_regardless_of_sold_out() {
        for sold_out in [None, Some(false), Some(true)] {
            let item = menu("1", Some(Visibility::Hidden), sold_out);
            assert_eq!(derive_menu_status(&item), DisplayStatus::Hidden);
        }
    }

    #[test]
    fn visible_items_are_sold_out_iff_flag_set() {
        for visibility in [None, Some(Visibility::Visible)] {
            assert_eq!(
                derive_menu_status(&menu("1", visibility, Some(true))),
                DisplayStatus::SoldOut
            );
            assert_eq!(
                derive_menu_status(&menu("1", visibility, Some(false))),
                DisplayStatus::Available
            );
            assert_eq!(
                derive_menu_status(&menu("1", visibility, None)),
                DisplayStatus::Available
            );
        }
    }

    #[test]
    fn availability_block_without_flag_is_available() {
        let item = MenuItem {
            id: "1".into(),
            availability: Some(MenuAvailability::default()),
            ..Default::default()
        };
        assert_eq!(derive_menu_status(&item), DisplayStatus::Available);
    }

    #[test]
    fn mixed_menu_scenario() {
        let items = [
            menu("1", Some(Visibility::Visible), Some(false)),
            menu("2", Some(Visibility::Hidden), Some(true)),
            menu("3", Some(Visibility::Visible), Some(true)),
        ];
        let statuses: Vec<_> = items
            .iter()
            .cloned()
            .map(CatalogItem::Menu)
            .map(|i| derive_status(&i))
            .collect();
        assert_eq!(
            statuses,
            [
                DisplayStatus::Available,
                DisplayStatus::Hidden,
                DisplayStatus::SoldOut
            ]
        );
    }

    #[test]
    fn art_status_passes_through() {
        let mut piece = ArtPiece {
            id: "a".into(),
            ..Default::default()
        };
        assert_eq!(derive_art_status(&piece), DisplayStatus::Unknown);

        piece.availability_status = Some(ArtAvailability::ForSale);
        assert_eq!(derive_art_status(&piece), DisplayStatus::ForSale);
        piece.availability_status = Some(ArtAvailability::Sold);
        assert_eq!(derive_art_status(&piece), DisplayStatus::Sold);
        piece.availability_status = Some(ArtAvailability::NotForSale);
        assert_eq!(derive_art_status(&piece), DisplayStatus::NotForSale);
    }

    #[test]
    fn rule_table_order_is_hidden_then_sold_out() {
        let order: Vec<_> = MENU_STATUS_RULES.iter().map(|r| r.status).collect();
        assert_eq!(order, [DisplayStatus::Hidden, DisplayStatus::SoldOut]);
    }

    #[test]
    fn wire_names_match_as_str() {
        for status in [
            DisplayStatus::Available,
            DisplayStatus::SoldOut,
            DisplayStatus::Hidden,
            DisplayStatus::ForSale,
            DisplayStatus::Sold,
            DisplayStatus::NotForSale,
            DisplayStatus::Unknown,
        ] {
            let json = serde_json::to_value(status).unwrap();
            assert_eq!(json, status.as_str());
        }
    }
}
