//! Art piece rows and DTOs.

use cafe_core::catalog::{ArtAvailability, ArtPiece};
use cafe_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `art_pieces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtPieceRow {
    pub id: DbId,
    pub title: String,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub medium: Option<String>,
    pub art_style: Option<String>,
    pub mood: Option<String>,
    pub image_url: Option<String>,
    pub availability_status: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ArtPieceRow> for ArtPiece {
    fn from(row: ArtPieceRow) -> Self {
        Self {
            id: row.id.to_string(),
            title: row.title,
            artist: row.artist,
            description: row.description,
            price: row.price,
            medium: row.medium,
            art_style: row.art_style,
            mood: row.mood,
            image_url: row.image_url,
            availability_status: row
                .availability_status
                .as_deref()
                .and_then(ArtAvailability::parse),
        }
    }
}

/// DTO for creating an art piece.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtPiece {
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

/// DTO for patching an art piece. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtPiece {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub medium: Option<String>,
    pub art_style: Option<String>,
    pub mood: Option<String>,
    pub image_url: Option<String>,
    pub availability_status: Option<ArtAvailability>,
}

#[derive(Debug, Clone, Default)]
pub struct ArtPieceFilter {
    pub mood: Option<String>,
    pub art_style: Option<String>,
    pub availability_status: Option<ArtAvailability>,
}
