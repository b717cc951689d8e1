//! Repository for the `art_pieces` table.

use cafe_core::catalog::ArtAvailability;
use cafe_core::types::DbId;
use sqlx::PgPool;

use crate::models::art_piece::{ArtPieceFilter, ArtPieceRow, CreateArtPiece, UpdateArtPiece};
use crate::pagination::KeysetPage;

/// Column list for the `art_pieces` table.
const COLUMNS: &str = "id, title, artist, description, price, medium, art_style, mood, \
    image_url, availability_status, created_at, updated_at";

pub struct ArtPieceRepo;

impl ArtPieceRepo {
    pub async fn create(pool: &PgPool, input: &CreateArtPiece) -> Result<ArtPieceRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO art_pieces \
                (title, artist, description, price, medium, art_style, mood, image_url, \
                 availability_status) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtPieceRow>(&query)
            .bind(input.title.trim())
            .bind(&input.artist)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.medium)
            .bind(&input.art_style)
            .bind(&input.mood)
            .bind(&input.image_url)
            .bind(input.availability_status.map(ArtAvailability::as_str))
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<ArtPieceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM art_pieces WHERE id = $1");
        sqlx::query_as::<_, ArtPieceRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List up to `limit` pieces with id greater than `after`, in id order.
    pub async fn list_page(
        pool: &PgPool,
        filter: &ArtPieceFilter,
        after: Option<DbId>,
        limit: i64,
    ) -> Result<KeysetPage<ArtPieceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM art_pieces \
             WHERE ($1::BIGINT IS NULL OR id > $1) \
               AND ($2::TEXT IS NULL OR mood = $2) \
               AND ($3::TEXT IS NULL OR art_style = $3) \
               AND ($4::TEXT IS NULL OR availability_status = $4) \
             ORDER BY id \
             LIMIT $5"
        );
        let rows = sqlx::query_as::<_, ArtPieceRow>(&query)
            .bind(after)
            .bind(&filter.mood)
            .bind(&filter.art_style)
            .bind(filter.availability_status.map(ArtAvailability::as_str))
            .bind(limit + 1)
            .fetch_all(pool)
            .await?;
        Ok(KeysetPage::from_lookahead(rows, limit, |row| row.id))
    }

    /// Update an art piece. Only non-`None` fields are applied.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateArtPiece,
    ) -> Result<Option<ArtPieceRow>, sqlx::Error> {
        let query = format!(
            "UPDATE art_pieces SET \
                title = COALESCE($2, title), \
                artist = COALESCE($3, artist), \
                description = COALESCE($4, description), \
                price = COALESCE($5, price), \
                medium = COALESCE($6, medium), \
                art_style = COALESCE($7, art_style), \
                mood = COALESCE($8, mood), \
                image_url = COALESCE($9, image_url), \
                availability_status = COALESCE($10, availability_status), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArtPieceRow>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(&input.artist)
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.medium)
            .bind(&input.art_style)
            .bind(&input.mood)
            .bind(&input.image_url)
            .bind(input.availability_status.map(ArtAvailability::as_str))
            .fetch_optional(pool)
            .await
    }

    /// Delete an art piece. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM art_pieces WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
