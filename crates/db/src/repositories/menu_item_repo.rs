//! Repository for the `menu_items` table.

use cafe_core::catalog::Visibility;
use cafe_core::types::DbId;
use sqlx::PgPool;

use crate::models::menu_item::{CreateMenuItem, MenuItemFilter, MenuItemRow, UpdateMenuItem};
use crate::pagination::KeysetPage;

/// Column list for the `menu_items` table.
const COLUMNS: &str = "id, name, description, price, category, item_type, image_url, \
    visibility, is_sold_out, created_at, updated_at";

/// Provides CRUD and keyset listing for menu items.
pub struct MenuItemRepo;

impl MenuItemRepo {
    /// Insert a new menu item. Visibility defaults to `visible`, sold-out to
    /// `false`.
    pub async fn create(pool: &PgPool, input: &CreateMenuItem) -> Result<MenuItemRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO menu_items \
                (name, description, price, category, item_type, image_url, \
                 visibility, is_sold_out) \
             VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'visible'), COALESCE($8, false)) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItemRow>(&query)
            .bind(input.name.trim())
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.item_type)
            .bind(&input.image_url)
            .bind(input.visibility.map(Visibility::as_str))
            .bind(input.is_sold_out)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MenuItemRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM menu_items WHERE id = $1");
        sqlx::query_as::<_, MenuItemRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List up to `limit` items with id greater than `after`, in id order.
    ///
    /// Hidden items are excluded unless `filter.include_hidden` is set.
    pub async fn list_page(
        pool: &PgPool,
        filter: &MenuItemFilter,
        after: Option<DbId>,
        limit: i64,
    ) -> Result<KeysetPage<MenuItemRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM menu_items \
             WHERE ($1::BIGINT IS NULL OR id > $1) \
               AND ($2::TEXT IS NULL OR category = $2) \
               AND ($3::TEXT IS NULL OR item_type = $3) \
               AND ($4 OR visibility <> 'hidden') \
             ORDER BY id \
             LIMIT $5"
        );
        let rows = sqlx::query_as::<_, MenuItemRow>(&query)
            .bind(after)
            .bind(&filter.category)
            .bind(&filter.item_type)
            .bind(filter.include_hidden)
            .bind(limit + 1)
            .fetch_all(pool)
            .await?;
        Ok(KeysetPage::from_lookahead(rows, limit, |row| row.id))
    }

    /// Update a menu item. Only non-`None` fields are applied.
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMenuItem,
    ) -> Result<Option<MenuItemRow>, sqlx::Error> {
        let query = format!(
            "UPDATE menu_items SET \
                name = COALESCE($2, name), \
                description = COALESCE($3, description), \
                price = COALESCE($4, price), \
                category = COALESCE($5, category), \
                item_type = COALESCE($6, item_type), \
                image_url = COALESCE($7, image_url), \
                visibility = COALESCE($8, visibility), \
                is_sold_out = COALESCE($9, is_sold_out), \
                updated_at = now() \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MenuItemRow>(&query)
            .bind(id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.description)
            .bind(input.price)
            .bind(&input.category)
            .bind(&input.item_type)
            .bind(&input.image_url)
            .bind(input.visibility.map(Visibility::as_str))
            .bind(input.is_sold_out)
            .fetch_optional(pool)
            .await
    }

    /// Delete a menu item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
