//! Handlers for the `/menu-items` resource.
//!
//! The public menu lists visible items only; admin screens pass
//! `includeHidden=true`.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cafe_core::catalog::{validate_name, validate_price, MenuItem};
use cafe_core::error::CoreError;
use cafe_core::fetch::Page;
use cafe_core::types::DbId;
use cafe_db::models::menu_item::{CreateMenuItem, UpdateMenuItem};
use cafe_db::repositories::MenuItemRepo;

use crate::error::{AppError, AppResult};
use crate::query::MenuListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "MenuItem",
        id,
    })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/menu-items?category=&type=&includeHidden=&pageToken=&limit=
///
/// One keyset page of menu items in id order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<MenuListParams>,
) -> AppResult<impl IntoResponse> {
    let cursor = params.cursor();
    let after = cursor.after()?;
    let page =
        MenuItemRepo::list_page(&state.pool, &params.to_filter(), after, cursor.limit()).await?;

    let next_page_token = page.next_page_token();
    let items: Vec<MenuItem> = page.rows.into_iter().map(MenuItem::from).collect();
    tracing::debug!(
        count = items.len(),
        after = ?after,
        has_more = next_page_token.is_some(),
        "Listed menu items"
    );
    Ok(Json(DataResponse {
        data: Page::new(items, next_page_token),
    }))
}

/// POST /api/v1/menu-items
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateMenuItem>,
) -> AppResult<impl IntoResponse> {
    validate_name("Name", &input.name)?;
    validate_price(input.price)?;

    let row = MenuItemRepo::create(&state.pool, &input).await?;
    tracing::info!(id = row.id, name = %row.name, "Menu item created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: MenuItem::from(row),
        }),
    ))
}

/// GET /api/v1/menu-items/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = MenuItemRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: MenuItem::from(row),
    }))
}

/// PUT /api/v1/menu-items/{id}
///
/// Patch semantics: omitted fields keep their stored value.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateMenuItem>,
) -> AppResult<impl IntoResponse> {
    if let Some(name) = &input.name {
        validate_name("Name", name)?;
    }
    validate_price(input.price)?;

    let row = MenuItemRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Menu item updated");
    Ok(Json(DataResponse {
        data: MenuItem::from(row),
    }))
}

/// DELETE /api/v1/menu-items/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if MenuItemRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Menu item deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
