//! Handlers for the `/art-pieces` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cafe_core::catalog::{validate_name, validate_price, ArtPiece};
use cafe_core::error::CoreError;
use cafe_core::fetch::Page;
use cafe_core::types::DbId;
use cafe_db::models::art_piece::{CreateArtPiece, UpdateArtPiece};
use cafe_db::repositories::ArtPieceRepo;

use crate::error::{AppError, AppResult};
use crate::query::ArtListParams;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "ArtPiece",
        id,
    })
}

/// GET /api/v1/art-pieces?mood=&style=&availabilityStatus=&pageToken=&limit=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ArtListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = params.to_filter()?;
    let cursor = params.cursor();
    let after = cursor.after()?;
    let page = ArtPieceRepo::list_page(&state.pool, &filter, after, cursor.limit()).await?;

    let next_page_token = page.next_page_token();
    let items: Vec<ArtPiece> = page.rows.into_iter().map(ArtPiece::from).collect();
    tracing::debug!(
        count = items.len(),
        after = ?after,
        has_more = next_page_token.is_some(),
        "Listed art pieces"
    );
    Ok(Json(DataResponse {
        data: Page::new(items, next_page_token),
    }))
}

/// POST /api/v1/art-pieces
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateArtPiece>,
) -> AppResult<impl IntoResponse> {
    validate_name("Title", &input.title)?;
    validate_price(input.price)?;

    let row = ArtPieceRepo::create(&state.pool, &input).await?;
    tracing::info!(id = row.id, title = %row.title, "Art piece created");
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: ArtPiece::from(row),
        }),
    ))
}

/// GET /api/v1/art-pieces/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = ArtPieceRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(DataResponse {
        data: ArtPiece::from(row),
    }))
}

/// PUT /api/v1/art-pieces/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateArtPiece>,
) -> AppResult<impl IntoResponse> {
    if let Some(title) = &input.title {
        validate_name("Title", title)?;
    }
    validate_price(input.price)?;

    let row = ArtPieceRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(id, "Art piece updated");
    Ok(Json(DataResponse {
        data: ArtPiece::from(row),
    }))
}

/// DELETE /api/v1/art-pieces/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    if ArtPieceRepo::delete(&state.pool, id).await? {
        tracing::info!(id, "Art piece deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
