//! Handlers for the `/franchise-inquiries` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use cafe_core::franchise::validate_inquiry;
use cafe_db::models::franchise_inquiry::CreateFranchiseInquiry;
use cafe_db::pagination::{clamp_limit, clamp_offset, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use cafe_db::repositories::FranchiseInquiryRepo;

use crate::error::AppResult;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/franchise-inquiries
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateFranchiseInquiry>,
) -> AppResult<impl IntoResponse> {
    validate_inquiry(&input.name, &input.email, &input.message)?;

    let inquiry = FranchiseInquiryRepo::create(&state.pool, &input).await?;
    tracing::info!(id = inquiry.id, city = ?inquiry.city, "Franchise inquiry received");
    Ok((StatusCode::CREATED, Json(DataResponse { data: inquiry })))
}

/// GET /api/v1/franchise-inquiries?limit=&offset=
///
/// Newest first.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let limit = clamp_limit(params.limit, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE);
    let offset = clamp_offset(params.offset);
    let inquiries = FranchiseInquiryRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: inquiries }))
}
