pub mod art_pieces;
pub mod franchise;
pub mod health;
pub mod menu_items;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /menu-items                     list (paged), create
/// /menu-items/{id}                get, update, delete
///
/// /art-pieces                     list (paged), create
/// /art-pieces/{id}                get, update, delete
///
/// /franchise-inquiries            list, submit
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/menu-items", menu_items::router())
        .nest("/art-pieces", art_pieces::router())
        .nest("/franchise-inquiries", franchise::router())
}
