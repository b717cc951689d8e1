use axum::routing::get;
use axum::Router;

use crate::handlers::menu_items;
use crate::state::AppState;

/// Routes mounted at `/menu-items`.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(menu_items::list).post(menu_items::create))
        .route(
            "/{id}",
            get(menu_items::get_by_id)
                .put(menu_items::update)
                .delete(menu_items::delete),
        )
}
