use axum::routing::get;
use axum::Router;

use crate::handlers::art_pieces;
use crate::state::AppState;

/// Routes mounted at `/art-pieces`.
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
        .route("/", get(art_pieces::list).post(art_pieces::create))
        .route(
            "/{id}",
            get(art_pieces::get_by_id)
                .put(art_pieces::update)
                .delete(art_pieces::delete),
        )
}
