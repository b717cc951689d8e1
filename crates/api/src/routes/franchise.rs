use axum::routing::get;
use axum::Router;

use crate::handlers::franchise;
use crate::state::AppState;

/// Routes mounted at `/franchise-inquiries`.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(franchise::list).post(franchise::create))
}
