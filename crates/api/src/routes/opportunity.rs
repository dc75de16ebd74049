//! Route definitions for the two screens and their actions.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{export, navigation, opportunity};
use crate::state::AppState;

/// Screen and action routes, mounted at the root.
///
/// ```text
/// GET    /                            -> index (list or detail, per ?opportunity_id=)
/// POST   /back                        -> back
/// POST   /opportunities               -> create_opportunity
/// POST   /opportunities/{id}          -> save_opportunity
/// POST   /opportunities/{id}/delete   -> delete_opportunity
/// GET    /export                      -> download_draft
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(navigation::index))
        .route("/back", post(navigation::back))
        .route("/opportunities", post(opportunity::create_opportunity))
        .route("/opportunities/{id}", post(opportunity::save_opportunity))
        .route(
            "/opportunities/{id}/delete",
            post(opportunity::delete_opportunity),
        )
        .route("/export", get(export::download_draft))
}
