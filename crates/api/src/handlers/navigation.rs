//! Handlers that decide which screen is shown.
//!
//! The `opportunity_id` query parameter is reconciled against the store on
//! every request; nothing else carries the selection between requests.

use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use intake_core::error::CoreError;
use intake_core::navigation::{reconcile, Reconciled};
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views;

/// Query parameters of the root page (`?opportunity_id=`).
#[derive(Debug, Deserialize)]
pub struct NavParams {
    pub opportunity_id: Option<String>,
}

/// GET /
///
/// List view without a parameter, detail view for a known id. An unknown id
/// redirects to `/`, which clears the parameter.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<NavParams>,
) -> AppResult<Response> {
    let session = state.session.lock().await;

    match reconcile(params.opportunity_id.as_deref(), |id| {
        session.store.contains(id)
    }) {
        Reconciled::List => Ok(Html(views::list::render(session.store.list())).into_response()),
        Reconciled::Stale => {
            tracing::debug!(
                opportunity_id = ?params.opportunity_id,
                "Selected opportunity no longer exists, falling back to list",
            );
            Ok(Redirect::to("/").into_response())
        }
        Reconciled::Detail(id) => {
            let op = session.store.find(&id).ok_or_else(|| {
                AppError::Core(CoreError::NotFound {
                    entity: "Opportunity",
                    id: id.clone(),
                })
            })?;
            Ok(Html(views::detail::render(op, session.view_key, None)).into_response())
        }
    }
}

/// POST /back
///
/// Return to the list. Bumps the view key so forms left open for the
/// previous record are treated as stale.
pub async fn back(State(state): State<AppState>) -> Redirect {
    let mut session = state.session.lock().await;
    let view_key = session.view_key.bump();
    tracing::debug!(%view_key, "Returned to dashboard");

    Redirect::to("/")
}
