//! Handlers that change opportunity records: create, edit, decide, delete.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use intake_core::decision::{self, Decision};
use intake_core::navigation::ViewKey;
use intake_core::opportunity::{validate_option, Field};
use serde::Deserialize;

use crate::error::{classify_core_error, AppError, AppResult};
use crate::state::AppState;
use crate::views::{self, detail_url, Flash};

/// Shown when a decision arrives from a page rendered before the last
/// return to the list.
pub const STALE_FORM_MESSAGE: &str = "This form is out of date, please resubmit";

/// What a detail form submission asks for besides saving its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormAction {
    Save,
    Decide,
}

/// Body of `POST /opportunities/{id}`.
///
/// Absent fields are left unchanged. `decision` is transient and never
/// stored.
#[derive(Debug, Default, Deserialize)]
pub struct DetailForm {
    pub view_key: Option<u64>,
    pub title: Option<String>,
    pub source: Option<String>,
    pub target_setting: Option<String>,
    pub geography: Option<String>,
    pub urgency: Option<String>,
    pub priority: Option<String>,
    pub submitted_by: Option<String>,
    pub problem_statement: Option<String>,
    pub proposed_product: Option<String>,
    pub intended_use: Option<String>,
    pub comments: Option<String>,
    #[serde(default)]
    pub decision: String,
    pub action: Option<FormAction>,
}

impl DetailForm {
    /// The field edits carried by this submission.
    fn edits(&self) -> Vec<(Field, String)> {
        [
            (Field::Title, &self.title),
            (Field::Source, &self.source),
            (Field::TargetSetting, &self.target_setting),
            (Field::Geography, &self.geography),
            (Field::Urgency, &self.urgency),
            (Field::Priority, &self.priority),
            (Field::SubmittedBy, &self.submitted_by),
            (Field::ProblemStatement, &self.problem_statement),
            (Field::ProposedProduct, &self.proposed_product),
            (Field::IntendedUse, &self.intended_use),
            (Field::Comments, &self.comments),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.clone().map(|v| (field, v)))
        .collect()
    }
}

/// POST /opportunities
///
/// Create a draft with default values and open it.
pub async fn create_opportunity(State(state): State<AppState>) -> AppResult<Redirect> {
    let mut session = state.session.lock().await;
    let today = chrono::Local::now().date_naive();
    let id = session.store.create(today)?;

    Ok(Redirect::to(&detail_url(&id)))
}

/// POST /opportunities/{id}
///
/// Write the submitted field values through to the store, then run the
/// requested action. Saving redirects back to the detail view; a decision
/// renders the detail view with inline feedback.
pub async fn save_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<DetailForm>,
) -> AppResult<Response> {
    let mut session = state.session.lock().await;

    if !session.store.contains(&id) {
        tracing::debug!(opportunity_id = %id, "Edit for unknown opportunity, falling back to list");
        return Ok(Redirect::to("/").into_response());
    }

    let fresh = form
        .view_key
        .is_some_and(|k| session.view_key.accepts(ViewKey(k)));
    if !fresh {
        tracing::debug!(
            opportunity_id = %id,
            submitted = ?form.view_key,
            current = %session.view_key,
            "Discarding edits from a stale form",
        );
        if form.action == Some(FormAction::Decide) {
            let op = session.store.find(&id).ok_or_else(|| {
                AppError::InternalError(format!("Opportunity {id} vanished"))
            })?;
            let flash = Flash::error(STALE_FORM_MESSAGE);
            let page = views::detail::render(op, session.view_key, Some(&flash));
            return Ok((StatusCode::CONFLICT, Html(page)).into_response());
        }
        return Ok(Redirect::to(&detail_url(&id)).into_response());
    }

    let edits = form.edits();
    for (field, value) in &edits {
        validate_option(*field, value)?;
    }
    session.store.update_fields(&id, edits)?;

    match form.action.unwrap_or(FormAction::Save) {
        FormAction::Save => Ok(Redirect::to(&detail_url(&id)).into_response()),
        FormAction::Decide => {
            let Some(op) = session.store.find(&id) else {
                return Ok(Redirect::to("/").into_response());
            };

            let outcome =
                Decision::from_form(&form.decision).and_then(|d| decision::evaluate(op, d));

            let (status, flash) = match outcome {
                Ok(outcome) => {
                    session.store.set_status(&id, outcome.status)?;
                    (StatusCode::OK, Flash::from(outcome.feedback))
                }
                Err(err) => {
                    let (status, message) = classify_core_error(&err);
                    tracing::info!(opportunity_id = %id, reason = %message, "Decision refused");
                    (status, Flash::error(message))
                }
            };

            let op = session.store.find(&id).ok_or_else(|| {
                AppError::InternalError(format!("Opportunity {id} vanished"))
            })?;
            let page = views::detail::render(op, session.view_key, Some(&flash));
            Ok((status, Html(page)).into_response())
        }
    }
}

/// POST /opportunities/{id}/delete
///
/// Remove the record and return to the list.
pub async fn delete_opportunity(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Redirect> {
    let mut session = state.session.lock().await;

    if !session.store.delete(&id)? {
        tracing::debug!(opportunity_id = %id, "Delete for unknown opportunity");
    }
    session.view_key.bump();

    Ok(Redirect::to("/"))
}
