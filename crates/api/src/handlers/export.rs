//! Spreadsheet download of the whole table.

use axum::extract::State;
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::response::IntoResponse;
use intake_db::xlsx::XLSX_CONTENT_TYPE;

use crate::error::AppResult;
use crate::state::AppState;

/// File name offered to the browser.
pub const EXPORT_FILE_NAME: &str = "product_opportunity_draft.xlsx";

/// GET /export
///
/// Every row of the table as an XLSX workbook. Read-only.
pub async fn download_draft(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let session = state.session.lock().await;
    let bytes = session.store.export_spreadsheet()?;

    tracing::info!(
        rows = session.store.len(),
        size = bytes.len(),
        "Spreadsheet exported",
    );

    Ok((
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILE_NAME}\""),
            ),
        ],
        bytes,
    ))
}
