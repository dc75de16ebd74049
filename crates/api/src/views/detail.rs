//! Detail / edit screen for one opportunity.
//!
//! Every editable control submits the form when it changes, so edits reach
//! the store on each interaction. Control ids carry the view key so a page
//! opened after returning to the list never reuses stale widget state.

use intake_core::decision::DECISION_OPTIONS;
use intake_core::navigation::ViewKey;
use intake_core::opportunity::{Field, Opportunity};

use super::{html_escape, layout, query_escape, Flash};

/// Attribute that writes an edit through as soon as the control changes.
const AUTOSAVE: &str = r#"onchange="this.form.requestSubmit()""#;

const CORE_DETAILS: [Field; 6] = [
    Field::Title,
    Field::Source,
    Field::TargetSetting,
    Field::Geography,
    Field::Urgency,
    Field::Priority,
];

const SUBMISSION_DETAILS: [Field; 5] = [
    Field::SubmittedBy,
    Field::ProblemStatement,
    Field::ProposedProduct,
    Field::IntendedUse,
    Field::Comments,
];

/// Render the detail screen. The decision selector always starts empty.
pub fn render(op: &Opportunity, view_key: ViewKey, flash: Option<&Flash>) -> String {
    let id = html_escape(&op.id);
    let path = format!("/opportunities/{}", query_escape(&op.id));

    let core: String = CORE_DETAILS.iter().map(|&f| control(op, f, view_key)).collect();
    let submission: String = SUBMISSION_DETAILS
        .iter()
        .map(|&f| control(op, f, view_key))
        .collect();
    let flash = flash.map(Flash::render).unwrap_or_default();

    layout(&format!(
        r#"<div class="header">
<h2>Detailed View: {id}</h2>
<form method="post" action="{path}/delete"><button type="submit" title="Permanently delete this opportunity">Delete</button></form>
</div>
<dl>
<dt>{id_label}</dt><dd>{id}</dd>
<dt>{date_label}</dt><dd>{date}</dd>
<dt>{status_label}</dt><dd id="status">{status}</dd>
</dl>
{flash}
<form id="detail-form" method="post" action="{path}" autocomplete="off">
<input type="hidden" name="view_key" value="{view_key}">
<h3>Core Details</h3>
{core}
<h3>Submission Details</h3>
{submission}
<h3>Decision</h3>
{decision}
</form>
<div class="toolbar">
<a href="/export" download="product_opportunity_draft.xlsx">Download Draft (Excel)</a>
<form method="post" action="/back"><button type="submit">Back to Dashboard</button></form>
</div>"#,
        id_label = Field::Id.label(),
        date_label = Field::SubmissionDate.label(),
        date = html_escape(&op.submission_date),
        status_label = Field::Status.label(),
        status = html_escape(&op.status),
        decision = decision_section(op, view_key),
    ))
}

fn control(op: &Opportunity, field: Field, view_key: ViewKey) -> String {
    let key = field.key();
    let dom_id = format!("f{view_key}-{key}");
    let marker = if field.is_required() { " *" } else { "" };
    let label = format!(
        r#"<label for="{dom_id}">{}{marker}</label>"#,
        html_escape(field.form_label())
    );

    let input = if let Some(options) = field.options() {
        let current = op.display_value(field);
        let opts: String = options
            .iter()
            .map(|&option| option_tag(option, option == current))
            .collect();
        format!(r#"<select id="{dom_id}" name="{key}" {AUTOSAVE}>{opts}</select>"#)
    } else if field.is_long_text() {
        format!(
            // The parser drops one newline right after the start tag.
            r#"<textarea id="{dom_id}" name="{key}" {AUTOSAVE}>
{}</textarea>"#,
            html_escape(op.get(field))
        )
    } else {
        format!(
            r#"<input type="text" id="{dom_id}" name="{key}" value="{}" {AUTOSAVE}>"#,
            html_escape(op.get(field))
        )
    };

    format!("{label}\n{input}\n")
}

fn option_tag(option: &str, selected: bool) -> String {
    let escaped = html_escape(option);
    let selected = if selected { " selected" } else { "" };
    format!(r#"<option value="{escaped}"{selected}>{escaped}</option>"#)
}

fn decision_section(op: &Opportunity, view_key: ViewKey) -> String {
    if op.is_decided() {
        return format!(
            "<p>This opportunity has been decided: {}.</p>",
            html_escape(&op.status)
        );
    }

    let dom_id = format!("f{view_key}-decision");
    let opts: String = DECISION_OPTIONS
        .iter()
        .map(|&option| option_tag(option, false))
        .collect();
    format!(
        r#"<label for="{dom_id}">Decision</label>
<select id="{dom_id}" name="decision">{opts}</select>
<div class="toolbar"><button type="submit" name="action" value="decide">Submit Decision</button></div>"#
    )
}
