//! Summary list screen.

use intake_core::opportunity::{Field, Opportunity};

use super::{detail_url, html_escape, layout};

/// Render the list of all opportunities in store order.
pub fn render(rows: &[Opportunity]) -> String {
    let header: String = Field::SUMMARY
        .iter()
        .map(|f| format!("<th>{}</th>", html_escape(f.header())))
        .collect();

    let body: String = if rows.is_empty() {
        format!(
            r#"<tr><td class="empty" colspan="{}">No opportunities yet. Use "New Opportunity" to add one.</td></tr>"#,
            Field::SUMMARY.len()
        )
    } else {
        rows.iter().map(render_row).collect()
    };

    layout(&format!(
        r#"<h2>Opportunity Summary</h2>
<table>
<thead><tr>{header}</tr></thead>
<tbody>
{body}</tbody>
</table>
<div class="toolbar">
<form method="post" action="/opportunities"><button type="submit">New Opportunity</button></form>
</div>"#
    ))
}

fn render_row(op: &Opportunity) -> String {
    let cells: String = Field::SUMMARY
        .iter()
        .map(|&field| match field {
            Field::Id => format!(
                r#"<td><a href="{}" title="Click to open details">{}</a></td>"#,
                html_escape(&detail_url(&op.id)),
                html_escape(&op.id)
            ),
            other => format!("<td>{}</td>", html_escape(op.get(other))),
        })
        .collect();
    format!("<tr>{cells}</tr>\n")
}
