//! Server-rendered HTML for the two screens (list and detail) plus the
//! shared page layout.
//!
//! Markup is assembled with `format!`; every piece of record data passes
//! through [`html_escape`] before it reaches the page.

pub mod detail;
pub mod list;

use axum::http::StatusCode;
use intake_core::decision::{Feedback, FeedbackLevel};
use intake_core::navigation::QUERY_PARAM;

/// Browser title of every page.
pub const PAGE_TITLE: &str = "Product Opportunity Intake";

/// Heading shown above both screens.
pub const APP_HEADING: &str = "Product Opportunity Intake Window";

const STYLE: &str = "\
body{font-family:system-ui,sans-serif;margin:2rem auto;max-width:72rem;padding:0 1rem;color:#1f2933}\
table{border-collapse:collapse;width:100%}\
th,td{border-bottom:1px solid #d9e2ec;padding:.4rem .6rem;text-align:left;vertical-align:top}\
label{display:block;font-weight:600;margin-top:.8rem}\
input[type=text],select,textarea{width:100%;padding:.35rem;box-sizing:border-box}\
textarea{min-height:5rem}\
.toolbar{display:flex;gap:1rem;align-items:center;margin-top:1.5rem}\
.header{display:flex;justify-content:space-between;align-items:center}\
.flash{padding:.6rem .8rem;margin:1rem 0;border-radius:4px}\
.flash.success{background:#e3f9e5}.flash.warning{background:#fffbea}\
.flash.info{background:#e6f6ff}.flash.error{background:#ffe3e3}\
.empty{color:#627d98;font-style:italic}";

/// Escape text for HTML content and attribute values.
pub fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Percent-encode a query parameter value.
pub fn query_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(char::from(byte));
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}

/// URL that selects `id` and opens the detail view.
pub fn detail_url(id: &str) -> String {
    format!("/?{QUERY_PARAM}={}", query_escape(id))
}

/// Inline message shown at the top of the detail form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub class: &'static str,
    pub message: String,
}

impl Flash {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            class: "error",
            message: message.into(),
        }
    }

    fn render(&self) -> String {
        format!(
            r#"<div class="flash {}" role="status">{}</div>"#,
            self.class,
            html_escape(&self.message)
        )
    }
}

impl From<Feedback> for Flash {
    fn from(feedback: Feedback) -> Self {
        let class = match feedback.level {
            FeedbackLevel::Success => "success",
            FeedbackLevel::Warning => "warning",
            FeedbackLevel::Info => "info",
        };
        Self {
            class,
            message: feedback.message.to_string(),
        }
    }
}

/// Wrap a screen body in the shared page chrome.
pub fn layout(body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{PAGE_TITLE}</title>
<style>{STYLE}</style>
</head>
<body>
<h1>{APP_HEADING}</h1>
{body}
</body>
</html>"#
    )
}

/// Page rendered for errors that are not shown inline.
pub fn error_page(status: StatusCode, message: &str) -> String {
    layout(&format!(
        r#"<h2>{}</h2>
<div class="flash error" role="alert">{}</div>
<p><a href="/">Back to Dashboard</a></p>"#,
        status.as_u16(),
        html_escape(message)
    ))
}
