//! CSV builder and parser for the persisted table.
//!
//! Quoting follows RFC 4180: a field containing a comma, quote, CR or LF is
//! wrapped in quotes with embedded quotes doubled. Quoted fields may span
//! lines, so multi-line text areas survive a round trip.

use std::borrow::Cow;

use crate::error::StoreError;

/// Escape a value for CSV.
pub fn csv_escape(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(value)
    }
}

/// Build a CSV document: one header line, then one line per row.
pub fn build_csv<'a, R>(headers: &[&str], rows: R) -> String
where
    R: IntoIterator<Item = Vec<&'a str>>,
{
    let mut out = String::new();
    push_line(&mut out, headers.iter().copied());
    for row in rows {
        push_line(&mut out, row);
    }
    out
}

fn push_line<'a>(out: &mut String, values: impl IntoIterator<Item = &'a str>) {
    for (i, value) in values.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&csv_escape(value));
    }
    out.push('\n');
}

/// Parse a CSV document into records of raw field values.
///
/// The header line is returned as the first record. Blank lines are skipped.
/// An unterminated quoted field is an error naming the line it started on.
pub fn parse_csv(text: &str) -> Result<Vec<Vec<String>>, StoreError> {
    let mut records = Vec::new();
    let mut record = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut field_started = false;
    let mut line = 1;
    let mut quote_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    // Escaped quote.
                    field.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push(ch);
                }
                _ => field.push(ch),
            }
            continue;
        }

        match ch {
            '"' if !field_started => {
                in_quotes = true;
                field_started = true;
                quote_line = line;
            }
            ',' => {
                record.push(std::mem::take(&mut field));
                field_started = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' | '\r' => {
                line += 1;
                end_record(&mut records, &mut record, &mut field, field_started);
                field_started = false;
            }
            _ => {
                field.push(ch);
                field_started = true;
            }
        }
    }

    if in_quotes {
        return Err(StoreError::Csv {
            line: quote_line,
            message: "unterminated quoted field".into(),
        });
    }
    end_record(&mut records, &mut record, &mut field, field_started);

    Ok(records)
}

fn end_record(
    records: &mut Vec<Vec<String>>,
    record: &mut Vec<String>,
    field: &mut String,
    field_started: bool,
) {
    if record.is_empty() && !field_started {
        // Blank line.
        field.clear();
        return;
    }
    record.push(std::mem::take(field));
    records.push(std::mem::take(record));
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_leaves_plain_values_borrowed() {
        assert!(matches!(csv_escape("R&D"), Cow::Borrowed("R&D")));
    }

    #[test]
    fn escape_quotes_special_characters() {
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_escape("line1\nline2"), "\"line1\nline2\"");
    }

    #[test]
    fn build_writes_header_and_rows() {
        let csv = build_csv(&["id", "name"], vec![vec!["1", "a, b"], vec!["2", ""]]);
        assert_eq!(csv, "id,name\n1,\"a, b\"\n2,\n");
    }

    #[test]
    fn parse_handles_quotes_and_multiline_fields() {
        let text = "id,notes\n1,\"first\nsecond\"\n2,\"He said \"\"ok\"\"\"\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[1], vec!["1", "first\nsecond"]);
        assert_eq!(records[2], vec!["2", "He said \"ok\""]);
    }

    #[test]
    fn parse_accepts_crlf_and_skips_blank_lines() {
        let records = parse_csv("a,b\r\n1,2\r\n\r\n3,4").unwrap();
        assert_eq!(
            records,
            vec![vec!["a", "b"], vec!["1", "2"], vec!["3", "4"]]
        );
    }

    #[test]
    fn parse_keeps_trailing_empty_fields() {
        let records = parse_csv("a,b,c\n1,,\n").unwrap();
        assert_eq!(records[1], vec!["1", "", ""]);
    }

    #[test]
    fn parse_empty_input_has_no_records() {
        assert!(parse_csv("").unwrap().is_empty());
    }

    #[test]
    fn unterminated_quote_reports_start_line() {
        let err = parse_csv("a\n\"open\nstill open").unwrap_err();
        assert!(matches!(err, StoreError::Csv { line: 2, .. }));
    }

    #[test]
    fn round_trip_preserves_awkward_values() {
        let rows = vec![
            vec!["OP-2026-001", "Comma, inside", "Quote \" inside"],
            vec!["OP-2026-002", "Multi\nline\r\ntext", ""],
        ];
        let csv = build_csv(&["id", "a", "b"], rows.clone());
        let parsed = parse_csv(&csv).unwrap();
        assert_eq!(parsed[0], vec!["id", "a", "b"]);
        assert_eq!(parsed[1..], rows[..]);
    }
}
