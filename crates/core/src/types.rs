/// Opportunity ids are text of the form `OP-2026-001`.
pub type OpportunityId = String;

/// Submission dates are calendar dates without a time zone.
pub type Date = chrono::NaiveDate;

/// ISO format used for dates stored in the table.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
