//! The opportunity row, its column schema and the closed option sets.
//!
//! The table is deliberately stringly typed: every column is a text scalar so
//! a hand-edited file always loads. Typed views (status, option coercion) are
//! layered on top through [`Field`] and [`Opportunity`] accessors.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::Status;
use crate::types::{Date, OpportunityId, DATE_FORMAT};

// ---------------------------------------------------------------------------
// Option sets
// ---------------------------------------------------------------------------

/// Where the opportunity came from.
pub const SOURCE_OPTIONS: &[&str] = &[
    "Tender",
    "R&D",
    "Licensing",
    "Market Feedback",
    "Strategic Partner",
];

/// Source used for new records and for display of invalid stored values.
pub const DEFAULT_SOURCE: &str = "R&D";

/// Setting the proposed product targets.
pub const TARGET_SETTING_OPTIONS: &[&str] = &["Point of Care", "Lab", "Hospital", "Field"];

pub const URGENCY_OPTIONS: &[&str] = &["Low", "Medium", "High"];

pub const DEFAULT_URGENCY: &str = "Low";

pub const PRIORITY_OPTIONS: &[&str] = &["P1", "P2", "P3"];

pub const DEFAULT_PRIORITY: &str = "P3";

// ---------------------------------------------------------------------------
// Field schema
// ---------------------------------------------------------------------------

/// One column of the opportunity table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Title,
    Source,
    TargetSetting,
    Geography,
    Urgency,
    Priority,
    SubmissionDate,
    Status,
    SubmittedBy,
    ProblemStatement,
    ProposedProduct,
    IntendedUse,
    Comments,
}

impl Field {
    /// Every column, in file order.
    pub const ALL: [Field; 14] = [
        Field::Id,
        Field::Title,
        Field::Source,
        Field::TargetSetting,
        Field::Geography,
        Field::Urgency,
        Field::Priority,
        Field::SubmissionDate,
        Field::Status,
        Field::SubmittedBy,
        Field::ProblemStatement,
        Field::ProposedProduct,
        Field::IntendedUse,
        Field::Comments,
    ];

    /// Columns shown in the summary list.
    pub const SUMMARY: [Field; 9] = [
        Field::Id,
        Field::Title,
        Field::Source,
        Field::TargetSetting,
        Field::Geography,
        Field::Urgency,
        Field::Priority,
        Field::SubmissionDate,
        Field::Status,
    ];

    /// Fields that must be non-blank before a decision can be submitted,
    /// in the order they are reported.
    pub const REQUIRED: [Field; 7] = [
        Field::Title,
        Field::Geography,
        Field::SubmittedBy,
        Field::ProblemStatement,
        Field::ProposedProduct,
        Field::IntendedUse,
        Field::Comments,
    ];

    /// Column header in the persisted file and the export.
    pub fn header(self) -> &'static str {
        match self {
            Self::Id => "Opportunity ID",
            Self::Title => "Title",
            Self::Source => "Source",
            Self::TargetSetting => "Target Setting",
            Self::Geography => "Geography",
            Self::Urgency => "Urgency",
            Self::Priority => "Priority",
            Self::SubmissionDate => "Submission Date",
            Self::Status => "Status",
            Self::SubmittedBy => "Submitted by",
            Self::ProblemStatement => "Problem Statement",
            Self::ProposedProduct => "Proposed Product",
            Self::IntendedUse => "Intended Use",
            Self::Comments => "Comments",
        }
    }

    /// Machine-readable name used for form controls.
    pub fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Source => "source",
            Self::TargetSetting => "target_setting",
            Self::Geography => "geography",
            Self::Urgency => "urgency",
            Self::Priority => "priority",
            Self::SubmissionDate => "submission_date",
            Self::Status => "status",
            Self::SubmittedBy => "submitted_by",
            Self::ProblemStatement => "problem_statement",
            Self::ProposedProduct => "proposed_product",
            Self::IntendedUse => "intended_use",
            Self::Comments => "comments",
        }
    }

    /// Short human-readable name, used in validation messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::SubmittedBy => "Submitted By",
            other => other.header(),
        }
    }

    /// Label shown next to the control in the detail form.
    pub fn form_label(self) -> &'static str {
        match self {
            Self::Comments => "Expected Timeline Driver / Comments",
            other => other.label(),
        }
    }

    /// Look a column up by its file header.
    pub fn from_header(header: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.header() == header)
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    /// Whether the field can be changed through the edit form.
    ///
    /// The id is immutable, the submission date is fixed at creation and the
    /// status only moves through the decision workflow.
    pub fn is_editable(self) -> bool {
        !matches!(self, Self::Id | Self::SubmissionDate | Self::Status)
    }

    /// Whether the field is rendered as a multi-line text area.
    pub fn is_long_text(self) -> bool {
        matches!(
            self,
            Self::ProblemStatement | Self::ProposedProduct | Self::IntendedUse | Self::Comments
        )
    }

    /// The closed option set for enum fields.
    pub fn options(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Source => Some(SOURCE_OPTIONS),
            Self::TargetSetting => Some(TARGET_SETTING_OPTIONS),
            Self::Urgency => Some(URGENCY_OPTIONS),
            Self::Priority => Some(PRIORITY_OPTIONS),
            _ => None,
        }
    }

    /// The option shown when the stored value is not in the option set.
    pub fn default_option(self) -> Option<&'static str> {
        match self {
            Self::Source => Some(DEFAULT_SOURCE),
            Self::TargetSetting => TARGET_SETTING_OPTIONS.first().copied(),
            Self::Urgency => Some(DEFAULT_URGENCY),
            Self::Priority => Some(DEFAULT_PRIORITY),
            _ => None,
        }
    }
}

/// Map a stored value onto the field's option set.
///
/// Values inside the set are returned unchanged; anything else (including an
/// empty cell) becomes the field's default option. Non-enum fields pass
/// through untouched.
pub fn coerce_option(field: Field, value: &str) -> &str {
    match (field.options(), field.default_option()) {
        (Some(options), Some(default)) if !options.contains(&value) => default,
        _ => value,
    }
}

/// Reject a value outside the field's option set.
///
/// Stored values are coerced for display only; values written through the
/// edit form must already be valid.
pub fn validate_option(field: Field, value: &str) -> Result<(), CoreError> {
    match field.options() {
        Some(options) if !options.contains(&value) => Err(CoreError::Validation(format!(
            "Invalid {} '{value}'. Must be one of: {}",
            field.label(),
            options.join(", ")
        ))),
        _ => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Opportunity row
// ---------------------------------------------------------------------------

/// One row of the opportunity table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opportunity {
    pub id: OpportunityId,
    pub title: String,
    pub source: String,
    pub target_setting: String,
    pub geography: String,
    pub urgency: String,
    pub priority: String,
    pub submission_date: String,
    pub status: String,
    pub submitted_by: String,
    pub problem_statement: String,
    pub proposed_product: String,
    pub intended_use: String,
    pub comments: String,
}

impl Opportunity {
    /// A freshly created record with the creation defaults applied.
    pub fn draft(id: OpportunityId, today: Date) -> Self {
        Self {
            id,
            source: DEFAULT_SOURCE.to_string(),
            urgency: DEFAULT_URGENCY.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            submission_date: today.format(DATE_FORMAT).to_string(),
            status: Status::Draft.as_str().to_string(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Id => &self.id,
            Field::Title => &self.title,
            Field::Source => &self.source,
            Field::TargetSetting => &self.target_setting,
            Field::Geography => &self.geography,
            Field::Urgency => &self.urgency,
            Field::Priority => &self.priority,
            Field::SubmissionDate => &self.submission_date,
            Field::Status => &self.status,
            Field::SubmittedBy => &self.submitted_by,
            Field::ProblemStatement => &self.problem_statement,
            Field::ProposedProduct => &self.proposed_product,
            Field::IntendedUse => &self.intended_use,
            Field::Comments => &self.comments,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Id => &mut self.id,
            Field::Title => &mut self.title,
            Field::Source => &mut self.source,
            Field::TargetSetting => &mut self.target_setting,
            Field::Geography => &mut self.geography,
            Field::Urgency => &mut self.urgency,
            Field::Priority => &mut self.priority,
            Field::SubmissionDate => &mut self.submission_date,
            Field::Status => &mut self.status,
            Field::SubmittedBy => &mut self.submitted_by,
            Field::ProblemStatement => &mut self.problem_statement,
            Field::ProposedProduct => &mut self.proposed_product,
            Field::IntendedUse => &mut self.intended_use,
            Field::Comments => &mut self.comments,
        };
        *slot = value;
    }

    /// The value to show for `field`, with enum fields coerced to their
    /// option set. The stored value is left untouched.
    pub fn display_value(&self, field: Field) -> &str {
        coerce_option(field, self.get(field))
    }

    /// Parsed status, `None` if the stored text is not a known status.
    pub fn status(&self) -> Option<Status> {
        Status::from_str_db(&self.status).ok()
    }

    pub fn is_decided(&self) -> bool {
        self.status().is_some_and(Status::is_terminal)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
