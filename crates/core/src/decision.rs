//! The decision workflow: moving a draft opportunity to a terminal status.
//!
//! The decision itself is transient form input and is never stored. Only the
//! resulting status is written back by the caller.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::opportunity::Opportunity;
use crate::status::{validate_transition, Status};
use crate::validation::validate_required;

pub const DECISION_ACCEPT: &str = "Accept";
pub const DECISION_REJECT: &str = "Reject";
pub const DECISION_PARK: &str = "Park";

/// Options of the decision selector, the empty entry first.
pub const DECISION_OPTIONS: &[&str] = &["", DECISION_ACCEPT, DECISION_REJECT, DECISION_PARK];

pub const NO_DECISION_MESSAGE: &str = "Please select a decision";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Accept,
    Reject,
    Park,
}

impl Decision {
    /// Parse the selector value. The empty option means "no decision".
    pub fn from_form(value: &str) -> Result<Option<Self>, CoreError> {
        match value.trim() {
            "" => Ok(None),
            DECISION_ACCEPT => Ok(Some(Self::Accept)),
            DECISION_REJECT => Ok(Some(Self::Reject)),
            DECISION_PARK => Ok(Some(Self::Park)),
            other => Err(CoreError::Validation(format!(
                "Invalid decision '{other}'. Must be one of: Accept, Reject, Park"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Accept => DECISION_ACCEPT,
            Self::Reject => DECISION_REJECT,
            Self::Park => DECISION_PARK,
        }
    }

    /// Status the decision moves a record to.
    pub fn target_status(self) -> Status {
        match self {
            Self::Accept => Status::Eligible,
            Self::Reject => Status::Rejected,
            Self::Park => Status::Parked,
        }
    }

    fn feedback(self) -> Feedback {
        match self {
            Self::Accept => Feedback {
                level: FeedbackLevel::Success,
                message: "Accepted: moved to Feasibility / Evaluation stage",
            },
            Self::Reject => Feedback {
                level: FeedbackLevel::Warning,
                message: "Rejected: opportunity archived",
            },
            Self::Park => Feedback {
                level: FeedbackLevel::Info,
                message: "Parked: opportunity set to inactive",
            },
        }
    }
}

/// Severity of the inline message shown after a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackLevel {
    Success,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub level: FeedbackLevel,
    pub message: &'static str,
}

/// A decision that passed every check; the caller persists `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub status: Status,
    pub feedback: Feedback,
}

/// Evaluate a decision against the current record without mutating it.
///
/// Checks run in this order:
/// 1. an already decided record is refused with [`CoreError::Conflict`];
/// 2. blank required fields are reported with [`CoreError::MissingFields`];
/// 3. no decision selected is a [`CoreError::Validation`].
pub fn evaluate(op: &Opportunity, decision: Option<Decision>) -> Result<DecisionOutcome, CoreError> {
    if op.is_decided() {
        return Err(CoreError::Conflict(format!(
            "Opportunity already decided: {}",
            op.status
        )));
    }

    validate_required(op)?;

    let decision =
        decision.ok_or_else(|| CoreError::Validation(NO_DECISION_MESSAGE.to_string()))?;
    let status = decision.target_status();
    validate_transition(&op.status, status)?;

    Ok(DecisionOutcome {
        status,
        feedback: decision.feedback(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
