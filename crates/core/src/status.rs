//! Opportunity status values and transition rules.
//!
//! `Draft` is assigned at creation. A submitted decision moves the record to
//! one of three terminal statuses; nothing moves it further.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Initial status for a newly created opportunity.
pub const STATUS_DRAFT: &str = "Draft";
/// Accepted: handed on to the next product lifecycle stage.
pub const STATUS_ELIGIBLE: &str = "Eligible for next PLM stage";
/// Rejected and archived.
pub const STATUS_REJECTED: &str = "Rejected (Archived)";
/// Parked as inactive.
pub const STATUS_PARKED: &str = "Inactive (Parked)";

/// All valid status strings.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_DRAFT,
    STATUS_ELIGIBLE,
    STATUS_REJECTED,
    STATUS_PARKED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Draft,
    Eligible,
    Rejected,
    Parked,
}

impl Status {
    /// Parse a status string as stored in the table.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            STATUS_DRAFT => Ok(Self::Draft),
            STATUS_ELIGIBLE => Ok(Self::Eligible),
            STATUS_REJECTED => Ok(Self::Rejected),
            STATUS_PARKED => Ok(Self::Parked),
            _ => Err(CoreError::Validation(format!(
                "Invalid status '{s}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }

    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Eligible => STATUS_ELIGIBLE,
            Self::Rejected => STATUS_REJECTED,
            Self::Parked => STATUS_PARKED,
        }
    }

    /// Terminal statuses expose no further transition.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Draft)
    }

    /// Statuses this status may move to.
    pub fn valid_transitions(self) -> &'static [Status] {
        match self {
            Self::Draft => &[Self::Eligible, Self::Rejected, Self::Parked],
            Self::Eligible | Self::Rejected | Self::Parked => &[],
        }
    }

    pub fn can_transition(self, next: Status) -> bool {
        self.valid_transitions().contains(&next)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validate that moving from `current` to `next` is allowed.
///
/// A stored status that does not parse is treated as `Draft`: it has never
/// been through a decision, so it must still be decidable.
pub fn validate_transition(current: &str, next: Status) -> Result<(), CoreError> {
    let from = Status::from_str_db(current).unwrap_or(Status::Draft);
    if from.can_transition(next) {
        Ok(())
    } else {
        Err(CoreError::Conflict(format!(
            "Opportunity already decided: {from}"
        )))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
