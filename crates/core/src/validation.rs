//! Required-field validation for the decision workflow.

use crate::error::CoreError;
use crate::opportunity::{Field, Opportunity};

/// Required fields that are empty or whitespace-only, in report order.
pub fn missing_required_fields(op: &Opportunity) -> Vec<Field> {
    Field::REQUIRED
        .into_iter()
        .filter(|f| op.get(*f).trim().is_empty())
        .collect()
}

/// Fail with [`CoreError::MissingFields`] naming every blank required field.
pub fn validate_required(op: &Opportunity) -> Result<(), CoreError> {
    let missing = missing_required_fields(op);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(CoreError::MissingFields(
            missing.into_iter().map(Field::label).collect(),
        ))
    }
}
