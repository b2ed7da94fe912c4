//! Shared validation guards

use chrono::NaiveDate;

use crate::types::{ReportError, ReportResult};

/// Validate a reporting period before any data is fetched.
///
/// Fails when `date_from` is after `date_to`; the dates are never swapped
/// on the caller's behalf.
pub fn validate_period(date_from: NaiveDate, date_to: NaiveDate) -> ReportResult<()> {
    if date_from > date_to {
        return Err(ReportError::InvalidRange { date_from, date_to });
    }
    Ok(())
}

/// Validate that an entity id is usable as a report key
pub fn validate_entity_id(entity_id: &str) -> ReportResult<()> {
    if entity_id.trim().is_empty() {
        return Err(ReportError::Validation(
            "Entity ID cannot be empty".to_string(),
        ));
    }

    if entity_id.len() > 64 {
        return Err(ReportError::Validation(
            "Entity ID cannot exceed 64 characters".to_string(),
        ));
    }

    Ok(())
}
