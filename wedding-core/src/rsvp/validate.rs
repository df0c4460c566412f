use crate::page::FieldSet;

use super::error::ValidationError;
use super::submission::Submission;

/// Check a submission before it is sent.
///
/// Checks run in a fixed order and stop at the first failure. Fields the page
/// does not show are never required.
pub fn validate(submission: &Submission, fields: &FieldSet) -> Result<(), ValidationError> {
    if submission.name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }

    if fields.phone && submission.phone.is_empty() {
        return Err(ValidationError::MissingPhone);
    }

    if submission.attendance.is_none() {
        return Err(ValidationError::MissingAttendance);
    }

    if submission.is_attending() {
        if fields.meal && submission.meal.is_none() {
            return Err(ValidationError::MissingMeal);
        }
        if fields.drinks && submission.drinks.is_empty() {
            return Err(ValidationError::MissingDrinks);
        }
    }

    Ok(())
}
