use crate::ValidationError;

pub const NAME_MIN_LENGTH: usize = 3;
pub const NAME_MAX_LENGTH: usize = 255;
pub const DESCRIPTION_MAX_LENGTH: usize = 10_000;

pub fn not_null_or_empty(value: &str, field: &str) -> garde::Result {
    if value.trim().is_empty() {
        Err(garde::Error::new(format!(
            "{field} should not be empty or null"
        )))
    } else {
        Ok(())
    }
}

pub fn min_length(value: &str, min: usize, field: &str) -> garde::Result {
    if value.chars().count() < min {
        Err(garde::Error::new(format!(
            "{field} should be at least {min} characters long"
        )))
    } else {
        Ok(())
    }
}

pub fn max_length(value: &str, max: usize, field: &str) -> garde::Result {
    if value.chars().count() > max {
        Err(garde::Error::new(format!(
            "{field} should be less or equal to {max} characters long"
        )))
    } else {
        Ok(())
    }
}

/// Unwraps a value which must be present in the payload.
pub fn not_null<T>(value: Option<T>, field: &str) -> Result<T, ValidationError> {
    value.ok_or_else(|| ValidationError::new(format!("{field} should not be null")))
}
