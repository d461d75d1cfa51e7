//! Field-level validation for numeric inputs.

use thiserror::Error;

/// A numeric input rejected before any cost arithmetic runs.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field}: {value} ({reason})")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

impl ValidationError {
    pub fn new(field: &'static str, value: f64, reason: &'static str) -> Self {
        Self { field, value, reason }
    }
}

/// Accept finite values only.
pub fn finite(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value, "must be finite"))
    }
}

/// Accept finite values strictly above zero.
pub fn positive(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value, "must be positive"))
    }
}

/// Accept finite values at or above zero.
pub fn non_negative(field: &'static str, value: f64) -> Result<f64, ValidationError> {
    let value = finite(field, value)?;
    if value >= 0.0 {
        Ok(value)
    } else {
        Err(ValidationError::new(field, value, "must not be negative"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(positive("fill_price", 0.0).is_err());
        assert!(positive("fill_price", f64::NAN).is_err());
        assert_eq!(positive("fill_price", 12.5), Ok(12.5));
    }

    #[test]
    fn error_names_field() {
        let err = non_negative("commission", -1.0).unwrap_err();
        assert_eq!(err.field, "commission");
        assert_eq!(err.to_string(), "invalid commission: -1 (must not be negative)");
    }
}
