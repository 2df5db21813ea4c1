//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: i32,
        max: i32,
        actual: i32,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    #[error("Field '{field}' must be one of [{allowed}], got '{actual}'")]
    NotInEnum {
        field: String,
        allowed: String,
        actual: String,
    },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: i32, max: i32, actual: i32) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an enum membership validation error.
    pub fn not_in_enum(field: impl Into<String>, allowed: &[&str], actual: impl Into<String>) -> Self {
        ValidationError::NotInEnum {
            field: field.into(),
            allowed: allowed.join(", "),
            actual: actual.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::EmptyField { field }
            | ValidationError::OutOfRange { field, .. }
            | ValidationError::InvalidFormat { field, .. }
            | ValidationError::NotInEnum { field, .. } => field,
        }
    }
}

/// Structured list of validation failures collected at a boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Returns `Ok(())` when nothing was collected.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    InvalidData,

    // Not found errors
    FormNotFound,
    TemplateNotFound,
    QuestionNotFound,

    // Data integrity errors
    DataShape,

    // Infrastructure errors
    Timeout,
    DatabaseError,
    RenderError,
    ChartServiceError,
    InternalError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::InvalidData => "INVALID_DATA",
            ErrorCode::FormNotFound => "FORM_NOT_FOUND",
            ErrorCode::TemplateNotFound => "TEMPLATE_NOT_FOUND",
            ErrorCode::QuestionNotFound => "QUESTION_NOT_FOUND",
            ErrorCode::DataShape => "DATA_SHAPE",
            ErrorCode::Timeout => "TIMEOUT",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::RenderError => "RENDER_ERROR",
            ErrorCode::ChartServiceError => "CHART_SERVICE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("relationship", 0, 3, 7);
        assert_eq!(
            format!("{}", err),
            "Field 'relationship' must be between 0 and 3, got 7"
        );
    }

    #[test]
    fn validation_error_not_in_enum_lists_allowed_values() {
        let err = ValidationError::not_in_enum("type", &["point", "text"], "choice");
        assert_eq!(
            format!("{}", err),
            "Field 'type' must be one of [point, text], got 'choice'"
        );
        assert_eq!(err.field(), "type");
    }

    #[test]
    fn validation_errors_joins_messages() {
        let mut errors = ValidationErrors::new();
        errors.push(ValidationError::empty_field("title"));
        errors.push(ValidationError::empty_field("full_name"));

        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.to_string(),
            "Field 'title' cannot be empty; Field 'full_name' cannot be empty"
        );
    }

    #[test]
    fn empty_validation_errors_is_ok() {
        assert!(ValidationErrors::new().into_result().is_ok());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::QuestionNotFound), "QUESTION_NOT_FOUND");
        assert_eq!(format!("{}", ErrorCode::DataShape), "DATA_SHAPE");
    }
}
