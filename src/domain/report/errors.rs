//! Report generation errors.

use std::fmt;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, FeedbackId, QuestionId};
use crate::domain::survey::Relationship;

/// The kind of entity a lookup failed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Form,
    Template,
    Question,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Form => "form",
            EntityKind::Template => "template",
            EntityKind::Question => "question",
        };
        write!(f, "{}", name)
    }
}

/// Errors raised while building or producing a report.
///
/// None of these are swallowed; a failing request produces no partial report.
#[derive(Debug, Clone, Error)]
pub enum ReportError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error(
        "feedback {feedback_id} on question {question_id} is classified {relationship} but has no {expected}"
    )]
    DataShape {
        question_id: QuestionId,
        feedback_id: FeedbackId,
        relationship: Relationship,
        expected: &'static str,
    },

    #[error("Stored data is invalid: {0}")]
    InvalidData(String),

    #[error("Timed out after {seconds}s while {operation}")]
    Timeout { operation: &'static str, seconds: u64 },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Chart service error: {0}")]
    Chart(String),

    #[error("Rendering failed: {0}")]
    Render(String),
}

impl ReportError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        ReportError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Whether a caller may retry the same request unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ReportError::Timeout { .. } | ReportError::Persistence(_) | ReportError::Chart(_)
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            ReportError::NotFound { entity, .. } => match entity {
                EntityKind::Form => ErrorCode::FormNotFound,
                EntityKind::Template => ErrorCode::TemplateNotFound,
                EntityKind::Question => ErrorCode::QuestionNotFound,
            },
            ReportError::DataShape { .. } => ErrorCode::DataShape,
            ReportError::InvalidData(_) => ErrorCode::InvalidData,
            ReportError::Timeout { .. } => ErrorCode::Timeout,
            ReportError::Persistence(_) => ErrorCode::DatabaseError,
            ReportError::Chart(_) => ErrorCode::ChartServiceError,
            ReportError::Render(_) => ErrorCode::RenderError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_entity_and_id() {
        let err = ReportError::not_found(EntityKind::Template, "abc");
        assert_eq!(err.to_string(), "template not found: abc");
        assert_eq!(err.code(), ErrorCode::TemplateNotFound);
    }

    #[test]
    fn data_shape_names_missing_detail() {
        let err = ReportError::DataShape {
            question_id: QuestionId::new(),
            feedback_id: FeedbackId::new(),
            relationship: Relationship::Senior,
            expected: "senior_detail",
        };
        let msg = err.to_string();
        assert!(msg.contains("Senior"));
        assert!(msg.contains("senior_detail"));
        assert!(!err.is_retryable());
    }

    #[test]
    fn io_errors_are_retryable() {
        assert!(ReportError::Timeout { operation: "loading form", seconds: 5 }.is_retryable());
        assert!(ReportError::Persistence("connection reset".into()).is_retryable());
        assert!(ReportError::Chart("502".into()).is_retryable());
        assert!(!ReportError::Render("pandoc exited 1".into()).is_retryable());
        assert!(!ReportError::not_found(EntityKind::Form, "x").is_retryable());
    }
}
