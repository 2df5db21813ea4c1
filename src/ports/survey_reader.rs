//! Survey Reader Port - Read access to persisted survey data.
//!
//! The report engine only reads; writes belong to the CRUD surface that owns
//! these entities.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{FormId, QuestionId, TemplateId};
use crate::domain::report::{EntityKind, ReportError};
use crate::domain::survey::{FeedbackRecord, Form, Question, Template};

/// Read-only port for the entities a report is computed from.
#[async_trait]
pub trait SurveyReader: Send + Sync {
    /// Loads a form, or `NotFound`.
    async fn get_form(&self, id: FormId) -> Result<Form, SurveyReadError>;

    /// Loads a template, or `NotFound`.
    async fn get_template(&self, id: TemplateId) -> Result<Template, SurveyReadError>;

    /// Loads the questions among `ids` that exist, in no particular order.
    ///
    /// Missing ids are not an error here; callers decide.
    async fn get_questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> Result<Vec<Question>, SurveyReadError>;

    /// Loads every feedback record of a form in submission order.
    async fn get_feedback_records_by_form(
        &self,
        form_id: FormId,
    ) -> Result<Vec<FeedbackRecord>, SurveyReadError>;
}

/// Errors that can occur while reading survey data.
#[derive(Debug, Clone, Error)]
pub enum SurveyReadError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("Invalid {entity} {id}: {reason}")]
    InvalidData {
        entity: &'static str,
        id: String,
        reason: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

impl SurveyReadError {
    pub fn not_found(entity: EntityKind, id: impl ToString) -> Self {
        SurveyReadError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn invalid(entity: &'static str, id: impl ToString, reason: impl ToString) -> Self {
        SurveyReadError::InvalidData {
            entity,
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl From<sqlx::Error> for SurveyReadError {
    fn from(err: sqlx::Error) -> Self {
        SurveyReadError::Database(err.to_string())
    }
}

impl From<SurveyReadError> for ReportError {
    fn from(err: SurveyReadError) -> Self {
        match err {
            SurveyReadError::NotFound { entity, id } => ReportError::NotFound { entity, id },
            invalid @ SurveyReadError::InvalidData { .. } => {
                ReportError::InvalidData(invalid.to_string())
            }
            SurveyReadError::Database(msg) => ReportError::Persistence(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn survey_reader_is_object_safe() {
        fn check<T: SurveyReader + ?Sized>() {}
        check::<dyn SurveyReader>();
    }

    #[test]
    fn test_error_conversion_from_sqlx() {
        let err: SurveyReadError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, SurveyReadError::Database(_)));
    }

    #[test]
    fn not_found_maps_to_report_not_found() {
        let form_id = FormId::new();
        let err: ReportError = SurveyReadError::not_found(EntityKind::Form, form_id).into();
        match err {
            ReportError::NotFound { entity, id } => {
                assert_eq!(entity, EntityKind::Form);
                assert_eq!(id, form_id.to_string());
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn database_errors_stay_retryable() {
        let err: ReportError = SurveyReadError::Database("pool timed out".into()).into();
        assert!(err.is_retryable());
    }

    #[test]
    fn invalid_data_is_not_retryable() {
        let err: ReportError =
            SurveyReadError::invalid("feedback", "abc", "relationship out of range").into();
        assert!(matches!(err, ReportError::InvalidData(_)));
        assert!(!err.is_retryable());
    }
}
