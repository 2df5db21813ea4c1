//! In-Memory Survey Store Adapter
//!
//! Holds forms, templates, questions, and feedback in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{FormId, QuestionId, TemplateId};
use crate::domain::report::EntityKind;
use crate::domain::survey::{FeedbackRecord, Form, Question, Template};
use crate::ports::{SurveyReadError, SurveyReader};

/// In-memory survey store implementing `SurveyReader`.
///
/// Feedback is returned in insertion order, which stands in for
/// submission order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyStore {
    forms: Arc<RwLock<HashMap<FormId, Form>>>,
    templates: Arc<RwLock<HashMap<TemplateId, Template>>>,
    questions: Arc<RwLock<HashMap<QuestionId, Question>>>,
    feedback: Arc<RwLock<Vec<FeedbackRecord>>>,
}

impl InMemorySurveyStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_form(&self, form: Form) {
        self.forms.write().await.insert(form.id, form);
    }

    pub async fn insert_template(&self, template: Template) {
        self.templates.write().await.insert(template.id, template);
    }

    pub async fn insert_question(&self, question: Question) {
        self.questions.write().await.insert(question.id, question);
    }

    pub async fn insert_questions(&self, questions: impl IntoIterator<Item = Question>) {
        let mut stored = self.questions.write().await;
        for question in questions {
            stored.insert(question.id, question);
        }
    }

    pub async fn insert_feedback(&self, records: impl IntoIterator<Item = FeedbackRecord>) {
        self.feedback.write().await.extend(records);
    }

    /// Number of stored feedback records across all forms
    pub async fn feedback_count(&self) -> usize {
        self.feedback.read().await.len()
    }
}

#[async_trait]
impl SurveyReader for InMemorySurveyStore {
    async fn get_form(&self, id: FormId) -> Result<Form, SurveyReadError> {
        self.forms
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| SurveyReadError::not_found(EntityKind::Form, id))
    }

    async fn get_template(&self, id: TemplateId) -> Result<Template, SurveyReadError> {
        self.templates
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| SurveyReadError::not_found(EntityKind::Template, id))
    }

    async fn get_questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> Result<Vec<Question>, SurveyReadError> {
        let questions = self.questions.read().await;
        Ok(ids.iter().filter_map(|id| questions.get(id).cloned()).collect())
    }

    async fn get_feedback_records_by_form(
        &self,
        form_id: FormId,
    ) -> Result<Vec<FeedbackRecord>, SurveyReadError> {
        Ok(self
            .feedback
            .read()
            .await
            .iter()
            .filter(|record| record.form_id == form_id)
            .cloned()
            .collect())
    }
}
