//! PostgreSQL implementation of SurveyReader.
//!
//! Rows are decoded into the raw `*Input` documents and pass through the
//! same validation as any other stored document before reaching the report
//! engine.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::foundation::{FormId, QuestionId, TemplateId};
use crate::domain::report::EntityKind;
use crate::domain::survey::{
    FeedbackInput, FeedbackRecord, Form, FormInput, Question, QuestionInput, Template,
    TemplateInput,
};
use crate::ports::{SurveyReadError, SurveyReader};

/// PostgreSQL implementation of SurveyReader.
#[derive(Clone)]
pub struct PostgresSurveyReader {
    pool: PgPool,
}

impl PostgresSurveyReader {
    /// Creates a new PostgresSurveyReader.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyReader for PostgresSurveyReader {
    async fn get_form(&self, id: FormId) -> Result<Form, SurveyReadError> {
        let row = sqlx::query(
            r#"
            SELECT id, template_id, full_name, position, gender
            FROM survey_forms
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| SurveyReadError::not_found(EntityKind::Form, id))?;

        row_to_form(&row)
    }

    async fn get_template(&self, id: TemplateId) -> Result<Template, SurveyReadError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, review, answer
            FROM survey_templates
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| SurveyReadError::not_found(EntityKind::Template, id))?;

        row_to_template(&row)
    }

    async fn get_questions_by_ids(
        &self,
        ids: &[QuestionId],
    ) -> Result<Vec<Question>, SurveyReadError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, title, type
            FROM survey_questions
            WHERE id = ANY($1)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_question).collect()
    }

    async fn get_feedback_records_by_form(
        &self,
        form_id: FormId,
    ) -> Result<Vec<FeedbackRecord>, SurveyReadError> {
        let rows = sqlx::query(
            r#"
            SELECT id, form_id, question_id, relationship, rating_details, answer
            FROM survey_feedback
            WHERE form_id = $1
            ORDER BY submitted_at, id
            "#,
        )
        .bind(form_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_feedback).collect()
    }
}

fn row_to_form(row: &PgRow) -> Result<Form, SurveyReadError> {
    let id: Uuid = row.try_get("id")?;
    let input = FormInput {
        id: id.to_string(),
        template_id: row.try_get::<Uuid, _>("template_id")?.to_string(),
        full_name: row.try_get("full_name")?,
        position: row.try_get("position")?,
        gender: row.try_get("gender")?,
    };
    input
        .validate()
        .map_err(|errors| SurveyReadError::invalid("form", id, errors))
}

fn row_to_template(row: &PgRow) -> Result<Template, SurveyReadError> {
    let id: Uuid = row.try_get("id")?;
    let input = TemplateInput {
        id: id.to_string(),
        title: row.try_get("title")?,
        review: decode_json("template", id, row.try_get("review")?)?,
        answer: decode_json("template", id, row.try_get("answer")?)?,
    };
    input
        .validate()
        .map_err(|errors| SurveyReadError::invalid("template", id, errors))
}

fn row_to_question(row: &PgRow) -> Result<Question, SurveyReadError> {
    let id: Uuid = row.try_get("id")?;
    let input = QuestionInput {
        id: id.to_string(),
        title: row.try_get("title")?,
        question_type: row.try_get("type")?,
    };
    input
        .validate()
        .map_err(|errors| SurveyReadError::invalid("question", id, errors))
}

fn row_to_feedback(row: &PgRow) -> Result<FeedbackRecord, SurveyReadError> {
    let id: Uuid = row.try_get("id")?;
    let rating_details: Option<serde_json::Value> = row.try_get("rating_details")?;
    let input = FeedbackInput {
        id: id.to_string(),
        form_id: row.try_get::<Uuid, _>("form_id")?.to_string(),
        question_id: row.try_get::<Uuid, _>("question_id")?.to_string(),
        relationship: i64::from(row.try_get::<i32, _>("relationship")?),
        rating_details: rating_details
            .map(|value| decode_json("feedback", id, value))
            .transpose()?,
        answer: row.try_get("answer")?,
    };
    input
        .validate()
        .map_err(|errors| SurveyReadError::invalid("feedback", id, errors))
}

fn decode_json<T: DeserializeOwned>(
    entity: &'static str,
    id: Uuid,
    value: serde_json::Value,
) -> Result<T, SurveyReadError> {
    serde_json::from_value(value).map_err(|e| SurveyReadError::invalid(entity, id, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::survey::{QuestionGroup, RatingDetails};
    use serde_json::json;

    #[test]
    fn decode_json_reads_question_groups() {
        let question_id = Uuid::new_v4();
        let groups: Vec<QuestionGroup> = decode_json(
            "template",
            Uuid::new_v4(),
            json!([{ "title": "Leadership", "question_ids": [question_id] }]),
        )
        .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].question_ids, vec![QuestionId::from_uuid(question_id)]);
    }

    #[test]
    fn decode_json_reports_malformed_documents_as_invalid_data() {
        let id = Uuid::new_v4();
        let result: Result<RatingDetails, _> =
            decode_json("feedback", id, json!({ "self_detail": "five" }));

        match result {
            Err(SurveyReadError::InvalidData { entity, id: got, .. }) => {
                assert_eq!(entity, "feedback");
                assert_eq!(got, id.to_string());
            }
            other => panic!("expected InvalidData, got {:?}", other),
        }
    }
}
