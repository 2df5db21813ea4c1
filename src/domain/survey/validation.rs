//! Boundary validation for stored survey documents.
//!
//! Each entity has a rule table listing the constraints on its raw fields.
//! Raw input shapes are checked against their table and converted into the
//! typed domain entities, or rejected with every failure collected.

use serde::Deserialize;
use uuid::Uuid;

use crate::domain::foundation::{
    FeedbackId, FormId, QuestionId, TemplateId, ValidationError, ValidationErrors,
};

use super::{
    FeedbackRecord, Form, Gender, Question, QuestionGroup, QuestionType, RatingDetails,
    Relationship, Template,
};

/// A raw field value as seen by the rule table.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Int(i64),
    Missing,
}

/// A single constraint on a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldRule {
    /// Present and not blank.
    Required,
    /// Parses as a UUID.
    Uuid,
    /// Case-insensitive membership in a closed set.
    OneOf(&'static [&'static str]),
    /// Integer within an inclusive range.
    Range { min: i32, max: i32 },
}

/// Rules attached to one field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: &'static str,
    pub rules: &'static [FieldRule],
}

pub const QUESTION_RULES: &[FieldSpec] = &[
    FieldSpec { field: "id", rules: &[FieldRule::Required, FieldRule::Uuid] },
    FieldSpec { field: "title", rules: &[FieldRule::Required] },
    FieldSpec { field: "type", rules: &[FieldRule::Required, FieldRule::OneOf(&QuestionType::NAMES)] },
];

pub const TEMPLATE_RULES: &[FieldSpec] = &[
    FieldSpec { field: "id", rules: &[FieldRule::Required, FieldRule::Uuid] },
    FieldSpec { field: "title", rules: &[FieldRule::Required] },
];

pub const FORM_RULES: &[FieldSpec] = &[
    FieldSpec { field: "id", rules: &[FieldRule::Required, FieldRule::Uuid] },
    FieldSpec { field: "template_id", rules: &[FieldRule::Required, FieldRule::Uuid] },
    FieldSpec { field: "full_name", rules: &[FieldRule::Required] },
    FieldSpec { field: "gender", rules: &[FieldRule::OneOf(&Gender::NAMES)] },
];

pub const FEEDBACK_RULES: &[FieldSpec] = &[
    FieldSpec { field: "id", rules: &[FieldRule::Required, FieldRule::Uuid] },
    FieldSpec { field: "form_id", rules: &[FieldRule::Required, FieldRule::Uuid] },
    FieldSpec { field: "question_id", rules: &[FieldRule::Required, FieldRule::Uuid] },
    FieldSpec { field: "relationship", rules: &[FieldRule::Range { min: 0, max: 3 }] },
];

/// Applies a rule table, collecting every failure.
pub fn apply_rules<'a>(
    specs: &[FieldSpec],
    lookup: impl Fn(&str) -> FieldValue<'a>,
) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for spec in specs {
        let value = lookup(spec.field);
        for rule in spec.rules {
            if let Err(error) = check(spec.field, value, *rule) {
                errors.push(error);
                break;
            }
        }
    }
    errors
}

fn check(field: &str, value: FieldValue<'_>, rule: FieldRule) -> Result<(), ValidationError> {
    match (rule, value) {
        (FieldRule::Required, FieldValue::Missing) => Err(ValidationError::empty_field(field)),
        (FieldRule::Required, FieldValue::Text(text)) if text.trim().is_empty() => {
            Err(ValidationError::empty_field(field))
        }
        (FieldRule::Uuid, FieldValue::Text(text)) => Uuid::parse_str(text)
            .map(|_| ())
            .map_err(|e| ValidationError::invalid_format(field, e.to_string())),
        (FieldRule::OneOf(allowed), FieldValue::Text(text)) => {
            let normalized = text.trim().to_lowercase();
            if normalized.is_empty() || allowed.contains(&normalized.as_str()) {
                Ok(())
            } else {
                Err(ValidationError::not_in_enum(field, allowed, text))
            }
        }
        (FieldRule::Range { min, max }, FieldValue::Int(n)) => {
            if n >= i64::from(min) && n <= i64::from(max) {
                Ok(())
            } else {
                let actual = i32::try_from(n).unwrap_or(if n < 0 { i32::MIN } else { i32::MAX });
                Err(ValidationError::out_of_range(field, min, max, actual))
            }
        }
        (FieldRule::Range { .. }, FieldValue::Text(_)) => {
            Err(ValidationError::invalid_format(field, "expected an integer"))
        }
        _ => Ok(()),
    }
}

fn text(value: &Option<String>) -> FieldValue<'_> {
    match value {
        Some(v) => FieldValue::Text(v),
        None => FieldValue::Missing,
    }
}

fn parse_uuid(field: &str, value: &str) -> Result<Uuid, ValidationErrors> {
    Uuid::parse_str(value)
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()).into())
}

/// Raw question document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionInput {
    pub id: String,
    pub title: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<String>,
}

impl QuestionInput {
    pub fn validate(self) -> Result<Question, ValidationErrors> {
        apply_rules(QUESTION_RULES, |field| match field {
            "id" => FieldValue::Text(&self.id),
            "title" => text(&self.title),
            "type" => text(&self.question_type),
            _ => FieldValue::Missing,
        })
        .into_result()?;

        let question_type = self
            .question_type
            .as_deref()
            .unwrap_or_default()
            .parse::<QuestionType>()?;
        Ok(Question {
            id: QuestionId::from_uuid(parse_uuid("id", &self.id)?),
            title: self.title.unwrap_or_default().trim().to_string(),
            question_type,
        })
    }
}

/// Raw template document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateInput {
    pub id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub review: Vec<QuestionGroup>,
    #[serde(default)]
    pub answer: Vec<QuestionGroup>,
}

impl TemplateInput {
    pub fn validate(self) -> Result<Template, ValidationErrors> {
        apply_rules(TEMPLATE_RULES, |field| match field {
            "id" => FieldValue::Text(&self.id),
            "title" => text(&self.title),
            _ => FieldValue::Missing,
        })
        .into_result()?;

        Ok(Template {
            id: TemplateId::from_uuid(parse_uuid("id", &self.id)?),
            title: self.title.unwrap_or_default().trim().to_string(),
            review: self.review,
            answer: self.answer,
        })
    }
}

/// Raw form document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormInput {
    pub id: String,
    pub template_id: String,
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub gender: Option<String>,
}

impl FormInput {
    pub fn validate(self) -> Result<Form, ValidationErrors> {
        apply_rules(FORM_RULES, |field| match field {
            "id" => FieldValue::Text(&self.id),
            "template_id" => FieldValue::Text(&self.template_id),
            "full_name" => text(&self.full_name),
            "gender" => text(&self.gender),
            _ => FieldValue::Missing,
        })
        .into_result()?;

        let gender = match self.gender.as_deref() {
            Some(raw) => raw.parse::<Gender>()?,
            None => Gender::Unspecified,
        };
        Ok(Form {
            id: FormId::from_uuid(parse_uuid("id", &self.id)?),
            template_id: TemplateId::from_uuid(parse_uuid("template_id", &self.template_id)?),
            full_name: self.full_name.unwrap_or_default().trim().to_string(),
            position: self.position.unwrap_or_default().trim().to_string(),
            gender,
        })
    }
}

/// Raw feedback document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackInput {
    pub id: String,
    pub form_id: String,
    pub question_id: String,
    pub relationship: i64,
    #[serde(default)]
    pub rating_details: Option<RatingDetails>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl FeedbackInput {
    pub fn validate(self) -> Result<FeedbackRecord, ValidationErrors> {
        apply_rules(FEEDBACK_RULES, |field| match field {
            "id" => FieldValue::Text(&self.id),
            "form_id" => FieldValue::Text(&self.form_id),
            "question_id" => FieldValue::Text(&self.question_id),
            "relationship" => FieldValue::Int(self.relationship),
            _ => FieldValue::Missing,
        })
        .into_result()?;

        let code = i32::try_from(self.relationship)
            .map_err(|_| ValidationError::out_of_range("relationship", 0, 3, i32::MAX))?;
        Ok(FeedbackRecord {
            id: FeedbackId::from_uuid(parse_uuid("id", &self.id)?),
            form_id: FormId::from_uuid(parse_uuid("form_id", &self.form_id)?),
            question_id: QuestionId::from_uuid(parse_uuid("question_id", &self.question_id)?),
            relationship: Relationship::classify(code)?,
            rating_details: self.rating_details,
            answer: self.answer,
        })
    }
}
