//! Survey templates: ordered question groups under review and answer sections.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, TemplateId};

/// A titled group of questions inside a template section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionGroup {
    pub title: String,
    #[serde(default)]
    pub question_ids: Vec<QuestionId>,
}

impl QuestionGroup {
    pub fn new(title: impl Into<String>, question_ids: Vec<QuestionId>) -> Self {
        Self {
            title: title.into(),
            question_ids,
        }
    }
}

/// A survey template.
///
/// Questions are nested in groups under two sections. Section placement is
/// informational only; a question's own type decides how it is aggregated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    pub title: String,
    #[serde(default)]
    pub review: Vec<QuestionGroup>,
    #[serde(default)]
    pub answer: Vec<QuestionGroup>,
}

impl Template {
    /// Question ids in scan order: review groups first, then answer groups.
    pub fn scan_order(&self) -> Vec<QuestionId> {
        self.review
            .iter()
            .chain(self.answer.iter())
            .flat_map(|group| group.question_ids.iter().copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_order_walks_review_then_answer_groups() {
        let (a, b, c, d) = (QuestionId::new(), QuestionId::new(), QuestionId::new(), QuestionId::new());
        let template = Template {
            id: TemplateId::new(),
            title: "Annual review".to_string(),
            review: vec![
                QuestionGroup::new("Leadership", vec![a]),
                QuestionGroup::new("Delivery", vec![b, c]),
            ],
            answer: vec![QuestionGroup::new("Open questions", vec![d])],
        };

        assert_eq!(template.scan_order(), vec![a, b, c, d]);
    }

    #[test]
    fn missing_sections_deserialize_as_empty() {
        let json = r#"{"id":"550e8400-e29b-41d4-a716-446655440000","title":"Empty"}"#;
        let template: Template = serde_json::from_str(json).unwrap();
        assert!(template.scan_order().is_empty());
    }
}
