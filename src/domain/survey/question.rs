//! Questions from the question bank.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{QuestionId, ValidationError};

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Discrete 1-5 rating (or "no opinion"), aggregated numerically.
    Point,
    /// Open-ended text, aggregated by concatenation per relationship.
    Text,
}

impl QuestionType {
    pub const NAMES: [&'static str; 2] = ["point", "text"];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionType::Point => "point",
            QuestionType::Text => "text",
        }
    }

    pub fn is_rating(&self) -> bool {
        matches!(self, QuestionType::Point)
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "point" => Ok(QuestionType::Point),
            "text" => Ok(QuestionType::Text),
            _ => Err(ValidationError::not_in_enum("type", &Self::NAMES, s)),
        }
    }
}

/// A question that can appear in templates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub title: String,
    pub question_type: QuestionType,
}

impl Question {
    pub fn new(id: QuestionId, title: impl Into<String>, question_type: QuestionType) -> Self {
        Self {
            id,
            title: title.into(),
            question_type,
        }
    }

    pub fn is_rating(&self) -> bool {
        self.question_type.is_rating()
    }
}
