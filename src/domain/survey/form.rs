//! Feedback forms: one reviewed person evaluated against one template.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::domain::foundation::{FormId, TemplateId, ValidationError};

/// Gender of the reviewed person; drives the report salutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    Unspecified,
}

impl Gender {
    pub const NAMES: [&'static str; 3] = ["male", "female", "unspecified"];

    /// Salutation printed before the full name in the report header.
    pub fn salutation(&self) -> &'static str {
        match self {
            Gender::Male => "Mr.",
            Gender::Female => "Ms.",
            Gender::Unspecified => "",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Unspecified => "unspecified",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "" | "unspecified" => Ok(Gender::Unspecified),
            _ => Err(ValidationError::not_in_enum("gender", &Self::NAMES, s)),
        }
    }
}

/// A feedback form collecting reviews of one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: FormId,
    pub template_id: TemplateId,
    pub full_name: String,
    pub position: String,
    #[serde(default)]
    pub gender: Gender,
}
