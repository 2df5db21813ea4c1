//! Reviewer relationship categories and the classifier over raw codes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// The reviewer's role relative to the reviewed person.
///
/// Stored as an integer code: Self=0, Peer=1, Subordinate=2, Senior=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    #[serde(rename = "self")]
    SelfReview,
    Peer,
    Subordinate,
    Senior,
}

impl Relationship {
    /// All categories, in code order.
    pub const ALL: [Relationship; 4] = [
        Relationship::SelfReview,
        Relationship::Peer,
        Relationship::Subordinate,
        Relationship::Senior,
    ];

    /// Classifies a stored relationship code.
    ///
    /// Total over `0..=3`; anything else is rejected rather than defaulted.
    pub fn classify(code: i32) -> Result<Self, ValidationError> {
        match code {
            0 => Ok(Relationship::SelfReview),
            1 => Ok(Relationship::Peer),
            2 => Ok(Relationship::Subordinate),
            3 => Ok(Relationship::Senior),
            other => Err(ValidationError::out_of_range("relationship", 0, 3, other)),
        }
    }

    /// Returns the stored integer code.
    pub fn code(&self) -> i32 {
        match self {
            Relationship::SelfReview => 0,
            Relationship::Peer => 1,
            Relationship::Subordinate => 2,
            Relationship::Senior => 3,
        }
    }

    /// Returns the display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            Relationship::SelfReview => "Self",
            Relationship::Peer => "Peer",
            Relationship::Subordinate => "Subordinate",
            Relationship::Senior => "Senior",
        }
    }
}

impl fmt::Display for Relationship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl TryFrom<i32> for Relationship {
    type Error = ValidationError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Relationship::classify(code)
    }
}
