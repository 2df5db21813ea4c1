//! Computed statistics consumed by report renderers.
//!
//! Values keep full precision in memory. Serialization applies the report's
//! display rules: points and averages get exactly one decimal, and counts of
//! zero become empty strings.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::domain::foundation::QuestionId;
use crate::domain::survey::{RatingLevel, Relationship};

/// Formats a score with exactly one digit after the decimal point.
///
/// Ties round away from zero, so an average of 3.25 shows as "3.3".
pub fn format_one_decimal(value: f64) -> String {
    // Adding 0.0 folds -0.0 into 0.0.
    let rounded = (value * 10.0).round() / 10.0 + 0.0;
    format!("{:.1}", rounded)
}

fn serialize_one_decimal<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_one_decimal(*value))
}

/// Tally of rating flags within one relationship bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RatingCounts {
    counts: [u32; 7],
}

impl RatingCounts {
    fn slot(level: RatingLevel) -> usize {
        match level {
            RatingLevel::One => 0,
            RatingLevel::Two => 1,
            RatingLevel::Three => 2,
            RatingLevel::Four => 3,
            RatingLevel::Five => 4,
            RatingLevel::NoOpinion => 5,
            RatingLevel::Counted => 6,
        }
    }

    pub fn increment(&mut self, level: RatingLevel) {
        self.counts[Self::slot(level)] += 1;
    }

    pub fn get(&self, level: RatingLevel) -> u32 {
        self.counts[Self::slot(level)]
    }

    /// Display form: `""` for zero, the integer otherwise.
    pub fn display(&self, level: RatingLevel) -> String {
        match self.get(level) {
            0 => String::new(),
            n => n.to_string(),
        }
    }
}

impl Serialize for RatingCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(RatingLevel::ALL.len()))?;
        for level in RatingLevel::ALL {
            map.serialize_entry(level.key(), &self.display(level))?;
        }
        map.end()
    }
}

/// Statistics row for one rating question.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatistic {
    pub index: usize,
    pub question_id: QuestionId,
    pub title: String,
    #[serde(serialize_with = "serialize_one_decimal")]
    pub self_point: f64,
    #[serde(serialize_with = "serialize_one_decimal")]
    pub avg_senior_point: f64,
    #[serde(serialize_with = "serialize_one_decimal")]
    pub avg_peer_point: f64,
    #[serde(serialize_with = "serialize_one_decimal")]
    pub avg_subordinate_point: f64,
    pub count_senior: RatingCounts,
    pub count_peer: RatingCounts,
    pub count_subordinate: RatingCounts,
}

impl QuestionStatistic {
    /// The value charted for `relationship`.
    pub fn point_for(&self, relationship: Relationship) -> f64 {
        match relationship {
            Relationship::SelfReview => self.self_point,
            Relationship::Peer => self.avg_peer_point,
            Relationship::Subordinate => self.avg_subordinate_point,
            Relationship::Senior => self.avg_senior_point,
        }
    }

    /// Counts for a reviewer bucket; Self has no tally.
    pub fn counts_for(&self, relationship: Relationship) -> Option<&RatingCounts> {
        match relationship {
            Relationship::SelfReview => None,
            Relationship::Peer => Some(&self.count_peer),
            Relationship::Subordinate => Some(&self.count_subordinate),
            Relationship::Senior => Some(&self.count_senior),
        }
    }
}

/// Collected answers for one free-text question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStatistic {
    pub index: usize,
    pub question_id: QuestionId,
    pub title: String,
    pub string_seniors: Vec<String>,
    pub string_peers: Vec<String>,
    pub string_subordinates: Vec<String>,
}

impl AnswerStatistic {
    pub fn answers_for(&self, relationship: Relationship) -> &[String] {
        match relationship {
            Relationship::SelfReview => &[],
            Relationship::Peer => &self.string_peers,
            Relationship::Subordinate => &self.string_subordinates,
            Relationship::Senior => &self.string_seniors,
        }
    }
}

/// Per-relationship series of per-question scores, for charting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaSeries {
    pub relationship: Relationship,
    pub title: String,
    pub values: Vec<String>,
}

/// Everything a renderer needs besides the respondent identity.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatistics {
    pub rating_statistics: Vec<QuestionStatistic>,
    pub text_statistics: Vec<AnswerStatistic>,
    pub criteria_series: Vec<CriteriaSeries>,
}
