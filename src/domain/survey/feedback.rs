//! Submitted feedback records.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{FeedbackId, FormId, QuestionId};

use super::Relationship;

/// Rating levels tallied for a rating question.
///
/// `One`..`Five` are the discrete scores, `NoOpinion` is the "ko" answer and
/// `Counted` is the "tc" flag marking entries that enter averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RatingLevel {
    One,
    Two,
    Three,
    Four,
    Five,
    NoOpinion,
    Counted,
}

impl RatingLevel {
    pub const ALL: [RatingLevel; 7] = [
        RatingLevel::One,
        RatingLevel::Two,
        RatingLevel::Three,
        RatingLevel::Four,
        RatingLevel::Five,
        RatingLevel::NoOpinion,
        RatingLevel::Counted,
    ];

    /// Short key used in stored documents and serialized counts.
    pub fn key(&self) -> &'static str {
        match self {
            RatingLevel::One => "one",
            RatingLevel::Two => "two",
            RatingLevel::Three => "three",
            RatingLevel::Four => "four",
            RatingLevel::Five => "five",
            RatingLevel::NoOpinion => "ko",
            RatingLevel::Counted => "tc",
        }
    }
}

impl fmt::Display for RatingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// One relationship bucket's rating detail on a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingDetail {
    #[serde(default)]
    pub one: bool,
    #[serde(default)]
    pub two: bool,
    #[serde(default)]
    pub three: bool,
    #[serde(default)]
    pub four: bool,
    #[serde(default)]
    pub five: bool,
    #[serde(default)]
    pub ko: bool,
    #[serde(default)]
    pub tc: bool,
    #[serde(default)]
    pub point: f64,
}

impl RatingDetail {
    /// Whether the flag for `level` is set.
    pub fn is_set(&self, level: RatingLevel) -> bool {
        match level {
            RatingLevel::One => self.one,
            RatingLevel::Two => self.two,
            RatingLevel::Three => self.three,
            RatingLevel::Four => self.four,
            RatingLevel::Five => self.five,
            RatingLevel::NoOpinion => self.ko,
            RatingLevel::Counted => self.tc,
        }
    }

    /// Detail for a single 1-5 score, counted with `point == score`.
    pub fn scored(score: u8) -> Self {
        let mut detail = Self {
            tc: true,
            point: f64::from(score),
            ..Self::default()
        };
        match score {
            1 => detail.one = true,
            2 => detail.two = true,
            3 => detail.three = true,
            4 => detail.four = true,
            5 => detail.five = true,
            _ => detail.tc = false,
        }
        detail
    }

    /// Detail for a "no opinion" answer; excluded from averages.
    pub fn no_opinion() -> Self {
        Self {
            ko: true,
            ..Self::default()
        }
    }
}

/// Per-relationship rating sub-objects of a feedback record.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct RatingDetails {
    #[serde(default)]
    pub self_detail: Option<RatingDetail>,
    #[serde(default)]
    pub peer_detail: Option<RatingDetail>,
    #[serde(default)]
    pub subordinate_detail: Option<RatingDetail>,
    #[serde(default)]
    pub senior_detail: Option<RatingDetail>,
}

impl RatingDetails {
    /// Details with a single sub-object filled in for `relationship`.
    pub fn only(relationship: Relationship, detail: RatingDetail) -> Self {
        let mut details = Self::default();
        match relationship {
            Relationship::SelfReview => details.self_detail = Some(detail),
            Relationship::Peer => details.peer_detail = Some(detail),
            Relationship::Subordinate => details.subordinate_detail = Some(detail),
            Relationship::Senior => details.senior_detail = Some(detail),
        }
        details
    }

    /// The sub-object belonging to `relationship`, if present.
    pub fn for_relationship(&self, relationship: Relationship) -> Option<&RatingDetail> {
        match relationship {
            Relationship::SelfReview => self.self_detail.as_ref(),
            Relationship::Peer => self.peer_detail.as_ref(),
            Relationship::Subordinate => self.subordinate_detail.as_ref(),
            Relationship::Senior => self.senior_detail.as_ref(),
        }
    }

    /// Stored field name of the sub-object for `relationship`.
    pub fn field_name(relationship: Relationship) -> &'static str {
        match relationship {
            Relationship::SelfReview => "self_detail",
            Relationship::Peer => "peer_detail",
            Relationship::Subordinate => "subordinate_detail",
            Relationship::Senior => "senior_detail",
        }
    }
}

/// One respondent's answer to one question on one form.
///
/// Which of `rating_details` and `answer` is meaningful depends on the
/// parent question's type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    pub id: FeedbackId,
    pub form_id: FormId,
    pub question_id: QuestionId,
    pub relationship: Relationship,
    #[serde(default)]
    pub rating_details: Option<RatingDetails>,
    #[serde(default)]
    pub answer: Option<String>,
}

impl FeedbackRecord {
    /// A rating answer carrying the detail for the reviewer's own relationship.
    pub fn rating(
        form_id: FormId,
        question_id: QuestionId,
        relationship: Relationship,
        detail: RatingDetail,
    ) -> Self {
        Self {
            id: FeedbackId::new(),
            form_id,
            question_id,
            relationship,
            rating_details: Some(RatingDetails::only(relationship, detail)),
            answer: None,
        }
    }

    /// A free-text answer.
    pub fn text(
        form_id: FormId,
        question_id: QuestionId,
        relationship: Relationship,
        answer: impl Into<String>,
    ) -> Self {
        Self {
            id: FeedbackId::new(),
            form_id,
            question_id,
            relationship,
            rating_details: None,
            answer: Some(answer.into()),
        }
    }

    /// Rating detail for this record's own relationship bucket.
    pub fn own_detail(&self) -> Option<&RatingDetail> {
        self.rating_details
            .as_ref()
            .and_then(|details| details.for_relationship(self.relationship))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scored_detail_sets_matching_flag_and_counts() {
        let detail = RatingDetail::scored(4);
        assert!(detail.four);
        assert!(detail.tc);
        assert!(!detail.one);
        assert_eq!(detail.point, 4.0);
    }

    #[test]
    fn no_opinion_detail_is_not_counted() {
        let detail = RatingDetail::no_opinion();
        assert!(detail.is_set(RatingLevel::NoOpinion));
        assert!(!detail.is_set(RatingLevel::Counted));
    }

    #[test]
    fn own_detail_reads_the_matching_bucket() {
        let record = FeedbackRecord::rating(
            FormId::new(),
            QuestionId::new(),
            Relationship::Senior,
            RatingDetail::scored(5),
        );
        assert_eq!(record.own_detail().map(|d| d.point), Some(5.0));
    }

    #[test]
    fn own_detail_is_none_when_bucket_missing() {
        let mut record = FeedbackRecord::rating(
            FormId::new(),
            QuestionId::new(),
            Relationship::Peer,
            RatingDetail::scored(2),
        );
        record.relationship = Relationship::Senior;
        assert!(record.own_detail().is_none());
    }

    #[test]
    fn rating_detail_deserializes_with_missing_flags() {
        let detail: RatingDetail = serde_json::from_str(r#"{"two":true,"tc":true,"point":2}"#).unwrap();
        assert!(detail.two);
        assert!(!detail.five);
        assert_eq!(detail.point, 2.0);
    }

    #[test]
    fn rating_level_keys_match_stored_names() {
        let keys: Vec<&str> = RatingLevel::ALL.iter().map(|l| l.key()).collect();
        assert_eq!(keys, vec!["one", "two", "three", "four", "five", "ko", "tc"]);
    }
}
