//! Per-question aggregation of feedback records.

use tracing::warn;

use crate::domain::survey::{
    FeedbackRecord, Question, QuestionType, RatingDetail, RatingDetails, RatingLevel, Relationship,
};

use super::{AnswerStatistic, QuestionStatistic, RatingCounts, ReportError};

/// Marker prepended to every collected free-text answer.
pub const ANSWER_PREFIX: &str = "- ";

/// Feedback records split by reviewer relationship.
///
/// Every input record lands in exactly one bucket, in input order.
#[derive(Debug, Default)]
pub struct RelationshipBuckets<'a> {
    pub self_review: Vec<&'a FeedbackRecord>,
    pub peer: Vec<&'a FeedbackRecord>,
    pub subordinate: Vec<&'a FeedbackRecord>,
    pub senior: Vec<&'a FeedbackRecord>,
}

impl<'a> RelationshipBuckets<'a> {
    pub fn partition(records: impl IntoIterator<Item = &'a FeedbackRecord>) -> Self {
        let mut buckets = Self::default();
        for record in records {
            match record.relationship {
                Relationship::SelfReview => buckets.self_review.push(record),
                Relationship::Peer => buckets.peer.push(record),
                Relationship::Subordinate => buckets.subordinate.push(record),
                Relationship::Senior => buckets.senior.push(record),
            }
        }
        buckets
    }

    pub fn bucket(&self, relationship: Relationship) -> &[&'a FeedbackRecord] {
        match relationship {
            Relationship::SelfReview => &self.self_review,
            Relationship::Peer => &self.peer,
            Relationship::Subordinate => &self.subordinate,
            Relationship::Senior => &self.senior,
        }
    }

    pub fn len(&self) -> usize {
        self.self_review.len() + self.peer.len() + self.subordinate.len() + self.senior.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result of aggregating one question.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionOutcome {
    Rating(QuestionStatistic),
    Text(AnswerStatistic),
}

/// Average score and flag tally for one reviewer bucket.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
struct BucketSummary {
    average: f64,
    counts: RatingCounts,
}

/// Stateless aggregator turning one question's feedback into statistics.
pub struct QuestionAggregator;

impl QuestionAggregator {
    /// Aggregates `question` according to its type.
    ///
    /// `records` may contain feedback for other questions; those are ignored.
    pub fn aggregate(
        question: &Question,
        index: usize,
        records: &[FeedbackRecord],
    ) -> Result<QuestionOutcome, ReportError> {
        match question.question_type {
            QuestionType::Point => {
                Self::aggregate_rating(question, index, records).map(QuestionOutcome::Rating)
            }
            QuestionType::Text => Ok(QuestionOutcome::Text(Self::aggregate_text(
                question, index, records,
            ))),
        }
    }

    /// Builds the statistics row of a rating question.
    ///
    /// # Errors
    ///
    /// `ReportError::DataShape` when a record lacks the rating detail of its
    /// own relationship bucket.
    pub fn aggregate_rating(
        question: &Question,
        index: usize,
        records: &[FeedbackRecord],
    ) -> Result<QuestionStatistic, ReportError> {
        let buckets = Self::buckets_for(question, records);

        let self_point = Self::self_point(question, &buckets)?;
        let senior = Self::summarize(question, &buckets, Relationship::Senior)?;
        let peer = Self::summarize(question, &buckets, Relationship::Peer)?;
        let subordinate = Self::summarize(question, &buckets, Relationship::Subordinate)?;

        Ok(QuestionStatistic {
            index,
            question_id: question.id,
            title: question.title.clone(),
            self_point,
            avg_senior_point: senior.average,
            avg_peer_point: peer.average,
            avg_subordinate_point: subordinate.average,
            count_senior: senior.counts,
            count_peer: peer.counts,
            count_subordinate: subordinate.counts,
        })
    }

    /// Collects the answers of a free-text question per reviewer bucket.
    ///
    /// Self answers are not collected. Records without an answer are skipped.
    pub fn aggregate_text(
        question: &Question,
        index: usize,
        records: &[FeedbackRecord],
    ) -> AnswerStatistic {
        let buckets = Self::buckets_for(question, records);
        let collect = |relationship: Relationship| -> Vec<String> {
            buckets
                .bucket(relationship)
                .iter()
                .filter_map(|record| record.answer.as_deref())
                .map(|answer| format!("{}{}", ANSWER_PREFIX, answer))
                .collect()
        };

        AnswerStatistic {
            index,
            question_id: question.id,
            title: question.title.clone(),
            string_seniors: collect(Relationship::Senior),
            string_peers: collect(Relationship::Peer),
            string_subordinates: collect(Relationship::Subordinate),
        }
    }

    fn buckets_for<'a>(question: &Question, records: &'a [FeedbackRecord]) -> RelationshipBuckets<'a> {
        RelationshipBuckets::partition(
            records
                .iter()
                .filter(|record| record.question_id == question.id),
        )
    }

    fn detail<'r>(
        question: &Question,
        record: &'r FeedbackRecord,
    ) -> Result<&'r RatingDetail, ReportError> {
        record.own_detail().ok_or_else(|| ReportError::DataShape {
            question_id: question.id,
            feedback_id: record.id,
            relationship: record.relationship,
            expected: RatingDetails::field_name(record.relationship),
        })
    }

    /// Last Self record wins; several Self records are reported, not averaged.
    fn self_point(question: &Question, buckets: &RelationshipBuckets<'_>) -> Result<f64, ReportError> {
        if buckets.self_review.len() > 1 {
            warn!(
                question_id = %question.id,
                count = buckets.self_review.len(),
                "multiple self reviews for question, keeping the last one"
            );
        }

        let mut point = 0.0;
        for record in &buckets.self_review {
            point = Self::detail(question, record)?.point;
        }
        Ok(point)
    }

    fn summarize(
        question: &Question,
        buckets: &RelationshipBuckets<'_>,
        relationship: Relationship,
    ) -> Result<BucketSummary, ReportError> {
        let mut summary = BucketSummary::default();
        let mut total = 0.0;
        let mut counted = 0u32;

        for record in buckets.bucket(relationship) {
            let detail = Self::detail(question, record)?;
            for level in RatingLevel::ALL {
                if detail.is_set(level) {
                    summary.counts.increment(level);
                }
            }
            if detail.tc {
                total += detail.point;
                counted += 1;
            }
        }

        if counted > 0 {
            summary.average = total / f64::from(counted);
        }
        Ok(summary)
    }
}
