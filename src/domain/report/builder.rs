//! Report statistics builder - runs the aggregator across a whole template.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::foundation::QuestionId;
use crate::domain::survey::{FeedbackRecord, Question, QuestionType, Relationship, Template};

use super::{
    format_one_decimal, AnswerStatistic, CriteriaSeries, EntityKind, QuestionAggregator,
    QuestionStatistic, ReportError, ReportStatistics,
};

/// Order of the criteria series handed to chart renderers.
pub const CRITERIA_ORDER: [Relationship; 4] = [
    Relationship::SelfReview,
    Relationship::Senior,
    Relationship::Peer,
    Relationship::Subordinate,
];

/// How table row indexes are assigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexNumbering {
    /// 1-based position within the rating list and within the text list.
    #[default]
    PerList,
    /// One counter over every scanned question, rating or text; rows keep
    /// the counter value at which they were scanned, so gaps appear.
    SharedScan,
}

/// Assembles `ReportStatistics` for one form.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportStatisticsBuilder {
    numbering: IndexNumbering,
}

impl ReportStatisticsBuilder {
    pub fn new(numbering: IndexNumbering) -> Self {
        Self { numbering }
    }

    pub fn numbering(&self) -> IndexNumbering {
        self.numbering
    }

    /// Builds statistics for every question of `template`.
    ///
    /// Questions are split by their own type in template scan order, so a
    /// rating question placed in an answer section is still a rating row.
    ///
    /// # Errors
    ///
    /// - `NotFound` when a template question is absent from `questions`
    /// - `DataShape` from the aggregator
    pub fn build(
        &self,
        template: &Template,
        questions: &[Question],
        records: &[FeedbackRecord],
    ) -> Result<ReportStatistics, ReportError> {
        let by_id: HashMap<QuestionId, &Question> =
            questions.iter().map(|question| (question.id, question)).collect();

        let mut rating_statistics: Vec<QuestionStatistic> = Vec::new();
        let mut text_statistics: Vec<AnswerStatistic> = Vec::new();
        let mut scanned = 0usize;

        for question_id in template.scan_order() {
            let question = by_id
                .get(&question_id)
                .ok_or_else(|| ReportError::not_found(EntityKind::Question, question_id))?;
            scanned += 1;

            match question.question_type {
                QuestionType::Point => {
                    let index = match self.numbering {
                        IndexNumbering::PerList => rating_statistics.len() + 1,
                        IndexNumbering::SharedScan => scanned,
                    };
                    rating_statistics.push(QuestionAggregator::aggregate_rating(
                        question, index, records,
                    )?);
                }
                QuestionType::Text => {
                    let index = match self.numbering {
                        IndexNumbering::PerList => text_statistics.len() + 1,
                        IndexNumbering::SharedScan => scanned,
                    };
                    text_statistics.push(QuestionAggregator::aggregate_text(
                        question, index, records,
                    ));
                }
            }
        }

        let criteria_series = criteria_series(&rating_statistics);
        Ok(ReportStatistics {
            rating_statistics,
            text_statistics,
            criteria_series,
        })
    }
}

/// One series per relationship of the per-question scores, one decimal each.
pub fn criteria_series(statistics: &[QuestionStatistic]) -> Vec<CriteriaSeries> {
    CRITERIA_ORDER
        .iter()
        .map(|relationship| CriteriaSeries {
            relationship: *relationship,
            title: relationship.label().to_string(),
            values: statistics
                .iter()
                .map(|stat| format_one_decimal(stat.point_for(*relationship)))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{FormId, TemplateId};
    use crate::domain::survey::{QuestionGroup, RatingDetail};

    struct Fixture {
        form: FormId,
        template: Template,
        questions: Vec<Question>,
    }

    /// review: [R1, T1], [R2]; answer: [T2, R3]
    fn fixture() -> Fixture {
        let r1 = Question::new(QuestionId::new(), "Sets direction", QuestionType::Point);
        let t1 = Question::new(QuestionId::new(), "Strengths", QuestionType::Text);
        let r2 = Question::new(QuestionId::new(), "Delivers on time", QuestionType::Point);
        let t2 = Question::new(QuestionId::new(), "Improvements", QuestionType::Text);
        let r3 = Question::new(QuestionId::new(), "Coaches others", QuestionType::Point);

        let template = Template {
            id: TemplateId::new(),
            title: "Mid-year 360".to_string(),
            review: vec![
                QuestionGroup::new("Leadership", vec![r1.id, t1.id]),
                QuestionGroup::new("Execution", vec![r2.id]),
            ],
            answer: vec![QuestionGroup::new("Comments", vec![t2.id, r3.id])],
        };

        Fixture {
            form: FormId::new(),
            template,
            questions: vec![r1, t1, r2, t2, r3],
        }
    }

    fn titles(stats: &ReportStatistics) -> (Vec<&str>, Vec<&str>) {
        (
            stats.rating_statistics.iter().map(|s| s.title.as_str()).collect(),
            stats.text_statistics.iter().map(|s| s.title.as_str()).collect(),
        )
    }

    #[test]
    fn splits_by_type_in_scan_order() {
        let f = fixture();
        let stats = ReportStatisticsBuilder::default()
            .build(&f.template, &f.questions, &[])
            .unwrap();

        let (rating, text) = titles(&stats);
        assert_eq!(rating, vec!["Sets direction", "Delivers on time", "Coaches others"]);
        assert_eq!(text, vec!["Strengths", "Improvements"]);
    }

    #[test]
    fn per_list_numbering_is_sequential() {
        let f = fixture();
        let stats = ReportStatisticsBuilder::new(IndexNumbering::PerList)
            .build(&f.template, &f.questions, &[])
            .unwrap();

        let rating: Vec<usize> = stats.rating_statistics.iter().map(|s| s.index).collect();
        let text: Vec<usize> = stats.text_statistics.iter().map(|s| s.index).collect();
        assert_eq!(rating, vec![1, 2, 3]);
        assert_eq!(text, vec![1, 2]);
    }

    #[test]
    fn shared_scan_numbering_keeps_scan_positions() {
        let f = fixture();
        let stats = ReportStatisticsBuilder::new(IndexNumbering::SharedScan)
            .build(&f.template, &f.questions, &[])
            .unwrap();

        let rating: Vec<usize> = stats.rating_statistics.iter().map(|s| s.index).collect();
        let text: Vec<usize> = stats.text_statistics.iter().map(|s| s.index).collect();
        assert_eq!(rating, vec![1, 3, 5]);
        assert_eq!(text, vec![2, 4]);
    }

    #[test]
    fn missing_question_fails_fast() {
        let mut f = fixture();
        let dropped = f.questions.remove(2);

        let err = ReportStatisticsBuilder::default()
            .build(&f.template, &f.questions, &[])
            .unwrap_err();
        match err {
            ReportError::NotFound { entity, id } => {
                assert_eq!(entity, EntityKind::Question);
                assert_eq!(id, dropped.id.to_string());
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn feedback_for_unknown_question_is_excluded() {
        let f = fixture();
        let r1 = &f.questions[0];
        let records = vec![
            FeedbackRecord::rating(f.form, r1.id, Relationship::Peer, RatingDetail::scored(3)),
            FeedbackRecord::rating(f.form, QuestionId::new(), Relationship::Peer, RatingDetail::scored(1)),
        ];

        let stats = ReportStatisticsBuilder::default()
            .build(&f.template, &f.questions, &records)
            .unwrap();
        assert_eq!(stats.rating_statistics[0].avg_peer_point, 3.0);
        assert!(stats
            .rating_statistics
            .iter()
            .skip(1)
            .all(|s| s.avg_peer_point == 0.0));
    }

    #[test]
    fn criteria_series_follow_rating_rows() {
        let f = fixture();
        let r1 = &f.questions[0];
        let r3 = &f.questions[4];
        let records = vec![
            FeedbackRecord::rating(f.form, r1.id, Relationship::SelfReview, RatingDetail::scored(4)),
            FeedbackRecord::rating(f.form, r1.id, Relationship::Senior, RatingDetail::scored(3)),
            FeedbackRecord::rating(f.form, r1.id, Relationship::Senior, RatingDetail::scored(4)),
            FeedbackRecord::rating(f.form, r3.id, Relationship::Subordinate, RatingDetail::scored(5)),
        ];

        let stats = ReportStatisticsBuilder::default()
            .build(&f.template, &f.questions, &records)
            .unwrap();

        let titles: Vec<&str> = stats.criteria_series.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Self", "Senior", "Peer", "Subordinate"]);
        assert_eq!(stats.criteria_series[0].values, vec!["4.0", "0.0", "0.0"]);
        assert_eq!(stats.criteria_series[1].values, vec!["3.5", "0.0", "0.0"]);
        assert_eq!(stats.criteria_series[3].values, vec!["0.0", "0.0", "5.0"]);
    }

    #[test]
    fn data_shape_errors_propagate() {
        let f = fixture();
        let r2 = &f.questions[2];
        let mut broken =
            FeedbackRecord::rating(f.form, r2.id, Relationship::Peer, RatingDetail::scored(2));
        broken.rating_details = None;

        let err = ReportStatisticsBuilder::default()
            .build(&f.template, &f.questions, &[broken])
            .unwrap_err();
        assert!(matches!(err, ReportError::DataShape { .. }));
    }
}
