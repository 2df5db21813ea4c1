//! Integration tests for report generation.
//!
//! These tests drive the application layer end to end over the in-memory
//! survey store:
//! 1. Statistics computed from a realistic review cycle
//! 2. Serialized JSON follows the display rules (one decimal, blank zeros)
//! 3. Rendered Markdown and HTML carry the computed values

use std::sync::Arc;
use std::time::Duration;

use feedback_report::adapters::{HtmlReportRenderer, InMemorySurveyStore, MarkdownReportRenderer};
use feedback_report::application::{
    GenerateReportHandler, GenerateReportQuery, GetReportStatisticsHandler,
    GetReportStatisticsQuery, ReportPipeline,
};
use feedback_report::domain::foundation::{FormId, QuestionId, TemplateId};
use feedback_report::domain::report::{IndexNumbering, ReportStatisticsBuilder};
use feedback_report::domain::survey::{
    FeedbackRecord, Form, Gender, Question, QuestionGroup, QuestionType, RatingDetail,
    Relationship, Template,
};
use feedback_report::ports::ReportFormat;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct ReviewCycle {
    store: InMemorySurveyStore,
    form_id: FormId,
    communication: QuestionId,
    delivery: QuestionId,
}

/// A template with two rating questions and two free-text questions, one of
/// each placed in the "wrong" section, plus a full round of feedback.
async fn review_cycle() -> ReviewCycle {
    let store = InMemorySurveyStore::new();

    let communication = Question::new(QuestionId::new(), "Communicates clearly", QuestionType::Point);
    let strengths = Question::new(QuestionId::new(), "Key strengths", QuestionType::Text);
    let delivery = Question::new(QuestionId::new(), "Delivers on commitments", QuestionType::Point);
    let improve = Question::new(QuestionId::new(), "What to improve", QuestionType::Text);

    let template = Template {
        id: TemplateId::new(),
        title: "Engineering 360".to_string(),
        review: vec![
            QuestionGroup::new("Collaboration", vec![communication.id, strengths.id]),
            QuestionGroup::new("Execution", vec![]),
        ],
        answer: vec![QuestionGroup::new("Open questions", vec![improve.id, delivery.id])],
    };
    let form = Form {
        id: FormId::new(),
        template_id: template.id,
        full_name: "Jane Q Doe".to_string(),
        position: "Staff Engineer".to_string(),
        gender: Gender::Female,
    };
    let f = form.id;

    store
        .insert_feedback(vec![
            // Self 4, Seniors 3 and 5
            FeedbackRecord::rating(f, communication.id, Relationship::SelfReview, RatingDetail::scored(4)),
            FeedbackRecord::rating(f, communication.id, Relationship::Senior, RatingDetail::scored(3)),
            FeedbackRecord::rating(f, communication.id, Relationship::Senior, RatingDetail::scored(5)),
            FeedbackRecord::rating(f, communication.id, Relationship::Subordinate, RatingDetail::no_opinion()),
            // two Senior "one" flags
            FeedbackRecord::rating(f, delivery.id, Relationship::Senior, RatingDetail::scored(1)),
            FeedbackRecord::rating(f, delivery.id, Relationship::Senior, RatingDetail::scored(1)),
            FeedbackRecord::rating(f, delivery.id, Relationship::Peer, RatingDetail::scored(4)),
            // answers keep submission order
            FeedbackRecord::text(f, strengths.id, Relationship::Senior, "a"),
            FeedbackRecord::text(f, strengths.id, Relationship::Peer, "Thorough reviews"),
            FeedbackRecord::text(f, strengths.id, Relationship::Senior, "b"),
            FeedbackRecord::text(f, strengths.id, Relationship::SelfReview, "not collected"),
            FeedbackRecord::text(f, strengths.id, Relationship::Senior, "c"),
            // feedback for a question outside the template
            FeedbackRecord::rating(f, QuestionId::new(), Relationship::Peer, RatingDetail::scored(1)),
        ])
        .await;

    store
        .insert_questions(vec![communication.clone(), strengths, delivery.clone(), improve])
        .await;
    store.insert_template(template).await;
    store.insert_form(form).await;

    ReviewCycle {
        store,
        form_id: f,
        communication: communication.id,
        delivery: delivery.id,
    }
}

fn pipeline(store: InMemorySurveyStore, numbering: IndexNumbering) -> ReportPipeline {
    ReportPipeline::new(
        Arc::new(store),
        ReportStatisticsBuilder::new(numbering),
        Duration::from_secs(5),
    )
}

// =============================================================================
// Statistics
// =============================================================================

#[tokio::test]
async fn statistics_follow_template_scan_order_and_question_type() {
    let cycle = review_cycle().await;
    let handler = GetReportStatisticsHandler::new(pipeline(cycle.store, IndexNumbering::PerList));

    let document = handler
        .handle(GetReportStatisticsQuery { form_id: cycle.form_id })
        .await
        .unwrap();
    let stats = &document.statistics;

    let rating_ids: Vec<QuestionId> = stats.rating_statistics.iter().map(|s| s.question_id).collect();
    assert_eq!(rating_ids, vec![cycle.communication, cycle.delivery]);
    let rating_indexes: Vec<usize> = stats.rating_statistics.iter().map(|s| s.index).collect();
    assert_eq!(rating_indexes, vec![1, 2]);

    let text_titles: Vec<&str> = stats.text_statistics.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(text_titles, vec!["Key strengths", "What to improve"]);

    let communication = &stats.rating_statistics[0];
    assert_eq!(communication.self_point, 4.0);
    assert_eq!(communication.avg_senior_point, 4.0);
    assert_eq!(communication.avg_subordinate_point, 0.0);
    assert_eq!(communication.avg_peer_point, 0.0);

    let strengths = &stats.text_statistics[0];
    assert_eq!(strengths.string_seniors, vec!["- a", "- b", "- c"]);
    assert_eq!(strengths.string_peers, vec!["- Thorough reviews"]);
    assert!(stats.text_statistics[1].string_seniors.is_empty());
}

#[tokio::test]
async fn shared_scan_numbering_leaves_gaps() {
    let cycle = review_cycle().await;
    let handler = GetReportStatisticsHandler::new(pipeline(cycle.store, IndexNumbering::SharedScan));

    let document = handler
        .handle(GetReportStatisticsQuery { form_id: cycle.form_id })
        .await
        .unwrap();

    let rating: Vec<usize> = document.statistics.rating_statistics.iter().map(|s| s.index).collect();
    let text: Vec<usize> = document.statistics.text_statistics.iter().map(|s| s.index).collect();
    assert_eq!(rating, vec![1, 4]);
    assert_eq!(text, vec![2, 3]);
}

#[tokio::test]
async fn serialized_statistics_apply_display_rules() {
    let cycle = review_cycle().await;
    let handler = GetReportStatisticsHandler::new(pipeline(cycle.store, IndexNumbering::PerList));

    let document = handler
        .handle(GetReportStatisticsQuery { form_id: cycle.form_id })
        .await
        .unwrap();
    let json = serde_json::to_value(&document).unwrap();

    let communication = &json["ratingStatistics"][0];
    assert_eq!(communication["selfPoint"], "4.0");
    assert_eq!(communication["avgSeniorPoint"], "4.0");
    // no peer records
    assert_eq!(communication["avgPeerPoint"], "0.0");
    assert_eq!(communication["countPeer"]["tc"], "");
    assert_eq!(communication["countSubordinate"]["ko"], "1");
    assert_eq!(communication["countSubordinate"]["tc"], "");

    let delivery = &json["ratingStatistics"][1];
    assert_eq!(delivery["countSenior"]["one"], "2");
    assert_eq!(delivery["countSenior"]["two"], "");
    assert_eq!(delivery["avgSeniorPoint"], "1.0");
    assert_eq!(delivery["avgPeerPoint"], "4.0");

    let series = json["criteriaSeries"].as_array().unwrap();
    let titles: Vec<&str> = series.iter().map(|s| s["title"].as_str().unwrap()).collect();
    assert_eq!(titles, vec!["Self", "Senior", "Peer", "Subordinate"]);
    assert_eq!(series[1]["values"], serde_json::json!(["4.0", "1.0"]));
    assert_eq!(json["respondent"]["genderSalutation"], "Ms.");
}

// =============================================================================
// Rendering
// =============================================================================

#[tokio::test]
async fn markdown_report_carries_computed_values() {
    let cycle = review_cycle().await;
    let handler = GenerateReportHandler::new(
        pipeline(cycle.store, IndexNumbering::PerList),
        Arc::new(MarkdownReportRenderer::new()),
    );

    let report = handler
        .handle(GenerateReportQuery { form_id: cycle.form_id })
        .await
        .unwrap();

    assert_eq!(report.format, ReportFormat::Markdown);
    assert!(report.filename.starts_with("JaneQDoe"));
    assert!(report.filename.ends_with(".md"));
    // JaneQDoe + 14 digit timestamp + ".md"
    assert_eq!(report.filename.len(), "JaneQDoe".len() + 14 + 3);

    let markdown = String::from_utf8(report.content).unwrap();
    assert!(markdown.contains("**Ms. Jane Q Doe**"));
    assert!(markdown.contains("| 1 | Communicates clearly | 4.0 | 4.0 | 0.0 | 0.0 |"));
    assert!(markdown.contains("- a\n- b\n- c\n"));
    assert!(!markdown.contains("not collected"));
}

#[tokio::test]
async fn html_report_without_chart_provider_has_no_image() {
    let cycle = review_cycle().await;
    let handler = GenerateReportHandler::new(
        pipeline(cycle.store, IndexNumbering::PerList),
        Arc::new(HtmlReportRenderer::new()),
    );

    let report = handler
        .handle(GenerateReportQuery { form_id: cycle.form_id })
        .await
        .unwrap();

    assert_eq!(report.content_type, "text/html; charset=utf-8");
    let html = String::from_utf8(report.content).unwrap();
    assert!(html.contains("<h1>360 Feedback Report: Engineering 360</h1>"));
    assert!(!html.contains("<img"));
}
