//! Markdown composition of a report document.
//!
//! Every renderer starts from this Markdown: the Markdown renderer returns it
//! as-is, the HTML renderer runs it through pulldown-cmark, and the PDF
//! renderer hands it to Pandoc.

use crate::domain::report::{
    format_one_decimal, AnswerStatistic, QuestionStatistic, ReportDocument, CRITERIA_ORDER,
};
use crate::domain::survey::{RatingLevel, Relationship};

/// Relationships that have a distribution table (Self has a single score).
const DISTRIBUTION_ORDER: [Relationship; 3] =
    [Relationship::Senior, Relationship::Peer, Relationship::Subordinate];

/// Composes report Markdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownReport;

impl MarkdownReport {
    /// Renders `document` to Markdown; `chart_uri` is embedded as an image when given.
    pub fn compose(document: &ReportDocument, chart_uri: Option<&str>) -> String {
        let mut out = header(document);

        let statistics = &document.statistics;
        if !statistics.rating_statistics.is_empty() {
            out.push_str(&score_table(&statistics.rating_statistics));
            out.push_str(&distribution_tables(&statistics.rating_statistics));
        }
        if let Some(uri) = chart_uri {
            out.push_str("## Score comparison\n\n");
            out.push_str(&format!("![Average score by relationship]({})\n\n", uri));
        }
        if !statistics.text_statistics.is_empty() {
            out.push_str(&written_feedback(&statistics.text_statistics));
        }
        out
    }
}

fn header(document: &ReportDocument) -> String {
    let respondent = &document.respondent;
    let mut section = format!("# 360 Feedback Report: {}\n\n", inline(&document.template_title));
    section.push_str(&format!("**{}**\n\n", inline(&respondent.addressed_name())));
    if !respondent.position.is_empty() {
        section.push_str(&format!("{}\n\n", inline(&respondent.position)));
    }
    section.push_str(&format!(
        "Generated {}\n\n",
        document.generated_at.as_datetime().format("%Y-%m-%d %H:%M UTC")
    ));
    section
}

fn score_table(stats: &[QuestionStatistic]) -> String {
    let mut section = String::from("## Scores\n\n| # | Question |");
    for relationship in CRITERIA_ORDER {
        section.push_str(&format!(" {} |", relationship.label()));
    }
    section.push_str("\n|---|---|---|---|---|---|\n");

    for stat in stats {
        section.push_str(&format!("| {} | {} |", stat.index, cell(&stat.title)));
        for relationship in CRITERIA_ORDER {
            section.push_str(&format!(" {} |", format_one_decimal(stat.point_for(relationship))));
        }
        section.push('\n');
    }
    section.push('\n');
    section
}

fn distribution_tables(stats: &[QuestionStatistic]) -> String {
    let mut section = String::from("## Rating distribution\n\n");
    for stat in stats {
        section.push_str(&format!("### {}. {}\n\n", stat.index, inline(&stat.title)));
        section.push_str("| Relationship | 1 | 2 | 3 | 4 | 5 | No opinion | Rated |\n");
        section.push_str("|---|---|---|---|---|---|---|---|\n");
        for relationship in DISTRIBUTION_ORDER {
            let Some(counts) = stat.counts_for(relationship) else {
                continue;
            };
            section.push_str(&format!("| {} |", relationship.label()));
            for level in RatingLevel::ALL {
                section.push_str(&format!(" {} |", counts.display(level)));
            }
            section.push('\n');
        }
        section.push('\n');
    }
    section
}

fn written_feedback(stats: &[AnswerStatistic]) -> String {
    let mut section = String::from("## Written feedback\n\n");
    for stat in stats {
        section.push_str(&format!("### {}. {}\n\n", stat.index, inline(&stat.title)));
        for relationship in DISTRIBUTION_ORDER {
            let answers = stat.answers_for(relationship);
            if answers.is_empty() {
                continue;
            }
            section.push_str(&format!("**{}**\n\n", relationship.label()));
            for answer in answers {
                section.push_str(&inline(answer));
                section.push('\n');
            }
            section.push('\n');
        }
    }
    section
}

/// Collapses line breaks so free text stays inside its block.
fn inline(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Inline text that is also safe inside a table cell.
fn cell(text: &str) -> String {
    inline(text).replace('|', "\\|")
}
