//! Report module - Feedback aggregation and statistics computation.
//!
//! Pure, synchronous computation over a snapshot of survey data:
//!
//! - `QuestionAggregator` - statistics for a single question
//! - `ReportStatisticsBuilder` - runs the aggregator across a template
//! - `ReportDocument` - statistics plus respondent identity for renderers
//!
//! Nothing here performs I/O; fetching and rendering live behind ports.

mod aggregator;
mod builder;
mod document;
mod errors;
mod statistics;

pub use aggregator::{QuestionAggregator, QuestionOutcome, RelationshipBuckets, ANSWER_PREFIX};
pub use builder::{criteria_series, IndexNumbering, ReportStatisticsBuilder, CRITERIA_ORDER};
pub use document::{report_filename, ReportDocument, Respondent};
pub use errors::{EntityKind, ReportError};
pub use statistics::{
    format_one_decimal, AnswerStatistic, CriteriaSeries, QuestionStatistic, RatingCounts,
    ReportStatistics,
};
