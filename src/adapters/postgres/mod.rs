//! PostgreSQL adapters - Database implementations for reader ports.
//!
//! - `PostgresSurveyReader` - Reads forms, templates, questions and feedback

mod survey_reader;

pub use survey_reader::PostgresSurveyReader;
