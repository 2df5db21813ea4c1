//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, timestamps, and error types that form the
//! vocabulary of the feedback report domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError, ValidationErrors};
pub use ids::{FeedbackId, FormId, QuestionId, TemplateId};
pub use timestamp::Timestamp;
