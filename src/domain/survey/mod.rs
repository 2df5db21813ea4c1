//! Survey module - Forms, templates, questions, and submitted feedback.
//!
//! These are the persisted entities the report engine reads. The
//! `validation` submodule converts raw stored documents into them.

mod feedback;
mod form;
mod question;
mod relationship;
mod template;
pub mod validation;

pub use feedback::{FeedbackRecord, RatingDetail, RatingDetails, RatingLevel};
pub use form::{Form, Gender};
pub use question::{Question, QuestionType};
pub use relationship::Relationship;
pub use template::{QuestionGroup, Template};
pub use validation::{FeedbackInput, FormInput, QuestionInput, TemplateInput};
