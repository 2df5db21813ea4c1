//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `survey` - Forms, templates, questions, and submitted feedback
//! - `report` - Feedback aggregation and report statistics

pub mod foundation;
pub mod report;
pub mod survey;
