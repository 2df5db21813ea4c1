//! Feedback Report - 360-degree feedback aggregation and report generation
//!
//! This crate computes per-question statistics from the feedback collected on
//! a review form (self, peer, subordinate and senior reviewers) and renders
//! them as a downloadable report.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
