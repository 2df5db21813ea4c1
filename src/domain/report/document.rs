//! The renderer-facing report document and its filename convention.

use serde::Serialize;

use crate::domain::foundation::{FormId, Timestamp};
use crate::domain::survey::Form;

use super::ReportStatistics;

/// Identity of the reviewed person as printed in the report header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    pub full_name: String,
    pub position: String,
    pub gender_salutation: String,
}

impl Respondent {
    pub fn from_form(form: &Form) -> Self {
        Self {
            full_name: form.full_name.clone(),
            position: form.position.clone(),
            gender_salutation: form.gender.salutation().to_string(),
        }
    }

    /// Salutation and name, e.g. `Ms. Jane Doe`.
    pub fn addressed_name(&self) -> String {
        if self.gender_salutation.is_empty() {
            self.full_name.clone()
        } else {
            format!("{} {}", self.gender_salutation, self.full_name)
        }
    }
}

/// Everything a renderer receives for one report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDocument {
    pub form_id: FormId,
    pub respondent: Respondent,
    pub template_title: String,
    #[serde(flatten)]
    pub statistics: ReportStatistics,
    pub generated_at: Timestamp,
}

impl ReportDocument {
    /// Suggested download name for this document.
    pub fn filename(&self, extension: &str) -> String {
        report_filename(&self.respondent.full_name, &self.generated_at, extension)
    }
}

/// `{fullName without whitespace}{YYYYMMDDHHmmss}.{extension}`
pub fn report_filename(full_name: &str, at: &Timestamp, extension: &str) -> String {
    let sanitized: String = full_name.chars().filter(|c| !c.is_whitespace()).collect();
    format!("{}{}.{}", sanitized, at.compact(), extension)
}
