//! Fetch-and-build pipeline shared by the report query handlers.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::domain::foundation::{FormId, Timestamp};
use crate::domain::report::{ReportDocument, ReportError, ReportStatisticsBuilder, Respondent};
use crate::ports::{SurveyReadError, SurveyReader};

/// Loads one form's survey snapshot and computes its report document.
///
/// Every fetch runs under `fetch_timeout`; any failure aborts the pipeline.
#[derive(Clone)]
pub struct ReportPipeline {
    reader: Arc<dyn SurveyReader>,
    builder: ReportStatisticsBuilder,
    fetch_timeout: Duration,
}

impl ReportPipeline {
    pub fn new(
        reader: Arc<dyn SurveyReader>,
        builder: ReportStatisticsBuilder,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            reader,
            builder,
            fetch_timeout,
        }
    }

    pub async fn document(&self, form_id: FormId) -> Result<ReportDocument, ReportError> {
        let form = self
            .fetch("fetching form", self.reader.get_form(form_id))
            .await?;
        debug!(%form_id, template_id = %form.template_id, "Form loaded");

        let template = self
            .fetch("fetching template", self.reader.get_template(form.template_id))
            .await?;

        let question_ids = template.scan_order();
        let questions = self
            .fetch(
                "fetching questions",
                self.reader.get_questions_by_ids(&question_ids),
            )
            .await?;
        debug!(
            requested = question_ids.len(),
            found = questions.len(),
            "Questions loaded"
        );

        let records = self
            .fetch(
                "fetching feedback",
                self.reader.get_feedback_records_by_form(form_id),
            )
            .await?;
        debug!(records = records.len(), "Feedback loaded");

        let statistics = self.builder.build(&template, &questions, &records)?;

        Ok(ReportDocument {
            form_id,
            respondent: Respondent::from_form(&form),
            template_title: template.title,
            statistics,
            generated_at: Timestamp::now(),
        })
    }

    async fn fetch<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, SurveyReadError>>,
    ) -> Result<T, ReportError> {
        match tokio::time::timeout(self.fetch_timeout, fut).await {
            Ok(result) => result.map_err(ReportError::from),
            Err(_) => Err(ReportError::Timeout {
                operation,
                seconds: self.fetch_timeout.as_secs(),
            }),
        }
    }
}
