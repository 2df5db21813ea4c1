//! GenerateReportHandler - Query handler producing a downloadable report.
//!
//! Fetches the form's survey snapshot, computes statistics, and hands the
//! resulting document to the configured renderer. Any failure along the way
//! fails the whole request; no partial report is produced.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::foundation::FormId;
use crate::domain::report::ReportError;
use crate::ports::{RenderedReport, ReportRenderer};

use super::ReportPipeline;

/// Query to generate the report for one form.
#[derive(Debug, Clone)]
pub struct GenerateReportQuery {
    pub form_id: FormId,
}

/// Handler for generating reports.
pub struct GenerateReportHandler {
    pipeline: ReportPipeline,
    renderer: Arc<dyn ReportRenderer>,
}

impl GenerateReportHandler {
    pub fn new(pipeline: ReportPipeline, renderer: Arc<dyn ReportRenderer>) -> Self {
        Self { pipeline, renderer }
    }

    pub async fn handle(&self, query: GenerateReportQuery) -> Result<RenderedReport, ReportError> {
        let document = self.pipeline.document(query.form_id).await?;

        let report = self.renderer.render(&document).await.map_err(|e| {
            error!(form_id = %query.form_id, error = %e, "Report rendering failed");
            ReportError::from(e)
        })?;

        info!(
            form_id = %query.form_id,
            format = %report.format,
            filename = %report.filename,
            rating_rows = document.statistics.rating_statistics.len(),
            text_rows = document.statistics.text_statistics.len(),
            "Report generated"
        );
        Ok(report)
    }
}
