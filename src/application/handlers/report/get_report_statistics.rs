//! GetReportStatisticsHandler - Query handler for report previews.

use crate::domain::foundation::FormId;
use crate::domain::report::{ReportDocument, ReportError};

use super::ReportPipeline;

/// Query for the statistics of one form.
#[derive(Debug, Clone)]
pub struct GetReportStatisticsQuery {
    pub form_id: FormId,
}

/// Handler returning the computed document without rendering it.
pub struct GetReportStatisticsHandler {
    pipeline: ReportPipeline,
}

impl GetReportStatisticsHandler {
    pub fn new(pipeline: ReportPipeline) -> Self {
        Self { pipeline }
    }

    pub async fn handle(
        &self,
        query: GetReportStatisticsQuery,
    ) -> Result<ReportDocument, ReportError> {
        self.pipeline.document(query.form_id).await
    }
}
