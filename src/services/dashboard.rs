//! Dashboard statistics: fetch the full response set, then aggregate.

use sqlx::PgPool;

use crate::errors::AppError;
use crate::models::taxonomy::Taxonomy;
use crate::services::charts::{self, ChartSeries};
use crate::services::report::{self, SurveyReport};
use crate::services::survey;

/// Aggregated report for the taxonomy's survey type, recomputed from the
/// full collection on every call.
pub async fn get_report(pool: &PgPool, taxonomy: &Taxonomy) -> Result<SurveyReport, AppError> {
    let responses = survey::fetch_all(pool).await?;
    let report = report::build_report(&responses, taxonomy);
    tracing::debug!(
        survey_type = %report.survey_type,
        total_responses = report.total_responses,
        "Built survey report"
    );
    Ok(report)
}

/// Chart series for the dashboard page.
pub async fn get_charts(pool: &PgPool, taxonomy: &Taxonomy) -> Result<Vec<ChartSeries>, AppError> {
    let report = get_report(pool, taxonomy).await?;
    Ok(charts::report_charts(&report))
}
