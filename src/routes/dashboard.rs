//! Dashboard routes: aggregated survey statistics and chart series.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::survey::SurveyType;
use crate::services::charts::ChartSeries;
use crate::services::dashboard;
use crate::services::report::SurveyReport;
use crate::AppState;

/// Parse the `{survey_type}` path segment.
pub(crate) fn survey_type_param(
    path: Result<Path<String>, PathRejection>,
) -> Result<SurveyType, AppError> {
    let Path(raw) = path?;
    raw.parse::<SurveyType>().map_err(AppError::Validation)
}

/// GET /api/v1/dashboard/{survey_type}/report: per-dimension averages.
pub async fn report(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<SurveyReport>>, AppError> {
    let survey_type = survey_type_param(path)?;
    let report = dashboard::get_report(&state.db, state.taxonomies.get(survey_type)).await?;
    Ok(ApiResponse::success(report))
}

/// GET /api/v1/dashboard/{survey_type}/charts: chart-ready series.
pub async fn charts(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Vec<ChartSeries>>>, AppError> {
    let survey_type = survey_type_param(path)?;
    let charts = dashboard::get_charts(&state.db, state.taxonomies.get(survey_type)).await?;
    Ok(ApiResponse::success(charts))
}
