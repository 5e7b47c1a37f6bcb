//! Taxonomy route: legal category values for forms and chart axes.

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Json,
};

use crate::errors::{ApiResponse, AppError};
use crate::models::taxonomy::Taxonomy;
use crate::routes::dashboard::survey_type_param;
use crate::AppState;

/// GET /api/v1/taxonomy/{survey_type}
pub async fn get(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Taxonomy>>, AppError> {
    let survey_type = survey_type_param(path)?;
    Ok(ApiResponse::success(state.taxonomies.get(survey_type).clone()))
}
