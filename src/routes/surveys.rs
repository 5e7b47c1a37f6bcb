//! Survey response routes: submit, list, delete, and CSV export.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::{ApiResponse, AppError};
use crate::models::survey::{DeletedSurvey, SurveyResponse, SurveySubmission, SurveyType};
use crate::services::{coercion, export, survey};
use crate::AppState;

/// Query parameters of the delete endpoint.
#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub id: Option<String>,
}

/// Query parameters of the export endpoint.
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub survey_type: Option<String>,
}

/// POST /api/v1/surveys: store a new survey response.
pub async fn submit(
    State(state): State<AppState>,
    payload: Result<Json<SurveySubmission>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<SurveyResponse>>), AppError> {
    let Json(submission) = payload?;
    let answers = coercion::coerce(&submission)?;
    let stored = survey::submit(&state.db, &answers).await?;
    Ok((StatusCode::CREATED, ApiResponse::success(stored)))
}

/// GET /api/v1/surveys: every stored response, unfiltered.
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<SurveyResponse>>>, AppError> {
    let responses = survey::fetch_all(&state.db).await?;
    Ok(ApiResponse::success(responses))
}

/// DELETE /api/v1/surveys?id=: delete one response by ID.
pub async fn remove(
    State(state): State<AppState>,
    params: Result<Query<DeleteParams>, QueryRejection>,
) -> Result<Json<ApiResponse<DeletedSurvey>>, AppError> {
    let Query(params) = params?;
    let raw = params
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::Validation("ID is required".to_string()))?;
    let id = Uuid::parse_str(raw)
        .map_err(|_| AppError::Validation(format!("Invalid survey ID '{raw}'")))?;

    survey::remove(&state.db, id).await?;

    Ok(ApiResponse::success(DeletedSurvey {
        id,
        message: "Survey deleted successfully".to_string(),
    }))
}

/// GET /api/v1/surveys/export?survey_type=: CSV download of one survey type.
pub async fn export_csv(
    State(state): State<AppState>,
    params: Result<Query<ExportParams>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(params) = params?;
    let survey_type = match params.survey_type.as_deref() {
        Some(raw) => raw.parse::<SurveyType>().map_err(AppError::Validation)?,
        None => SurveyType::default(),
    };

    let responses = survey::fetch_by_type(&state.db, survey_type).await?;
    let body = export::to_csv(&responses, survey_type)?;
    let disposition = format!("attachment; filename=\"{survey_type}_responses.csv\"");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
