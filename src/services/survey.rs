//! Survey response storage: insert, full retrieval, and delete by ID.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::survey::{SurveyAnswers, SurveyResponse, SurveyRow, SurveyType};

/// Persist a new response and return it with its assigned ID.
pub async fn submit(pool: &PgPool, answers: &SurveyAnswers) -> Result<SurveyResponse, AppError> {
    let document = answers.to_document()?;

    let row = sqlx::query_as::<_, SurveyRow>(
        r#"
        INSERT INTO survey_responses (id, survey_type, answers)
        VALUES ($1, $2, $3)
        RETURNING id, survey_type, answers, created_at
        "#,
    )
    .bind(Uuid::now_v7())
    .bind(answers.survey_type())
    .bind(sqlx::types::Json(&document))
    .fetch_one(pool)
    .await?;

    let response = SurveyResponse::try_from(row)?;
    tracing::info!(
        survey_id = %response.id,
        survey_type = %response.survey_type(),
        "Survey response stored"
    );
    Ok(response)
}

/// Every stored response in storage order. No filtering, no pagination.
pub async fn fetch_all(pool: &PgPool) -> Result<Vec<SurveyResponse>, AppError> {
    let rows = sqlx::query_as::<_, SurveyRow>(
        "SELECT id, survey_type, answers, created_at FROM survey_responses \
         ORDER BY created_at ASC, id ASC",
    )
    .fetch_all(pool)
    .await?;

    let responses = rows
        .into_iter()
        .map(SurveyResponse::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    tracing::debug!(count = responses.len(), "Fetched survey responses");
    Ok(responses)
}

/// Stored responses of one survey type, in storage order.
pub async fn fetch_by_type(
    pool: &PgPool,
    survey_type: SurveyType,
) -> Result<Vec<SurveyResponse>, AppError> {
    let rows = sqlx::query_as::<_, SurveyRow>(
        "SELECT id, survey_type, answers, created_at FROM survey_responses \
         WHERE survey_type = $1 ORDER BY created_at ASC, id ASC",
    )
    .bind(survey_type)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| SurveyResponse::try_from(row).map_err(AppError::from))
        .collect()
}

/// Delete a response. A second delete of the same ID is `NotFound`.
pub async fn remove(pool: &PgPool, id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM survey_responses WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Survey not found".to_string()));
    }

    tracing::info!(survey_id = %id, "Survey response deleted");
    Ok(())
}

/// Number of stored responses.
pub async fn count(pool: &PgPool) -> Result<i64, AppError> {
    let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM survey_responses")
        .fetch_one(pool)
        .await?;
    Ok(total)
}
