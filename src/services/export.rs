//! CSV export of stored responses, one file per survey type.

use crate::errors::AppError;
use crate::models::survey::{SurveyAnswers, SurveyResponse, SurveyType};

/// Separator for multi-choice answers inside one CSV cell.
const LIST_SEPARATOR: &str = "; ";

const ACADEMIC_HEADERS: &[&str] = &[
    "id",
    "created_at",
    "name",
    "gender",
    "year_level",
    "course",
    "stress_frequency",
    "stress_source",
    "coping_mechanisms",
    "coping_effectiveness",
    "stress_level",
    "sought_professional_help",
];

const ENVIRONMENTAL_HEADERS: &[&str] = &[
    "id",
    "created_at",
    "name",
    "age",
    "gender",
    "education_level",
    "location",
    "environmental_knowledge",
    "environmental_concerns",
    "information_sources",
    "recycling_frequency",
    "recycling_practice",
    "water_usage_practice",
    "energy_efficient_appliances_practice",
    "public_transportation_practice",
    "reducing_plastics_practice",
    "composting_practice",
    "supporting_eco_friendly_brands_practice",
];

pub fn headers(survey_type: SurveyType) -> &'static [&'static str] {
    match survey_type {
        SurveyType::AcademicStress => ACADEMIC_HEADERS,
        SurveyType::EnvironmentalAwareness => ENVIRONMENTAL_HEADERS,
    }
}

fn opt(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

fn record(response: &SurveyResponse) -> Vec<String> {
    let mut row = vec![response.id.to_string(), response.created_at.to_rfc3339()];
    match &response.answers {
        SurveyAnswers::AcademicStress(a) => row.extend([
            opt(&a.name),
            opt(&a.gender),
            opt(&a.year_level),
            opt(&a.course),
            opt(&a.stress_frequency),
            opt(&a.stress_source),
            a.coping_mechanisms.join(LIST_SEPARATOR),
            a.coping_effectiveness.map(|r| r.to_string()).unwrap_or_default(),
            opt(&a.stress_level),
            a.sought_professional_help.to_string(),
        ]),
        SurveyAnswers::EnvironmentalAwareness(e) => row.extend([
            opt(&e.name),
            opt(&e.age),
            opt(&e.gender),
            opt(&e.education_level),
            opt(&e.location),
            opt(&e.environmental_knowledge),
            e.environmental_concerns.join(LIST_SEPARATOR),
            e.information_sources.join(LIST_SEPARATOR),
            opt(&e.recycling_frequency),
            opt(&e.recycling_practice),
            opt(&e.water_usage_practice),
            opt(&e.energy_efficient_appliances_practice),
            opt(&e.public_transportation_practice),
            opt(&e.reducing_plastics_practice),
            opt(&e.composting_practice),
            opt(&e.supporting_eco_friendly_brands_practice),
        ]),
    }
    row
}

/// Render the responses of `survey_type` as CSV with a header row.
/// Responses of other survey types are skipped.
pub fn to_csv(responses: &[SurveyResponse], survey_type: SurveyType) -> Result<String, AppError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(headers(survey_type))
        .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;

    for response in responses.iter().filter(|r| r.survey_type() == survey_type) {
        writer
            .write_record(record(response))
            .map_err(|e| AppError::Internal(format!("CSV write failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV flush failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::survey::{AcademicStressAnswers, EnvironmentalAnswers};
    use chrono::Utc;
    use uuid::Uuid;

    fn academic() -> SurveyResponse {
        SurveyResponse {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            answers: SurveyAnswers::AcademicStress(AcademicStressAnswers {
                name: Some("Doe, Jane".to_string()),
                course: Some("Sciences".to_string()),
                coping_mechanisms: vec![
                    "Physical Exercise".to_string(),
                    "Social Support".to_string(),
                ],
                coping_effectiveness: Some(4),
                stress_level: Some("High".to_string()),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn header_and_rows_have_same_width() {
        assert_eq!(record(&academic()).len(), ACADEMIC_HEADERS.len());
        let env = SurveyResponse {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            answers: SurveyAnswers::EnvironmentalAwareness(EnvironmentalAnswers::default()),
        };
        assert_eq!(record(&env).len(), ENVIRONMENTAL_HEADERS.len());
    }

    #[test]
    fn csv_quotes_and_joins_lists() {
        let csv = to_csv(&[academic()], SurveyType::AcademicStress).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("id,created_at,name,gender"));
        let row = lines.next().unwrap();
        assert!(row.contains("\"Doe, Jane\""));
        assert!(row.contains("Physical Exercise; Social Support"));
        assert!(row.ends_with(",4,High,false"));
        assert!(lines.next().is_none());
    }

    #[test]
    fn other_survey_types_are_skipped() {
        let csv = to_csv(&[academic()], SurveyType::EnvironmentalAwareness).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
