//! Survey response documents for both survey domains.
//!
//! Every stored response carries an explicit `survey_type` discriminator. The
//! answer payload is loosely typed: categorical answers are free strings and
//! nothing here checks them against the taxonomy. Reporting decides what is
//! eligible for an average.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Hash,
)]
#[sqlx(type_name = "survey_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum SurveyType {
    #[default]
    AcademicStress,
    EnvironmentalAwareness,
}

impl SurveyType {
    pub const ALL: [SurveyType; 2] = [
        SurveyType::AcademicStress,
        SurveyType::EnvironmentalAwareness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AcademicStress => "academic_stress",
            Self::EnvironmentalAwareness => "environmental_awareness",
        }
    }
}

impl fmt::Display for SurveyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurveyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "academic_stress" => Ok(Self::AcademicStress),
            "environmental_awareness" => Ok(Self::EnvironmentalAwareness),
            other => Err(format!(
                "Unknown survey type '{other}'. Supported: academic_stress, environmental_awareness"
            )),
        }
    }
}

/// Answers to the academic stress and mental health questionnaire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AcademicStressAnswers {
    pub name: Option<String>,
    pub gender: Option<String>,
    pub year_level: Option<String>,
    pub course: Option<String>,
    pub stress_frequency: Option<String>,
    pub stress_source: Option<String>,
    pub coping_mechanisms: Vec<String>,
    pub coping_effectiveness: Option<i32>,
    pub stress_level: Option<String>,
    pub sought_professional_help: bool,
}

/// Answers to the environmental awareness and practices questionnaire.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EnvironmentalAnswers {
    pub name: Option<String>,
    pub age: Option<String>,
    pub gender: Option<String>,
    pub education_level: Option<String>,
    pub location: Option<String>,
    pub environmental_knowledge: Option<String>,
    pub environmental_concerns: Vec<String>,
    pub information_sources: Vec<String>,
    pub recycling_frequency: Option<String>,
    pub recycling_practice: Option<String>,
    pub water_usage_practice: Option<String>,
    pub energy_efficient_appliances_practice: Option<String>,
    pub public_transportation_practice: Option<String>,
    pub reducing_plastics_practice: Option<String>,
    pub composting_practice: Option<String>,
    pub supporting_eco_friendly_brands_practice: Option<String>,
}

/// Answer payload tagged with the survey it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "survey_type", rename_all = "snake_case")]
pub enum SurveyAnswers {
    AcademicStress(AcademicStressAnswers),
    EnvironmentalAwareness(EnvironmentalAnswers),
}

impl SurveyAnswers {
    pub fn survey_type(&self) -> SurveyType {
        match self {
            Self::AcademicStress(_) => SurveyType::AcademicStress,
            Self::EnvironmentalAwareness(_) => SurveyType::EnvironmentalAwareness,
        }
    }

    /// The JSON document persisted in the `answers` column (without the tag,
    /// which lives in its own column).
    pub fn to_document(&self) -> Result<serde_json::Value, serde_json::Error> {
        match self {
            Self::AcademicStress(a) => serde_json::to_value(a),
            Self::EnvironmentalAwareness(a) => serde_json::to_value(a),
        }
    }

    /// Rebuild the payload from a stored document and its discriminator.
    pub fn from_document(
        survey_type: SurveyType,
        document: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        Ok(match survey_type {
            SurveyType::AcademicStress => Self::AcademicStress(serde_json::from_value(document)?),
            SurveyType::EnvironmentalAwareness => {
                Self::EnvironmentalAwareness(serde_json::from_value(document)?)
            }
        })
    }
}

/// A stored survey response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub answers: SurveyAnswers,
}

/// Row shape of the `survey_responses` table.
#[derive(Debug, FromRow)]
pub struct SurveyRow {
    pub id: Uuid,
    pub survey_type: SurveyType,
    pub answers: sqlx::types::Json<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<SurveyRow> for SurveyResponse {
    type Error = serde_json::Error;

    fn try_from(row: SurveyRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            created_at: row.created_at,
            answers: SurveyAnswers::from_document(row.survey_type, row.answers.0)?,
        })
    }
}

/// Single-choice answers that reports can group by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CategoryField {
    Gender,
    YearLevel,
    Course,
    StressFrequency,
    StressSource,
    StressLevel,
    Age,
    EducationLevel,
    Location,
    EnvironmentalKnowledge,
    RecyclingFrequency,
}

/// Multi-choice answers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SelectionField {
    CopingMechanisms,
    EnvironmentalConcerns,
    InformationSources,
}

/// Integer rating answers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RatingField {
    CopingEffectiveness,
}

impl CategoryField {
    /// Whether responses of `survey_type` carry this answer.
    pub fn applies_to(self, survey_type: SurveyType) -> bool {
        use CategoryField::*;
        match survey_type {
            SurveyType::AcademicStress => matches!(
                self,
                Gender | YearLevel | Course | StressFrequency | StressSource | StressLevel
            ),
            SurveyType::EnvironmentalAwareness => matches!(
                self,
                Gender
                    | Age
                    | EducationLevel
                    | Location
                    | EnvironmentalKnowledge
                    | RecyclingFrequency
            ),
        }
    }
}

impl SelectionField {
    pub fn applies_to(self, survey_type: SurveyType) -> bool {
        match self {
            Self::CopingMechanisms => survey_type == SurveyType::AcademicStress,
            Self::EnvironmentalConcerns | Self::InformationSources => {
                survey_type == SurveyType::EnvironmentalAwareness
            }
        }
    }
}

impl RatingField {
    pub fn applies_to(self, survey_type: SurveyType) -> bool {
        match self {
            Self::CopingEffectiveness => survey_type == SurveyType::AcademicStress,
        }
    }
}

impl SurveyResponse {
    pub fn survey_type(&self) -> SurveyType {
        self.answers.survey_type()
    }

    /// Raw value of a single-choice answer; `None` when the field is unset or
    /// does not exist on this survey type.
    pub fn category(&self, field: CategoryField) -> Option<&str> {
        let value = match (&self.answers, field) {
            (SurveyAnswers::AcademicStress(a), CategoryField::Gender) => &a.gender,
            (SurveyAnswers::AcademicStress(a), CategoryField::YearLevel) => &a.year_level,
            (SurveyAnswers::AcademicStress(a), CategoryField::Course) => &a.course,
            (SurveyAnswers::AcademicStress(a), CategoryField::StressFrequency) => {
                &a.stress_frequency
            }
            (SurveyAnswers::AcademicStress(a), CategoryField::StressSource) => &a.stress_source,
            (SurveyAnswers::AcademicStress(a), CategoryField::StressLevel) => &a.stress_level,
            (SurveyAnswers::EnvironmentalAwareness(e), CategoryField::Gender) => &e.gender,
            (SurveyAnswers::EnvironmentalAwareness(e), CategoryField::Age) => &e.age,
            (SurveyAnswers::EnvironmentalAwareness(e), CategoryField::EducationLevel) => {
                &e.education_level
            }
            (SurveyAnswers::EnvironmentalAwareness(e), CategoryField::Location) => &e.location,
            (SurveyAnswers::EnvironmentalAwareness(e), CategoryField::EnvironmentalKnowledge) => {
                &e.environmental_knowledge
            }
            (SurveyAnswers::EnvironmentalAwareness(e), CategoryField::RecyclingFrequency) => {
                &e.recycling_frequency
            }
            _ => return None,
        };
        value.as_deref()
    }

    pub fn selections(&self, field: SelectionField) -> Option<&[String]> {
        match (&self.answers, field) {
            (SurveyAnswers::AcademicStress(a), SelectionField::CopingMechanisms) => {
                Some(&a.coping_mechanisms)
            }
            (SurveyAnswers::EnvironmentalAwareness(e), SelectionField::EnvironmentalConcerns) => {
                Some(&e.environmental_concerns)
            }
            (SurveyAnswers::EnvironmentalAwareness(e), SelectionField::InformationSources) => {
                Some(&e.information_sources)
            }
            _ => None,
        }
    }

    pub fn rating(&self, field: RatingField) -> Option<i32> {
        match (&self.answers, field) {
            (SurveyAnswers::AcademicStress(a), RatingField::CopingEffectiveness) => {
                a.coping_effectiveness
            }
            _ => None,
        }
    }
}

/// Incoming submission body. `survey_type` is optional and defaults to the
/// academic stress survey; the remaining keys are coerced by
/// [`crate::services::coercion`].
#[derive(Debug, Clone, Deserialize)]
pub struct SurveySubmission {
    #[serde(default)]
    pub survey_type: Option<SurveyType>,
    #[serde(flatten)]
    pub fields: serde_json::Map<String, serde_json::Value>,
}

impl SurveySubmission {
    /// The survey this submission answers. `survey_type` wins over the
    /// form's `surveyType`; `null` counts as absent.
    pub fn resolved_survey_type(&self) -> Result<SurveyType, String> {
        if let Some(survey_type) = self.survey_type {
            return Ok(survey_type);
        }
        match self.fields.get("surveyType") {
            None | Some(serde_json::Value::Null) => Ok(SurveyType::default()),
            Some(serde_json::Value::String(raw)) => raw.parse(),
            Some(_) => Err("Field 'surveyType' must be a string".to_string()),
        }
    }
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedSurvey {
    pub id: Uuid,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn academic(course: &str) -> SurveyResponse {
        SurveyResponse {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            answers: SurveyAnswers::AcademicStress(AcademicStressAnswers {
                course: Some(course.to_string()),
                stress_level: Some("High".to_string()),
                coping_mechanisms: vec!["Social Support".to_string()],
                coping_effectiveness: Some(4),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn survey_type_parses_and_displays() {
        assert_eq!(
            "environmental_awareness".parse::<SurveyType>().unwrap(),
            SurveyType::EnvironmentalAwareness
        );
        assert!("weather".parse::<SurveyType>().is_err());
        assert_eq!(SurveyType::AcademicStress.to_string(), "academic_stress");
    }

    #[test]
    fn response_serializes_with_flat_discriminator() {
        let response = academic("Sciences");
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["survey_type"], "academic_stress");
        assert_eq!(json["course"], "Sciences");
        assert!(json["id"].is_string());
        assert!(json.get("answers").is_none());
    }

    #[test]
    fn document_excludes_tag_and_rebuilds_from_column() {
        let response = academic("Education");
        let doc = response.answers.to_document().unwrap();
        assert!(doc.get("survey_type").is_none());

        let rebuilt = SurveyAnswers::from_document(SurveyType::AcademicStress, doc).unwrap();
        assert_eq!(rebuilt, response.answers);
    }

    #[test]
    fn sparse_document_fills_defaults() {
        let answers = SurveyAnswers::from_document(
            SurveyType::EnvironmentalAwareness,
            json!({"age": "18-24"}),
        )
        .unwrap();
        match answers {
            SurveyAnswers::EnvironmentalAwareness(e) => {
                assert_eq!(e.age.as_deref(), Some("18-24"));
                assert!(e.environmental_concerns.is_empty());
                assert!(e.gender.is_none());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn field_accessors_respect_survey_type() {
        let response = academic("Sciences");
        assert_eq!(response.category(CategoryField::Course), Some("Sciences"));
        assert_eq!(response.category(CategoryField::EducationLevel), None);
        assert_eq!(response.rating(RatingField::CopingEffectiveness), Some(4));
        assert_eq!(
            response.selections(SelectionField::CopingMechanisms).map(|s| s.len()),
            Some(1)
        );
        assert!(response.selections(SelectionField::EnvironmentalConcerns).is_none());
    }

    fn resolved(body: serde_json::Value) -> Result<SurveyType, String> {
        serde_json::from_value::<SurveySubmission>(body)
            .unwrap()
            .resolved_survey_type()
    }

    #[test]
    fn submission_defaults_to_academic_stress() {
        let submission: SurveySubmission =
            serde_json::from_value(json!({"course": "Sciences"})).unwrap();
        assert_eq!(submission.resolved_survey_type(), Ok(SurveyType::AcademicStress));
        assert_eq!(submission.fields["course"], "Sciences");

        assert_eq!(
            resolved(json!({"surveyType": "environmental_awareness"})),
            Ok(SurveyType::EnvironmentalAwareness)
        );
    }

    #[test]
    fn null_survey_type_counts_as_absent() {
        assert_eq!(
            resolved(json!({"survey_type": null, "course": "Sciences"})),
            Ok(SurveyType::AcademicStress)
        );
        assert_eq!(resolved(json!({"surveyType": null})), Ok(SurveyType::AcademicStress));
        assert_eq!(
            resolved(json!({"survey_type": null, "surveyType": "environmental_awareness"})),
            Ok(SurveyType::EnvironmentalAwareness)
        );
    }

    #[test]
    fn snake_case_survey_type_wins_over_camel_case() {
        assert_eq!(
            resolved(json!({
                "survey_type": "environmental_awareness",
                "surveyType": "academic_stress"
            })),
            Ok(SurveyType::EnvironmentalAwareness)
        );
        assert_eq!(
            resolved(json!({"survey_type": "academic_stress", "surveyType": "academic_stress"})),
            Ok(SurveyType::AcademicStress)
        );
    }

    #[test]
    fn camel_case_survey_type_is_validated() {
        assert!(resolved(json!({"surveyType": "weather"})).is_err());
        assert!(resolved(json!({"surveyType": 3})).is_err());
    }

    #[test]
    fn field_applicability_matches_accessors() {
        let base = academic("Sciences");
        let environmental = SurveyResponse {
            id: Uuid::now_v7(),
            created_at: Utc::now(),
            answers: SurveyAnswers::EnvironmentalAwareness(EnvironmentalAnswers {
                age: Some("18-24".to_string()),
                gender: Some("Female".to_string()),
                education_level: Some("Doctorate".to_string()),
                location: Some("Urban".to_string()),
                environmental_knowledge: Some("High".to_string()),
                recycling_frequency: Some("Often".to_string()),
                ..Default::default()
            }),
        };
        let academic_full = SurveyResponse {
            answers: SurveyAnswers::AcademicStress(AcademicStressAnswers {
                gender: Some("Male".to_string()),
                year_level: Some("1st Year College".to_string()),
                course: Some("Sciences".to_string()),
                stress_frequency: Some("Often".to_string()),
                stress_source: Some("Coursework Load".to_string()),
                stress_level: Some("High".to_string()),
                ..Default::default()
            }),
            ..base
        };
        let fields = [
            CategoryField::Gender,
            CategoryField::YearLevel,
            CategoryField::Course,
            CategoryField::StressFrequency,
            CategoryField::StressSource,
            CategoryField::StressLevel,
            CategoryField::Age,
            CategoryField::EducationLevel,
            CategoryField::Location,
            CategoryField::EnvironmentalKnowledge,
            CategoryField::RecyclingFrequency,
        ];
        for field in fields {
            assert_eq!(
                field.applies_to(SurveyType::AcademicStress),
                academic_full.category(field).is_some(),
                "{field:?}"
            );
            assert_eq!(
                field.applies_to(SurveyType::EnvironmentalAwareness),
                environmental.category(field).is_some(),
                "{field:?}"
            );
        }
        assert!(SelectionField::CopingMechanisms.applies_to(SurveyType::AcademicStress));
        assert!(!SelectionField::InformationSources.applies_to(SurveyType::AcademicStress));
        assert!(!RatingField::CopingEffectiveness.applies_to(SurveyType::EnvironmentalAwareness));
    }

    #[test]
    fn submission_rejects_unknown_survey_type() {
        let result: Result<SurveySubmission, _> =
            serde_json::from_value(json!({"survey_type": "weather"}));
        assert!(result.is_err());
    }
}
