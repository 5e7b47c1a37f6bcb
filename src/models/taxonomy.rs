//! Category taxonomies: the ordered legal values of every reporting dimension,
//! the ordinal score scale, and the multi-select effectiveness block.
//!
//! One [`TaxonomyRegistry`] is built at startup and shared through
//! [`crate::AppState`]; the reporting engine and the chart builder both read
//! from it, so category order is declared exactly once.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::survey::{CategoryField, RatingField, SelectionField, SurveyType};

/// Version stamped on the built-in taxonomies.
pub const TAXONOMY_VERSION: u32 = 1;

#[derive(Debug, thiserror::Error)]
pub enum TaxonomyError {
    #[error("Failed to read taxonomy file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid taxonomy JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid taxonomy for {survey_type}: {reason}")]
    Invalid {
        survey_type: SurveyType,
        reason: String,
    },

    #[error("Taxonomy for {0} declared more than once")]
    Duplicate(SurveyType),
}

/// One label of an ordinal scale and the integer it averages as.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreLevel {
    pub label: String,
    pub score: u8,
}

/// Maps the ordinal answer in `field` to an integer score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreScale {
    pub field: CategoryField,
    pub levels: Vec<ScoreLevel>,
}

impl ScoreScale {
    /// Score for an ordinal label, `None` when the label is not on the scale.
    pub fn score_for(&self, label: &str) -> Option<f64> {
        self.levels
            .iter()
            .find(|level| level.label == label)
            .map(|level| f64::from(level.score))
    }
}

/// A categorical axis for grouping responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dimension {
    pub field: CategoryField,
    /// Chart title, e.g. "Average Stress Level by Course".
    pub title: String,
    /// Legal values in display order.
    pub values: Vec<String>,
}

/// Average of a rating across every response that selected each option of a
/// multi-choice question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectionEffectiveness {
    pub title: String,
    pub selection: SelectionField,
    pub rating: RatingField,
    pub min_rating: i32,
    pub max_rating: i32,
    pub options: Vec<String>,
}

impl SelectionEffectiveness {
    pub fn accepts(&self, rating: i32) -> bool {
        (self.min_rating..=self.max_rating).contains(&rating)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Taxonomy {
    pub version: u32,
    pub survey_type: SurveyType,
    pub score: ScoreScale,
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<SelectionEffectiveness>,
}

fn level(label: &str, score: u8) -> ScoreLevel {
    ScoreLevel {
        label: label.to_string(),
        score,
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

const GENDERS: &[&str] = &["Male", "Female", "Prefer not to say", "Other"];

impl Taxonomy {
    /// Built-in taxonomy of the academic stress questionnaire.
    pub fn academic_stress() -> Self {
        Self {
            version: TAXONOMY_VERSION,
            survey_type: SurveyType::AcademicStress,
            score: ScoreScale {
                field: CategoryField::StressLevel,
                levels: vec![
                    level("Low", 1),
                    level("Moderate", 2),
                    level("High", 3),
                ],
            },
            dimensions: vec![
                Dimension {
                    field: CategoryField::Course,
                    title: "Average Stress Level by Course".to_string(),
                    values: strings(&[
                        "Business and Management",
                        "Engineering and Technology",
                        "Health Sciences",
                        "Arts and Humanities",
                        "Education",
                        "Sciences",
                        "Social Sciences",
                    ]),
                },
                Dimension {
                    field: CategoryField::YearLevel,
                    title: "Average Stress Level by Year Level".to_string(),
                    values: strings(&[
                        "1st Year College",
                        "2nd Year College",
                        "3rd Year College",
                        "4th Year College",
                    ]),
                },
                Dimension {
                    field: CategoryField::Gender,
                    title: "Average Stress Level by Gender".to_string(),
                    values: strings(GENDERS),
                },
                Dimension {
                    field: CategoryField::StressSource,
                    title: "Average Stress Level by Source of Stress".to_string(),
                    values: strings(&[
                        "Coursework Load",
                        "Performance Pressure",
                        "Time Management",
                        "Teacher/Professor",
                        "Financial Concerns",
                        "Balancing Academics with personal life",
                    ]),
                },
            ],
            effectiveness: Some(SelectionEffectiveness {
                title: "Average Effectiveness by Coping Mechanism".to_string(),
                selection: SelectionField::CopingMechanisms,
                rating: RatingField::CopingEffectiveness,
                min_rating: 1,
                max_rating: 5,
                options: strings(&[
                    "Physical Exercise",
                    "Mindfulness and meditation",
                    "Healthy Lifestyle Choices",
                    "Time Management",
                    "Social Support",
                    "Cognitive Behavioral Techniques",
                    "Relaxation Techniques",
                    "Hobbies and Leisure Activities",
                    "Professional Help",
                    "Mindful Living",
                    "Environmental Changes",
                    "Limit Exposure to Stressors",
                ]),
            }),
        }
    }

    /// Built-in taxonomy of the environmental awareness questionnaire.
    pub fn environmental_awareness() -> Self {
        Self {
            version: TAXONOMY_VERSION,
            survey_type: SurveyType::EnvironmentalAwareness,
            score: ScoreScale {
                field: CategoryField::EnvironmentalKnowledge,
                levels: vec![
                    level("Very Low", 1),
                    level("Low", 2),
                    level("Moderate", 3),
                    level("High", 4),
                    level("Very High", 5),
                ],
            },
            dimensions: vec![
                Dimension {
                    field: CategoryField::Gender,
                    title: "Average Environmental Knowledge by Gender".to_string(),
                    values: strings(GENDERS),
                },
                Dimension {
                    field: CategoryField::Age,
                    title: "Average Environmental Knowledge by Age".to_string(),
                    values: strings(&[
                        "Under 18",
                        "18-24",
                        "25-34",
                        "35-44",
                        "45-54",
                        "55 and above",
                    ]),
                },
                Dimension {
                    field: CategoryField::EducationLevel,
                    title: "Average Environmental Knowledge by Education Level".to_string(),
                    values: strings(&[
                        "High School",
                        "Vocational",
                        "Bachelor's Degree",
                        "Master's Degree",
                        "Doctorate",
                    ]),
                },
                Dimension {
                    field: CategoryField::RecyclingFrequency,
                    title: "Average Environmental Knowledge by Recycling Frequency".to_string(),
                    values: strings(&["Never", "Rarely", "Sometimes", "Often", "Always"]),
                },
            ],
            effectiveness: None,
        }
    }

    pub fn builtin(survey_type: SurveyType) -> Self {
        match survey_type {
            SurveyType::AcademicStress => Self::academic_stress(),
            SurveyType::EnvironmentalAwareness => Self::environmental_awareness(),
        }
    }

    /// Structural checks for taxonomies loaded from a file.
    pub fn validate(&self) -> Result<(), TaxonomyError> {
        let invalid = |reason: String| TaxonomyError::Invalid {
            survey_type: self.survey_type,
            reason,
        };

        if !self.score.field.applies_to(self.survey_type) {
            return Err(invalid(format!(
                "score field {:?} is not an answer of this survey",
                self.score.field
            )));
        }
        if self.score.levels.is_empty() {
            return Err(invalid("score scale has no levels".to_string()));
        }
        if !unique(self.score.levels.iter().map(|l| l.label.as_str())) {
            return Err(invalid("score scale repeats a label".to_string()));
        }
        if self.dimensions.is_empty() {
            return Err(invalid("no dimensions declared".to_string()));
        }
        for dimension in &self.dimensions {
            if !dimension.field.applies_to(self.survey_type) {
                return Err(invalid(format!(
                    "dimension '{}' groups by {:?}, which this survey does not ask",
                    dimension.title, dimension.field
                )));
            }
            if dimension.values.is_empty() {
                return Err(invalid(format!("dimension '{}' has no values", dimension.title)));
            }
            if !unique(dimension.values.iter().map(String::as_str)) {
                return Err(invalid(format!(
                    "dimension '{}' repeats a value",
                    dimension.title
                )));
            }
        }
        if let Some(block) = &self.effectiveness {
            if !block.selection.applies_to(self.survey_type)
                || !block.rating.applies_to(self.survey_type)
            {
                return Err(invalid(format!(
                    "'{}' reads answers this survey does not ask",
                    block.title
                )));
            }
            if block.min_rating > block.max_rating {
                return Err(invalid(format!(
                    "rating range {}..={} is empty",
                    block.min_rating, block.max_rating
                )));
            }
            if !unique(block.options.iter().map(String::as_str)) {
                return Err(invalid(format!("'{}' repeats an option", block.title)));
            }
        }
        Ok(())
    }
}

fn unique<'a>(mut items: impl Iterator<Item = &'a str>) -> bool {
    let mut seen = HashSet::new();
    items.all(|item| seen.insert(item))
}

/// The taxonomy of every survey type, shared read-only across requests.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyRegistry {
    academic_stress: Taxonomy,
    environmental_awareness: Taxonomy,
}

impl TaxonomyRegistry {
    pub fn builtin() -> Self {
        Self {
            academic_stress: Taxonomy::academic_stress(),
            environmental_awareness: Taxonomy::environmental_awareness(),
        }
    }

    /// Parse a JSON array of taxonomies. Each entry replaces the built-in
    /// taxonomy of its survey type; types not listed keep the built-in one.
    pub fn from_json(json: &str) -> Result<Self, TaxonomyError> {
        let overrides: Vec<Taxonomy> = serde_json::from_str(json)?;
        let mut registry = Self::builtin();
        let mut replaced = HashSet::new();

        for taxonomy in overrides {
            taxonomy.validate()?;
            if !replaced.insert(taxonomy.survey_type) {
                return Err(TaxonomyError::Duplicate(taxonomy.survey_type));
            }
            match taxonomy.survey_type {
                SurveyType::AcademicStress => registry.academic_stress = taxonomy,
                SurveyType::EnvironmentalAwareness => registry.environmental_awareness = taxonomy,
            }
        }

        Ok(registry)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TaxonomyError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn get(&self, survey_type: SurveyType) -> &Taxonomy {
        match survey_type {
            SurveyType::AcademicStress => &self.academic_stress,
            SurveyType::EnvironmentalAwareness => &self.environmental_awareness,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_taxonomies_are_valid() {
        for survey_type in SurveyType::ALL {
            let taxonomy = Taxonomy::builtin(survey_type);
            assert_eq!(taxonomy.survey_type, survey_type);
            taxonomy.validate().unwrap();
        }
    }

    #[test]
    fn stress_scale_maps_low_moderate_high() {
        let scale = Taxonomy::academic_stress().score;
        assert_eq!(scale.score_for("Low"), Some(1.0));
        assert_eq!(scale.score_for("Moderate"), Some(2.0));
        assert_eq!(scale.score_for("High"), Some(3.0));
        assert_eq!(scale.score_for(""), None);
        assert_eq!(scale.score_for("high"), None);
    }

    #[test]
    fn effectiveness_range_is_inclusive() {
        let block = Taxonomy::academic_stress().effectiveness.unwrap();
        assert!(block.accepts(1));
        assert!(block.accepts(5));
        assert!(!block.accepts(0));
        assert!(!block.accepts(6));
    }

    #[test]
    fn validate_rejects_repeated_values() {
        let mut taxonomy = Taxonomy::academic_stress();
        taxonomy.dimensions[0].values.push("Sciences".to_string());
        assert!(matches!(
            taxonomy.validate(),
            Err(TaxonomyError::Invalid { .. })
        ));
    }

    #[test]
    fn validate_rejects_dimension_of_other_survey() {
        let mut taxonomy = Taxonomy::academic_stress();
        taxonomy.dimensions.push(Dimension {
            field: CategoryField::Age,
            title: "Average Stress Level by Age".to_string(),
            values: strings(&["18-24"]),
        });
        assert!(matches!(
            taxonomy.validate(),
            Err(TaxonomyError::Invalid { .. })
        ));

        let json = serde_json::to_string(&vec![taxonomy]).unwrap();
        assert!(TaxonomyRegistry::from_json(&json).is_err());
    }

    #[test]
    fn validate_rejects_foreign_score_and_effectiveness_fields() {
        let mut taxonomy = Taxonomy::environmental_awareness();
        taxonomy.score.field = CategoryField::StressLevel;
        assert!(taxonomy.validate().is_err());

        let mut taxonomy = Taxonomy::environmental_awareness();
        taxonomy.effectiveness = Taxonomy::academic_stress().effectiveness;
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn shared_gender_dimension_is_valid_for_both_surveys() {
        for survey_type in SurveyType::ALL {
            let taxonomy = Taxonomy::builtin(survey_type);
            assert!(taxonomy
                .dimensions
                .iter()
                .any(|d| d.field == CategoryField::Gender));
        }
    }

    #[test]
    fn validate_rejects_empty_scale() {
        let mut taxonomy = Taxonomy::environmental_awareness();
        taxonomy.score.levels.clear();
        assert!(taxonomy.validate().is_err());
    }

    #[test]
    fn override_replaces_only_listed_type() {
        let mut custom = Taxonomy::academic_stress();
        custom.version = 2;
        custom.dimensions.truncate(1);
        let json = serde_json::to_string(&vec![custom.clone()]).unwrap();

        let registry = TaxonomyRegistry::from_json(&json).unwrap();
        assert_eq!(registry.get(SurveyType::AcademicStress), &custom);
        assert_eq!(
            registry.get(SurveyType::EnvironmentalAwareness),
            &Taxonomy::environmental_awareness()
        );
    }

    #[test]
    fn duplicate_override_is_rejected() {
        let taxonomy = Taxonomy::academic_stress();
        let json = serde_json::to_string(&vec![taxonomy.clone(), taxonomy]).unwrap();
        assert!(matches!(
            TaxonomyRegistry::from_json(&json),
            Err(TaxonomyError::Duplicate(SurveyType::AcademicStress))
        ));
    }

    #[test]
    fn load_reads_file() {
        let mut custom = Taxonomy::environmental_awareness();
        custom.version = 7;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(serde_json::to_string(&vec![custom]).unwrap().as_bytes())
            .unwrap();

        let registry = TaxonomyRegistry::load(file.path()).unwrap();
        assert_eq!(registry.get(SurveyType::EnvironmentalAwareness).version, 7);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = TaxonomyRegistry::load("/nonexistent/taxonomy.json").unwrap_err();
        assert!(matches!(err, TaxonomyError::Io(_)));
    }
}
