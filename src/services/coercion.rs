//! Coercion of loosely-typed form submissions into stored answer documents.
//!
//! Only two fields change semantic type: the effectiveness rating becomes an
//! integer and the professional-help answer becomes a boolean. Everything
//! else is stored as submitted, including empty and out-of-enum values.
//! Keys are accepted in snake_case or in the camelCase the web form posts.

use serde_json::{Map, Value};

use crate::errors::AppError;
use crate::models::survey::{
    AcademicStressAnswers, EnvironmentalAnswers, SurveyAnswers, SurveySubmission, SurveyType,
};

/// Turn a raw submission into the answer document to persist.
pub fn coerce(submission: &SurveySubmission) -> Result<SurveyAnswers, AppError> {
    let survey_type = submission
        .resolved_survey_type()
        .map_err(AppError::Validation)?;
    let fields = Fields(&submission.fields);
    match survey_type {
        SurveyType::AcademicStress => Ok(SurveyAnswers::AcademicStress(AcademicStressAnswers {
            name: fields.text("name", "name")?,
            gender: fields.text("gender", "gender")?,
            year_level: fields.text("year_level", "yearLevel")?,
            course: fields.text("course", "course")?,
            stress_frequency: fields.text("stress_frequency", "stressFrequency")?,
            stress_source: fields.text("stress_source", "stressSource")?,
            coping_mechanisms: fields.list("coping_mechanisms", "copingMechanisms")?,
            coping_effectiveness: fields.rating("coping_effectiveness", "copingEffectiveness")?,
            stress_level: fields.text("stress_level", "stressLevel")?,
            sought_professional_help: fields
                .flag("sought_professional_help", "soughtProfessionalHelp")?,
        })),
        SurveyType::EnvironmentalAwareness => {
            Ok(SurveyAnswers::EnvironmentalAwareness(EnvironmentalAnswers {
                name: fields.text("name", "name")?,
                age: fields.text("age", "age")?,
                gender: fields.text("gender", "gender")?,
                education_level: fields.text("education_level", "educationLevel")?,
                location: fields.text("location", "location")?,
                environmental_knowledge: fields
                    .text("environmental_knowledge", "environmentalKnowledge")?,
                environmental_concerns: fields
                    .list("environmental_concerns", "environmentalConcerns")?,
                information_sources: fields.list("information_sources", "informationSources")?,
                recycling_frequency: fields.text("recycling_frequency", "recyclingFrequency")?,
                recycling_practice: fields.text("recycling_practice", "recyclingPractice")?,
                water_usage_practice: fields.text("water_usage_practice", "waterUsagePractice")?,
                energy_efficient_appliances_practice: fields.text(
                    "energy_efficient_appliances_practice",
                    "energyEfficientAppliancesPractice",
                )?,
                public_transportation_practice: fields.text(
                    "public_transportation_practice",
                    "publicTransportationPractice",
                )?,
                reducing_plastics_practice: fields
                    .text("reducing_plastics_practice", "reducingPlasticsPractice")?,
                composting_practice: fields.text("composting_practice", "compostingPractice")?,
                supporting_eco_friendly_brands_practice: fields.text(
                    "supporting_eco_friendly_brands_practice",
                    "supportingEcoFriendlyBrandsPractice",
                )?,
            }))
        }
    }
}

struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn get(&self, key: &str, alias: &str) -> Option<&Value> {
        self.0.get(key).or_else(|| self.0.get(alias))
    }

    fn text(&self, key: &str, alias: &str) -> Result<Option<String>, AppError> {
        match self.get(key, alias) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(shape_error(key, "a string")),
        }
    }

    fn list(&self, key: &str, alias: &str) -> Result<Vec<String>, AppError> {
        match self.get(key, alias) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(s)) if s.is_empty() => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(vec![s.clone()]),
            Some(Value::Array(items)) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    Value::Number(n) => Ok(n.to_string()),
                    Value::Bool(b) => Ok(b.to_string()),
                    _ => Err(shape_error(key, "an array of strings")),
                })
                .collect(),
            Some(_) => Err(shape_error(key, "an array of strings")),
        }
    }

    /// Integer rating. Unparseable input is stored as absent.
    fn rating(&self, key: &str, alias: &str) -> Result<Option<i32>, AppError> {
        match self.get(key, alias) {
            None | Some(Value::Null) | Some(Value::Bool(_)) => Ok(None),
            Some(Value::Number(n)) => Ok(n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64))
                .and_then(|v| i32::try_from(v).ok())),
            Some(Value::String(s)) => Ok(parse_leading_int(s)),
            Some(_) => Err(shape_error(key, "a number or numeric string")),
        }
    }

    /// Only `true` or the string `"true"` count as yes.
    fn flag(&self, key: &str, alias: &str) -> Result<bool, AppError> {
        match self.get(key, alias) {
            None | Some(Value::Null) | Some(Value::Number(_)) => Ok(false),
            Some(Value::Bool(b)) => Ok(*b),
            Some(Value::String(s)) => Ok(s.trim().eq_ignore_ascii_case("true")),
            Some(_) => Err(shape_error(key, "a boolean or \"true\"/\"false\"")),
        }
    }
}

fn shape_error(key: &str, expected: &str) -> AppError {
    AppError::Validation(format!("Field '{key}' must be {expected}"))
}

/// Parse the integer prefix of `s`, so "4 - Very Helpful" reads as 4.
pub fn parse_leading_int(s: &str) -> Option<i32> {
    let s = s.trim_start();
    let (sign, rest) = match s.as_bytes().first() {
        Some(b'-') => (-1i64, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let magnitude: i64 = rest[..digits].parse().ok()?;
    i32::try_from(sign * magnitude).ok()
}
