//! Survey aggregation engine.
//!
//! Groups responses along each taxonomy dimension and averages the mapped
//! ordinal score per category value. A response is eligible for a category
//! only when it belongs to the taxonomy's survey type, its category answer
//! equals the value exactly, and its score answer is on the scale. Anything
//! else is excluded from the mean, never counted as zero.
//!
//! Categories without eligible responses report an average of `0.0` together
//! with `respondents: 0`, which is what lets callers tell the two apart.
//!
//! Pure computation: no I/O, the input slice is never modified, and output
//! order follows the taxonomy.

use serde::{Deserialize, Serialize};

use crate::models::survey::{CategoryField, SurveyResponse, SurveyType};
use crate::models::taxonomy::{Dimension, SelectionEffectiveness, Taxonomy};

/// Mean score of one category value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryAverage {
    pub value: String,
    pub average: f64,
    pub respondents: usize,
}

/// Averages for every legal value of one dimension, in taxonomy order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DimensionSeries {
    pub title: String,
    /// Grouping field; `None` for the multi-select effectiveness series.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<CategoryField>,
    pub categories: Vec<CategoryAverage>,
}

impl DimensionSeries {
    pub fn labels(&self) -> Vec<String> {
        self.categories.iter().map(|c| c.value.clone()).collect()
    }

    pub fn averages(&self) -> Vec<f64> {
        self.categories.iter().map(|c| c.average).collect()
    }

    pub fn respondents(&self) -> Vec<usize> {
        self.categories.iter().map(|c| c.respondents).collect()
    }

    pub fn get(&self, value: &str) -> Option<&CategoryAverage> {
        self.categories.iter().find(|c| c.value == value)
    }
}

/// Full dashboard report for one survey type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SurveyReport {
    pub survey_type: SurveyType,
    pub taxonomy_version: u32,
    /// Responses of this survey type in the input, eligible or not.
    pub total_responses: usize,
    pub dimensions: Vec<DimensionSeries>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effectiveness: Option<DimensionSeries>,
}

#[derive(Debug, Default, Clone, Copy)]
struct Accumulator {
    sum: f64,
    count: usize,
}

impl Accumulator {
    fn add(&mut self, score: f64) {
        self.sum += score;
        self.count += 1;
    }

    fn finish(self, value: &str) -> CategoryAverage {
        CategoryAverage {
            value: value.to_string(),
            average: if self.count == 0 {
                0.0
            } else {
                self.sum / self.count as f64
            },
            respondents: self.count,
        }
    }
}

/// Build the complete report for `taxonomy.survey_type`.
pub fn build_report(responses: &[SurveyResponse], taxonomy: &Taxonomy) -> SurveyReport {
    let total_responses = responses
        .iter()
        .filter(|r| r.survey_type() == taxonomy.survey_type)
        .count();

    let dimensions = taxonomy
        .dimensions
        .iter()
        .map(|dimension| dimension_series(responses, taxonomy, dimension))
        .collect();

    let effectiveness = taxonomy
        .effectiveness
        .as_ref()
        .map(|block| effectiveness_series(responses, taxonomy.survey_type, block));

    SurveyReport {
        survey_type: taxonomy.survey_type,
        taxonomy_version: taxonomy.version,
        total_responses,
        dimensions,
        effectiveness,
    }
}

/// Mean mapped score per legal value of `dimension`.
pub fn dimension_series(
    responses: &[SurveyResponse],
    taxonomy: &Taxonomy,
    dimension: &Dimension,
) -> DimensionSeries {
    let mut buckets = vec![Accumulator::default(); dimension.values.len()];

    for response in responses {
        if response.survey_type() != taxonomy.survey_type {
            continue;
        }
        let Some(score) = response
            .category(taxonomy.score.field)
            .and_then(|label| taxonomy.score.score_for(label))
        else {
            continue;
        };
        let Some(value) = response.category(dimension.field) else {
            continue;
        };
        if let Some(idx) = dimension.values.iter().position(|v| v == value) {
            buckets[idx].add(score);
        }
    }

    DimensionSeries {
        title: dimension.title.clone(),
        field: Some(dimension.field),
        categories: dimension
            .values
            .iter()
            .zip(buckets)
            .map(|(value, acc)| acc.finish(value))
            .collect(),
    }
}

/// Mean rating per option of a multi-select question. A response adds its
/// rating to every option it selected; an option repeated within one
/// response counts once.
pub fn effectiveness_series(
    responses: &[SurveyResponse],
    survey_type: SurveyType,
    block: &SelectionEffectiveness,
) -> DimensionSeries {
    let mut buckets = vec![Accumulator::default(); block.options.len()];

    for response in responses {
        if response.survey_type() != survey_type {
            continue;
        }
        let Some(rating) = response.rating(block.rating).filter(|r| block.accepts(*r)) else {
            continue;
        };
        let Some(selected) = response.selections(block.selection) else {
            continue;
        };
        for (idx, option) in block.options.iter().enumerate() {
            if selected.iter().any(|s| s == option) {
                buckets[idx].add(f64::from(rating));
            }
        }
    }

    DimensionSeries {
        title: block.title.clone(),
        field: None,
        categories: block
            .options
            .iter()
            .zip(buckets)
            .map(|(option, acc)| acc.finish(option))
            .collect(),
    }
}
