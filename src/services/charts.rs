//! Chart series for the admin dashboard.
//!
//! Shapes each aggregated series into the `{labels, datasets}` structure the
//! dashboard's bar charts consume. No business logic lives here.

use serde::Serialize;

use crate::services::report::{DimensionSeries, SurveyReport};

/// Fill/border color pairs, cycled across series.
const PALETTE: [(u8, u8, u8); 6] = [
    (75, 192, 192),
    (153, 102, 255),
    (255, 159, 64),
    (54, 162, 235),
    (255, 99, 132),
    (255, 205, 86),
];

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    pub respondents: Vec<usize>,
    pub background_color: String,
    pub border_color: String,
    pub border_width: u8,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

/// Bar chart for one series, colored by its position on the dashboard.
pub fn chart_series(series: &DimensionSeries, position: usize) -> ChartSeries {
    let (r, g, b) = PALETTE[position % PALETTE.len()];
    ChartSeries {
        title: series.title.clone(),
        labels: series.labels(),
        datasets: vec![ChartDataset {
            label: series.title.clone(),
            data: series.averages(),
            respondents: series.respondents(),
            background_color: format!("rgba({r}, {g}, {b}, 0.2)"),
            border_color: format!("rgba({r}, {g}, {b}, 1)"),
            border_width: 1,
        }],
    }
}

/// Every chart of a report: the dimensions in taxonomy order, then the
/// effectiveness series when the survey has one.
pub fn report_charts(report: &SurveyReport) -> Vec<ChartSeries> {
    report
        .dimensions
        .iter()
        .chain(report.effectiveness.iter())
        .enumerate()
        .map(|(position, series)| chart_series(series, position))
        .collect()
}
