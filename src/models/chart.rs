use serde::{Deserialize, Serialize};

use crate::models::{DailyRecord, Granularity, Page};

/// Trailing window for the line charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartWindow {
    Year,
    Month,
    #[default]
    All,
}

impl ChartWindow {
    pub fn parse(value: &str) -> Result<Self, String> {
        match value.trim().to_ascii_lowercase().as_str() {
            "year" => Ok(ChartWindow::Year),
            "month" => Ok(ChartWindow::Month),
            "all" => Ok(ChartWindow::All),
            other => Err(format!("Invalid window '{}': expected year, month or all", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisDomain {
    pub min: f64,
    pub max: f64,
}

/// A plotted record with its tooltip amount.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    #[serde(flatten)]
    pub record: DailyRecord,
    /// `₹12,34,567.89`, or `-` when the plotted value is missing.
    pub value_text: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineChart {
    pub window: ChartWindow,
    pub points: Vec<ChartPoint>,
    pub x_domain: AxisDomain,
    pub y_domain: AxisDomain,
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarSeries {
    pub granularity: Granularity,
    pub page: Page<DailyRecord>,
    pub y_domain: AxisDomain,
    pub ticks: Vec<f64>,
    pub tick_labels: Vec<String>,
}
