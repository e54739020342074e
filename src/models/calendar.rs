use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Which range the heatmap covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CalendarMode {
    Year(i32),
    /// 365 days ending today, inclusive.
    #[default]
    Trailing365,
}

impl CalendarMode {
    pub fn parse(value: &str) -> Result<Self, String> {
        let value = value.trim();
        match value.to_ascii_lowercase().as_str() {
            "trailing365" | "last365" => Ok(CalendarMode::Trailing365),
            _ => value
                .parse::<i32>()
                .map(CalendarMode::Year)
                .map_err(|_| {
                    format!("Invalid calendar mode '{}': expected a year or 'trailing365'", value)
                }),
        }
    }
}

impl fmt::Display for CalendarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalendarMode::Year(year) => write!(f, "{}", year),
            CalendarMode::Trailing365 => write!(f, "trailing365"),
        }
    }
}

impl Serialize for CalendarMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CalendarMode::Year(year) => serializer.serialize_i32(*year),
            CalendarMode::Trailing365 => serializer.serialize_str("trailing365"),
        }
    }
}

impl<'de> Deserialize<'de> for CalendarMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Year(i32),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Year(year) => Ok(CalendarMode::Year(year)),
            Raw::Text(text) => CalendarMode::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarCell {
    pub date: NaiveDate,
    /// `None` when no record exists for the day. Never conflated with zero.
    pub value: Option<f64>,
    pub date_key: String,
}

/// Sunday through Saturday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarWeek {
    pub days: [CalendarCell; 7],
}

impl CalendarWeek {
    pub fn first_day(&self) -> NaiveDate {
        self.days[0].date
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthLabel {
    pub name: String,
    pub week_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatSign {
    Profit,
    Loss,
    None,
}

/// Intensity bucket for a heatmap cell, `level` in `0..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatClass {
    pub sign: HeatSign,
    pub level: u8,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapCell {
    #[serde(flatten)]
    pub cell: CalendarCell,
    #[serde(flatten)]
    pub class: HeatClass,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeatmapWeek {
    pub days: Vec<HeatmapCell>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarHeatmap {
    pub mode: CalendarMode,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub weeks: Vec<HeatmapWeek>,
    pub month_labels: Vec<MonthLabel>,
    pub available_years: Vec<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parse() {
        assert_eq!(CalendarMode::parse("trailing365"), Ok(CalendarMode::Trailing365));
        assert_eq!(CalendarMode::parse("last365"), Ok(CalendarMode::Trailing365));
        assert_eq!(CalendarMode::parse("2023"), Ok(CalendarMode::Year(2023)));
        assert!(CalendarMode::parse("someday").is_err());
    }

    #[test]
    fn test_mode_serde_shapes() {
        assert_eq!(serde_json::to_string(&CalendarMode::Year(2024)).unwrap(), "2024");
        assert_eq!(
            serde_json::to_string(&CalendarMode::Trailing365).unwrap(),
            "\"trailing365\""
        );
        let parsed: CalendarMode = serde_json::from_str("\"last365\"").unwrap();
        assert_eq!(parsed, CalendarMode::Trailing365);
        let parsed: CalendarMode = serde_json::from_str("2022").unwrap();
        assert_eq!(parsed, CalendarMode::Year(2022));
    }
}
