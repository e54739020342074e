use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::models::{DailyRecord, FiscalYear};

#[derive(Debug, Error)]
pub enum RecordSourceError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("rate limited")]
    RateLimited,
}

/// Where the dashboard's raw data comes from.
#[async_trait]
pub trait RecordSource: Send + Sync {
    fn name(&self) -> &str;

    /// All daily records, ascending by `date_milli`.
    async fn fetch_daily_records(&self) -> Result<Vec<DailyRecord>, RecordSourceError>;

    async fn fetch_statements(&self) -> Result<Vec<FiscalYear>, RecordSourceError>;
}

/// The realtime database stores lists either as JSON arrays (with `null`
/// holes for deleted indices) or as objects keyed by push id.
pub fn parse_collection<T: DeserializeOwned>(value: Value) -> Result<Vec<T>, RecordSourceError> {
    let items = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Array(items) => items,
        Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
        other => {
            return Err(RecordSourceError::BadResponse(format!(
                "expected a list, got {}",
                other
            )))
        }
    };

    let mut skipped = 0usize;
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if item.is_null() {
            skipped += 1;
            continue;
        }
        let parsed =
            serde_json::from_value(item).map_err(|e| RecordSourceError::Parse(e.to_string()))?;
        out.push(parsed);
    }

    if skipped > 0 {
        tracing::warn!("Skipped {} null entries in collection", skipped);
    }

    Ok(out)
}

pub fn parse_daily_records(value: Value) -> Result<Vec<DailyRecord>, RecordSourceError> {
    let mut records: Vec<DailyRecord> = parse_collection(value)?;
    // Ensure ascending by date
    records.sort_by_key(|r| r.date_milli);
    Ok(records)
}

/// Fixed in-memory data, for tests and offline runs.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub records: Vec<DailyRecord>,
    pub statements: Vec<FiscalYear>,
}

impl StaticSource {
    pub fn new(mut records: Vec<DailyRecord>, statements: Vec<FiscalYear>) -> Self {
        records.sort_by_key(|r| r.date_milli);
        Self { records, statements }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch_daily_records(&self) -> Result<Vec<DailyRecord>, RecordSourceError> {
        Ok(self.records.clone())
    }

    async fn fetch_statements(&self) -> Result<Vec<FiscalYear>, RecordSourceError> {
        Ok(self.statements.clone())
    }
}
