use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use crate::external::record_source::{
    parse_collection, parse_daily_records, RecordSource, RecordSourceError,
};
use crate::models::{DailyRecord, FiscalYear};

/// JSON exports of the database read from local disk.
pub struct FileSource {
    records_file: PathBuf,
    statements_file: Option<PathBuf>,
}

impl FileSource {
    pub fn new(records_file: impl Into<PathBuf>, statements_file: Option<PathBuf>) -> Self {
        Self {
            records_file: records_file.into(),
            statements_file,
        }
    }

    async fn read_json(path: &Path) -> Result<Value, RecordSourceError> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RecordSourceError::Io(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| RecordSourceError::Parse(format!("{}: {}", path.display(), e)))
    }
}

#[async_trait]
impl RecordSource for FileSource {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch_daily_records(&self) -> Result<Vec<DailyRecord>, RecordSourceError> {
        let value = Self::read_json(&self.records_file).await?;
        parse_daily_records(value)
    }

    async fn fetch_statements(&self) -> Result<Vec<FiscalYear>, RecordSourceError> {
        match &self.statements_file {
            Some(path) => parse_collection(Self::read_json(path).await?),
            None => Ok(Vec::new()),
        }
    }
}
