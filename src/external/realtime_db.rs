use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::external::record_source::{
    parse_collection, parse_daily_records, RecordSource, RecordSourceError,
};
use crate::models::{DailyRecord, FiscalYear};

/// Reads datasets from the hosted realtime database's REST surface
/// (`<base>/<path>.json`).
pub struct RealtimeDbSource {
    client: reqwest::Client,
    base_url: Url,
    graph_path: String,
    statements_path: String,
}

impl RealtimeDbSource {
    pub fn new(
        base_url: Url,
        graph_path: impl Into<String>,
        statements_path: impl Into<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            graph_path: graph_path.into(),
            statements_path: statements_path.into(),
        }
    }

    pub fn dataset_url(&self, path: &str) -> Result<Url, RecordSourceError> {
        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let with_slash = format!("{}/", base.path());
            base.set_path(&with_slash);
        }
        base.join(&format!("{}.json", path.trim_matches('/')))
            .map_err(|e| RecordSourceError::BadResponse(format!("invalid dataset url: {}", e)))
    }

    async fn fetch_json(&self, path: &str) -> Result<Value, RecordSourceError> {
        let url = self.dataset_url(path)?;
        tracing::debug!("GET {}", url);

        let resp = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| RecordSourceError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RecordSourceError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(RecordSourceError::BadResponse(format!(
                "HTTP {} for {}",
                resp.status(),
                path
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| RecordSourceError::Parse(e.to_string()))
    }
}

#[async_trait]
impl RecordSource for RealtimeDbSource {
    fn name(&self) -> &str {
        "realtime-db"
    }

    async fn fetch_daily_records(&self) -> Result<Vec<DailyRecord>, RecordSourceError> {
        let value = self.fetch_json(&self.graph_path).await?;
        parse_daily_records(value)
    }

    async fn fetch_statements(&self) -> Result<Vec<FiscalYear>, RecordSourceError> {
        let value = self.fetch_json(&self.statements_path).await?;
        parse_collection(value)
    }
}
