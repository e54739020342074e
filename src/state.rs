use std::sync::Arc;

use chrono::FixedOffset;

use crate::config::AppConfig;
use crate::external::record_source::RecordSource;
use crate::services::record_cache::RecordCache;

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn RecordSource>,
    pub cache: RecordCache,
    pub default_offset: FixedOffset,
    pub page_size: usize,
}

impl AppState {
    pub fn new(source: Arc<dyn RecordSource>, config: &AppConfig) -> Self {
        Self {
            source,
            cache: RecordCache::new(config.cache_ttl()),
            default_offset: config.offset(),
            page_size: config.page_size,
        }
    }
}
