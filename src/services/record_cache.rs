use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::{error, info};

use crate::errors::AppError;
use crate::external::record_source::RecordSource;
use crate::models::{DailyRecord, FiscalYear};

#[derive(Debug)]
struct Snapshot<T> {
    data: Arc<Vec<T>>,
    fetched_at: DateTime<Utc>,
}

/// One dataset held in memory until its TTL runs out.
#[derive(Debug)]
pub struct SnapshotSlot<T> {
    slot: RwLock<Option<Snapshot<T>>>,
    ttl: Duration,
}

impl<T> SnapshotSlot<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slot: RwLock::new(None),
            ttl,
        }
    }

    pub fn fresh(&self) -> Option<Arc<Vec<T>>> {
        self.fresh_at(Utc::now())
    }

    fn fresh_at(&self, now: DateTime<Utc>) -> Option<Arc<Vec<T>>> {
        let guard = self.slot.read();
        guard
            .as_ref()
            // A TTL reaching past the end of time never expires.
            .filter(|snap| {
                snap.fetched_at
                    .checked_add_signed(self.ttl)
                    .map_or(true, |expires| now < expires)
            })
            .map(|snap| Arc::clone(&snap.data))
    }

    pub fn store(&self, data: Vec<T>) -> Arc<Vec<T>> {
        self.store_at(data, Utc::now())
    }

    fn store_at(&self, data: Vec<T>, now: DateTime<Utc>) -> Arc<Vec<T>> {
        let data = Arc::new(data);
        *self.slot.write() = Some(Snapshot {
            data: Arc::clone(&data),
            fetched_at: now,
        });
        data
    }

    pub fn invalidate(&self) {
        *self.slot.write() = None;
    }
}

/// Fetched datasets shared by all handlers.
#[derive(Clone)]
pub struct RecordCache {
    records: Arc<SnapshotSlot<DailyRecord>>,
    statements: Arc<SnapshotSlot<FiscalYear>>,
}

impl RecordCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            records: Arc::new(SnapshotSlot::new(ttl)),
            statements: Arc::new(SnapshotSlot::new(ttl)),
        }
    }

    pub fn invalidate(&self) {
        self.records.invalidate();
        self.statements.invalidate();
    }

    /// Daily records, ascending by date.
    pub async fn records(
        &self,
        source: &dyn RecordSource,
    ) -> Result<Arc<Vec<DailyRecord>>, AppError> {
        if let Some(records) = self.records.fresh() {
            return Ok(records);
        }

        let fetched = source.fetch_daily_records().await.map_err(|e| {
            error!("Failed to fetch daily records from {}: {}", source.name(), e);
            AppError::from(e)
        })?;
        info!("Fetched {} daily records from {}", fetched.len(), source.name());

        Ok(self.records.store(fetched))
    }

    pub async fn statements(
        &self,
        source: &dyn RecordSource,
    ) -> Result<Arc<Vec<FiscalYear>>, AppError> {
        if let Some(statements) = self.statements.fresh() {
            return Ok(statements);
        }

        let fetched = source.fetch_statements().await.map_err(|e| {
            error!("Failed to fetch statements from {}: {}", source.name(), e);
            AppError::from(e)
        })?;
        info!("Fetched {} fiscal years from {}", fetched.len(), source.name());

        Ok(self.statements.store(fetched))
    }
}
