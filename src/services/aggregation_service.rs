use std::collections::HashMap;

use chrono::{Datelike, Days, FixedOffset, NaiveDate};

use crate::models::{local_midnight_millis, Bucket, DailyRecord, Granularity};

/// Aggregate daily records for the bar chart.
///
/// `Daily` returns the input untouched. Coarser granularities sum `ntpl` per
/// bucket and zero `ntpl_till_date`/`tpl`, which have no meaning once days are
/// merged.
pub fn aggregate(
    records: &[DailyRecord],
    granularity: Granularity,
    offset: &FixedOffset,
) -> Vec<DailyRecord> {
    if granularity == Granularity::Daily {
        return records.to_vec();
    }

    aggregate_buckets(records, granularity, offset)
        .into_iter()
        .map(|bucket| DailyRecord {
            date_milli: bucket.date_milli,
            ntpl: Some(bucket.ntpl),
            ntpl_till_date: Some(0.0),
            tpl: Some(0.0),
        })
        .collect()
}

/// Group records into keyed buckets, in first-seen key order.
///
/// For `Daily` every record becomes its own bucket keyed by local date.
/// Records whose timestamp has no calendar date (outside chrono's range) belong
/// to no bucket and are left out of every sum.
pub fn aggregate_buckets(
    records: &[DailyRecord],
    granularity: Granularity,
    offset: &FixedOffset,
) -> Vec<Bucket> {
    let mut buckets: Vec<Bucket> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(date) = record.local_date(offset) else {
            tracing::warn!("Skipping record with out-of-range timestamp {}", record.date_milli);
            continue;
        };

        let (key, date_milli) = match granularity {
            Granularity::Weekly => {
                // The first days of chrono's range have no Sunday before them.
                let sunday = week_start(date).unwrap_or(date);
                let millis =
                    local_midnight_millis(sunday, offset).unwrap_or(record.date_milli);
                (sunday.format("%Y-%m-%d").to_string(), millis)
            }
            Granularity::Monthly => (
                format!("{:04}-{:02}", date.year(), date.month()),
                record.date_milli,
            ),
            Granularity::Yearly => (format!("{:04}", date.year()), record.date_milli),
            Granularity::Daily => (date.format("%Y-%m-%d").to_string(), record.date_milli),
        };

        let slot = match index.get(&key) {
            Some(&i) => i,
            None => {
                buckets.push(Bucket {
                    key: key.clone(),
                    date_milli,
                    ntpl: 0.0,
                    count: 0,
                });
                index.insert(key, buckets.len() - 1);
                buckets.len() - 1
            }
        };

        let bucket = &mut buckets[slot];
        bucket.ntpl += record.ntpl_value().unwrap_or(0.0);
        bucket.count += 1;
    }

    buckets
}

/// Sunday on or before `date`, `None` when that falls before `NaiveDate::MIN`.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_sunday())))
}
