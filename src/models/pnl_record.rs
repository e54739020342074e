use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// One trading day as stored by the realtime database.
///
/// The numeric fields are optional because the source occasionally omits
/// them; a missing value must survive a daily pass-through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    pub date_milli: i64,
    #[serde(default)]
    pub ntpl: Option<f64>,
    #[serde(default)]
    pub ntpl_till_date: Option<f64>,
    #[serde(default)]
    pub tpl: Option<f64>,
}

impl DailyRecord {
    pub fn new(date_milli: i64, ntpl: f64, ntpl_till_date: f64, tpl: f64) -> Self {
        Self {
            date_milli,
            ntpl: Some(ntpl),
            ntpl_till_date: Some(ntpl_till_date),
            tpl: Some(tpl),
        }
    }

    /// Net P&L if present and finite.
    pub fn ntpl_value(&self) -> Option<f64> {
        self.ntpl.filter(|v| v.is_finite())
    }

    pub fn ntpl_till_date_value(&self) -> Option<f64> {
        self.ntpl_till_date.filter(|v| v.is_finite())
    }

    /// Calendar date of this record in the viewer's timezone.
    pub fn local_date(&self, offset: &FixedOffset) -> Option<NaiveDate> {
        local_datetime(self.date_milli, offset).map(|dt| dt.date_naive())
    }
}

pub fn local_datetime(date_milli: i64, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp_millis(date_milli).map(|dt| dt.with_timezone(offset))
}

/// Epoch milliseconds of local midnight starting `date`.
pub fn local_midnight_millis(date: NaiveDate, offset: &FixedOffset) -> Option<i64> {
    let midnight = date.and_hms_opt(0, 0, 0)?;
    offset
        .from_local_datetime(&midnight)
        .single()
        .map(|dt| dt.timestamp_millis())
}
