//! GitHub-style P&L heatmap.
//!
//! Weeks run Sunday to Saturday. The grid always covers whole weeks, so the
//! requested range is widened back to a Sunday and forward to a Saturday.

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Days, FixedOffset, NaiveDate};

use crate::models::{
    CalendarCell, CalendarHeatmap, CalendarMode, CalendarWeek, DailyRecord, HeatClass, HeatSign,
    HeatmapCell, HeatmapWeek, MonthLabel,
};
use crate::services::aggregation_service::week_start;

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Inclusive date range before week alignment.
pub fn calendar_range(mode: CalendarMode, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    match mode {
        CalendarMode::Trailing365 => Some((today.checked_sub_days(Days::new(364))?, today)),
        CalendarMode::Year(year) => Some((
            NaiveDate::from_ymd_opt(year, 1, 1)?,
            NaiveDate::from_ymd_opt(year, 12, 31)?,
        )),
    }
}

/// Saturday on or after `date`, `None` past `NaiveDate::MAX`.
fn week_end(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(u64::from(6 - date.weekday().num_days_from_sunday())))
}

pub fn build_grid(
    records: &[DailyRecord],
    mode: CalendarMode,
    today: NaiveDate,
    offset: &FixedOffset,
) -> Vec<CalendarWeek> {
    let Some((start, end)) = calendar_range(mode, today) else {
        return Vec::new();
    };

    // Later records overwrite earlier ones for the same day.
    let mut values: HashMap<String, f64> = HashMap::new();
    for record in records {
        if let (Some(date), Some(ntpl)) = (record.local_date(offset), record.ntpl_value()) {
            values.insert(date_key(date), ntpl);
        }
    }

    // Ranges that cannot be widened to whole weeks have no grid.
    let (Some(first), Some(last)) = (week_start(start), week_end(end)) else {
        return Vec::new();
    };

    let mut weeks = Vec::new();
    let mut next = Some(first);
    while let Some(sunday) = next.filter(|d| *d <= last) {
        // sunday + 6 never passes `last`, which is a Saturday.
        let days = std::array::from_fn(|i| {
            let date = sunday + Days::new(i as u64);
            let key = date_key(date);
            CalendarCell {
                date,
                value: values.get(&key).copied(),
                date_key: key,
            }
        });
        weeks.push(CalendarWeek { days });
        next = sunday.checked_add_days(Days::new(7));
    }

    weeks
}

/// A label per month change, skipping the final week so a lone trailing
/// column never gets its own label.
pub fn month_labels(weeks: &[CalendarWeek]) -> Vec<MonthLabel> {
    let mut labels = Vec::new();
    let mut last_month: Option<u32> = None;

    for (idx, week) in weeks.iter().enumerate() {
        let month = week.first_day().month0();
        if last_month != Some(month) && idx + 1 < weeks.len() {
            labels.push(MonthLabel {
                name: MONTH_NAMES[month as usize].to_string(),
                week_index: idx,
            });
            last_month = Some(month);
        }
    }

    labels
}

pub fn classify(value: Option<f64>) -> HeatClass {
    let Some(value) = value.filter(|v| v.is_finite()) else {
        return HeatClass { sign: HeatSign::None, level: 0 };
    };

    let sign = if value >= 0.0 { HeatSign::Profit } else { HeatSign::Loss };
    let magnitude = value.abs();
    let level = if magnitude > 100_000.0 {
        4
    } else if magnitude > 50_000.0 {
        3
    } else if magnitude > 25_000.0 {
        2
    } else if magnitude > 10_000.0 {
        1
    } else {
        0
    };

    HeatClass { sign, level }
}

/// Years present in the data, most recent first.
pub fn distinct_years(records: &[DailyRecord], offset: &FixedOffset) -> Vec<i32> {
    let years: BTreeSet<i32> = records
        .iter()
        .filter_map(|r| r.local_date(offset))
        .map(|d| d.year())
        .collect();
    years.into_iter().rev().collect()
}

/// Grid, labels and classification bundled for the heatmap endpoint.
pub fn build_heatmap(
    records: &[DailyRecord],
    mode: CalendarMode,
    today: NaiveDate,
    offset: &FixedOffset,
) -> CalendarHeatmap {
    let weeks = build_grid(records, mode, today, offset);
    let month_labels = month_labels(&weeks);

    let start = weeks.first().map(|w| w.days[0].date);
    let end = weeks.last().map(|w| w.days[6].date);

    let weeks = weeks
        .into_iter()
        .map(|week| HeatmapWeek {
            days: week
                .days
                .into_iter()
                .map(|cell| HeatmapCell {
                    class: classify(cell.value),
                    cell,
                })
                .collect(),
        })
        .collect();

    CalendarHeatmap {
        mode,
        start,
        end,
        weeks,
        month_labels,
        available_years: distinct_years(records, offset),
    }
}

fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
