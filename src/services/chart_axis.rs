use chrono::{DateTime, FixedOffset, Months};

use crate::models::{
    AxisDomain, BarSeries, ChartPoint, ChartWindow, DailyRecord, Granularity, LineChart, Page,
};
use crate::services::format::{format_indian_compact, format_inr};

/// Used when there is nothing to measure, instead of +/-infinity.
pub const DEFAULT_VALUE_DOMAIN: AxisDomain = AxisDomain { min: -5_000.0, max: 5_000.0 };
pub const DEFAULT_TIME_DOMAIN: AxisDomain = AxisDomain { min: 0.0, max: 0.0 };

pub const VALUE_PADDING: f64 = 0.1;
pub const TIME_PADDING: f64 = 0.05;

/// Upper bound on tick intervals per axis.
pub const MAX_TICK_INTERVALS: f64 = 50.0;

pub fn filter_window(
    records: &[DailyRecord],
    window: ChartWindow,
    now: DateTime<FixedOffset>,
) -> Vec<DailyRecord> {
    let cutoff = match window {
        ChartWindow::All => return records.to_vec(),
        ChartWindow::Year => now.checked_sub_months(Months::new(12)),
        ChartWindow::Month => now.checked_sub_months(Months::new(1)),
    };

    let Some(cutoff) = cutoff.map(|c| c.timestamp_millis()) else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|r| r.date_milli >= cutoff)
        .cloned()
        .collect()
}

/// Min/max of the finite values, widened by `ratio` of the range on each side.
pub fn padded_domain<I>(values: I, ratio: f64, default: AxisDomain) -> AxisDomain
where
    I: IntoIterator<Item = f64>,
{
    let bounds = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        });

    match bounds {
        Some((lo, hi)) => {
            let pad = (hi - lo) * ratio;
            AxisDomain { min: lo - pad, max: hi + pad }
        }
        None => default,
    }
}

fn tick_step(range: f64) -> f64 {
    if range >= 10_000_000.0 {
        10_000_000.0
    } else if range >= 5_000_000.0 {
        1_000_000.0
    } else if range >= 1_000_000.0 {
        100_000.0
    } else if range >= 100_000.0 {
        50_000.0
    } else if range >= 50_000.0 {
        10_000.0
    } else {
        5_000.0
    }
}

/// Ticks on round multiples of a step chosen from the range, so the compact
/// Indian labels never repeat. Zero is always a tick when the range crosses it.
pub fn round_ticks(min: f64, max: f64) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || min > max {
        return Vec::new();
    }

    let mut step = tick_step(max - min);
    // Beyond crores the step grows by powers of ten.
    while (max / step).ceil() - (min / step).floor() > MAX_TICK_INTERVALS {
        step *= 10.0;
    }
    let first = (min / step).floor() as i64;
    let last = (max / step).ceil() as i64;

    (first..=last).map(|k| k as f64 * step).collect()
}

pub fn tick_labels(ticks: &[f64]) -> Vec<String> {
    ticks.iter().map(|&t| format_indian_compact(t)).collect()
}

fn line_chart(
    records: &[DailyRecord],
    window: ChartWindow,
    now: DateTime<FixedOffset>,
    value: fn(&DailyRecord) -> Option<f64>,
) -> LineChart {
    let records = filter_window(records, window, now);

    let y_domain =
        padded_domain(records.iter().filter_map(value), VALUE_PADDING, DEFAULT_VALUE_DOMAIN);
    let x_domain = padded_domain(
        records.iter().map(|r| r.date_milli as f64),
        TIME_PADDING,
        DEFAULT_TIME_DOMAIN,
    );
    let ticks = round_ticks(y_domain.min, y_domain.max);

    let points = records
        .into_iter()
        .map(|record| ChartPoint {
            value_text: value(&record).map_or_else(|| "-".to_string(), format_inr),
            record,
        })
        .collect();

    LineChart {
        window,
        points,
        x_domain,
        y_domain,
        tick_labels: tick_labels(&ticks),
        ticks,
    }
}

/// Cumulative P&L growth line.
pub fn growth_chart(
    records: &[DailyRecord],
    window: ChartWindow,
    now: DateTime<FixedOffset>,
) -> LineChart {
    line_chart(records, window, now, DailyRecord::ntpl_till_date_value)
}

/// Day-by-day net P&L line.
pub fn daily_chart(
    records: &[DailyRecord],
    window: ChartWindow,
    now: DateTime<FixedOffset>,
) -> LineChart {
    line_chart(records, window, now, DailyRecord::ntpl_value)
}

/// Axis for one page of the bar chart.
pub fn bar_series(granularity: Granularity, page: Page<DailyRecord>) -> BarSeries {
    let y_domain = padded_domain(
        page.items.iter().filter_map(DailyRecord::ntpl_value),
        VALUE_PADDING,
        DEFAULT_VALUE_DOMAIN,
    );
    let ticks = round_ticks(y_domain.min, y_domain.max);

    BarSeries {
        granularity,
        page,
        y_domain,
        tick_labels: tick_labels(&ticks),
        ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(330 * 60)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 15, 12, 0, 0)
            .unwrap()
    }

    fn days_ago(days: i64, ntpl: f64, till: f64) -> DailyRecord {
        let millis = now().timestamp_millis() - days * 86_400_000;
        DailyRecord::new(millis, ntpl, till, 0.0)
    }

    #[test]
    fn test_round_ticks_small_range() {
        assert_eq!(
            round_ticks(-7_000.0, 12_000.0),
            vec![-10_000.0, -5_000.0, 0.0, 5_000.0, 10_000.0, 15_000.0]
        );
    }

    #[test]
    fn test_round_ticks_huge_range_is_bounded() {
        let ticks = round_ticks(-1e12, 1e12);
        assert_eq!(ticks.len(), 21);
        assert_eq!(ticks.first(), Some(&-1e12));
        assert_eq!(ticks.last(), Some(&1e12));
        assert!(ticks.contains(&0.0));

        for (lo, hi) in [(0.0, 1e20), (-f64::MAX, f64::MAX), (-3e15, 7.0)] {
            let ticks = round_ticks(lo, hi);
            assert!(!ticks.is_empty());
            assert!(ticks.len() <= MAX_TICK_INTERVALS as usize + 1, "{} ticks", ticks.len());
        }
    }

    #[test]
    fn test_tick_labels_use_compact_form() {
        let ticks = round_ticks(-7_000.0, 12_000.0);
        assert_eq!(tick_labels(&ticks), vec!["-10K", "-5K", "0", "5K", "10K", "15K"]);
    }

    #[test]
    fn test_round_ticks_lakh_range() {
        let ticks = round_ticks(120_000.0, 1_450_000.0);
        assert_eq!(ticks.first(), Some(&100_000.0));
        assert_eq!(ticks.last(), Some(&1_500_000.0));
        assert!(ticks.windows(2).all(|w| (w[1] - w[0] - 100_000.0).abs() < 1e-6));
    }

    #[test]
    fn test_round_ticks_crore_range() {
        let ticks = round_ticks(-2_500_000.0, 21_000_000.0);
        assert_eq!(ticks, vec![-10_000_000.0, 0.0, 10_000_000.0, 20_000_000.0, 30_000_000.0]);
    }

    #[test]
    fn test_round_ticks_include_zero_when_crossing() {
        for (lo, hi) in [(-123_456.0, 98_765.0), (-3.0, 4.0), (-6_000_000.0, 1.0)] {
            assert!(round_ticks(lo, hi).contains(&0.0));
        }
    }

    #[test]
    fn test_round_ticks_degenerate_input() {
        assert!(round_ticks(f64::NAN, 10.0).is_empty());
        assert!(round_ticks(f64::NEG_INFINITY, f64::INFINITY).is_empty());
        assert_eq!(round_ticks(0.0, 0.0), vec![0.0]);
    }

    #[test]
    fn test_padded_domain() {
        let d = padded_domain(vec![100.0, -100.0, 50.0], VALUE_PADDING, DEFAULT_VALUE_DOMAIN);
        assert!((d.min + 120.0).abs() < 1e-9);
        assert!((d.max - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_padded_domain_empty_uses_default() {
        let d = padded_domain(Vec::<f64>::new(), VALUE_PADDING, DEFAULT_VALUE_DOMAIN);
        assert_eq!(d, DEFAULT_VALUE_DOMAIN);

        let d = padded_domain(vec![f64::NAN, f64::INFINITY], VALUE_PADDING, DEFAULT_VALUE_DOMAIN);
        assert_eq!(d, DEFAULT_VALUE_DOMAIN);
    }

    #[test]
    fn test_filter_window() {
        let records = vec![
            days_ago(400, 1.0, 1.0),
            days_ago(200, 1.0, 2.0),
            days_ago(10, 1.0, 3.0),
        ];

        assert_eq!(filter_window(&records, ChartWindow::All, now()).len(), 3);
        assert_eq!(filter_window(&records, ChartWindow::Year, now()).len(), 2);
        assert_eq!(filter_window(&records, ChartWindow::Month, now()).len(), 1);
    }

    #[test]
    fn test_growth_chart_uses_cumulative_values() {
        let records = vec![
            days_ago(3, 500.0, 1_000.0),
            days_ago(2, -200.0, 800.0),
            days_ago(1, 700.0, 1_500.0),
        ];
        let chart = growth_chart(&records, ChartWindow::All, now());

        assert_eq!(chart.points.len(), 3);
        assert_eq!(chart.points[0].record, records[0]);
        assert_eq!(chart.points[0].value_text, "₹1,000.00");
        assert_eq!(chart.tick_labels, vec!["0", "5K"]);
        assert!((chart.y_domain.min - 730.0).abs() < 1e-9);
        assert!((chart.y_domain.max - 1_570.0).abs() < 1e-9);
        assert_eq!(chart.ticks, vec![0.0, 5_000.0]);
    }

    #[test]
    fn test_daily_chart_empty_window() {
        let records = vec![days_ago(400, 1.0, 1.0)];
        let chart = daily_chart(&records, ChartWindow::Month, now());

        assert!(chart.points.is_empty());
        assert_eq!(chart.y_domain, DEFAULT_VALUE_DOMAIN);
        assert_eq!(chart.x_domain, DEFAULT_TIME_DOMAIN);
        assert_eq!(chart.ticks, vec![-5_000.0, 0.0, 5_000.0]);
        assert_eq!(chart.tick_labels, vec!["-5K", "0", "5K"]);
    }

    #[test]
    fn test_daily_chart_missing_value_has_dash_tooltip() {
        let mut gap = days_ago(2, 0.0, 0.0);
        gap.ntpl = None;
        let records = vec![gap, days_ago(1, -2_500.5, 0.0)];
        let chart = daily_chart(&records, ChartWindow::All, now());

        assert_eq!(chart.points[0].value_text, "-");
        assert_eq!(chart.points[1].value_text, "-₹2,500.50");
    }

    #[test]
    fn test_bar_series_empty_page() {
        let series = bar_series(Granularity::Weekly, Page::empty());
        assert_eq!(series.y_domain, DEFAULT_VALUE_DOMAIN);
        assert_eq!(series.page.total_pages, 0);
    }
}
