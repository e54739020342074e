mod pnl_record;
mod bucket;
mod page;
pub mod calendar;
pub mod chart;
pub mod statement;

pub use pnl_record::{local_datetime, local_midnight_millis, DailyRecord};
pub use bucket::{Bucket, Granularity};
pub use page::{Page, DEFAULT_PAGE_SIZE};
pub use calendar::{
    CalendarCell, CalendarHeatmap, CalendarMode, CalendarWeek, HeatClass, HeatSign,
    HeatmapCell, HeatmapWeek, MonthLabel,
};
pub use chart::{AxisDomain, BarSeries, ChartPoint, ChartWindow, LineChart};
pub use statement::{
    EntryView, ExpenseDisplay, FiscalYear, FiscalYearSummary, PnlEntry, Swing, Trade, TradeView,
};
