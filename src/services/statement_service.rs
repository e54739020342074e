use chrono::FixedOffset;

use crate::models::{
    EntryView, ExpenseDisplay, FiscalYear, FiscalYearSummary, PnlEntry, Trade, TradeView,
};
use crate::services::format::{format_currency, format_date};

/// The year's recorded expense, or the sum of per-entry expenses when the
/// year does not carry one.
pub fn total_expense(year: &FiscalYear) -> f64 {
    year.expense.filter(|v| v.is_finite()).unwrap_or_else(|| {
        year.pnl
            .iter()
            .filter_map(|entry| entry.expense.filter(|v| v.is_finite()))
            .sum()
    })
}

pub fn expense_display(entry: &PnlEntry) -> ExpenseDisplay {
    match (entry.expense, entry.calculated_expense) {
        (Some(recorded), _) => ExpenseDisplay::Recorded(recorded),
        (None, Some(estimated)) => ExpenseDisplay::Estimated(estimated),
        (None, None) => ExpenseDisplay::None,
    }
}

fn expense_text(display: ExpenseDisplay, full: bool) -> String {
    match display {
        ExpenseDisplay::Recorded(v) => format_currency(Some(v), full),
        ExpenseDisplay::Estimated(v) => format!("~{}", format_currency(Some(v), full)),
        ExpenseDisplay::None => format_currency(Some(0.0), full),
    }
}

pub fn trade_view(trade: &Trade, full: bool, offset: &FixedOffset) -> TradeView {
    // An open buy has nothing realized yet.
    let unrealized_buy =
        trade.trade_type.eq_ignore_ascii_case("BUY") && trade.trade_pnl.unwrap_or(0.0) == 0.0;

    TradeView {
        symbol: trade.symbol.clone(),
        trade_type: trade.trade_type.to_ascii_uppercase(),
        value_text: format_currency(trade.value, full),
        pnl_text: (!unrealized_buy).then(|| format_currency(trade.trade_pnl, full)),
        date_text: trade.date_milli.map(|ms| format_date(ms, offset)),
    }
}

fn entry_view(entry: &PnlEntry, full: bool, offset: &FixedOffset) -> EntryView {
    let label = entry
        .name
        .clone()
        .or_else(|| entry.date_milli.map(|ms| format_date(ms, offset)))
        .unwrap_or_else(|| "-".to_string());
    let expense = expense_display(entry);

    EntryView {
        label,
        expense,
        expense_text: expense_text(expense, full),
        tpl_text: format_currency(entry.tpl, full),
        ntpl_text: format_currency(entry.ntpl, full),
        trades: entry.trades.iter().map(|t| trade_view(t, full, offset)).collect(),
    }
}

pub fn summarize(year: &FiscalYear, full: bool, offset: &FixedOffset) -> FiscalYearSummary {
    FiscalYearSummary {
        title: year.title.clone(),
        net_bill: year.net_bill,
        gross_bill: year.gross_bill,
        total_expense: total_expense(year),
        tpl: year.tpl,
        net_tpl: year.net_tpl,
        entries: year.pnl.iter().map(|e| entry_view(e, full, offset)).collect(),
        // Swings are only shown for years without a per-day breakdown.
        swings: if year.pnl.is_empty() { year.swings.clone() } else { Vec::new() },
        top_trades: year.top10_trades.iter().map(|t| trade_view(t, full, offset)).collect(),
    }
}

pub fn summarize_all(
    years: &[FiscalYear],
    full: bool,
    offset: &FixedOffset,
) -> Vec<FiscalYearSummary> {
    years.iter().map(|y| summarize(y, full, offset)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ist() -> FixedOffset {
        FixedOffset::east_opt(330 * 60).unwrap()
    }

    fn year_json() -> &'static str {
        r#"{
            "title": "FY 2023-24",
            "netBill": 150000,
            "tpl": 210000,
            "netTPL": 180000,
            "pnl": [
                {"name": "Apr", "expense": 1200, "tpl": 50000, "ntpl": 48800,
                 "trades": [
                    {"symbol": "NIFTY", "type": "sell", "value": 90000, "tradePNL": 50000}
                 ]},
                {"dateMilli": 1704398400000, "calculatedExpense": 800.4,
                 "tpl": -1000, "ntpl": -1800},
                {"name": "Jun", "tpl": 0, "ntpl": 0}
            ],
            "swings": [{"symbol": "TCS", "pnl": 400}],
            "top10Trades": [
                {"symbol": "INFY", "type": "BUY", "value": 30000, "tradePNL": 0},
                {"symbol": "HDFC", "type": "SELL", "value": 10000, "tradePNL": -2500,
                 "dateMilli": 1704398400000}
            ]
        }"#
    }

    #[test]
    fn test_total_expense_falls_back_to_entries() {
        let year: FiscalYear = serde_json::from_str(year_json()).unwrap();
        assert_eq!(total_expense(&year), 1200.0);

        let mut explicit = year.clone();
        explicit.expense = Some(5000.0);
        assert_eq!(total_expense(&explicit), 5000.0);
    }

    #[test]
    fn test_expense_display_rules() {
        let year: FiscalYear = serde_json::from_str(year_json()).unwrap();
        let summary = summarize(&year, false, &ist());

        assert_eq!(summary.entries[0].expense, ExpenseDisplay::Recorded(1200.0));
        assert_eq!(summary.entries[0].expense_text, "1.2 K");
        assert_eq!(summary.entries[1].expense, ExpenseDisplay::Estimated(800.4));
        assert_eq!(summary.entries[1].expense_text, "~800.4");
        assert_eq!(summary.entries[2].expense_text, "0");
    }

    #[test]
    fn test_entry_label_falls_back_to_date() {
        let year: FiscalYear = serde_json::from_str(year_json()).unwrap();
        let summary = summarize(&year, true, &ist());

        assert_eq!(summary.entries[0].label, "Apr");
        assert_eq!(summary.entries[1].label, "05 Jan 2024");
        assert_eq!(summary.entries[1].ntpl_text, "-1,800");
    }

    #[test]
    fn test_unrealized_buy_hides_pnl() {
        let year: FiscalYear = serde_json::from_str(year_json()).unwrap();
        let summary = summarize(&year, false, &ist());

        assert_eq!(summary.top_trades[0].pnl_text, None);
        assert_eq!(summary.top_trades[1].pnl_text.as_deref(), Some("-2.5 K"));
        assert_eq!(summary.top_trades[1].date_text.as_deref(), Some("05 Jan 2024"));
        assert_eq!(summary.entries[0].trades[0].trade_type, "SELL");
    }

    #[test]
    fn test_swings_only_without_daily_breakdown() {
        let year: FiscalYear = serde_json::from_str(year_json()).unwrap();
        assert!(summarize(&year, false, &ist()).swings.is_empty());

        let mut legacy = year.clone();
        legacy.pnl.clear();
        let summary = summarize(&legacy, false, &ist());
        assert_eq!(summary.swings.len(), 1);
        assert_eq!(summary.total_expense, 0.0);
    }
}
