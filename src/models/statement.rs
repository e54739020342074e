use serde::{Deserialize, Serialize};

// Fiscal-year P&L statements as published for the dashboard.
// Every amount is optional: older years only carry swings, newer ones carry per-day pnl.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(rename = "type", default)]
    pub trade_type: String,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(rename = "tradePNL", default)]
    pub trade_pnl: Option<f64>,
    #[serde(default)]
    pub date_milli: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Swing {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub qty: Option<f64>,
    #[serde(default)]
    pub buy_val: Option<f64>,
    #[serde(default)]
    pub sell_val: Option<f64>,
    #[serde(default)]
    pub buy_at_milli: Option<i64>,
    #[serde(default)]
    pub sell_at_milli: Option<i64>,
    #[serde(default)]
    pub pnl: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub date_milli: Option<i64>,
    #[serde(default)]
    pub bill: Option<f64>,
    #[serde(default)]
    pub gross_bill: Option<f64>,
    #[serde(default)]
    pub expense: Option<f64>,
    #[serde(default)]
    pub calculated_expense: Option<f64>,
    #[serde(default)]
    pub tpl: Option<f64>,
    #[serde(default)]
    pub ntpl: Option<f64>,
    #[serde(default)]
    pub trades: Vec<Trade>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalYear {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub net_bill: Option<f64>,
    #[serde(default)]
    pub gross_bill: Option<f64>,
    #[serde(default)]
    pub expense: Option<f64>,
    #[serde(default)]
    pub tpl: Option<f64>,
    #[serde(rename = "netTPL", default)]
    pub net_tpl: Option<f64>,
    #[serde(default)]
    pub pnl: Vec<PnlEntry>,
    #[serde(default)]
    pub swings: Vec<Swing>,
    #[serde(rename = "top10Trades", default)]
    pub top10_trades: Vec<Trade>,
}

/// How an entry's expense column is shown.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "lowercase")]
pub enum ExpenseDisplay {
    Recorded(f64),
    /// Estimated from the bill; shown with a `~` prefix.
    Estimated(f64),
    None,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryView {
    pub label: String,
    pub expense: ExpenseDisplay,
    pub expense_text: String,
    pub tpl_text: String,
    pub ntpl_text: String,
    pub trades: Vec<TradeView>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeView {
    pub symbol: Option<String>,
    pub trade_type: String,
    pub value_text: String,
    /// Hidden for buys that have not realized anything yet.
    pub pnl_text: Option<String>,
    pub date_text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FiscalYearSummary {
    pub title: Option<String>,
    pub net_bill: Option<f64>,
    pub gross_bill: Option<f64>,
    pub total_expense: f64,
    pub tpl: Option<f64>,
    pub net_tpl: Option<f64>,
    pub entries: Vec<EntryView>,
    pub swings: Vec<Swing>,
    pub top_trades: Vec<TradeView>,
}
