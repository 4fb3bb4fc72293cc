// In crates/report-loader/src/lib.rs

//! Turns an exported backtest document into a [`Report`].
//!
//! Loading is all-or-nothing: the six sub-documents the viewer needs are
//! extracted together, and any failure leaves the caller's previous report alone.

use core_types::{Order, Report};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::path::Path;

pub mod error;
pub mod store;

pub use error::{Error, Result};
pub use error::Error as LoadError;
pub use store::ReportStore;

pub const EQUITY_PATH: &str = "/charts/Strategy Equity/series/Equity/values";
pub const DRAWDOWN_PATH: &str = "/charts/Drawdown/series/Equity Drawdown/values";
pub const TRADE_STATISTICS_PATH: &str = "/totalPerformance/tradeStatistics";
pub const PORTFOLIO_STATISTICS_PATH: &str = "/totalPerformance/portfolioStatistics";
pub const CLOSED_TRADES_PATH: &str = "/totalPerformance/closedTrades";
pub const ORDERS_PATH: &str = "/orders";

/// Parses `bytes` and extracts every sub-document the projections read.
pub fn load(bytes: &[u8]) -> Result<Report> {
    let document: Value = serde_json::from_slice(bytes).map_err(Error::Parse)?;

    let report = Report {
        equity_series: extract(&document, EQUITY_PATH)?,
        drawdown_series: extract(&document, DRAWDOWN_PATH)?,
        trade_statistics: extract(&document, TRADE_STATISTICS_PATH)?,
        portfolio_statistics: extract(&document, PORTFOLIO_STATISTICS_PATH)?,
        closed_trades: extract(&document, CLOSED_TRADES_PATH)?,
        orders: extract_orders(&document)?,
    };

    tracing::debug!(
        equity_points = report.equity_series.len(),
        drawdown_points = report.drawdown_series.len(),
        trades = report.closed_trades.len(),
        orders = report.orders.len(),
        "Report extracted."
    );
    Ok(report)
}

/// Reads a report file from disk and loads it.
pub async fn read_report(path: impl AsRef<Path>) -> Result<Report> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "Read report file.");
    load(&bytes)
}

fn locate<'a>(document: &'a Value, path: &'static str) -> Result<&'a Value> {
    document
        .pointer(path)
        .filter(|value| !value.is_null())
        .ok_or(Error::Schema {
            path,
            reason: "missing".to_string(),
        })
}

fn extract<T: DeserializeOwned>(document: &Value, path: &'static str) -> Result<T> {
    let value = locate(document, path)?;
    T::deserialize(value).map_err(|e| Error::Schema {
        path,
        reason: e.to_string(),
    })
}

/// Orders are exported keyed by id; a plain array is accepted as well.
fn extract_orders(document: &Value) -> Result<Vec<Order>> {
    let orders: std::result::Result<Vec<Order>, serde_json::Error> =
        match locate(document, ORDERS_PATH)? {
            Value::Object(by_id) => by_id.values().map(Order::deserialize).collect(),
            Value::Array(items) => items.iter().map(Order::deserialize).collect(),
            other => {
                return Err(Error::Schema {
                    path: ORDERS_PATH,
                    reason: format!("expected an object or array, found {}", kind_of(other)),
                });
            }
        };
    orders.map_err(|e| Error::Schema {
        path: ORDERS_PATH,
        reason: e.to_string(),
    })
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
