// In crates/core-types/src/types.rs

use crate::codes::{OrderDirection, OrderStatus, OrderType};
use crate::error::Error;
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

/// A traded instrument, as exported: `{ "value": "SPY", ... }`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Symbol {
    pub value: String,
}

/// One point of a chart series, exported as `[ts, value]` or `[ts, open, high, low, close]`.
///
/// The timestamp is in epoch seconds. Extra columns are kept so the equity
/// curve can also be drawn as candles.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<Option<f64>>")]
pub struct SeriesPoint {
    pub time: i64,
    /// Column 1. `None` when the exporter wrote `null` (drawn as a gap).
    pub value: Option<f64>,
    pub ohlc: Option<[f64; 4]>,
}

impl TryFrom<Vec<Option<f64>>> for SeriesPoint {
    type Error = Error;

    fn try_from(columns: Vec<Option<f64>>) -> Result<Self, Self::Error> {
        if columns.len() < 2 {
            return Err(Error::ShortSeriesPoint { len: columns.len() });
        }
        let time = columns[0].ok_or(Error::MissingTimestamp)? as i64;
        let ohlc = match columns.get(1..5) {
            Some([Some(o), Some(h), Some(l), Some(c)]) => Some([*o, *h, *l, *c]),
            _ => None,
        };
        Ok(Self {
            time,
            value: columns[1],
            ohlc,
        })
    }
}

/// An absolute instant as serialized by the exporter (e.g. `2023-11-14T22:13:20Z`).
///
/// The raw text is kept; `at` is `None` when it could not be read as an instant.
/// Offset-less timestamps are taken as UTC.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub struct ReportInstant {
    pub raw: String,
    pub at: Option<DateTime<Utc>>,
}

impl From<String> for ReportInstant {
    fn from(raw: String) -> Self {
        let at = parse_instant(&raw);
        Self { raw, at }
    }
}

fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Pre-computed trade counts and results.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeStatistics {
    pub total_number_of_trades: u64,
    pub number_of_winning_trades: u64,
    pub number_of_losing_trades: u64,
    /// Fraction in 0..=1.
    pub win_rate: Decimal,
    pub total_profit_loss: Decimal,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioStatistics {
    pub sharpe_ratio: Decimal,
    /// Max drawdown as a fraction in 0..=1.
    pub drawdown: Decimal,
}

/// A closed round-trip trade.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub symbol: Symbol,
    pub entry_time: ReportInstant,
    pub entry_price: Decimal,
    pub exit_time: ReportInstant,
    pub exit_price: Decimal,
    pub profit_loss: Decimal,
    pub mae: Decimal,
    pub mfe: Decimal,
    /// Exporter's duration text, e.g. `1.02:03:04`.
    pub duration: String,
    pub end_trade_drawdown: Decimal,
    pub is_win: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Order {
    pub symbol: Symbol,
    pub time: ReportInstant,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    pub quantity: Decimal,
    pub price: Decimal,
    pub direction: OrderDirection,
    pub status: OrderStatus,
    #[serde(default)]
    pub tag: Option<String>,
}

/// The sub-documents of one exported backtest that the viewer projects.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub equity_series: Vec<SeriesPoint>,
    pub drawdown_series: Vec<SeriesPoint>,
    pub trade_statistics: TradeStatistics,
    pub portfolio_statistics: PortfolioStatistics,
    pub closed_trades: Vec<Trade>,
    /// In the exporter's insertion order.
    pub orders: Vec<Order>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn series_point_reads_pairs_and_candles() {
        let pair: SeriesPoint = serde_json::from_str("[1700000000, 100000]").unwrap();
        assert_eq!(pair.time, 1_700_000_000);
        assert_eq!(pair.value, Some(100_000.0));
        assert_eq!(pair.ohlc, None);

        let candle: SeriesPoint =
            serde_json::from_str("[1700000000, 10.0, 12.5, 9.5, 11.0]").unwrap();
        assert_eq!(candle.value, Some(10.0));
        assert_eq!(candle.ohlc, Some([10.0, 12.5, 9.5, 11.0]));
    }

    #[test]
    fn series_point_keeps_null_values_as_gaps() {
        let point: SeriesPoint = serde_json::from_str("[1700000000, null]").unwrap();
        assert_eq!(point.value, None);
    }

    #[test]
    fn series_point_rejects_short_rows() {
        assert!(serde_json::from_str::<SeriesPoint>("[1700000000]").is_err());
        assert!(serde_json::from_str::<SeriesPoint>("[null, 5]").is_err());
    }

    #[test]
    fn instants_parse_with_and_without_offset() {
        let expected = Utc.with_ymd_and_hms(2023, 11, 14, 22, 13, 20).unwrap();
        assert_eq!(ReportInstant::from("2023-11-14T22:13:20Z".to_string()).at, Some(expected));
        assert_eq!(
            ReportInstant::from("2023-11-14T17:13:20-05:00".to_string()).at,
            Some(expected)
        );
        assert_eq!(ReportInstant::from("2023-11-14T22:13:20".to_string()).at, Some(expected));
    }

    #[test]
    fn unreadable_instants_keep_their_text() {
        let instant = ReportInstant::from("yesterday".to_string());
        assert_eq!(instant.at, None);
        assert_eq!(instant.raw, "yesterday");
    }

    #[test]
    fn order_reads_exported_fields() {
        let order: Order = serde_json::from_str(
            r#"{"symbol":{"value":"SPY","id":"SPY R735QTJ8XC9X"},"time":"2023-11-15T14:30:00Z",
                "type":1,"quantity":10,"price":440.125,"direction":1,"status":3,"tag":"entry"}"#,
        )
        .unwrap();
        assert_eq!(order.symbol.value, "SPY");
        assert_eq!(order.order_type, OrderType::Limit);
        assert_eq!(order.price, dec!(440.125));
        assert_eq!(order.direction, OrderDirection::Sell);
        assert_eq!(order.status, OrderStatus::Filled);
        assert_eq!(order.tag.as_deref(), Some("entry"));
    }
}
