// In crates/projections/src/projection/equity.rs

use crate::chart::{Candle, ChartKind, ChartSpec, Dataset, SeriesData, ZoomOptions};
use crate::view_state::Localizer;
use app_config::EquityStyle;
use core_types::SeriesPoint;

pub const DATASET_LABEL: &str = "Equity Value";
const LINE_COLOR: &str = "rgba(75, 192, 192, 1)";

/// Equity curve, zoomable and pannable along x.
///
/// With [`EquityStyle::Candlestick`] the curve is drawn as candles on a time
/// axis, provided every point carries OHLC columns.
pub fn project(series: &[SeriesPoint], localizer: &Localizer<'_>, style: EquityStyle) -> ChartSpec {
    if style == EquityStyle::Candlestick {
        match candles(series) {
            Some(candles) => return candle_chart(candles),
            None => tracing::warn!(
                points = series.len(),
                "Equity series has no usable OHLC candles; drawing a line chart instead."
            ),
        }
    }

    ChartSpec {
        kind: ChartKind::Line,
        labels: series.iter().map(|p| localizer.date_label(p.time)).collect(),
        datasets: vec![Dataset {
            label: DATASET_LABEL.to_string(),
            data: SeriesData::Values(series.iter().map(|p| p.value).collect()),
            border_color: vec![LINE_COLOR],
            background_color: vec![],
        }],
        x_title: "Date".to_string(),
        y_title: "Equity ($)".to_string(),
        zoom: Some(ZoomOptions::x_axis()),
    }
}

fn candles(series: &[SeriesPoint]) -> Option<Vec<Candle>> {
    if series.is_empty() {
        return None;
    }
    series
        .iter()
        .map(|point| {
            let [o, h, l, c] = point.ohlc?;
            // Epoch seconds far past any real date do not fit as milliseconds.
            let x = point.time.checked_mul(1000)?;
            Some(Candle { x, o, h, l, c })
        })
        .collect()
}

fn candle_chart(candles: Vec<Candle>) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Candlestick,
        labels: Vec::new(),
        datasets: vec![Dataset {
            label: DATASET_LABEL.to_string(),
            data: SeriesData::Candles(candles),
            border_color: vec![LINE_COLOR],
            background_color: vec![],
        }],
        x_title: "Date".to_string(),
        y_title: "Price ($)".to_string(),
        zoom: Some(ZoomOptions::x_axis()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::{DisplayFormats, ViewState};
    use chrono_tz::Tz;

    fn point(time: i64, value: f64) -> SeriesPoint {
        SeriesPoint {
            time,
            value: Some(value),
            ohlc: None,
        }
    }

    #[test]
    fn line_chart_keeps_order_and_values() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);
        let series = vec![point(1_700_000_000, 100_000.0), point(1_700_086_400, 101_200.0)];

        let spec = project(&series, &localizer, EquityStyle::Line);

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.labels, vec!["11/14/2023", "11/15/2023"]);
        assert_eq!(spec.datasets[0].label, "Equity Value");
        assert_eq!(
            spec.datasets[0].data.values(),
            vec![Some(100_000.0), Some(101_200.0)]
        );
        assert_eq!((spec.x_title.as_str(), spec.y_title.as_str()), ("Date", "Equity ($)"));
        assert_eq!(spec.zoom, Some(ZoomOptions::x_axis()));
    }

    #[test]
    fn candlestick_style_uses_ohlc_columns() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);
        let series = vec![SeriesPoint {
            time: 1_700_000_000,
            value: Some(10.0),
            ohlc: Some([10.0, 12.0, 9.0, 11.0]),
        }];

        let spec = project(&series, &localizer, EquityStyle::Candlestick);

        assert_eq!(spec.kind, ChartKind::Candlestick);
        assert!(spec.labels.is_empty());
        assert_eq!(
            spec.datasets[0].data,
            SeriesData::Candles(vec![Candle {
                x: 1_700_000_000_000,
                o: 10.0,
                h: 12.0,
                l: 9.0,
                c: 11.0
            }])
        );
        assert!(spec.zoom.is_some());
    }

    #[test]
    fn candlestick_style_falls_back_when_timestamps_overflow() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);
        let series: Vec<SeriesPoint> =
            serde_json::from_str("[[1e17, 1.0, 2.0, 0.5, 1.5]]").unwrap();

        let spec = project(&series, &localizer, EquityStyle::Candlestick);

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.datasets[0].data.values(), vec![Some(1.0)]);
        assert_eq!(spec.labels, vec![crate::view_state::INVALID_DATE]);
    }

    #[test]
    fn candlestick_style_falls_back_without_ohlc() {
        let formats = DisplayFormats::default();
        let localizer = Localizer::new(ViewState::new(Tz::UTC), &formats);
        let spec = project(&[point(1_700_000_000, 5.0)], &localizer, EquityStyle::Candlestick);
        assert_eq!(spec.kind, ChartKind::Line);
    }
}
