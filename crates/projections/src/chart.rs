// In crates/projections/src/chart.rs

//! The seam between projections and whatever actually draws charts.
//!
//! Projections describe a chart as a [`ChartSpec`]. A [`ChartBackend`] draws it
//! and hands back a [`LiveChart`]; dropping that live chart releases it in the
//! backend. Each chart-producing projection owns one [`ChartHandle`], which
//! always releases the previous chart before drawing the next.

use serde::Serialize;
use serde_json::{Value, json};
use std::fmt;

/// Which canvas a chart is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartSlot {
    Equity,
    Drawdown,
    TradeDistribution,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 3] = [
        ChartSlot::Equity,
        ChartSlot::Drawdown,
        ChartSlot::TradeDistribution,
    ];

    /// DOM id of the canvas the chart lives on.
    pub fn canvas_id(&self) -> &'static str {
        match self {
            ChartSlot::Equity => "equityCurve",
            ChartSlot::Drawdown => "drawdownChart",
            ChartSlot::TradeDistribution => "tradeDistribution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChartKind {
    Line,
    Bar,
    Candlestick,
}

/// One OHLC candle; `x` is in epoch milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Candle {
    pub x: i64,
    pub o: f64,
    pub h: f64,
    pub l: f64,
    pub c: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SeriesData {
    /// One value per label; `None` is drawn as a gap.
    Values(Vec<Option<f64>>),
    Candles(Vec<Candle>),
}

impl SeriesData {
    pub fn len(&self) -> usize {
        match self {
            SeriesData::Values(values) => values.len(),
            SeriesData::Candles(candles) => candles.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Plotted values, or candle closes.
    pub fn values(&self) -> Vec<Option<f64>> {
        match self {
            SeriesData::Values(values) => values.clone(),
            SeriesData::Candles(candles) => candles.iter().map(|c| Some(c.c)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: SeriesData,
    /// A single color, or one per bar.
    pub border_color: Vec<&'static str>,
    pub background_color: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoomOptions {
    pub wheel: bool,
    pub pinch: bool,
    pub drag_pan: bool,
}

impl ZoomOptions {
    /// Wheel, pinch and drag-pan, all along the x axis.
    pub fn x_axis() -> Self {
        Self {
            wheel: true,
            pinch: true,
            drag_pan: true,
        }
    }
}

/// A complete description of one chart, independent of the drawing library.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartSpec {
    pub kind: ChartKind,
    /// Category labels. Empty for candlestick charts, which use a time axis.
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub x_title: String,
    pub y_title: String,
    pub zoom: Option<ZoomOptions>,
}

impl ChartSpec {
    /// The Chart.js configuration object for this chart.
    pub fn to_chartjs(&self) -> Value {
        let datasets: Vec<Value> = self.datasets.iter().map(dataset_to_chartjs).collect();

        let mut x_scale = json!({ "title": { "display": true, "text": self.x_title } });
        if self.kind == ChartKind::Candlestick {
            x_scale["type"] = json!("time");
            x_scale["time"] = json!({ "unit": "minute" });
        }

        let mut options = json!({
            "responsive": true,
            "scales": {
                "x": x_scale,
                "y": { "title": { "display": true, "text": self.y_title } }
            }
        });
        if let Some(zoom) = self.zoom {
            options["plugins"] = json!({
                "zoom": {
                    "pan": { "enabled": zoom.drag_pan, "mode": "x" },
                    "zoom": {
                        "wheel": { "enabled": zoom.wheel },
                        "pinch": { "enabled": zoom.pinch },
                        "mode": "x"
                    }
                }
            });
        }

        let mut data = json!({ "datasets": datasets });
        if self.kind != ChartKind::Candlestick {
            data["labels"] = json!(self.labels);
        }

        json!({ "type": self.kind, "data": data, "options": options })
    }
}

fn dataset_to_chartjs(dataset: &Dataset) -> Value {
    let mut value = json!({
        "label": dataset.label,
        "data": dataset.data,
        "borderColor": one_or_many(&dataset.border_color),
    });
    if !dataset.background_color.is_empty() {
        value["backgroundColor"] = one_or_many(&dataset.background_color);
        value["borderWidth"] = json!(1);
    } else {
        value["fill"] = json!(false);
    }
    if let SeriesData::Candles(_) = dataset.data {
        value["color"] = json!({
            "up": "rgba(0, 255, 0, 1)",
            "down": "rgba(255, 0, 0, 1)",
            "unchanged": "rgba(0, 0, 255, 1)"
        });
    }
    value
}

fn one_or_many(colors: &[&'static str]) -> Value {
    match colors {
        [single] => json!(single),
        many => json!(many),
    }
}

/// A chart currently drawn by a backend. Dropping it releases the chart.
pub trait LiveChart: Send {
    fn spec(&self) -> &ChartSpec;

    /// Returns the chart to its original (un-zoomed, un-panned) view.
    fn reset_zoom(&mut self);
}

/// The external chart renderer.
pub trait ChartBackend: Send {
    /// Draws `spec` on `slot`'s canvas.
    fn draw(&mut self, slot: ChartSlot, spec: ChartSpec) -> Box<dyn LiveChart>;
}

/// Owns at most one live chart for one projection.
#[derive(Default)]
pub struct ChartHandle {
    live: Option<Box<dyn LiveChart>>,
}

impl ChartHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the current chart, if any, then draws `spec`.
    pub fn redraw(&mut self, backend: &mut dyn ChartBackend, slot: ChartSlot, spec: ChartSpec) {
        self.release();
        self.live = Some(backend.draw(slot, spec));
    }

    pub fn release(&mut self) {
        self.live = None;
    }

    /// Returns `false` when there is no live chart.
    pub fn reset_zoom(&mut self) -> bool {
        match self.live.as_mut() {
            Some(chart) => {
                chart.reset_zoom();
                true
            }
            None => false,
        }
    }

    pub fn spec(&self) -> Option<&ChartSpec> {
        self.live.as_ref().map(|chart| chart.spec())
    }

    pub fn is_live(&self) -> bool {
        self.live.is_some()
    }
}

impl fmt::Debug for ChartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartHandle")
            .field("live", &self.is_live())
            .finish()
    }
}
