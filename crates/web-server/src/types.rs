// In crates/web-server/src/types.rs

use projections::{ChartSlot, LoadSummary, ReportView, StatLine, Table};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api/report` on success.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadResponse {
    pub trades: usize,
    pub orders: usize,
    pub equity_points: usize,
}

impl From<LoadSummary> for LoadResponse {
    fn from(summary: LoadSummary) -> Self {
        Self {
            trades: summary.trades,
            orders: summary.orders,
            equity_points: summary.equity_points,
        }
    }
}

/// Body of `PUT /api/time-zone`, e.g. `{"timeZone": "America/New_York"}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeZoneRequest {
    pub time_zone: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartEntry {
    pub slot: ChartSlot,
    pub canvas_id: &'static str,
    /// The Chart.js configuration object.
    pub config: Value,
}

/// Everything the page currently shows.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub time_zone: &'static str,
    pub render_enabled: bool,
    pub renders: u64,
    pub statistics: Vec<StatLine>,
    pub trades: Table,
    pub orders: Table,
    pub charts: Vec<ChartEntry>,
}

impl ViewSnapshot {
    pub fn of(view: &ReportView) -> Self {
        let charts = ChartSlot::ALL
            .into_iter()
            .filter_map(|slot| {
                view.chart(slot).map(|spec| ChartEntry {
                    slot,
                    canvas_id: slot.canvas_id(),
                    config: spec.to_chartjs(),
                })
            })
            .collect();
        Self {
            time_zone: view.time_zone().name(),
            render_enabled: view.is_render_enabled(),
            renders: view.renders(),
            statistics: view.statistics().to_vec(),
            trades: view.trades_table().clone(),
            orders: view.orders_table().clone(),
            charts,
        }
    }
}
