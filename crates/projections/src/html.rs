// In crates/projections/src/html.rs

//! Chart.js as the chart backend, and the page that hosts it.
//!
//! [`HtmlCanvas`] keeps the set of live charts in a shared registry; a chart
//! leaves the registry when its [`LiveChart`] is dropped. [`render_page`]
//! writes the statistics block, the tables and one Chart.js configuration per
//! live chart into a single HTML document.

use crate::chart::{ChartBackend, ChartSlot, ChartSpec, LiveChart};
use crate::table::Table;
use crate::view::ReportView;
use app_config::ViewerSettings;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct CanvasState {
    next_id: u64,
    charts: BTreeMap<ChartSlot, DrawnChart>,
}

#[derive(Debug)]
struct DrawnChart {
    id: u64,
    spec: ChartSpec,
    zoom_resets: u64,
}

/// The live chart registry behind a page. Cheap to clone; clones share state.
#[derive(Debug, Clone, Default)]
pub struct HtmlCanvas {
    state: Arc<Mutex<CanvasState>>,
}

impl HtmlCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CanvasState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Live charts, in page order.
    pub fn live_charts(&self) -> Vec<(ChartSlot, ChartSpec)> {
        self.lock()
            .charts
            .iter()
            .map(|(slot, drawn)| (*slot, drawn.spec.clone()))
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.lock().charts.len()
    }

    pub fn zoom_resets(&self, slot: ChartSlot) -> u64 {
        self.lock()
            .charts
            .get(&slot)
            .map(|drawn| drawn.zoom_resets)
            .unwrap_or(0)
    }
}

impl ChartBackend for HtmlCanvas {
    fn draw(&mut self, slot: ChartSlot, spec: ChartSpec) -> Box<dyn LiveChart> {
        let mut state = self.lock();
        state.next_id += 1;
        let id = state.next_id;
        let replaced = state.charts.insert(
            slot,
            DrawnChart {
                id,
                spec: spec.clone(),
                zoom_resets: 0,
            },
        );
        if replaced.is_some() {
            tracing::warn!(?slot, "Chart drawn over one that was never released.");
        }
        tracing::debug!(?slot, id, "Chart drawn.");
        Box::new(CanvasChart {
            id,
            slot,
            spec,
            canvas: self.clone(),
        })
    }
}

struct CanvasChart {
    id: u64,
    slot: ChartSlot,
    spec: ChartSpec,
    canvas: HtmlCanvas,
}

impl LiveChart for CanvasChart {
    fn spec(&self) -> &ChartSpec {
        &self.spec
    }

    fn reset_zoom(&mut self) {
        if let Some(drawn) = self.canvas.lock().charts.get_mut(&self.slot) {
            drawn.zoom_resets += 1;
        }
    }
}

impl Drop for CanvasChart {
    fn drop(&mut self) {
        let mut state = self.canvas.lock();
        // A newer chart may already own the slot.
        if state.charts.get(&self.slot).is_some_and(|drawn| drawn.id == self.id) {
            state.charts.remove(&self.slot);
            tracing::debug!(slot = ?self.slot, id = self.id, "Chart released.");
        }
    }
}

/// Whether the page talks back to a running server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// A self-contained snapshot; only zoom reset is interactive.
    Static,
    /// File picker, load button and time-zone selector wired to the HTTP API.
    Served,
}

/// Renders the full page for `view`, drawing the charts live in `canvas`.
pub fn render_page(
    view: &ReportView,
    canvas: &HtmlCanvas,
    settings: &ViewerSettings,
    mode: PageMode,
) -> Result<String, fmt::Error> {
    let mut page = String::with_capacity(16 * 1024);
    write_header(&mut page, settings)?;
    write_controls(&mut page, view, mode)?;

    writeln!(page, "  <div class=\"section\">")?;
    writeln!(page, "    <h2>Key Statistics</h2>")?;
    writeln!(page, "    <div id=\"statistics\">")?;
    for line in view.statistics() {
        writeln!(
            page,
            "      <p><strong>{}:</strong> {}</p>",
            line.label,
            escape(&line.value)
        )?;
    }
    writeln!(page, "    </div>")?;
    writeln!(page, "  </div>")?;

    for slot in ChartSlot::ALL {
        writeln!(page, "  <div class=\"section chart\">")?;
        writeln!(page, "    <h2>{}</h2>", chart_heading(slot))?;
        writeln!(page, "    <canvas id=\"{}\"></canvas>", slot.canvas_id())?;
        if slot == ChartSlot::Equity {
            writeln!(page, "    <button id=\"resetZoom\">Reset Zoom</button>")?;
        }
        writeln!(page, "  </div>")?;
    }

    write_table(&mut page, "Closed Trades", "tradesTable", view.trades_table())?;
    write_table(&mut page, "Orders", "ordersTable", view.orders_table())?;
    write_scripts(&mut page, canvas, mode)?;
    writeln!(page, "</body>")?;
    writeln!(page, "</html>")?;
    Ok(page)
}

fn chart_heading(slot: ChartSlot) -> &'static str {
    match slot {
        ChartSlot::Equity => "Equity Curve",
        ChartSlot::Drawdown => "Drawdown",
        ChartSlot::TradeDistribution => "Trade Distribution",
    }
}

fn write_header(page: &mut String, settings: &ViewerSettings) -> fmt::Result {
    write!(
        page,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Backtest Report</title>
  <script src="{chart}"></script>
  <script src="{adapter}"></script>
  <script src="{financial}"></script>
  <script src="{zoom}"></script>
  <style>
    body {{ font-family: -apple-system, 'Segoe UI', Roboto, Arial, sans-serif; max-width: 1200px; margin: 0 auto; padding: 2rem; }}
    .section {{ margin-bottom: 2rem; padding: 1rem 1.5rem; border: 1px solid #e9ecef; border-radius: 8px; }}
    .controls {{ display: flex; gap: 1rem; align-items: center; flex-wrap: wrap; }}
    table {{ width: 100%; border-collapse: collapse; font-size: 0.875rem; }}
    th, td {{ padding: 0.5rem 0.75rem; text-align: left; border-bottom: 1px solid #e9ecef; }}
  </style>
</head>
<body>
  <h1>Backtest Report</h1>
"#,
        chart = escape(&settings.chart_script_url),
        adapter = escape(&settings.time_adapter_url),
        financial = escape(&settings.financial_plugin_url),
        zoom = escape(&settings.zoom_plugin_url),
    )
}

fn write_controls(page: &mut String, view: &ReportView, mode: PageMode) -> fmt::Result {
    writeln!(page, "  <div class=\"section controls\">")?;
    if mode == PageMode::Served {
        writeln!(page, "    <input type=\"file\" id=\"fileInput\" accept=\".json,application/json\">")?;
        writeln!(
            page,
            "    <button id=\"loadDataBtn\"{}>Render Report</button>",
            if view.is_render_enabled() { "" } else { " disabled" }
        )?;
    }
    writeln!(page, "    <label for=\"timeZone\">Time zone</label>")?;
    writeln!(
        page,
        "    <select id=\"timeZone\"{}>",
        if mode == PageMode::Static { " disabled" } else { "" }
    )?;
    let selected = view.time_zone();
    for zone in chrono_tz::TZ_VARIANTS {
        writeln!(
            page,
            "      <option value=\"{name}\"{sel}>{name}</option>",
            name = zone.name(),
            sel = if zone == selected { " selected" } else { "" }
        )?;
    }
    writeln!(page, "    </select>")?;
    writeln!(page, "  </div>")
}

fn write_table(page: &mut String, title: &str, id: &str, table: &Table) -> fmt::Result {
    writeln!(page, "  <div class=\"section\">")?;
    writeln!(page, "    <h2>{}</h2>", title)?;
    writeln!(page, "    <table id=\"{}\">", id)?;
    write!(page, "      <thead><tr>")?;
    for column in table.columns {
        write!(page, "<th>{}</th>", column)?;
    }
    writeln!(page, "</tr></thead>")?;
    writeln!(page, "      <tbody>")?;
    for row in table.rows() {
        write!(page, "        <tr>")?;
        for cell in row {
            write!(page, "<td>{}</td>", escape(cell))?;
        }
        writeln!(page, "</tr>")?;
    }
    writeln!(page, "      </tbody>")?;
    writeln!(page, "    </table>")?;
    writeln!(page, "  </div>")
}

fn write_scripts(page: &mut String, canvas: &HtmlCanvas, mode: PageMode) -> fmt::Result {
    writeln!(page, "  <script>")?;
    writeln!(page, "    const charts = {{}};")?;
    for (slot, spec) in canvas.live_charts() {
        writeln!(
            page,
            "    charts[{id:?}] = new Chart(document.getElementById({id:?}).getContext('2d'), {config});",
            id = slot.canvas_id(),
            config = script_json(&spec.to_chartjs().to_string()),
        )?;
    }
    writeln!(
        page,
        "    document.getElementById('resetZoom').addEventListener('click', () => {{"
    )?;
    writeln!(page, "      if (charts.equityCurve) charts.equityCurve.resetZoom();")?;
    if mode == PageMode::Served {
        writeln!(page, "      fetch('/api/charts/equity/reset-zoom', {{ method: 'POST' }});")?;
    }
    writeln!(page, "    }});")?;
    if mode == PageMode::Served {
        page.push_str(SERVED_SCRIPT);
    }
    writeln!(page, "  </script>")
}

const SERVED_SCRIPT: &str = r#"    document.getElementById('fileInput').addEventListener('change', async (event) => {
      const file = event.target.files[0];
      if (!file) return;
      const response = await fetch('/api/report', { method: 'POST', body: await file.arrayBuffer() });
      if (response.ok) {
        document.getElementById('loadDataBtn').disabled = false;
      } else {
        console.error('Error loading report:', (await response.json()).error);
      }
    });
    document.getElementById('loadDataBtn').addEventListener('click', async () => {
      const response = await fetch('/api/render', { method: 'POST' });
      if (response.ok) window.location.reload();
    });
    document.getElementById('timeZone').addEventListener('change', async (event) => {
      const response = await fetch('/api/time-zone', {
        method: 'PUT',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify({ timeZone: event.target.value }),
      });
      if (response.ok) window.location.reload();
    });
"#;

/// Makes JSON safe to embed inside a `<script>` element.
fn script_json(json: &str) -> String {
    json.replace("</", "<\\/")
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}
