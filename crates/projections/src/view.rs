// In crates/projections/src/view.rs

use crate::chart::{ChartBackend, ChartHandle, ChartSlot, ChartSpec};
use crate::error::{Error, Result};
use crate::projection::{distribution, drawdown, equity, orders, statistics, trades};
use crate::table::{StatLine, Table};
use crate::view_state::{DisplayFormats, Localizer, ViewState};
use app_config::{EquityStyle, ViewerSettings};
use chrono_tz::Tz;
use core_types::Report;
use report_loader::ReportStore;

/// What a successful load brought in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub trades: usize,
    pub orders: usize,
    pub equity_points: usize,
}

/// One independent report view: the loaded report, the viewer's display
/// choices, and everything currently drawn from them.
///
/// Loading never draws. [`ReportView::render`] runs every projection, and a
/// time-zone change re-runs them; each run replaces what the last one produced.
pub struct ReportView {
    store: ReportStore,
    view: ViewState,
    formats: DisplayFormats,
    equity_style: EquityStyle,
    backend: Box<dyn ChartBackend>,
    equity_chart: ChartHandle,
    drawdown_chart: ChartHandle,
    distribution_chart: ChartHandle,
    statistics: Vec<StatLine>,
    trades: Table,
    orders: Table,
    render_enabled: bool,
    renders: u64,
}

impl ReportView {
    pub fn new(time_zone: Tz, formats: DisplayFormats, backend: Box<dyn ChartBackend>) -> Self {
        Self {
            store: ReportStore::new(),
            view: ViewState::new(time_zone),
            formats,
            equity_style: EquityStyle::default(),
            backend,
            equity_chart: ChartHandle::new(),
            drawdown_chart: ChartHandle::new(),
            distribution_chart: ChartHandle::new(),
            statistics: Vec::new(),
            trades: Table::new(trades::COLUMNS),
            orders: Table::new(orders::COLUMNS),
            render_enabled: false,
            renders: 0,
        }
    }

    /// Builds a view from the `[viewer]` settings, starting in their initial zone.
    pub fn from_settings(settings: &ViewerSettings, backend: Box<dyn ChartBackend>) -> Result<Self> {
        let formats = DisplayFormats::from_settings(settings)?;
        let time_zone = settings.initial_time_zone()?;
        Ok(Self::new(time_zone, formats, backend).with_equity_style(settings.equity_style))
    }

    pub fn with_equity_style(mut self, style: EquityStyle) -> Self {
        self.equity_style = style;
        self
    }

    /// Loads a report from raw bytes. On failure the previous report stays.
    pub fn load(&mut self, bytes: &[u8]) -> report_loader::Result<LoadSummary> {
        let report = self.store.load(bytes)?;
        let summary = LoadSummary {
            trades: report.closed_trades.len(),
            orders: report.orders.len(),
            equity_points: report.equity_series.len(),
        };
        self.render_enabled = true;
        Ok(summary)
    }

    /// Swaps in an already-parsed report.
    pub fn load_report(&mut self, report: Report) {
        self.store.replace(report);
        self.render_enabled = true;
    }

    /// Runs every projection, replacing all charts and table rows.
    pub fn render(&mut self) -> Result<()> {
        let Some(report) = self.store.current() else {
            tracing::error!("No data available to render the charts.");
            return Err(Error::NoData);
        };
        let localizer = Localizer::new(self.view, &self.formats);
        let backend = self.backend.as_mut();

        self.equity_chart.redraw(
            backend,
            ChartSlot::Equity,
            equity::project(&report.equity_series, &localizer, self.equity_style),
        );
        self.drawdown_chart.redraw(
            backend,
            ChartSlot::Drawdown,
            drawdown::project(&report.drawdown_series, &localizer),
        );
        self.distribution_chart.redraw(
            backend,
            ChartSlot::TradeDistribution,
            distribution::project(&report.trade_statistics),
        );
        self.statistics = statistics::project(&report.trade_statistics, &report.portfolio_statistics);
        self.trades.repopulate(trades::rows(&report.closed_trades, &localizer));
        self.orders.repopulate(orders::rows(&report.orders, &localizer));

        self.renders += 1;
        tracing::info!(
            render = self.renders,
            time_zone = %self.view.time_zone,
            trade_rows = self.trades.len(),
            order_rows = self.orders.len(),
            "Report rendered."
        );
        Ok(())
    }

    /// Switches the display zone and re-renders if a report is loaded.
    pub fn change_time_zone(&mut self, time_zone: Tz) -> Result<()> {
        self.view.time_zone = time_zone;
        if !self.store.is_loaded() {
            tracing::debug!(%time_zone, "Time zone changed with no report loaded.");
            return Ok(());
        }
        self.render()
    }

    /// Returns the equity chart to its original view.
    pub fn reset_zoom(&mut self) -> Result<()> {
        if self.equity_chart.reset_zoom() {
            Ok(())
        } else {
            tracing::warn!("Zoom reset requested with no equity chart drawn.");
            Err(Error::NoData)
        }
    }

    pub fn time_zone(&self) -> Tz {
        self.view.time_zone
    }

    pub fn report(&self) -> Option<&Report> {
        self.store.current()
    }

    /// Whether a report has been loaded and may be rendered.
    pub fn is_render_enabled(&self) -> bool {
        self.render_enabled
    }

    pub fn renders(&self) -> u64 {
        self.renders
    }

    pub fn chart(&self, slot: ChartSlot) -> Option<&ChartSpec> {
        match slot {
            ChartSlot::Equity => self.equity_chart.spec(),
            ChartSlot::Drawdown => self.drawdown_chart.spec(),
            ChartSlot::TradeDistribution => self.distribution_chart.spec(),
        }
    }

    pub fn statistics(&self) -> &[StatLine] {
        &self.statistics
    }

    pub fn trades_table(&self) -> &Table {
        &self.trades
    }

    pub fn orders_table(&self) -> &Table {
        &self.orders
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::recording::RecordingBackend;

    const REPORT: &str = include_str!("../tests/fixtures/report.json");

    fn view_with(backend: &RecordingBackend, time_zone: Tz) -> ReportView {
        ReportView::new(time_zone, DisplayFormats::default(), Box::new(backend.clone()))
    }

    #[test]
    fn render_without_a_report_draws_nothing() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, Tz::UTC);

        assert!(matches!(view.render(), Err(Error::NoData)));
        assert!(!view.is_render_enabled());
        assert_eq!(backend.tally.lock().unwrap().drawn, 0);
        assert!(view.trades_table().is_empty());
    }

    #[test]
    fn load_enables_render_without_drawing() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, Tz::UTC);

        let summary = view.load(REPORT.as_bytes()).unwrap();

        assert_eq!(summary, LoadSummary { trades: 2, orders: 3, equity_points: 2 });
        assert!(view.is_render_enabled());
        assert_eq!(backend.tally.lock().unwrap().drawn, 0);
        assert_eq!(view.renders(), 0);
    }

    #[test]
    fn render_runs_projections_in_page_order() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, Tz::UTC);
        view.load(REPORT.as_bytes()).unwrap();

        view.render().unwrap();

        assert_eq!(
            backend.tally.lock().unwrap().order,
            vec![ChartSlot::Equity, ChartSlot::Drawdown, ChartSlot::TradeDistribution]
        );
        assert_eq!(view.statistics().len(), 7);
        assert_eq!(view.trades_table().len(), 2);
        assert_eq!(view.orders_table().len(), 3);
    }

    #[test]
    fn repeated_renders_replace_rather_than_accumulate() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, Tz::UTC);
        view.load(REPORT.as_bytes()).unwrap();

        for _ in 0..4 {
            view.render().unwrap();
        }

        let tally = backend.tally.lock().unwrap();
        assert_eq!(tally.drawn, 12);
        assert_eq!(tally.live(), 3);
        assert_eq!(view.trades_table().len(), 2);
        assert_eq!(view.orders_table().len(), 3);
        assert_eq!(view.statistics().len(), 7);
        assert_eq!(view.renders(), 4);
    }

    #[test]
    fn time_zone_change_relabels_without_touching_values() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, chrono_tz::Asia::Tokyo);
        view.load(REPORT.as_bytes()).unwrap();
        view.render().unwrap();
        let tokyo = view.chart(ChartSlot::Equity).cloned().unwrap();
        let tokyo_entry = view.trades_table().column("Entry Time")[0].to_string();

        view.change_time_zone(Tz::UTC).unwrap();
        let utc = view.chart(ChartSlot::Equity).cloned().unwrap();

        assert_eq!(view.time_zone(), Tz::UTC);
        assert_ne!(tokyo.labels, utc.labels);
        assert_eq!(tokyo.datasets[0].data, utc.datasets[0].data);
        assert_ne!(tokyo_entry, view.trades_table().column("Entry Time")[0]);
        assert_eq!(backend.tally.lock().unwrap().live(), 3);
    }

    #[test]
    fn time_zone_change_before_load_only_updates_the_zone() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, Tz::UTC);

        view.change_time_zone(chrono_tz::Europe::Paris).unwrap();

        assert_eq!(view.time_zone(), chrono_tz::Europe::Paris);
        assert_eq!(backend.tally.lock().unwrap().drawn, 0);
    }

    #[test]
    fn failed_load_keeps_the_previous_report_renderable() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, Tz::UTC);
        view.load(REPORT.as_bytes()).unwrap();

        let failure = view.load(b"{ definitely not json");

        assert!(matches!(failure, Err(report_loader::Error::Parse(_))));
        assert!(view.is_render_enabled());
        view.render().unwrap();
        assert_eq!(view.trades_table().len(), 2);
    }

    #[test]
    fn reset_zoom_needs_a_drawn_equity_chart() {
        let backend = RecordingBackend::default();
        let mut view = view_with(&backend, Tz::UTC);
        view.load(REPORT.as_bytes()).unwrap();
        assert!(matches!(view.reset_zoom(), Err(Error::NoData)));

        view.render().unwrap();
        view.reset_zoom().unwrap();

        assert_eq!(backend.tally.lock().unwrap().resets, 1);
    }

    #[test]
    fn dropping_the_view_releases_its_charts() {
        let backend = RecordingBackend::default();
        {
            let mut view = view_with(&backend, Tz::UTC);
            view.load(REPORT.as_bytes()).unwrap();
            view.render().unwrap();
        }
        assert_eq!(backend.tally.lock().unwrap().live(), 0);
    }

    #[test]
    fn settings_pick_zone_formats_and_style() {
        let settings = ViewerSettings {
            default_time_zone: Some("America/Chicago".to_string()),
            date_format: "%Y-%m-%d".to_string(),
            ..Default::default()
        };
        let backend = RecordingBackend::default();
        let mut view = ReportView::from_settings(&settings, Box::new(backend.clone())).unwrap();
        view.load(REPORT.as_bytes()).unwrap();
        view.render().unwrap();

        assert_eq!(view.time_zone(), chrono_tz::America::Chicago);
        assert_eq!(
            view.chart(ChartSlot::Equity).unwrap().labels,
            vec!["2023-11-14", "2023-11-15"]
        );
    }
}
