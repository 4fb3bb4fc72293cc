// In crates/app-config/src/types.rs

use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    pub server: ServerSettings,
    /// How reports are projected and displayed.
    pub viewer: ViewerSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
}

/// How the equity curve is drawn.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EquityStyle {
    #[default]
    Line,
    /// Needs `[ts, open, high, low, close]` points; falls back to `Line` otherwise.
    Candlestick,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ViewerSettings {
    /// IANA name, e.g. "America/New_York". When unset, `TZ`, the host zone and then UTC are used.
    #[serde(default)]
    pub default_time_zone: Option<String>,
    /// chrono format string for chart date labels.
    pub date_format: String,
    /// chrono format string for trade and order timestamps.
    pub date_time_format: String,
    #[serde(default)]
    pub equity_style: EquityStyle,
    pub chart_script_url: String,
    pub zoom_plugin_url: String,
    pub financial_plugin_url: String,
    pub time_adapter_url: String,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            default_time_zone: None,
            date_format: "%-m/%-d/%Y".to_string(),
            date_time_format: "%-m/%-d/%Y, %-I:%M:%S %p".to_string(),
            equity_style: EquityStyle::Line,
            chart_script_url: "https://cdn.jsdelivr.net/npm/chart.js@4".to_string(),
            zoom_plugin_url: "https://cdn.jsdelivr.net/npm/chartjs-plugin-zoom@2".to_string(),
            financial_plugin_url: "https://cdn.jsdelivr.net/npm/chartjs-chart-financial@0.2"
                .to_string(),
            time_adapter_url: "https://cdn.jsdelivr.net/npm/chartjs-adapter-date-fns@3/dist/chartjs-adapter-date-fns.bundle.min.js"
                .to_string(),
        }
    }
}
