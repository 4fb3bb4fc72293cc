// In crates/app-config/src/lib.rs

use chrono_tz::Tz;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{AppSettings, EquityStyle, ServerSettings, Settings, ViewerSettings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Starts from built-in defaults.
/// 2. Reads `config/base.toml`, if present.
/// 3. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 4. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = with_defaults(Config::builder())?
        .set_override("app.environment", environment.clone())?
        .add_source(File::with_name("config/base").required(false))
        .add_source(File::with_name(&format!("config/{}", environment)).required(false))
        .add_source(environment_source())
        .build()?;

    // Deserialize the configuration into our `Settings` struct.
    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Settings from environment variables (e.g., `APP_SERVER__PORT=8080`).
///
/// The prefix is `APP` followed by a single `_`; `__` separates nested keys.
pub fn environment_source() -> Environment {
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
}

/// Seeds a builder with every default so that no file is strictly required.
pub fn with_defaults(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>> {
    let viewer = ViewerSettings::default();
    let builder = builder
        .set_default("app.environment", "development")?
        .set_default("app.log_level", "info")?
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 3000_i64)?
        .set_default("viewer.date_format", viewer.date_format)?
        .set_default("viewer.date_time_format", viewer.date_time_format)?
        .set_default("viewer.equity_style", "line")?
        .set_default("viewer.chart_script_url", viewer.chart_script_url)?
        .set_default("viewer.zoom_plugin_url", viewer.zoom_plugin_url)?
        .set_default("viewer.financial_plugin_url", viewer.financial_plugin_url)?
        .set_default("viewer.time_adapter_url", viewer.time_adapter_url)?;
    Ok(builder)
}

/// Parses an IANA time zone name.
pub fn parse_time_zone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| Error::UnknownTimeZone(name.to_string()))
}

impl ViewerSettings {
    /// Resolves the zone the viewer starts in.
    ///
    /// Order: `viewer.default_time_zone`, then the `TZ` variable, then the
    /// host's local zone, then UTC. An unreadable configured zone is an error.
    pub fn initial_time_zone(&self) -> Result<Tz> {
        let host_zone = iana_time_zone::get_timezone().ok();
        resolve_time_zone(
            self.default_time_zone.as_deref(),
            std::env::var("TZ").ok().as_deref(),
            host_zone.as_deref(),
        )
    }
}

/// Picks the first usable zone. Unreadable `TZ` or host values are skipped.
fn resolve_time_zone(
    configured: Option<&str>,
    tz_var: Option<&str>,
    host: Option<&str>,
) -> Result<Tz> {
    if let Some(name) = configured {
        return parse_time_zone(name);
    }
    let zone = tz_var
        .and_then(|name| parse_time_zone(name.trim_start_matches(':')).ok())
        .or_else(|| host.and_then(|name| parse_time_zone(name).ok()));
    Ok(zone.unwrap_or(Tz::UTC))
}
