// In crates/projections/src/view_state.rs

use crate::error::{Error, Result};
use app_config::ViewerSettings;
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use core_types::ReportInstant;

/// What browsers print for an instant they cannot read.
pub const INVALID_DATE: &str = "Invalid Date";

/// Viewer-controlled display parameters. Never changes the underlying data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub time_zone: Tz,
}

impl ViewState {
    pub fn new(time_zone: Tz) -> Self {
        Self { time_zone }
    }
}

/// chrono format strings used for dates on chart axes and instants in tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayFormats {
    date: String,
    date_time: String,
}

impl DisplayFormats {
    /// Both strings are checked up front so formatting can never fail later.
    pub fn new(date: impl Into<String>, date_time: impl Into<String>) -> Result<Self> {
        let date = date.into();
        let date_time = date_time.into();
        for format in [&date, &date_time] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(Error::InvalidFormat(format.clone()));
            }
        }
        Ok(Self { date, date_time })
    }

    pub fn from_settings(settings: &ViewerSettings) -> Result<Self> {
        Self::new(&settings.date_format, &settings.date_time_format)
    }
}

impl Default for DisplayFormats {
    fn default() -> Self {
        let settings = ViewerSettings::default();
        Self {
            date: settings.date_format,
            date_time: settings.date_time_format,
        }
    }
}

/// Renders instants in the selected zone.
#[derive(Debug, Clone, Copy)]
pub struct Localizer<'a> {
    time_zone: Tz,
    formats: &'a DisplayFormats,
}

impl<'a> Localizer<'a> {
    pub fn new(view: ViewState, formats: &'a DisplayFormats) -> Self {
        Self {
            time_zone: view.time_zone,
            formats,
        }
    }

    /// Date label for a chart point stamped in epoch seconds.
    pub fn date_label(&self, epoch_secs: i64) -> String {
        match Utc.timestamp_opt(epoch_secs, 0).single() {
            Some(at) => self.format(at, &self.formats.date),
            None => INVALID_DATE.to_string(),
        }
    }

    /// Date and time for a trade or order instant.
    pub fn instant(&self, instant: &ReportInstant) -> String {
        match instant.at {
            Some(at) => self.format(at, &self.formats.date_time),
            None => INVALID_DATE.to_string(),
        }
    }

    fn format(&self, at: DateTime<Utc>, format: &str) -> String {
        at.with_timezone(&self.time_zone).format(format).to_string()
    }
}
