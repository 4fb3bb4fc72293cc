// In crates/projections/src/lib.rs

//! Projects a loaded backtest report into charts, a statistics block and tables.
//!
//! [`ReportView`] is the entry point: it owns the report, the viewer's time
//! zone, and one chart handle per chart, and re-runs every projection on
//! [`ReportView::render`] or [`ReportView::change_time_zone`].

pub mod chart;
pub mod error;
pub mod html;
pub mod projection;
pub mod table;
pub mod view;
pub mod view_state;

// Re-export the most important types for easy access from other crates.
pub use chart::{ChartBackend, ChartHandle, ChartKind, ChartSlot, ChartSpec, LiveChart};
pub use error::Error as RenderError;
pub use error::{Error, Result};
pub use html::{HtmlCanvas, PageMode, render_page};
pub use table::{StatLine, Table};
pub use view::{LoadSummary, ReportView};
pub use view_state::{DisplayFormats, ViewState};
