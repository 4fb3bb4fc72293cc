// In crates/core-types/src/lib.rs

pub mod codes;
pub mod error;
pub mod types;

// Re-export the most important types for easy access from other crates.
pub use codes::{OrderDirection, OrderStatus, OrderType};
pub use error::{Error, Result};
pub use types::{
    Order, PortfolioStatistics, Report, ReportInstant, SeriesPoint, Symbol, Trade,
    TradeStatistics,
};
