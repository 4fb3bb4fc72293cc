// In crates/projections/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A render (or zoom reset) was requested before any report was loaded.
    #[error("No report data available to render")]
    NoData,

    #[error("Invalid display format `{0}`")]
    InvalidFormat(String),

    #[error(transparent)]
    Config(#[from] app_config::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
