// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("Series point needs a timestamp and a value, got {len} column(s)")]
    ShortSeriesPoint { len: usize },

    #[error("Series point is missing its timestamp")]
    MissingTimestamp,
}

pub type Result<T> = std::result::Result<T, Error>;
