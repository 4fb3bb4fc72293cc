// In crates/report-loader/src/error.rs

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The bytes are not a JSON document.
    #[error("Report is not valid JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// A required sub-document is absent or cannot be read as the expected record.
    #[error("Report field `{path}` is unusable: {reason}")]
    Schema { path: &'static str, reason: String },

    #[error("Failed to read report file: {0}")]
    Read(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
