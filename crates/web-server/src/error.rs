// In crates/web-server/src/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use projections::RenderError;
use report_loader::LoadError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to load report: {0}")]
    Load(#[from] LoadError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(#[from] app_config::Error),

    #[error("Failed to write the report page")]
    Page(#[from] std::fmt::Error),

    #[error("Failed to bind server address: {0}")]
    ServerBindError(#[source] std::io::Error),

    #[error("Server stopped unexpectedly: {0}")]
    Serve(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Converts the error into a status code and a `{ "error": ... }` body.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Load(LoadError::Parse(_) | LoadError::Schema { .. }) => StatusCode::BAD_REQUEST,
            Error::Render(RenderError::NoData) => StatusCode::CONFLICT,
            Error::Config(app_config::Error::UnknownTimeZone(_)) => StatusCode::BAD_REQUEST,
            _ => {
                tracing::error!(error = ?self, "Internal error while handling request.");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
