/// Errors raised while assembling a request, before any network I/O.
use thiserror::Error;

/// Invalid or missing user input.
#[derive(Debug, Error)]
pub enum RequestError {
    /// `search` was run without a query.
    #[error("query is required")]
    MissingQuery,

    /// `contents` was run without any URL.
    #[error("at least one URL is required")]
    MissingUrls,

    /// `--summary-schema` is not valid JSON.
    #[error("invalid summary-schema JSON: {0}")]
    InvalidSchema(#[source] serde_json::Error),
}
