/// Errors from the Exa HTTP layer.
use thiserror::Error;

/// Typed errors from building the client or performing a call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No API key from the flag, the environment, or the config file.
    #[error(
        "API key required: set EXA_API_KEY environment variable, use --api-key flag, or run 'exa configure'"
    )]
    MissingApiKey,

    /// The HTTP client itself could not be constructed (TLS backend init).
    #[error("failed to initialize HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),

    /// Connection, TLS, or body read failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with status >= 400.
    #[error("API error ({status}): {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided message, or the raw body when it was not structured.
        message: String,
    },

    /// A success body that does not match the expected response shape.
    #[error("failed to parse response: {0}")]
    Decode(#[source] serde_json::Error),
}
