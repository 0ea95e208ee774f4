/// Top-level error for a single `exa` invocation.
use std::io;

use thiserror::Error;

use crate::api::ApiError;
use crate::cli::output::RenderError;
use crate::config::ConfigError;
use crate::request::RequestError;

/// Everything a command can fail with. All variants end the process with status 1.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Request(#[from] RequestError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Render(#[from] RenderError),

    /// The masked key prompt could not read from the terminal.
    #[error("failed to read API key: {0}")]
    Prompt(#[source] io::Error),

    #[error("API key cannot be empty")]
    EmptyApiKey,
}

impl CliError {
    /// Machine-readable error code (snake_case) for the JSON error envelope.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Config(_) => "config_error",
            Self::Request(_) => "invalid_input",
            Self::Api(ApiError::MissingApiKey) => "missing_api_key",
            Self::Api(ApiError::ClientBuild(_) | ApiError::Transport(_)) => "transport_error",
            Self::Api(ApiError::Status { .. }) => "api_error",
            Self::Api(ApiError::Decode(_)) => "malformed_response",
            Self::Render(_) => "output_error",
            Self::Prompt(_) | Self::EmptyApiKey => "invalid_api_key",
        }
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Render(RenderError::Io(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_distinguish_api_failures() {
        let status = CliError::from(ApiError::Status {
            status: 404,
            message: "not found".to_owned(),
        });
        assert_eq!(status.code(), "api_error");
        assert_eq!(status.to_string(), "API error (404): not found");

        let missing = CliError::from(ApiError::MissingApiKey);
        assert_eq!(missing.code(), "missing_api_key");

        let invalid = CliError::from(RequestError::MissingQuery);
        assert_eq!(invalid.code(), "invalid_input");
        assert_eq!(invalid.to_string(), "query is required");
    }
}
