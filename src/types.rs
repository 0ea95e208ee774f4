/// Structured error envelope written to stderr in JSON mode.
use serde::{Deserialize, Serialize};

use crate::errors::CliError;

/// A structured error envelope for JSON error output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorOutput {
    /// Always `false`.
    pub ok: bool,
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail in the JSON error envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Machine-readable error code (snake_case).
    pub code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorOutput {
    /// Construct from a `CliError`.
    #[must_use]
    pub fn from_cli_error(err: &CliError) -> Self {
        Self {
            ok: false,
            error: ErrorDetail {
                code: err.code().to_owned(),
                message: err.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::ApiError;

    #[test]
    fn test_envelope_shape() {
        let err = CliError::from(ApiError::Status {
            status: 401,
            message: "invalid api key".to_owned(),
        });
        let envelope = ErrorOutput::from_cli_error(&err);
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "ok": false,
                "error": { "code": "api_error", "message": "API error (401): invalid api key" }
            })
        );
    }
}
