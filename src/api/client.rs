/// Blocking HTTP client for the Exa REST API.
use std::time::Instant;

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::errors::ApiError;
use super::types::{
    ApiErrorBody, ContentsRequest, ContentsResponse, SearchRequest, SearchResponse,
};

/// Production API host.
pub const BASE_URL: &str = "https://api.exa.ai";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "EXA_API_KEY";

const API_KEY_HEADER: &str = "x-api-key";

/// An authenticated client. One `POST` per call; no retries.
pub struct ExaClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl ExaClient {
    /// Client against `base_url` ([`BASE_URL`] in production).
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiKey` for an empty key, or
    /// `ApiError::ClientBuild` if the TLS backend cannot be initialized.
    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, ApiError> {
        if api_key.trim().is_empty() {
            return Err(ApiError::MissingApiKey);
        }
        let http = Client::builder()
            .user_agent(concat!("exa-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ApiError::ClientBuild)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// `POST /search`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, status >= 400, or a malformed body.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResponse, ApiError> {
        self.post("/search", request)
    }

    /// `POST /contents`.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, status >= 400, or a malformed body.
    pub fn contents(&self, request: &ContentsRequest) -> Result<ContentsResponse, ApiError> {
        self.post("/contents", request)
    }

    fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(%url, "sending request");
        let start = Instant::now();

        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()?;

        let status = response.status().as_u16();
        let text = response.text()?;
        tracing::debug!(
            status,
            bytes = text.len(),
            elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
            "response received"
        );

        if status >= 400 {
            return Err(status_error(status, &text));
        }

        serde_json::from_str(&text).map_err(ApiError::Decode)
    }
}

/// Prefer the server's `{"error": ...}` message; fall back to the raw body.
fn status_error(status: u16, body: &str) -> ApiError {
    let message = match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        _ => body.to_owned(),
    };
    ApiError::Status { status, message }
}
