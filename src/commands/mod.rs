/// Command dispatch: routes `Command` enum variants to their implementations.
pub mod completion;
pub mod configure;
pub mod contents;
pub mod search;
pub mod version;

use std::io::Write;

use crate::api::client::BASE_URL;
use crate::api::{ApiError, ExaClient};
use crate::build_info::BUILD_INFO;
use crate::cli::OutputCtx;
use crate::cli::args::Command;
use crate::config::{ConfigError, ConfigStore};
use crate::errors::CliError;

/// Where API calls go and where the key comes from.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    /// From `--api-key` or `EXA_API_KEY`; takes precedence over the config file.
    pub api_key: Option<String>,
    pub base_url: String,
    /// Overrides the default config location.
    pub config: Option<ConfigStore>,
}

impl ApiSettings {
    /// Production settings with the key given on the command line or in the environment.
    #[must_use]
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            api_key,
            base_url: BASE_URL.to_owned(),
            config: None,
        }
    }

    /// The config store in use.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` when the default location cannot be resolved.
    pub fn config_store(&self) -> Result<ConfigStore, ConfigError> {
        match &self.config {
            Some(store) => Ok(store.clone()),
            None => ConfigStore::locate(),
        }
    }

    /// Flag/env key first, then the config file.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingApiKey` if no source has a key, or a
    /// `ConfigError` if the config file exists but cannot be read.
    pub fn resolve_api_key(&self) -> Result<String, CliError> {
        if let Some(key) = self
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
        {
            return Ok(key.to_owned());
        }

        let store = match self.config_store() {
            Ok(store) => store,
            Err(ConfigError::NoHomeDir) => return Err(ApiError::MissingApiKey.into()),
            Err(err) => return Err(err.into()),
        };
        tracing::debug!(path = %store.path().display(), "reading API key from config");
        store
            .api_key()?
            .ok_or_else(|| ApiError::MissingApiKey.into())
    }

    /// An authenticated client.
    ///
    /// # Errors
    ///
    /// See [`ApiSettings::resolve_api_key`]; also fails if the HTTP client cannot be built.
    pub fn client(&self) -> Result<ExaClient, CliError> {
        let key = self.resolve_api_key()?;
        Ok(ExaClient::with_base_url(&key, &self.base_url)?)
    }
}

/// Dispatch a parsed `Command` to its handler.
///
/// # Errors
///
/// Returns `CliError` on any command failure.
pub fn dispatch<W: Write>(
    command: &Command,
    ctx: &OutputCtx,
    api: &ApiSettings,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Command::Search(args) => search::run(args, ctx, api, out),
        Command::Contents(args) => contents::run(args, ctx, api, out),
        Command::Configure => configure::run(api, out),
        Command::Completion(args) => completion::run(args, out),
        Command::Version => version::run(&BUILD_INFO, out),
    }
}
