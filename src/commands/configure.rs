/// `configure` command: prompt for the API key and store it in the config file.
use std::io::Write;
use std::path::PathBuf;

use super::ApiSettings;
use crate::config::{Config, ConfigStore};
use crate::errors::CliError;

const PROMPT: &str = "Enter your Exa API key: ";

/// Run `exa configure`. Input is read without echo.
///
/// # Errors
///
/// Returns `CliError::Prompt` if the terminal cannot be read,
/// `CliError::EmptyApiKey` for blank input, or a config write error.
pub fn run<W: Write>(api: &ApiSettings, out: &mut W) -> Result<(), CliError> {
    let store = api.config_store()?;
    let input = rpassword::prompt_password(PROMPT).map_err(CliError::Prompt)?;
    let path = save_api_key(&store, &input)?;
    writeln!(out, "API key saved to {}", path.display())?;
    Ok(())
}

/// Trim `raw` and write it as the only setting in `store`.
///
/// # Errors
///
/// Returns `CliError::EmptyApiKey` if nothing remains after trimming.
pub fn save_api_key(store: &ConfigStore, raw: &str) -> Result<PathBuf, CliError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(CliError::EmptyApiKey);
    }
    store.save(&Config {
        api_key: Some(key.to_owned()),
    })?;
    tracing::info!(path = %store.path().display(), "API key stored");
    Ok(store.path().to_path_buf())
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store(dir: &TempDir) -> ConfigStore {
        ConfigStore::at(dir.path().join("exa").join("config.yaml"))
    }

    #[test]
    fn test_saves_trimmed_key() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let path = save_api_key(&store, "  exa-key-1\n").unwrap();

        assert_eq!(path, store.path());
        assert_eq!(store.api_key().unwrap().as_deref(), Some("exa-key-1"));
    }

    #[test]
    fn test_blank_key_rejected_and_nothing_written() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);

        let err = save_api_key(&store, " \t\n").unwrap_err();

        assert!(matches!(err, CliError::EmptyApiKey));
        assert_eq!(err.to_string(), "API key cannot be empty");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_replaces_previous_key() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        save_api_key(&store, "first").unwrap();
        save_api_key(&store, "second").unwrap();
        assert_eq!(store.api_key().unwrap().as_deref(), Some("second"));
    }
}
