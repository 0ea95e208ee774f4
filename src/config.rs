/// On-disk config holding the API key (`~/.config/exa/config.yaml`).
use std::ffi::OsString;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const CONFIG_DIR: &str = "exa";
const CONFIG_FILE: &str = "config.yaml";

/// Errors from locating, reading, or writing the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to get home directory")]
    NoHomeDir,

    #[error("failed to read config file {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    #[error("failed to marshal config: {0}")]
    Serialize(#[source] serde_yaml::Error),

    #[error("failed to create config directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write config file {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

/// Persisted settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// A config file at a fixed path.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Store at `$XDG_CONFIG_HOME/exa/config.yaml`, else `~/.config/exa/config.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NoHomeDir` when neither location can be determined.
    pub fn locate() -> Result<Self, ConfigError> {
        let path = config_path(std::env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
            .ok_or(ConfigError::NoHomeDir)?;
        Ok(Self { path })
    }

    /// Store at an explicit path.
    #[must_use]
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the config. A missing or empty file yields `Config::default()`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` on I/O failure and `ConfigError::Parse` on
    /// malformed YAML.
    pub fn load(&self) -> Result<Config, ConfigError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no config file");
                return Ok(Config::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if data.trim().is_empty() {
            return Ok(Config::default());
        }

        serde_yaml::from_str(&data).map_err(|source| ConfigError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    /// Overwrite the config file with owner-only permissions.
    ///
    /// Concurrent saves are not coordinated; the last writer wins.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory or file cannot be written.
    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(dir) = self.path.parent() {
            create_private_dir(dir).map_err(|source| ConfigError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        let data = serde_yaml::to_string(config).map_err(ConfigError::Serialize)?;
        write_private_file(&self.path, data.as_bytes()).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    /// The stored API key, if any.
    ///
    /// # Errors
    ///
    /// Propagates `load` failures.
    pub fn api_key(&self) -> Result<Option<String>, ConfigError> {
        Ok(self.load()?.api_key.filter(|k| !k.trim().is_empty()))
    }
}

/// Resolve the config file path from the config-home override and home dir.
fn config_path(xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> Option<PathBuf> {
    let base = match xdg_config_home.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => home?.join(".config"),
    };
    Some(base.join(CONFIG_DIR).join(CONFIG_FILE))
}

#[cfg(unix)]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::DirBuilderExt;
    fs::DirBuilder::new().recursive(true).mode(0o700).create(dir)
}

#[cfg(not(unix))]
fn create_private_dir(dir: &Path) -> io::Result<()> {
    fs::create_dir_all(dir)
}

#[cfg(unix)]
fn write_private_file(path: &Path, data: &[u8]) -> io::Result<()> {
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?;
    // `mode` only applies on creation.
    file.set_permissions(fs::Permissions::from_mode(0o600))?;
    file.write_all(data)
}

#[cfg(not(unix))]
fn write_private_file(path: &Path, data: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(data)
}
