// Tool settings
// Loaded from $NETTOW_CONFIG, else ~/.config/nettow/settings.toml

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable that overrides the settings file location.
pub const CONFIG_ENV: &str = "NETTOW_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("invalid database alias '{0}'")]
    InvalidAlias(String),
}

/// Where one database alias lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file. Relative paths resolve against the settings file directory.
    pub path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `<alias>.sqlite` for aliases not listed below.
    pub data_dir: Option<PathBuf>,

    /// Explicit alias → database mapping.
    pub databases: BTreeMap<String, DatabaseSettings>,

    /// Directory of the file these settings were loaded from.
    #[serde(skip)]
    base_dir: Option<PathBuf>,
}

impl Settings {
    /// Get the settings file path
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nettow")
            .join("settings.toml")
    }

    /// Load settings from the default location.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path())
    }

    /// Load settings from `path`. A missing file yields defaults; an
    /// unreadable or malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("no settings at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut settings: Settings = toml::from_str(&contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        settings.base_dir = path.parent().map(Path::to_path_buf);

        log::debug!(
            "loaded settings from {} ({} database alias(es))",
            path.display(),
            settings.databases.len()
        );
        Ok(settings)
    }

    /// Parse settings from TOML text (no base directory).
    pub fn from_toml(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<inline>"),
            message: e.to_string(),
        })
    }

    /// Resolve a database alias to a SQLite file path.
    ///
    /// Order: explicit `[databases.<alias>]` entry, then `data_dir`, then the
    /// platform data directory.
    pub fn database_path(&self, alias: &str) -> Result<PathBuf, ConfigError> {
        validate_alias(alias)?;

        if let Some(db) = self.databases.get(alias) {
            return Ok(self.resolve(&db.path));
        }

        let file_name = format!("{alias}.sqlite");
        if let Some(ref dir) = self.data_dir {
            return Ok(self.resolve(dir).join(file_name));
        }

        Ok(dirs::data_dir()
            .map(|d| d.join("nettow"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(file_name))
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        match self.base_dir {
            Some(ref base) if path.is_relative() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

fn validate_alias(alias: &str) -> Result<(), ConfigError> {
    let bad = alias.trim().is_empty()
        || alias == "."
        || alias == ".."
        || alias.contains(['/', '\\']);
    if bad {
        return Err(ConfigError::InvalidAlias(alias.to_string()));
    }
    Ok(())
}
