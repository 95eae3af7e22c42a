use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

/// Name of the directory, under the project root, holding configuration and
/// the persisted store.
pub const STATE_DIR: &str = ".horarios";

/// Project configuration.
///
/// Stored as `.horarios/config.toml` under the project root. Every field has
/// a default, so a missing file behaves like an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Config {
    /// Where the published schedule is fetched from.
    ///
    /// Either an absolute `http(s)` URL, or a path relative to
    /// [`base_url`](Self::base_url).
    pub data_path: String,

    /// The address the schedule page is served from.
    ///
    /// Without it, relative data paths are treated as local files and the
    /// remote source is skipped.
    pub base_url: Option<String>,

    /// Key under which the working copy is persisted.
    pub store_key: String,

    /// File the rendered page is written to, relative to the project root.
    pub output: PathBuf,

    /// Request timeout for the remote source, in seconds. `None` waits
    /// indefinitely.
    pub fetch_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
            base_url: None,
            store_key: default_store_key(),
            output: default_output(),
            fetch_timeout_secs: None,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Read)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the configuration of the project at `root`, falling back to
    /// defaults when there is none.
    #[must_use]
    pub fn load_or_default(root: &Path) -> Self {
        let path = Self::path(root);
        Self::load(&path).unwrap_or_else(|e| {
            tracing::debug!("Using default config ({}): {e}", path.display());
            Self::default()
        })
    }

    /// Saves the configuration to a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be serialized to TOML or if
    /// the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(ConfigError::Write)
    }

    /// Location of the configuration file of the project at `root`.
    #[must_use]
    pub fn path(root: &Path) -> PathBuf {
        root.join(STATE_DIR).join("config.toml")
    }

    /// Request timeout for the remote source.
    #[must_use]
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_secs.map(Duration::from_secs)
    }

    /// Sets the request timeout for the remote source.
    pub fn set_fetch_timeout(&mut self, timeout: Option<Duration>) {
        self.fetch_timeout_secs = timeout.map(|t| t.as_secs());
    }
}

/// Errors reading or writing the configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config file: {0}")]
    Read(#[source] std::io::Error),

    /// The file could not be written.
    #[error("failed to write config file: {0}")]
    Write(#[source] std::io::Error),

    /// The file is not valid TOML for this configuration.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

fn default_data_path() -> String {
    "Estilos completos/JSON/datasite-data.json".to_string()
}

fn default_store_key() -> String {
    "horarios.interclasse.2025".to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from("horarios.html")
}

/// The serialized versions of the configuration.
/// This allows for future changes to the configuration format and to the domain
/// type without breaking compatibility.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_path")]
        data_path: String,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,

        #[serde(default = "default_store_key")]
        store_key: String,

        #[serde(default = "default_output")]
        output: PathBuf,

        #[serde(default, skip_serializing_if = "Option::is_none")]
        fetch_timeout_secs: Option<u64>,
    },
}

impl From<Versions> for Config {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                data_path,
                base_url,
                store_key,
                output,
                fetch_timeout_secs,
            } => Self {
                data_path,
                base_url,
                store_key,
                output,
                fetch_timeout_secs,
            },
        }
    }
}

impl From<Config> for Versions {
    fn from(config: Config) -> Self {
        Self::V1 {
            data_path: config.data_path,
            base_url: config.base_url,
            store_key: config.store_key,
            output: config.output,
            fetch_timeout_secs: config.fetch_timeout_secs,
        }
    }
}
