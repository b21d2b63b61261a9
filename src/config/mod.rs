//! Configuration management for `issueflow`.
//!
//! Resolution order:
//! - Data directory: `--data-dir`, then `ISSUEFLOW_DIR`, then `./.issueflow`
//! - Workspace config: `<data-dir>/config.yaml` (optional)
//! - Built-in defaults

use issueflow_lib::{IssueFlowError, IssueRepository, JsonFileStore, Result, SortBy};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = ".issueflow";
pub const CONFIG_FILE: &str = "config.yaml";
pub const DEFAULT_DATA_FILE: &str = "issues.json";
pub const DEFAULT_SESSION_FILE: &str = "session.json";

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Already merged with `ISSUEFLOW_DIR` by clap.
    pub data_dir: Option<PathBuf>,
}

/// Contents of `config.yaml`. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub data_file: Option<String>,
    pub session_file: Option<String>,
    pub default_sort: Option<SortBy>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub data_dir: PathBuf,
    pub data_file: String,
    pub session_file: String,
    pub default_sort: SortBy,
}

impl Config {
    /// Resolve configuration from overrides and the workspace config file.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `config.yaml` exists but is malformed, or `Io` if
    /// it cannot be read.
    pub fn load(overrides: &CliOverrides) -> Result<Self> {
        let data_dir = overrides
            .data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let file = load_config_file(&data_dir.join(CONFIG_FILE))?;
        tracing::debug!(data_dir = %data_dir.display(), "Resolved data directory");

        Ok(Self {
            data_dir,
            data_file: file
                .data_file
                .unwrap_or_else(|| DEFAULT_DATA_FILE.to_string()),
            session_file: file
                .session_file
                .unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string()),
            default_sort: file.default_sort.unwrap_or_default(),
        })
    }

    #[must_use]
    pub fn data_path(&self) -> PathBuf {
        self.data_dir.join(&self.data_file)
    }

    #[must_use]
    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join(&self.session_file)
    }

    #[must_use]
    pub fn open_repository(&self) -> IssueRepository<JsonFileStore> {
        IssueRepository::new(JsonFileStore::new(self.data_path()))
    }
}

fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ConfigFile::default()),
        Err(e) => return Err(e.into()),
    };

    if contents.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(&contents)
        .map_err(|e| IssueFlowError::Config(format!("{}: {e}", path.display())))
}
