use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use pathgen_logging::pathgen_info;
use serde::Deserialize;
use thiserror::Error;

use super::logging::LogDestination;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILENAME: &str = "pathgen.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    Drive,
    Notion,
}

/// Optional settings file. Every field may be omitted; secrets are
/// deliberately not accepted here.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub agent_url: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub youtube_url: Option<String>,
    pub secondary_tool: Option<ToolChoice>,
    pub drive_url: Option<String>,
    pub notion_url: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub log: Option<LogDestination>,
}

impl AppConfig {
    /// Loads `explicit` if given (it must exist), otherwise the default file
    /// if present, otherwise an empty config.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_FILENAME);
                if path.is_file() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        pathgen_info!("Loaded config from {:?}", path);
        Ok(config)
    }
}
