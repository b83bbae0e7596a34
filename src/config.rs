use log::debug;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::motp::MotpOptions;

const DIR_NAME: &str = ".motp";
const FILE_NAME: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Defaults for the command line, read from `~/.motp/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub period: Option<u64>,
    pub digits: Option<usize>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Settings, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// An explicit path must exist; the default location is optional.
    pub fn resolve(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
        if let Some(path) = explicit {
            debug!("Loading settings from {}", path.display());
            return Settings::load(path);
        }

        match default_path() {
            Some(path) if path.exists() => {
                debug!("Loading settings from {}", path.display());
                Settings::load(&path)
            }
            _ => {
                debug!("No settings file, using built-in defaults");
                Ok(Settings::default())
            }
        }
    }

    /// Command line values win over the file.
    pub fn options(&self, period: Option<u64>, digits: Option<usize>) -> MotpOptions {
        MotpOptions {
            period: period.or(self.period),
            digits: digits.or(self.digits),
        }
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DIR_NAME).join(FILE_NAME))
}
