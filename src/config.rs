//! Constants and user settings.
//!
//! Settings live in `~/.todostore/config.toml`. The file is optional; a
//! missing file means defaults, while a file that exists but does not parse
//! is reported rather than ignored.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Deserialize;

use crate::error::{Result, TodoError};
use crate::manager::TitlePolicy;

pub const APP_DIR_NAME: &str = ".todostore";

pub const CONFIG_FILE_NAME: &str = "config.toml";

pub const DEFAULT_LOG_LEVEL: &str = "warn";

pub const SAMPLE_TITLES: [&str; 2] = ["Sample 1", "Sample 2"];

pub const DETAIL_INDENT: &str = "      ";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub seed_samples: bool,
    pub reject_empty_titles: bool,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed_samples: true,
            reject_empty_titles: false,
            log_level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

impl Settings {
    pub fn title_policy(&self) -> TitlePolicy {
        if self.reject_empty_titles {
            TitlePolicy::RejectEmpty
        } else {
            TitlePolicy::AcceptAny
        }
    }

    /// Read settings from `path`, falling back to defaults when it does not exist.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from the default location.
    pub fn load_default() -> Result<Self> {
        Self::load(get_config_file_path()?)
    }

    fn validate(&self) -> Result<()> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(TodoError::config(format!(
                "unknown log_level '{}'; expected one of {}",
                self.log_level,
                LEVELS.join(", ")
            )))
        }
    }
}

pub fn get_app_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(APP_DIR_NAME))
        .ok_or_else(|| TodoError::config("Unable to find home directory"))
}

pub fn get_config_file_path() -> Result<PathBuf> {
    get_app_dir().map(|dir| dir.join(CONFIG_FILE_NAME))
}
