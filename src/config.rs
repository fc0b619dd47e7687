//! Catalog configuration: where the tables live and how they are encoded

use directories::ProjectDirs;
use encoding_rs::Encoding;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::CatalogPaths;
use crate::schema::TableKind;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Unknown text encoding '{0}'")]
    UnknownEncoding(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the CSV tables
    pub data_dir: PathBuf,
    pub idol_list: String,
    pub skill_info: String,
    pub idol_names: String,
    pub ideal_team: String,
    /// Encoding label understood by the WHATWG encoding standard
    pub encoding: String,
    /// Base for relative image paths; defaults to `data_dir`
    pub image_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            idol_list: TableKind::Idols.schema().source_file.to_string(),
            skill_info: TableKind::Skills.schema().source_file.to_string(),
            idol_names: TableKind::IdolNames.schema().source_file.to_string(),
            ideal_team: TableKind::IdealTeams.schema().source_file.to_string(),
            encoding: "shift_jis".to_string(),
            image_root: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "idol-catalog")
}

/// Default config file location, e.g. `~/.config/idol-catalog/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

/// Directory for the terminal browser's log file
pub fn default_log_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
}

impl Config {
    /// Load a single TOML config file
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `explicit` if given, else the default config file if present,
    /// else built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load_file(path);
        }
        match default_config_path() {
            Some(path) if path.exists() => {
                tracing::debug!(?path, "Using config file");
                Self::load_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    pub fn encoding(&self) -> Result<&'static Encoding, ConfigError> {
        Encoding::for_label(self.encoding.trim().as_bytes())
            .ok_or_else(|| ConfigError::UnknownEncoding(self.encoding.clone()))
    }

    pub fn paths(&self) -> Result<CatalogPaths, ConfigError> {
        Ok(CatalogPaths {
            idols: self.data_dir.join(&self.idol_list),
            skills: self.data_dir.join(&self.skill_info),
            idol_names: self.data_dir.join(&self.idol_names),
            ideal_teams: self.data_dir.join(&self.ideal_team),
            encoding: self.encoding()?,
        })
    }

    pub fn image_root(&self) -> &Path {
        self.image_root.as_deref().unwrap_or(&self.data_dir)
    }
}
