//! Configuration management

use crate::error::{MetafetaError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "metafeta.toml";
const DEFAULT_METADATA_DIR: &str = "metadata";
const DEFAULT_EXTENSION: &str = "toml";

/// Where metadata files live, read from metafeta.toml
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Directory holding one metadata file per type
    #[serde(default = "default_metadata_dir")]
    pub metadata_dir: PathBuf,

    /// Extension of metadata files, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_metadata_dir() -> PathBuf {
    PathBuf::from(DEFAULT_METADATA_DIR)
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for LoaderConfig {
    fn default() -> Self {
        LoaderConfig {
            metadata_dir: default_metadata_dir(),
            extension: default_extension(),
        }
    }
}

impl LoaderConfig {
    /// Load metafeta.toml from the given directory, or defaults if it is absent
    ///
    /// A relative `metadata_dir` is resolved against `path`. The METAFETA_DIR
    /// environment variable takes precedence over the file.
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_FILENAME);

        let config = match fs::read_to_string(&config_path) {
            Ok(contents) => Self::parse(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(MetafetaError::Io(e)),
        };

        Ok(config
            .with_dir_override(std::env::var("METAFETA_DIR").ok())
            .resolved_against(path))
    }

    /// Parse the contents of a metafeta.toml
    pub fn parse(contents: &str) -> Result<Self> {
        let mut config: LoaderConfig = toml::from_str(contents).map_err(|e| {
            MetafetaError::Config(format!("Failed to parse {}: {}", CONFIG_FILENAME, e))
        })?;

        config.extension = config.extension.trim_start_matches('.').to_string();
        if config.extension.is_empty() {
            return Err(MetafetaError::Config(
                "Metadata file extension cannot be empty".to_string(),
            ));
        }
        Ok(config)
    }

    fn with_dir_override(mut self, dir: Option<String>) -> Self {
        if let Some(dir) = dir.filter(|d| !d.trim().is_empty()) {
            self.metadata_dir = PathBuf::from(dir);
        }
        self
    }

    fn resolved_against(mut self, base: &Path) -> Self {
        if self.metadata_dir.is_relative() {
            self.metadata_dir = base.join(&self.metadata_dir);
        }
        self
    }
}
