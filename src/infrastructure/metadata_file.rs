//! Per-type metadata files
//!
//! A type's tags can live in a TOML file named after the type, e.g. the
//! metadata for `zoo::DogA` is read from `dog_a.toml`:
//!
//! ```toml
//! clear = ["legacy_features"]
//!
//! [[tag_attribute]]
//! attributes = ["colour", "hair_type"]
//! as = ["external_features", "identifying_features"]
//!
//! [[tag_attribute]]
//! attributes = ["temperament"]
//! as = "behavioural_features"
//! ```
//!
//! `clear` runs first, so a subtype can drop an inherited tag and redefine it
//! in the same file. Types without a file get no extra metadata.

use crate::domain::{MetadataLoader, TagStore, Tags};
use crate::error::{MetafetaError, Result};
use crate::infrastructure::LoaderConfig;
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::debug;

fn acronym_boundary() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").unwrap())
}

fn word_boundary() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"([a-z0-9])([A-Z])").unwrap())
}

fn non_identifier() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"[^\w]+").unwrap())
}

/// File stem for a type name: last path segment, generics dropped, snake_case
///
/// Only word characters survive, so the stem never names another directory.
pub fn file_stem_for_type(type_name: &str) -> Result<String> {
    let without_generics = type_name.split('<').next().unwrap_or(type_name);
    let last = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics);
    let last = non_identifier().replace_all(last, "");
    if last.is_empty() {
        return Err(MetafetaError::InvalidArgument(format!(
            "Type name '{}' has no characters usable in a file name",
            type_name
        )));
    }

    let spaced = acronym_boundary().replace_all(&last, "${1}_${2}");
    Ok(word_boundary()
        .replace_all(&spaced, "${1}_${2}")
        .to_lowercase())
}

/// Contents of a metadata file
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetadataFile {
    /// Tags dropped before any tagging runs
    #[serde(default)]
    pub clear: Vec<String>,

    #[serde(default)]
    pub tag_attribute: Vec<TagAttributeEntry>,
}

/// One `[[tag_attribute]]` table
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TagAttributeEntry {
    pub attributes: Vec<String>,

    #[serde(rename = "as", default)]
    pub tags: Option<TagList>,
}

/// `as = "tag"` or `as = ["tag", ...]`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TagList {
    One(String),
    Many(Vec<String>),
}

impl From<TagList> for Tags {
    fn from(list: TagList) -> Self {
        match list {
            TagList::One(tag) => Tags::from(tag),
            TagList::Many(tags) => Tags::from(tags),
        }
    }
}

impl MetadataFile {
    pub fn parse(contents: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Apply the file to a store. Stops at the first invalid entry.
    pub fn apply(self, store: &mut TagStore) -> Result<()> {
        for tag in &self.clear {
            store.clear_tag(tag);
        }
        for entry in self.tag_attribute {
            let tags = entry.tags.map(Tags::from).unwrap_or_else(Tags::none);
            store.tag_attribute(entry.attributes.as_slice(), tags)?;
        }
        Ok(())
    }
}

/// Loads metadata files from a directory
#[derive(Debug, Clone)]
pub struct TomlFileLoader {
    dir: PathBuf,
    extension: String,
}

impl TomlFileLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        TomlFileLoader {
            dir: dir.into(),
            extension: "toml".to_string(),
        }
    }

    pub fn from_config(config: &LoaderConfig) -> Self {
        TomlFileLoader {
            dir: config.metadata_dir.clone(),
            extension: config.extension.clone(),
        }
    }

    /// Path of the metadata file for `type_name`
    pub fn path_for(&self, type_name: &str) -> Result<PathBuf> {
        let stem = file_stem_for_type(type_name)?;
        Ok(self.dir.join(format!("{}.{}", stem, self.extension)))
    }

    /// Read and parse the file for `type_name`; `None` if there is no file
    pub fn read(&self, type_name: &str) -> Result<Option<MetadataFile>> {
        let path = self.path_for(type_name)?;
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(type_name, path = %path.display(), "No metadata file");
                return Ok(None);
            }
            Err(e) => return Err(MetafetaError::Io(e)),
        };

        MetadataFile::parse(&contents)
            .map(Some)
            .map_err(|e| MetafetaError::MetadataFile {
                path,
                message: e.to_string(),
            })
    }

    /// Check that the file for `type_name`, if any, parses and applies cleanly
    pub fn verify(&self, type_name: &str) -> Result<()> {
        self.load(type_name, &mut TagStore::new())
    }
}

impl MetadataLoader for TomlFileLoader {
    fn load(&self, type_name: &str, store: &mut TagStore) -> Result<()> {
        let Some(file) = self.read(type_name)? else {
            return Ok(());
        };

        let path = self.path_for(type_name)?;
        file.apply(store).map_err(|e| match e {
            MetafetaError::InvalidArgument(message) => MetafetaError::MetadataFile {
                path: path.clone(),
                message,
            },
            other => other,
        })?;

        debug!(type_name, path = %path.display(), "Loaded metadata file");
        Ok(())
    }
}
