//! Infrastructure layer - Config and metadata files on disk

pub mod config;
pub mod metadata_file;

pub use config::LoaderConfig;
pub use metadata_file::{file_stem_for_type, MetadataFile, TomlFileLoader};
