//! Error types for metafeta

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for metafeta
#[derive(Debug, Error)]
pub enum MetafetaError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid metadata file {}: {message}", path.display())]
    MetadataFile { path: PathBuf, message: String },
}

impl MetafetaError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            MetafetaError::InvalidArgument(_) => 2,
            MetafetaError::MetadataFile { .. } => 3,
            MetafetaError::Config(_) => 4,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            MetafetaError::InvalidArgument(msg) if msg.contains("No tags specified") => {
                format!(
                    "{}\n\n\
                    Every tagging call needs at least one tag:\n\
                    [[tag_attribute]]\n\
                    attributes = [\"colour\"]\n\
                    as = \"identifying_features\"",
                    self
                )
            }
            MetafetaError::MetadataFile { path, message } => {
                format!(
                    "Invalid metadata file: {}\n{}\n\n\
                    Suggestions:\n\
                    • Each [[tag_attribute]] entry needs 'attributes' and 'as'\n\
                    • 'as' accepts a single tag or a list of tags\n\
                    • Use 'clear' to drop inherited tags before redefining them",
                    path.display(),
                    message
                )
            }
            MetafetaError::Config(msg) => {
                format!(
                    "{}\n\n\
                    Suggestions:\n\
                    • Check metafeta.toml in the metadata root\n\
                    • Set METAFETA_DIR to the directory holding metadata files",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using MetafetaError
pub type Result<T> = std::result::Result<T, MetafetaError>;
