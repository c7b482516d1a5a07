//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "metafeta")]
#[command(about = "Inspect attribute tags defined in metadata files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Directory holding metafeta.toml (default: current directory)
    #[arg(short, long, global = true, default_value = ".")]
    pub dir: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show every tag of a type
    Show {
        /// Type name (e.g., Dog, zoo::DogA)
        type_name: String,

        /// Supertype chain, nearest first
        #[arg(short, long, value_name = "PARENT")]
        extends: Vec<String>,
    },

    /// List the attributes of a type tagged with a tag
    Attrs {
        type_name: String,

        tag: String,

        /// Supertype chain, nearest first
        #[arg(short, long, value_name = "PARENT")]
        extends: Vec<String>,
    },

    /// Check whether an attribute carries a tag (exit code 5 if not)
    Check {
        type_name: String,

        attribute: String,

        tag: String,

        /// Supertype chain, nearest first
        #[arg(short, long, value_name = "PARENT")]
        extends: Vec<String>,
    },

    /// Print the metadata file path for a type
    Path { type_name: String },
}
