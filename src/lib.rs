//! metafeta - Tag metadata for type attributes
//!
//! Lets a type tag its attribute names with symbolic tags, query them at
//! runtime and inherit or override them across a type hierarchy. Tags can be
//! declared in code or in per-type TOML metadata files.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::{Metafeta, Supertype, TagStore, Tags, TypeRegistry};
pub use error::{MetafetaError, Result};
