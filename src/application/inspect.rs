//! Inspect metadata files use case

use crate::domain::{TagStore, TypeRegistry};
use crate::error::Result;
use crate::infrastructure::{LoaderConfig, TomlFileLoader};
use std::path::PathBuf;

/// Service answering tag queries for types defined by metadata files
///
/// `extends` lists the supertype chain, nearest first: `["Dog", "Animal"]`
/// makes the queried type a subtype of `Dog`, itself a subtype of `Animal`.
pub struct InspectService {
    loader: TomlFileLoader,
    registry: TypeRegistry,
}

impl InspectService {
    /// Create a new inspect service reading files from the configured directory
    pub fn new(config: &LoaderConfig) -> Self {
        let loader = TomlFileLoader::from_config(config);
        InspectService {
            registry: TypeRegistry::with_loader(loader.clone()),
            loader,
        }
    }

    /// All tags of a type
    pub fn show(&self, type_name: &str, extends: &[String]) -> Result<TagStore> {
        self.prepare(type_name, extends)?;
        Ok(self.registry.store(type_name))
    }

    /// Attributes of a type tagged with `tag`
    pub fn attributes(&self, type_name: &str, tag: &str, extends: &[String]) -> Result<Vec<String>> {
        self.prepare(type_name, extends)?;
        Ok(self.registry.attributes_for_tag(type_name, tag))
    }

    /// Whether an attribute of a type is tagged with `tag`
    pub fn check(
        &self,
        type_name: &str,
        attribute: &str,
        tag: &str,
        extends: &[String],
    ) -> Result<bool> {
        self.prepare(type_name, extends)?;
        Ok(self.registry.attribute_tagged_with(type_name, attribute, tag))
    }

    /// Metadata file path for a type
    pub fn path_for(&self, type_name: &str) -> Result<PathBuf> {
        self.loader.path_for(type_name)
    }

    /// Verify every file in the chain, then declare it root first
    fn prepare(&self, type_name: &str, extends: &[String]) -> Result<()> {
        for name in std::iter::once(type_name).chain(extends.iter().map(String::as_str)) {
            self.loader.verify(name)?;
        }

        let mut chain: Vec<&str> = Vec::with_capacity(extends.len() + 1);
        chain.push(type_name);
        chain.extend(extends.iter().map(String::as_str));

        let mut parent: Option<&str> = None;
        for name in chain.into_iter().rev() {
            match parent {
                Some(parent) => self.registry.declare_subtype(name, parent)?,
                None => self.registry.declare(name)?,
            };
            parent = Some(name);
        }
        Ok(())
    }
}
