//! Per-type tag store
//!
//! Maps each tag to the attributes tagged with it. Attribute lists keep the
//! order in which attributes were first tagged and never hold duplicates.
//!
//! # Examples
//!
//! ```
//! use metafeta::domain::TagStore;
//!
//! let mut store = TagStore::new();
//! store
//!     .tag_attribute(
//!         &["colour", "hair_type", "snout_length"],
//!         ["external_features", "identifying_features"],
//!     )
//!     .unwrap();
//!
//! assert_eq!(
//!     store.attributes_for_tag("identifying_features"),
//!     ["colour", "hair_type", "snout_length"]
//! );
//! assert!(store.attribute_tagged_with("colour", "external_features"));
//! ```

use crate::domain::tags::Tags;
use crate::error::{MetafetaError, Result};
use std::collections::BTreeMap;

/// Mapping from tag to its ordered attribute list
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagStore {
    entries: BTreeMap<String, Vec<String>>,
}

impl TagStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag every attribute with every tag
    ///
    /// Attributes already present under a tag keep their position; new ones
    /// are appended. Fails with [`MetafetaError::InvalidArgument`] when no
    /// tags are given or an identifier is blank.
    pub fn tag_attribute<A: AsRef<str>>(
        &mut self,
        attributes: &[A],
        tags: impl Into<Tags>,
    ) -> Result<()> {
        let tags = tags.into();
        if tags.is_empty() {
            return Err(MetafetaError::InvalidArgument(
                "No tags specified".to_string(),
            ));
        }
        if tags.iter().any(str::is_empty) {
            return Err(MetafetaError::InvalidArgument(
                "Blank tag name".to_string(),
            ));
        }

        let attributes = attributes
            .iter()
            .map(|attribute| attribute.as_ref().trim())
            .collect::<Vec<_>>();
        if attributes.iter().any(|attribute| attribute.is_empty()) {
            return Err(MetafetaError::InvalidArgument(
                "Blank attribute name".to_string(),
            ));
        }
        // An empty tag reads the same as an absent one, so don't create it.
        if attributes.is_empty() {
            return Ok(());
        }

        for tag in tags.iter() {
            let list = self.entries.entry(tag.to_string()).or_default();
            for attribute in &attributes {
                if !list.iter().any(|existing| existing == attribute) {
                    list.push(attribute.to_string());
                }
            }
        }

        Ok(())
    }

    /// Attributes tagged with `tag`, in first-tagged order. Empty if the tag is unknown.
    pub fn attributes_for_tag(&self, tag: &str) -> &[String] {
        self.entries
            .get(tag.trim())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `attribute` has been tagged with `tag`
    pub fn attribute_tagged_with(&self, attribute: &str, tag: &str) -> bool {
        let attribute = attribute.trim();
        self.attributes_for_tag(tag)
            .iter()
            .any(|existing| existing == attribute)
    }

    /// Drop a tag and its attributes. Returns whether the tag was present.
    pub fn clear_tag(&mut self, tag: &str) -> bool {
        self.entries.remove(tag.trim()).is_some()
    }

    /// Tags known to this store, sorted by name
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Iterate over `(tag, attributes)` pairs, sorted by tag
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(tag, list)| (tag.as_str(), list.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Builds a store from `(tag, attributes)` pairs with the same dedup rules
/// as [`TagStore::tag_attribute`]. Empty attribute lists are skipped.
impl<T, A> FromIterator<(T, Vec<A>)> for TagStore
where
    T: Into<String>,
    A: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (T, Vec<A>)>>(iter: I) -> Self {
        let mut store = TagStore::new();
        for (tag, attributes) in iter {
            let tag = tag.into().trim().to_string();
            if tag.is_empty() {
                continue;
            }
            for attribute in attributes {
                let attribute = attribute.into().trim().to_string();
                if attribute.is_empty() {
                    continue;
                }
                let list = store.entries.entry(tag.clone()).or_default();
                if !list.contains(&attribute) {
                    list.push(attribute);
                }
            }
        }
        store
    }
}
