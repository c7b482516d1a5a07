//! Tag sets accepted by tagging calls
//!
//! A tagging call may name a single tag or several. Both forms normalize to a
//! [`Tags`] set so the store only ever deals with one shape.
//!
//! ```
//! use metafeta::domain::Tags;
//!
//! let single = Tags::from("identifying_features");
//! let many = Tags::from(["external_features", "identifying_features"]);
//! assert_eq!(single.len(), 1);
//! assert!(many.contains("external_features"));
//! ```

use std::collections::BTreeSet;

/// Normalized, deduplicated set of tag identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    /// An empty tag set. Registering with it fails.
    pub fn none() -> Self {
        Tags(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.contains(tag.trim())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Tags(
            iter.into_iter()
                .map(|tag| tag.into().trim().to_string())
                .collect(),
        )
    }
}

impl From<&str> for Tags {
    fn from(tag: &str) -> Self {
        std::iter::once(tag).collect()
    }
}

impl From<String> for Tags {
    fn from(tag: String) -> Self {
        std::iter::once(tag).collect()
    }
}

impl<S: Into<String>, const N: usize> From<[S; N]> for Tags {
    fn from(tags: [S; N]) -> Self {
        tags.into_iter().collect()
    }
}

impl<S: Into<String>> From<Vec<S>> for Tags {
    fn from(tags: Vec<S>) -> Self {
        tags.into_iter().collect()
    }
}

impl<S: AsRef<str>> From<&[S]> for Tags {
    fn from(tags: &[S]) -> Self {
        tags.iter().map(|tag| tag.as_ref().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_tag() {
        let tags = Tags::from("identifying_features");
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["identifying_features"]);
    }

    #[test]
    fn test_collection_is_deduplicated_and_sorted() {
        let tags = Tags::from(vec!["b", "a", "b"]);
        assert_eq!(tags.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_identifiers_are_trimmed() {
        let tags = Tags::from(["  work ", "work"]);
        assert_eq!(tags.len(), 1);
        assert!(tags.contains("work"));
    }

    #[test]
    fn test_none_is_empty() {
        assert!(Tags::none().is_empty());
        assert!(Tags::from(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn test_from_slice_of_strings() {
        let owned = vec!["x".to_string(), "y".to_string()];
        let tags = Tags::from(owned.as_slice());
        assert_eq!(tags.len(), 2);
    }
}
