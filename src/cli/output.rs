//! Output formatting utilities

use crate::domain::TagStore;

/// Format a type's tags, one `tag: attributes` line per tag
pub fn format_store(type_name: &str, extends: &[String], store: &TagStore) -> String {
    let mut output = if extends.is_empty() {
        format!("{}\n", type_name)
    } else {
        format!("{} < {}\n", type_name, extends.join(" < "))
    };

    if store.is_empty() {
        output.push_str("No tags found\n");
        return output;
    }

    for (tag, attributes) in store.iter() {
        output.push_str(&format!("  {}: {}\n", tag, attributes.join(", ")));
    }
    output
}

/// Format a list of attributes for display
pub fn format_attribute_list(attributes: &[String]) -> String {
    if attributes.is_empty() {
        return "No attributes found".to_string();
    }

    let mut output = String::new();
    for attribute in attributes {
        output.push_str(attribute);
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_empty_store() {
        let output = format_store("Dog", &[], &TagStore::new());
        assert_eq!(output, "Dog\nNo tags found\n");
    }

    #[test]
    fn test_format_store_sorted_by_tag() {
        let mut store = TagStore::new();
        store.tag_attribute(&["temperament"], "behaviour").unwrap();
        store.tag_attribute(&["colour", "fur"], "appearance").unwrap();
        let output = format_store("Dog", &["Animal".to_string()], &store);
        assert_eq!(
            output,
            "Dog < Animal\n  appearance: colour, fur\n  behaviour: temperament\n"
        );
    }

    #[test]
    fn test_format_empty_attribute_list() {
        assert_eq!(format_attribute_list(&[]), "No attributes found");
    }

    #[test]
    fn test_format_attribute_list() {
        let attributes = vec!["colour".to_string(), "fur".to_string()];
        assert_eq!(format_attribute_list(&attributes), "colour\nfur\n");
    }
}
